//! The attribute defaults that are in effect at a point of a DOT file.

use crate::dot::parser::ast;
use crate::model::Attributes;

/// The graph, node and edge defaults of one scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeFrame {
    pub graph: Attributes,
    pub node: Attributes,
    pub edge: Attributes,
}

impl ScopeFrame {
    pub fn get(&self, target: ast::AttrStmtTarget) -> &Attributes {
        match target {
            ast::AttrStmtTarget::Graph => &self.graph,
            ast::AttrStmtTarget::Node => &self.node,
            ast::AttrStmtTarget::Edge => &self.edge,
        }
    }

    pub fn get_mut(&mut self, target: ast::AttrStmtTarget) -> &mut Attributes {
        match target {
            ast::AttrStmtTarget::Graph => &mut self.graph,
            ast::AttrStmtTarget::Node => &mut self.node,
            ast::AttrStmtTarget::Edge => &mut self.edge,
        }
    }
}

/// A stack of scope frames. Entering a subgraph pushes a copy of the current
/// frame, so changes inside of the subgraph are dropped when it is closed.
/// Default statements only change the top frame, and only affect the
/// elements that are declared after them.
#[derive(Debug)]
pub struct ScopeStack {
    stack: Vec<ScopeFrame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            stack: vec![ScopeFrame::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self) {
        let top = self.current().clone();
        self.stack.push(top);
    }

    pub fn pop(&mut self) {
        assert!(self.stack.len() > 1, "Popping the outermost scope");
        self.stack.pop();
    }

    pub fn current(&self) -> &ScopeFrame {
        &self.stack[self.stack.len() - 1]
    }

    fn current_mut(&mut self) -> &mut ScopeFrame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Records the defaults of a `graph|node|edge [...]` statement.
    pub fn set_defaults(
        &mut self,
        target: ast::AttrStmtTarget,
        list: &ast::AttributeList,
    ) {
        let frame = self.current_mut().get_mut(target);
        for (k, v) in list.iter() {
            frame.insert(k, v.clone());
        }
    }

    /// \returns the effective attributes of an element of kind \p target:
    /// the current defaults overlaid with the inline list \p list, where
    /// later entries win.
    pub fn resolve(
        &self,
        target: ast::AttrStmtTarget,
        list: &ast::AttributeList,
    ) -> Attributes {
        let mut attrs = self.current().get(target).clone();
        for (k, v) in list.iter() {
            attrs.insert(k, v.clone());
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::parser::ast::AttrStmtTarget::*;

    fn list(items: &[(&str, &str)]) -> ast::AttributeList {
        let mut list = ast::AttributeList::new();
        for (k, v) in items {
            list.add_attr_str(k, v);
        }
        list
    }

    #[test]
    fn inline_wins() {
        let mut scopes = ScopeStack::new();
        scopes.set_defaults(Node, &list(&[("shape", "box"), ("color", "red")]));
        let a = scopes.resolve(Node, &list(&[]));
        let b = scopes.resolve(Node, &list(&[("shape", "oval"), ("shape", "egg")]));
        assert_eq!(a.get_str("shape"), Some("box"));
        assert_eq!(b.get_str("shape"), Some("egg"));
        assert_eq!(b.get_str("color"), Some("red"));
        assert!(scopes.resolve(Edge, &list(&[])).is_empty());
    }

    #[test]
    fn frames_are_copied() {
        let mut scopes = ScopeStack::new();
        scopes.set_defaults(Node, &list(&[("fillcolor", "blue")]));
        scopes.push();
        assert_eq!(scopes.depth(), 2);
        scopes.set_defaults(Node, &list(&[("fillcolor", "red")]));
        scopes.set_defaults(Graph, &list(&[("rank", "same")]));
        assert_eq!(
            scopes.resolve(Node, &list(&[])).get_str("fillcolor"),
            Some("red")
        );
        scopes.pop();
        assert_eq!(
            scopes.resolve(Node, &list(&[])).get_str("fillcolor"),
            Some("blue")
        );
        assert!(scopes.current().graph.is_empty());
    }
}
