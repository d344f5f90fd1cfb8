//! A graph builder that converts parsed AST trees to graphs.

use super::scope::ScopeStack;
use crate::adt::map::ScopedMap;
use crate::attrs::{self, Context};
use crate::dot::parser::ast;
use crate::error::ImportError;
use crate::model::{AttrValue, Graph, GraphHandle, GraphType, NodeHandle};
use std::collections::{HashMap, HashSet};

// The methods in this file walk the statements of one top-level graph in
// source order and materialize the nodes, edges and subgraphs into the graph
// model. Attribute defaults follow the lexical scopes of the file. Node and
// subgraph names are global to the top-level graph: when a subgraph is
// closed its names are hoisted into the enclosing scope, so later siblings
// find them.

/// The nodes that are mentioned in a subgraph, in order of first mention.
#[derive(Debug, Default)]
struct Members {
    list: Vec<NodeHandle>,
    seen: HashSet<NodeHandle>,
}

impl Members {
    fn add(&mut self, node: NodeHandle) {
        if self.seen.insert(node) {
            self.list.push(node);
        }
    }
}

/// This class constructs an attributed graph from the parsed AST.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
    // The graph that receives the nodes and edges of the current scope.
    current: GraphHandle,
    /// The attribute defaults, which change as we enter and leave different
    /// regions of the graph.
    scopes: ScopeStack,
    // Maps node names to nodes.
    nodes: ScopedMap<String, NodeHandle>,
    // Maps subgraph names to the node that holds them and the nested graph.
    subgraphs: ScopedMap<String, (NodeHandle, GraphHandle)>,
    // The nodes that are mentioned in each open subgraph. These are the
    // endpoints of edges that use the subgraph as an operand.
    mentioned: Vec<Members>,
    // The members of closed named subgraphs, used when they are reopened.
    closed: HashMap<GraphHandle, Members>,
    // Used for naming anonymous subgraphs.
    anonymous: usize,
}

impl GraphBuilder {
    pub fn new(kind: GraphType, name: Option<&str>) -> Self {
        let graph = Graph::new(kind, name);
        let current = graph.root();
        Self {
            graph,
            current,
            scopes: ScopeStack::new(),
            nodes: ScopedMap::new(),
            subgraphs: ScopedMap::new(),
            mentioned: Vec::new(),
            closed: HashMap::new(),
            anonymous: 0,
        }
    }

    pub fn visit_graph(&mut self, graph: &ast::Graph) -> Result<(), ImportError> {
        self.graph.set_strict(graph.strict);
        self.nodes.push();
        self.subgraphs.push();

        self.visit_stmt_list(&graph.list)?;

        self.subgraphs.pop();
        self.nodes.pop();

        #[cfg(feature = "log")]
        log::debug!(
            "Built graph {:?} with {} nodes, {} edges and {} subgraphs",
            self.graph.name(self.graph.root()),
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.graph_count() - 1
        );
        Ok(())
    }

    pub fn get(self) -> Graph {
        self.graph
    }

    fn visit_stmt_list(&mut self, list: &ast::StmtList) -> Result<(), ImportError> {
        for stmt in &list.list {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &ast::Stmt) -> Result<(), ImportError> {
        match stmt {
            ast::Stmt::Edge(e) => self.visit_edge(e),
            ast::Stmt::Node(n) => self.visit_node(n),
            ast::Stmt::Attribute(a) => self.visit_att(a),
            ast::Stmt::SubGraph(g) => self.visit_subgraph(g).map(|_| ()),
        }
    }

    fn check_list(
        ctx: Context,
        list: &ast::AttributeList,
    ) -> Result<(), ImportError> {
        for (name, value) in list.iter() {
            attrs::validate(ctx, name, value)?;
        }
        Ok(())
    }

    fn mention(&mut self, node: NodeHandle) {
        if let Some(members) = self.mentioned.last_mut() {
            members.add(node);
        }
    }

    /// Finds the node named \p name, or creates it in the current graph with
    /// the current node defaults and the attributes \p list.
    /// If the node exists and \p merge is set then the attributes in \p list
    /// are merged into the node. Defaults are never applied to nodes that
    /// already exist.
    fn init_node_with_name(
        &mut self,
        name: &str,
        list: &ast::AttributeList,
        merge: bool,
    ) -> NodeHandle {
        if let Some(node) = self.nodes.get(name).copied() {
            if merge {
                let attrs = self.graph.node_mut(node).attrs_mut();
                for (k, v) in list.iter() {
                    attrs.insert(k, v.clone());
                }
            }
            self.mention(node);
            return node;
        }

        let attrs = self.scopes.resolve(ast::AttrStmtTarget::Node, list);
        let node = self.graph.add_node(self.current, name, attrs);
        self.nodes.insert(name.to_string(), node);
        self.mention(node);
        node
    }

    fn visit_node(&mut self, n: &ast::NodeStmt) -> Result<(), ImportError> {
        Self::check_list(Context::Node, &n.list)?;
        self.init_node_with_name(&n.id.name.value, &n.list, true);
        Ok(())
    }

    fn visit_att(&mut self, att: &ast::AttrStmt) -> Result<(), ImportError> {
        let ctx = match att.target {
            ast::AttrStmtTarget::Graph => Context::Graph,
            ast::AttrStmtTarget::Node => Context::Node,
            ast::AttrStmtTarget::Edge => Context::Edge,
        };
        Self::check_list(ctx, &att.list)?;
        self.scopes.set_defaults(att.target, &att.list);

        if let ast::AttrStmtTarget::Graph = att.target {
            let attrs = self.graph.attrs_mut(self.current);
            for (k, v) in att.list.iter() {
                attrs.insert(k, v.clone());
            }
        }
        Ok(())
    }

    /// Visits the subgraph \p sg and \returns the nodes that are mentioned
    /// in it, including the nodes of its own subgraphs.
    fn visit_subgraph(
        &mut self,
        sg: &ast::SubGraph,
    ) -> Result<Vec<NodeHandle>, ImportError> {
        let name = sg.name.as_ref().map(|n| n.value.as_str());
        let existing = name.and_then(|n| self.subgraphs.get(n).copied());

        let nested = match existing {
            Some((_, nested)) => {
                #[cfg(feature = "log")]
                log::debug!("Reopening subgraph {:?}", name);
                nested
            }
            None => {
                let node_name = match name {
                    Some(name) => name.to_string(),
                    None => {
                        self.anonymous += 1;
                        format!("%{}", self.anonymous)
                    }
                };
                // A new subgraph inherits the graph attributes that are in
                // effect.
                let attrs = self.scopes.current().graph.clone();
                let (node, nested) =
                    self.graph.add_subgraph(self.current, &node_name, name, attrs);
                if let Some(name) = name {
                    self.subgraphs.insert(name.to_string(), (node, nested));
                }
                #[cfg(feature = "log")]
                log::debug!("Created subgraph {}", node_name);
                nested
            }
        };

        let prev = self.current;
        self.current = nested;
        self.scopes.push();
        self.nodes.push();
        self.subgraphs.push();
        // A reopened subgraph still holds the nodes of its earlier bodies.
        let members = self.closed.remove(&nested).unwrap_or_default();
        self.mentioned.push(members);

        self.visit_stmt_list(&sg.list)?;

        let members = self.mentioned.pop().unwrap_or_default();
        self.subgraphs.hoist();
        self.nodes.hoist();
        self.scopes.pop();
        self.current = prev;

        let mentioned = members.list.clone();
        for node in &mentioned {
            self.mention(*node);
        }
        if name.is_some() {
            self.closed.insert(nested, members);
        }
        Ok(mentioned)
    }

    /// \returns the nodes that an edge operand stands for, with the port of
    /// the endpoint.
    fn visit_operand(
        &mut self,
        op: &ast::EdgeOperand,
    ) -> Result<Vec<(NodeHandle, Option<String>)>, ImportError> {
        match op {
            ast::EdgeOperand::Node(id) => {
                let empty = ast::AttributeList::new();
                let node = self.init_node_with_name(&id.name.value, &empty, false);
                Ok(vec![(node, id.port.clone())])
            }
            ast::EdgeOperand::SubGraph(sg) => {
                let nodes = self.visit_subgraph(sg)?;
                if nodes.is_empty() {
                    let name = sg
                        .name
                        .as_ref()
                        .map_or("anonymous subgraph".to_string(), |n| {
                            format!("subgraph {}", n.value)
                        });
                    return Err(ImportError::UnresolvedEndpoint(format!(
                        "{} has no nodes",
                        name
                    )));
                }
                Ok(nodes.into_iter().map(|n| (n, None)).collect())
            }
        }
    }

    fn visit_edge(&mut self, e: &ast::EdgeStmt) -> Result<(), ImportError> {
        Self::check_list(Context::Edge, &e.list)?;

        let mut operands = vec![self.visit_operand(&e.from)?];
        for (dest, _) in &e.to {
            operands.push(self.visit_operand(dest)?);
        }

        for hop in operands.windows(2) {
            for (from, from_port) in &hop[0] {
                for (to, to_port) in &hop[1] {
                    let mut attrs =
                        self.scopes.resolve(ast::AttrStmtTarget::Edge, &e.list);
                    if let Some(port) = from_port {
                        let port = AttrValue::from_text(port);
                        attrs::validate(Context::Edge, "tailport", &port)?;
                        attrs.insert("tailport", port);
                    }
                    if let Some(port) = to_port {
                        let port = AttrValue::from_text(port);
                        attrs::validate(Context::Edge, "headport", &port)?;
                        attrs.insert("headport", port);
                    }
                    self.graph.add_edge(self.current, *from, *to, attrs);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::parser::DotParser;

    fn build(input: &str) -> Result<Graph, ImportError> {
        let mut parser = DotParser::new(input);
        let graphs = parser.process()?;
        let ast = &graphs[0];
        let kind = if ast.directed {
            GraphType::Digraph
        } else {
            GraphType::Graph
        };
        let mut builder = GraphBuilder::new(kind, None);
        builder.visit_graph(ast)?;
        Ok(builder.get())
    }

    fn node_attr<'a>(g: &'a Graph, node: &str, attr: &str) -> Option<&'a str> {
        let n = g.find_node(node)?;
        g.node(n).attrs().get_str(attr)
    }

    #[test]
    fn defaults_are_not_retroactive() {
        let g = build("graph { a; node[shape=box]; b; a[color=red]; a -- c }")
            .unwrap();
        assert_eq!(node_attr(&g, "a", "shape"), None);
        assert_eq!(node_attr(&g, "a", "color"), Some("red"));
        assert_eq!(node_attr(&g, "b", "shape"), Some("box"));
        assert_eq!(node_attr(&g, "c", "shape"), Some("box"));
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn redefinition_merges_inline_only() {
        let g = build("digraph { a[label=x]; node[color=blue]; a[label=y] }")
            .unwrap();
        assert_eq!(node_attr(&g, "a", "label"), Some("y"));
        assert_eq!(node_attr(&g, "a", "color"), None);
    }

    #[test]
    fn subgraph_fan_out() {
        let g = build("digraph { a -> { b c } -> d }").unwrap();
        let root = g.root();
        assert_eq!(g.edges(root).len(), 4);
        let names: Vec<(&str, &str)> = g
            .edges(root)
            .iter()
            .map(|e| {
                let e = g.edge(*e);
                (g.node(e.source()).name(), g.node(e.target()).name())
            })
            .collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        // The operand subgraph is an anonymous nested graph.
        assert_eq!(g.graph_count(), 2);
        assert_eq!(g.node(g.nodes(root)[1]).name(), "%1");
    }

    #[test]
    fn reopened_operand() {
        let g = build("digraph { subgraph s { a } subgraph s {} -> b }").unwrap();
        let root = g.root();
        assert_eq!(g.edges(root).len(), 1);
        let e = g.edge(g.edges(root)[0]);
        assert_eq!(g.node(e.source()).name(), "a");
        assert_eq!(g.node(e.target()).name(), "b");

        let g = build("digraph { subgraph s { a } subgraph s { c } -> b }").unwrap();
        assert_eq!(g.edges(g.root()).len(), 2);
    }

    #[test]
    fn repeated_mentions_fan_out_once() {
        let g = build("digraph { { a b a; a -> b } -> c }").unwrap();
        let root = g.root();
        let targets: Vec<(&str, &str)> = g
            .edges(root)
            .iter()
            .map(|e| {
                let e = g.edge(*e);
                (g.node(e.source()).name(), g.node(e.target()).name())
            })
            .collect();
        assert_eq!(targets, vec![("a", "c"), ("b", "c")]);
    }

    #[test]
    fn large_flat_graph() {
        let mut text = String::from("digraph {");
        for i in 0..20000 {
            text.push_str(&format!(" n{} -> n{};", i, i + 1));
        }
        text.push('}');
        let g = build(&text).unwrap();
        assert_eq!(g.node_count(), 20001);
        assert_eq!(g.edge_count(), 20000);
    }

    #[test]
    fn empty_operand() {
        let err = build("digraph { a -> {} }").unwrap_err();
        assert!(matches!(err, ImportError::UnresolvedEndpoint(_)));
    }

    #[test]
    fn endpoint_ports() {
        let g = build("digraph { edge[tailport=s]; a:p:ne -> b:w; c -> d }").unwrap();
        let root = g.root();
        let e0 = g.edge(g.edges(root)[0]).attrs();
        assert_eq!(e0.get_str("tailport"), Some("p:ne"));
        assert_eq!(e0.get_str("headport"), Some("w"));
        let e1 = g.edge(g.edges(root)[1]).attrs();
        assert_eq!(e1.get_str("tailport"), Some("s"));
        assert_eq!(e1.get_str("headport"), None);

        assert!(build("digraph { a:p:up -> b }").is_err());
    }

    #[test]
    fn subgraph_inherits_graph_defaults() {
        let g = build("digraph { graph[color=red]; subgraph cluster_x { a } }")
            .unwrap();
        let cluster = g.find_subgraph("cluster_x").unwrap();
        assert_eq!(g.attrs(cluster).get_str("color"), Some("red"));
        assert_eq!(g.attrs(g.root()).get_str("color"), Some("red"));
    }

    #[test]
    fn invalid_attribute() {
        let err = build("digraph { a[height=abc] }").unwrap_err();
        match err {
            ImportError::Attribute(err) => assert_eq!(err.name, "height"),
            _ => panic!("unexpected error {}", err),
        }
    }
}
