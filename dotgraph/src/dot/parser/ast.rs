//! An AST that represents the GraphViz file format.

/// The lexical form that an ID had in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// [a-zA-Z_][a-zA-Z_0-9]*
    Plain,
    /// [-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)
    Numeral,
    /// "..."
    Quoted,
    /// <...>
    Html,
}

/// A DOT ID: the text and the way it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotId {
    pub value: String,
    pub kind: IdKind,
}

impl DotId {
    pub fn new(value: &str, kind: IdKind) -> Self {
        Self {
            value: value.to_string(),
            kind,
        }
    }

    pub fn plain(value: &str) -> Self {
        Self::new(value, IdKind::Plain)
    }

    pub fn quoted(value: &str) -> Self {
        Self::new(value, IdKind::Quoted)
    }

    pub fn html(value: &str) -> Self {
        Self::new(value, IdKind::Html)
    }

    /// Picks the simplest lexical form that can represent \p value.
    pub fn from_text(value: &str) -> Self {
        if is_plain_id(value) {
            Self::plain(value)
        } else if is_numeral(value) {
            Self::new(value, IdKind::Numeral)
        } else {
            Self::quoted(value)
        }
    }

    pub fn is_html(&self) -> bool {
        self.kind == IdKind::Html
    }
}

impl std::fmt::Display for DotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            IdKind::Html => write!(f, "<{}>", self.value),
            IdKind::Quoted => write!(f, "\"{}\"", escape_quotes(&self.value)),
            IdKind::Plain | IdKind::Numeral => {
                if is_plain_id(&self.value) || is_numeral(&self.value) {
                    write!(f, "{}", self.value)
                } else {
                    write!(f, "\"{}\"", escape_quotes(&self.value))
                }
            }
        }
    }
}

const KEYWORDS: [&str; 6] =
    ["graph", "digraph", "subgraph", "node", "edge", "strict"];

/// \returns True if \p s can be written as an unquoted identifier.
pub fn is_plain_id(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = chars.next().map_or(false, |c| {
        c.is_ascii_alphabetic() || c == '_' || (c as u32) >= 0x80
    });
    first_ok
        && chars.all(|c| {
            c.is_ascii_alphanumeric() || c == '_' || (c as u32) >= 0x80
        })
        && !KEYWORDS.contains(&s.to_ascii_lowercase().as_str())
}

/// \returns True if \p s is a DOT numeral.
pub fn is_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let int = parts.next().unwrap_or("");
    let frac = parts.next();
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    match frac {
        None => !int.is_empty() && all_digits(int),
        Some(frac) => {
            all_digits(int)
                && all_digits(frac)
                && !(int.is_empty() && frac.is_empty())
        }
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}

// "first : <f0>"
#[derive(Debug, Clone, PartialEq)]
pub struct NodeId {
    pub name: DotId,
    /// The text after the first ':', as in "port", "port:ne" or "ne".
    pub port: Option<String>,
}
impl NodeId {
    pub fn new(name: DotId, port: Option<String>) -> Self {
        Self { name, port }
    }
}

// [a=b; c=d; ... ]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    pub list: Vec<(String, DotId)>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn add(&mut self, name: &str, value: DotId) {
        self.list.push((name.to_string(), value));
    }

    pub fn add_attr_str(&mut self, from: &str, to: &str) {
        self.add(from, DotId::from_text(to));
    }

    pub fn iter(&self) -> std::slice::Iter<(String, DotId)> {
        self.list.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

// (graph | node | edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrStmtTarget {
    Graph,
    Node,
    Edge,
}
// (graph | node | edge) [ ... ]
#[derive(Debug, Clone, PartialEq)]
pub struct AttrStmt {
    pub target: AttrStmtTarget,
    pub list: AttributeList,
}

impl AttrStmt {
    pub fn new(target: AttrStmtTarget, list: AttributeList) -> Self {
        Self { target, list }
    }
}

// node-name [ ... ]
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStmt {
    pub id: NodeId,
    pub list: AttributeList,
}

impl NodeStmt {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            list: AttributeList::new(),
        }
    }
}

// (-> | -- )
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    Arrow,
    Line,
}

/// One side of an edge: a node, or every node of a subgraph.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeOperand {
    Node(NodeId),
    SubGraph(SubGraph),
}

// a -> b -> { c d } [...]
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStmt {
    pub from: EdgeOperand,
    pub to: Vec<(EdgeOperand, ArrowKind)>,
    pub list: AttributeList,
}

impl EdgeStmt {
    pub fn new(from: EdgeOperand) -> Self {
        Self {
            from,
            to: Vec::new(),
            list: AttributeList::new(),
        }
    }

    pub fn insert(&mut self, n: EdgeOperand, ak: ArrowKind) {
        self.to.push((n, ak));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Edge(EdgeStmt),
    Node(NodeStmt),
    Attribute(AttrStmt),
    SubGraph(SubGraph),
}

// { ... }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StmtList {
    pub list: Vec<Stmt>,
}

impl StmtList {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }
}

// [ subgraph [ ID ] ] { ... }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubGraph {
    pub name: Option<DotId>,
    pub list: StmtList,
}

impl SubGraph {
    pub fn new(name: Option<DotId>) -> Self {
        Self {
            name,
            list: StmtList::new(),
        }
    }
}

// [ strict ] (graph | digraph) [ ID ] { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub strict: bool,
    pub directed: bool,
    pub name: Option<DotId>,
    pub list: StmtList,
}

impl Graph {
    pub fn new(strict: bool, directed: bool, name: Option<DotId>) -> Self {
        Self {
            strict,
            directed,
            name,
            list: StmtList::new(),
        }
    }
}

#[test]
fn test_id_forms() {
    assert!(is_plain_id("node_1"));
    assert!(is_plain_id("_"));
    assert!(!is_plain_id("1abc"));
    assert!(!is_plain_id("node 1"));
    assert!(!is_plain_id("Graph"));
    assert!(is_numeral("-1.5"));
    assert!(is_numeral(".5"));
    assert!(is_numeral("3."));
    assert!(!is_numeral("."));
    assert!(!is_numeral("-"));
    assert!(!is_numeral("1.2.3"));

    assert_eq!(DotId::from_text("a b").to_string(), "\"a b\"");
    assert_eq!(DotId::from_text("2.5").to_string(), "2.5");
    assert_eq!(DotId::quoted("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
    assert_eq!(DotId::html("<b>x</b>").to_string(), "<<b>x</b>>");
}
