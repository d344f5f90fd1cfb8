//! The attributed graph model that the importer produces.
//!
//! A `Graph` owns every subgraph, node and edge that belongs to one
//! top-level DOT graph. The elements are stored in arenas and are referred
//! to with small copyable handles, in the same way the DAG refers to its
//! nodes. Subgraphs form a tree: every nested graph is owned by a node of
//! its enclosing graph, and knows that node (`nesting_node`).

use super::attributes::Attributes;

macro_rules! handle_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
        pub struct $name {
            idx: usize,
        }

        impl $name {
            pub fn new(x: usize) -> Self {
                $name { idx: x }
            }
            pub fn get_index(&self) -> usize {
                self.idx
            }
        }

        impl From<usize> for $name {
            fn from(idx: usize) -> Self {
                $name { idx }
            }
        }
    };
}

handle_type!(GraphHandle, "Refers to a (sub)graph that is stored in a `Graph`.");
handle_type!(NodeHandle, "Refers to a node that is stored in a `Graph`.");
handle_type!(EdgeHandle, "Refers to an edge that is stored in a `Graph`.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphType {
    Graph,
    Digraph,
}

impl GraphType {
    pub fn is_directed(&self) -> bool {
        matches!(self, GraphType::Digraph)
    }

    /// The DOT keyword of the graph type.
    pub fn keyword(&self) -> &'static str {
        match self {
            GraphType::Graph => "graph",
            GraphType::Digraph => "digraph",
        }
    }

    /// The DOT edge operator of the graph type.
    pub fn edge_op(&self) -> &'static str {
        match self {
            GraphType::Graph => "--",
            GraphType::Digraph => "->",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SubgraphData {
    name: Option<String>,
    attrs: Attributes,
    nodes: Vec<NodeHandle>,
    edges: Vec<EdgeHandle>,
    nesting_node: Option<NodeHandle>,
}

impl SubgraphData {
    fn new(name: Option<&str>, attrs: Attributes) -> Self {
        Self {
            name: name.map(|s| s.to_string()),
            attrs,
            nodes: Vec::new(),
            edges: Vec::new(),
            nesting_node: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    graph: GraphHandle,
    attrs: Attributes,
    nested: Option<GraphHandle>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The graph that contains this node.
    pub fn graph(&self) -> GraphHandle {
        self.graph
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// The graph that this node holds, for subgraph nodes.
    pub fn nested_graph(&self) -> Option<GraphHandle> {
        self.nested
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: NodeHandle,
    target: NodeHandle,
    graph: GraphHandle,
    attrs: Attributes,
}

impl Edge {
    pub fn source(&self) -> NodeHandle {
        self.source
    }

    pub fn target(&self) -> NodeHandle {
        self.target
    }

    /// The graph that contains this edge.
    pub fn graph(&self) -> GraphHandle {
        self.graph
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
}

/// A top-level graph, with all of its subgraphs, nodes and edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    kind: GraphType,
    strict: bool,
    graphs: Vec<SubgraphData>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(kind: GraphType, name: Option<&str>) -> Self {
        Self {
            kind,
            strict: false,
            graphs: vec![SubgraphData::new(name, Attributes::new())],
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn kind(&self) -> GraphType {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// The top-level graph.
    pub fn root(&self) -> GraphHandle {
        GraphHandle::new(0)
    }

    pub fn name(&self, g: GraphHandle) -> Option<&str> {
        self.graphs[g.idx].name.as_deref()
    }

    pub fn attrs(&self, g: GraphHandle) -> &Attributes {
        &self.graphs[g.idx].attrs
    }

    pub fn attrs_mut(&mut self, g: GraphHandle) -> &mut Attributes {
        &mut self.graphs[g.idx].attrs
    }

    /// The nodes of \p g (not including the nodes of nested graphs), in
    /// creation order.
    pub fn nodes(&self, g: GraphHandle) -> &[NodeHandle] {
        &self.graphs[g.idx].nodes
    }

    /// The edges of \p g (not including the edges of nested graphs), in
    /// creation order.
    pub fn edges(&self, g: GraphHandle) -> &[EdgeHandle] {
        &self.graphs[g.idx].edges
    }

    /// The node that holds \p g, or None for the root graph.
    pub fn nesting_node(&self, g: GraphHandle) -> Option<NodeHandle> {
        self.graphs[g.idx].nesting_node
    }

    /// The graph that contains the nesting node of \p g.
    pub fn parent(&self, g: GraphHandle) -> Option<GraphHandle> {
        self.nesting_node(g).map(|n| self.node(n).graph)
    }

    /// Subgraphs whose name starts with "cluster" are clusters.
    pub fn is_cluster(&self, g: GraphHandle) -> bool {
        self.name(g).map_or(false, |n| n.starts_with("cluster"))
    }

    pub fn node(&self, n: NodeHandle) -> &Node {
        &self.nodes[n.idx]
    }

    pub fn node_mut(&mut self, n: NodeHandle) -> &mut Node {
        &mut self.nodes[n.idx]
    }

    pub fn edge(&self, e: EdgeHandle) -> &Edge {
        &self.edges[e.idx]
    }

    pub fn edge_mut(&mut self, e: EdgeHandle) -> &mut Edge {
        &mut self.edges[e.idx]
    }

    /// The number of graphs, including the root graph.
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// The number of nodes in all graphs, including subgraph nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of edges in all graphs.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all of the graphs, the root first.
    pub fn graphs(&self) -> impl Iterator<Item = GraphHandle> {
        (0..self.graphs.len()).map(GraphHandle::new)
    }

    /// Finds a node that is not a subgraph node by name, in any graph.
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|n| n.nested.is_none() && n.name == name)
            .map(NodeHandle::new)
    }

    /// Finds a subgraph by name, in any graph.
    pub fn find_subgraph(&self, name: &str) -> Option<GraphHandle> {
        self.graphs
            .iter()
            .position(|g| g.name.as_deref() == Some(name))
            .filter(|idx| *idx != 0)
            .map(GraphHandle::new)
    }

    /// Adds a node named \p name to the graph \p g.
    pub fn add_node(
        &mut self,
        g: GraphHandle,
        name: &str,
        attrs: Attributes,
    ) -> NodeHandle {
        let handle = NodeHandle::new(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            graph: g,
            attrs,
            nested: None,
        });
        self.graphs[g.idx].nodes.push(handle);
        handle
    }

    /// Adds an edge from \p from to \p to to the graph \p g. Parallel edges
    /// are allowed.
    pub fn add_edge(
        &mut self,
        g: GraphHandle,
        from: NodeHandle,
        to: NodeHandle,
        attrs: Attributes,
    ) -> EdgeHandle {
        let handle = EdgeHandle::new(self.edges.len());
        self.edges.push(Edge {
            source: from,
            target: to,
            graph: g,
            attrs,
        });
        self.graphs[g.idx].edges.push(handle);
        handle
    }

    /// Adds a node named \p node_name to \p g, which holds a new nested graph
    /// named \p name. \returns the node and the nested graph.
    pub fn add_subgraph(
        &mut self,
        g: GraphHandle,
        node_name: &str,
        name: Option<&str>,
        attrs: Attributes,
    ) -> (NodeHandle, GraphHandle) {
        let node = self.add_node(g, node_name, Attributes::new());
        let nested = GraphHandle::new(self.graphs.len());
        let mut data = SubgraphData::new(name, attrs);
        data.nesting_node = Some(node);
        self.graphs.push(data);
        self.nodes[node.idx].nested = Some(nested);
        (node, nested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_construction() {
        let mut g = Graph::new(GraphType::Digraph, Some("G"));
        let root = g.root();
        let a = g.add_node(root, "a", Attributes::new());
        let b = g.add_node(root, "b", Attributes::new());
        g.add_edge(root, a, b, Attributes::new());
        g.add_edge(root, a, b, Attributes::new());

        assert!(g.is_directed());
        assert_eq!(g.name(root), Some("G"));
        assert_eq!(g.nodes(root), &[a, b]);
        assert_eq!(g.edges(root).len(), 2);
        assert_eq!(g.edge(g.edges(root)[1]).target(), b);
        assert_eq!(g.find_node("b"), Some(b));
        assert_eq!(g.nesting_node(root), None);
    }

    #[test]
    fn test_nesting() {
        let mut g = Graph::new(GraphType::Graph, None);
        let root = g.root();
        let (holder, cluster) =
            g.add_subgraph(root, "cluster_0", Some("cluster_0"), Attributes::new());
        let x = g.add_node(cluster, "x", Attributes::new());

        assert_eq!(g.graph_count(), 2);
        assert_eq!(g.node(holder).nested_graph(), Some(cluster));
        assert_eq!(g.nesting_node(cluster), Some(holder));
        assert_eq!(g.parent(cluster), Some(root));
        assert!(g.is_cluster(cluster));
        assert!(!g.is_cluster(root));
        assert_eq!(g.node(x).graph(), cluster);
        assert_eq!(g.nodes(root), &[holder]);
        assert_eq!(g.find_subgraph("cluster_0"), Some(cluster));
        // Subgraph nodes are not ordinary nodes.
        assert_eq!(g.find_node("cluster_0"), None);
    }
}
