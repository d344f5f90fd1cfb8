//! Serializes graphs back to DOT text.

use crate::model::{AttrValue, Attributes, Graph, GraphHandle};
use std::fmt::Write;

/// Writes graphs as DOT text. The output only depends on the graph, and
/// importing it again produces the same graph.
///
/// Every node and edge is written with its full attribute list, so no
/// `node [...]` or `edge [...]` defaults are emitted. The attributes of a
/// (sub)graph are written after its members, which keeps them from being
/// inherited by the subgraphs when the text is imported again.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotExport {}

fn id(text: &str) -> String {
    AttrValue::from_text(text).to_string()
}

fn attr_list(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let items: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{}={}", id(k), v))
        .collect();
    format!(" [{}]", items.join(", "))
}

impl DotExport {
    pub fn new() -> Self {
        Self {}
    }

    pub fn export(&self, graph: &Graph) -> String {
        let mut out = String::new();
        if graph.is_strict() {
            out.push_str("strict ");
        }
        out.push_str(graph.kind().keyword());
        let root = graph.root();
        if let Some(name) = graph.name(root) {
            let _ = write!(out, " {}", id(name));
        }
        out.push_str(" {\n");
        Self::write_body(&mut out, graph, root, 1);
        out.push_str("}\n");
        out
    }

    fn write_body(out: &mut String, graph: &Graph, g: GraphHandle, indent: usize) {
        let pad = "  ".repeat(indent);

        for n in graph.nodes(g) {
            let node = graph.node(*n);
            match node.nested_graph() {
                Some(nested) => {
                    match graph.name(nested) {
                        Some(name) => {
                            let _ = writeln!(out, "{}subgraph {} {{", pad, id(name));
                        }
                        None => {
                            let _ = writeln!(out, "{}{{", pad);
                        }
                    }
                    Self::write_body(out, graph, nested, indent + 1);
                    let _ = writeln!(out, "{}}}", pad);
                }
                None => {
                    let _ = writeln!(
                        out,
                        "{}{}{}",
                        pad,
                        id(node.name()),
                        attr_list(node.attrs())
                    );
                }
            }
        }

        let op = graph.kind().edge_op();
        for e in graph.edges(g) {
            let edge = graph.edge(*e);
            let _ = writeln!(
                out,
                "{}{} {} {}{}",
                pad,
                id(graph.node(edge.source()).name()),
                op,
                id(graph.node(edge.target()).name()),
                attr_list(edge.attrs())
            );
        }

        for (k, v) in graph.attrs(g).iter() {
            let _ = writeln!(out, "{}{}={}", pad, id(k), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphType;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_model() {
        let mut g = Graph::new(GraphType::Digraph, Some("G"));
        let root = g.root();
        let a = g.add_node(root, "a", Attributes::new());
        let mut attrs = Attributes::new();
        attrs.set_str("label", "hello world");
        attrs.insert("shape", AttrValue::plain("box"));
        let (_, cluster) =
            g.add_subgraph(root, "cluster_0", Some("cluster_0"), Attributes::new());
        let b = g.add_node(cluster, "node", attrs);
        g.attrs_mut(cluster).set_str("color", "red");
        g.add_edge(root, a, b, Attributes::new());
        g.attrs_mut(root).set_str("rankdir", "LR");

        let expected = "digraph G {\n  a\n  subgraph cluster_0 {\n    \"node\" [label=\"hello world\", shape=box]\n    color=red\n  }\n  a -> \"node\"\n  rankdir=LR\n}\n";
        assert_eq!(DotExport::new().export(&g), expected);
    }

    #[test]
    fn export_anonymous_and_strict() {
        let mut g = Graph::new(GraphType::Graph, None);
        g.set_strict(true);
        let root = g.root();
        let (_, sub) = g.add_subgraph(root, "%1", None, Attributes::new());
        let x = g.add_node(sub, "x", Attributes::new());
        let mut attrs = Attributes::new();
        attrs.insert("label", AttrValue::html("<b>x</b>"));
        g.add_edge(root, x, x, attrs);

        let expected = "strict graph {\n  {\n    x\n  }\n  x -- x [label=<<b>x</b>>]\n}\n";
        assert_eq!(DotExport::new().export(&g), expected);
    }
}
