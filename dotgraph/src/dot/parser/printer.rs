//! A collection of methods for printing the AST.

use super::ast;
use std::fmt::Write;

fn print_node_id(out: &mut String, n: &ast::NodeId, indent: usize) {
    let _ = write!(out, "{}{}", " ".repeat(indent), n.name);
    if let Some(port) = &n.port {
        let _ = write!(out, ":{}", port);
    }
    out.push('\n');
}

fn print_operand(out: &mut String, op: &ast::EdgeOperand, indent: usize) {
    match op {
        ast::EdgeOperand::Node(n) => print_node_id(out, n, indent),
        ast::EdgeOperand::SubGraph(sg) => print_subgraph(out, sg, indent),
    }
}

fn print_arrow(out: &mut String, k: ast::ArrowKind, indent: usize) {
    let arrow = match k {
        ast::ArrowKind::Arrow => "->",
        ast::ArrowKind::Line => "--",
    };
    let _ = writeln!(out, "{}{}", " ".repeat(indent), arrow);
}

fn print_attribute_list(out: &mut String, ll: &ast::AttributeList, indent: usize) {
    for (i, (name, value)) in ll.iter().enumerate() {
        let _ = writeln!(out, "{}{}) {} = {}", " ".repeat(indent), i, name, value);
    }
}

fn print_edge(out: &mut String, e: &ast::EdgeStmt, indent: usize) {
    let _ = writeln!(out, "{}Edge:", " ".repeat(indent));
    print_operand(out, &e.from, indent + 1);
    for (dest, kind) in &e.to {
        print_arrow(out, *kind, indent + 1);
        print_operand(out, dest, indent + 1);
    }
    print_attribute_list(out, &e.list, indent + 1);
}

fn print_node(out: &mut String, n: &ast::NodeStmt, indent: usize) {
    let _ = writeln!(out, "{}Node:", " ".repeat(indent));
    print_node_id(out, &n.id, indent + 1);
    print_attribute_list(out, &n.list, indent + 1);
}

fn print_att(out: &mut String, att: &ast::AttrStmt, indent: usize) {
    let target = match att.target {
        ast::AttrStmtTarget::Graph => "Graph",
        ast::AttrStmtTarget::Node => "Node",
        ast::AttrStmtTarget::Edge => "Edge",
    };
    let _ = writeln!(out, "{}Attribute {}:", " ".repeat(indent), target);
    print_attribute_list(out, &att.list, indent + 1);
}

fn print_stmt_list(out: &mut String, list: &ast::StmtList, indent: usize) {
    for stmt in &list.list {
        match stmt {
            ast::Stmt::Edge(e) => print_edge(out, e, indent),
            ast::Stmt::Node(n) => print_node(out, n, indent),
            ast::Stmt::Attribute(a) => print_att(out, a, indent),
            ast::Stmt::SubGraph(g) => print_subgraph(out, g, indent),
        }
    }
}

fn print_subgraph(out: &mut String, sg: &ast::SubGraph, indent: usize) {
    let name = sg.name.as_ref().map_or(String::new(), |n| n.to_string());
    let _ = writeln!(out, "{}Subgraph: {}", " ".repeat(indent), name);
    print_stmt_list(out, &sg.list, indent + 1);
}

/// Renders the AST of a parsed graph as an indented tree.
pub fn ast_to_string(graph: &ast::Graph) -> String {
    let mut out = String::new();
    let kind = if graph.directed { "Digraph" } else { "Graph" };
    let strict = if graph.strict { "Strict " } else { "" };
    let name = graph.name.as_ref().map_or(String::new(), |n| n.to_string());
    let _ = writeln!(out, "{}{}: {}", strict, kind, name);
    print_stmt_list(&mut out, &graph.list, 1);
    out
}

#[test]
fn test_ast_dump() {
    let mut parser = super::DotParser::new(
        "digraph G { node [shape=box]; a:p -> { b } [label=\"x y\"] }",
    );
    let graphs = parser.process().unwrap();
    let text = ast_to_string(&graphs[0]);
    let expected = "Digraph: G\n Attribute Node:\n  0) shape = box\n Edge:\n  a:p\n  ->\n  Subgraph: \n   Node:\n    b\n  0) label = \"x y\"\n";
    assert_eq!(text, expected);
}
