/*!
This crate provides a library for importing GraphViz DOT files into an
attributed graph model. It follows the scoping rules of the DOT language:
`graph`, `node` and `edge` defaults apply to the elements that are declared
after them in the same subgraph, inline attributes override defaults, and
node names are shared by all of the subgraphs of a graph. Subgraphs and
clusters are represented as nodes that hold a nested graph.

The attributes that GraphViz defines are validated during the import and can
be read and written as typed values (colors, points, enums, etc.). Other
attributes are kept as they are.

The project also comes with a command line utility that imports .DOT files
and prints a summary, the AST or the normalized DOT text.

# Import example: load a dot file

```rust
    use dotgraph::dot::DotImport;

    let contents = "digraph { node[shape=box]; a -> b; b[shape=oval] }";
    let graphs = DotImport::new().import_str(contents).unwrap();
    let g = &graphs[0];

    let a = g.find_node("a").unwrap();
    let b = g.find_node("b").unwrap();
    assert_eq!(g.node(a).attrs().get_str("shape"), Some("box"));
    assert_eq!(g.node(b).attrs().get_str("shape"), Some("oval"));
    assert_eq!(g.edge_count(), 1);
```

Errors carry the location of the problem:

```rust
    use dotgraph::dot::DotImport;
    use dotgraph::error::ImportError;

    let res = DotImport::new().import_str("digraph {\n  a -> ; }");
    match res {
        Err(ImportError::Parse(err)) => {
            assert_eq!((err.line, err.column), (2, 8));
            println!("{}\n{}", err, err.excerpt);
        }
        _ => panic!("expected a syntax error"),
    }
```

# Typed attributes example

```rust
    use dotgraph::attrs::{Layout, Rankdir};
    use dotgraph::dot::{DotExport, DotImport};

    let mut graphs = DotImport::new().import_str("graph G { a -- b }").unwrap();
    let g = &mut graphs[0];
    let root = g.root();
    g.attrs_mut(root).set_layout(Layout::Neato);
    g.attrs_mut(root).set_rankdir(Rankdir::LeftToRight);
    assert_eq!(g.attrs(root).layout(), Ok(Some(Layout::Neato)));

    let a = g.find_node("a").unwrap();
    g.node_mut(a).attrs_mut().set_height(3.4);
    assert_eq!(g.node(a).attrs().height(), Ok(Some(3.4)));

    let text = DotExport::new().export(g);
    assert!(text.contains("a [height=3.4]"));
```

*/

pub mod adt;
pub mod attrs;
pub mod dot;
pub mod error;
pub mod model;
