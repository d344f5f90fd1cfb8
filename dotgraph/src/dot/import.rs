//! The entry point for importing DOT files.

use super::builder::GraphBuilder;
use super::parser::DotParser;
use crate::error::ImportError;
use crate::model::{Graph, GraphType};
use std::fs;
use std::path::Path;

/// Imports DOT source text into graphs. The importer has no state, so one
/// instance can be used for any number of imports.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotImport {}

impl DotImport {
    pub fn new() -> Self {
        Self {}
    }

    /// Parses \p text and builds one graph for each top-level graph in the
    /// text, in source order. The first error aborts the import.
    pub fn import_str(&self, text: &str) -> Result<Vec<Graph>, ImportError> {
        let mut parser = DotParser::new(text);
        let asts = parser.process()?;

        let mut graphs = Vec::with_capacity(asts.len());
        for ast in &asts {
            let kind = if ast.directed {
                GraphType::Digraph
            } else {
                GraphType::Graph
            };
            let name = ast.name.as_ref().map(|n| n.value.as_str());
            let mut builder = GraphBuilder::new(kind, name);
            builder.visit_graph(ast)?;
            graphs.push(builder.get());
        }
        Ok(graphs)
    }

    /// Reads the file at \p path and imports it.
    pub fn import_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<Graph>, ImportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        #[cfg(feature = "log")]
        log::info!("Read {} bytes from {}", text.len(), path.display());
        self.import_str(&text)
    }
}

#[test]
fn test_import_str() {
    let importer = DotImport::new();
    let graphs = importer
        .import_str("strict digraph A { a -> b } graph B { c -- d -- e }")
        .unwrap();
    assert_eq!(graphs.len(), 2);
    assert!(graphs[0].is_strict());
    assert_eq!(graphs[0].name(graphs[0].root()), Some("A"));
    assert_eq!(graphs[1].kind(), GraphType::Graph);
    assert_eq!(graphs[1].edge_count(), 2);

    assert!(importer.import_str("graph Sample{").is_err());
    assert!(importer.import_str("").is_err());
}
