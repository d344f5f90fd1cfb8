//! A module that contains everything that has to do with handling the GraphViz
//! file format (parsing, building the graph model, exporting, etc.)

pub mod builder;
pub mod export;
pub mod import;
pub mod parser;
pub mod scope;

pub use builder::GraphBuilder;
pub use export::DotExport;
pub use import::DotImport;
pub use parser::ast_to_string;
pub use parser::DotParser;
pub use parser::Lexer;
pub use parser::Token;
