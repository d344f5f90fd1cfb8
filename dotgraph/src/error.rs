//! Error types that are returned by the parser, the attribute layer and the
//! importer.

use std::path::PathBuf;
use thiserror::Error;

/// A syntax error, with the location of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line of the error.
    pub line: usize,
    /// 1-based column of the error.
    pub column: usize,
    pub message: String,
    /// The source line that contains the error, followed by a line with a
    /// '^' marker under the error column.
    pub excerpt: String,
}

/// A raw attribute value that does not match the grammar of its attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value \"{value}\" for attribute '{name}': {reason}")]
pub struct AttributeError {
    pub name: String,
    pub value: String,
    pub reason: String,
}

impl AttributeError {
    pub fn new(name: &str, value: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The error that aborts an import. The first unrecoverable problem wins.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("syntax error at {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("unresolved edge endpoint: {0}")]
    UnresolvedEndpoint(String),

    #[error("can't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
