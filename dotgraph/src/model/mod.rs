//! The attributed graph model: graphs, nodes, edges and their attributes.

pub mod attributes;
pub mod graph;

pub use crate::dot::parser::ast::DotId as AttrValue;
pub use attributes::Attributes;
pub use graph::{
    Edge, EdgeHandle, Graph, GraphHandle, GraphType, Node, NodeHandle,
};
