//! Owned DOM substrate: parsing, traversal, normalization and serialization.

#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod dom_utils;
pub mod serialize;
pub mod style;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_dom, parse_document};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
