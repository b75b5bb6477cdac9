//! In-crate DOM collaborator: a case-preserving element tree with selector
//! queries and deterministic serialization.
//!
//! Mainstream HTML parsers normalize tag names to lowercase, which would make
//! it impossible to keep uppercase and lowercase variants of a tag distinct
//! when counting occurrences in the raw text. This engine preserves names and
//! attribute order exactly as written.

pub mod errors;
pub mod node;
pub mod parser;
pub mod selector;

pub use errors::SelectorError;
pub use node::{Attribute, Document, Element, NodeData, NodeId};
pub use parser::parse;
pub use selector::Selector;
