//! domsource: locate DOM selector matches in the original HTML source.
//!
//! Given a raw markup document and a structural selector, [`find`] returns
//! the serialized fragment for each matched element and, on request, the
//! exact 1-based line and column in the *unparsed* source text where the
//! element's opening tag begins.
//!
//! # Architecture
//!
//! The parsed tree normalizes things the raw text does not (serialization,
//! casing of close tags, attribute quoting), so matches cannot be located by
//! naive text search. Resolution tries two strategies in order:
//!
//! 1. **Direct search** — the serialized fragment occurs exactly once in the
//!    source text; its offset is authoritative.
//! 2. **Occurrence count** — for duplicated or normalized fragments, the
//!    match's ordinal among same-named elements drives a comment-aware
//!    scanner over the raw text.
//!
//! The [`dom`] module is the tree/query collaborator: a case-preserving
//! parser, selector engine and deterministic serializer. Preserved casing is
//! what lets `<LI>` and `<li>` stay distinct tag types during occurrence
//! counting.
//!
//! # Example
//!
//! ```
//! use domsource::{find, ResolveMethod};
//!
//! let source = "<ul>\n    <li class=\"green\">Green</li>\n</ul>\n";
//! let results = find(source, ".green", true).unwrap();
//!
//! let location = results.records[0].location.unwrap();
//! assert_eq!((location.line, location.column), (2, 5));
//! assert_eq!(location.method, ResolveMethod::DirectSearch);
//! ```

pub mod dom;
pub mod find;
pub mod locate;

// Re-exports
pub use dom::{Attribute, Document, Element, NodeData, NodeId, Selector, SelectorError};
pub use find::{find, FindError, FindResults, Location, ResultRecord};
pub use locate::{
    line_col, nth_tag_offset, resolve, MatchContext, Resolved, ResolveError, ResolveMethod,
};
