//! Offset resolution: mapping matched elements back to their position in the
//! raw, unparsed source text.
//!
//! The parsed tree normalizes attribute order, whitespace and serialization, so
//! a match cannot simply be found by text search. Resolution tries two
//! strategies in order: a direct uniqueness search over the serialized
//! fragment, and a comment-aware scan counting same-named opening tags.

pub mod errors;
pub mod position;
pub mod resolver;
pub mod scanner;

pub use errors::ResolveError;
pub use position::line_col;
pub use resolver::{resolve, MatchContext, Resolved, ResolveMethod};
pub use scanner::nth_tag_offset;
