//! Two-strategy offset resolution for a matched element.

use crate::locate::errors::ResolveError;
use crate::locate::scanner::nth_tag_offset;
use memchr::memmem;
use serde::Serialize;

/// Which strategy produced an offset. Recorded on every resolved location for
/// diagnostics and testability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveMethod {
    /// The serialized fragment occurs exactly once in the source text.
    DirectSearch,
    /// The element's ordinal among same-named elements drove the tag scanner.
    OccurrenceCount,
}

/// Everything the resolver needs to know about one match.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Tag name exactly as captured by the tree, case preserved.
    pub tag_name: &'a str,
    /// Serialized fragment for the element and its descendants.
    pub fragment: &'a str,
    /// Identity position of the match among all elements sharing its exact
    /// tag name, in document order. `None` when the match could not be found
    /// in that list.
    pub ordinal: Option<usize>,
}

/// A resolved byte offset, tagged with the strategy that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub offset: usize,
    pub method: ResolveMethod,
}

type Strategy = fn(&str, &MatchContext<'_>) -> Option<Resolved>;

/// Ordered tie-break: prefer the cheap uniqueness search, fall back to
/// structural occurrence counting.
const STRATEGIES: [Strategy; 2] = [direct_search, occurrence_count];

/// Resolve the byte offset at which the matched element's opening tag begins.
///
/// Strategies are tried in order and the first success wins. Failure of both
/// signals a parser/serializer disagreement and is fatal.
pub fn resolve(source: &str, ctx: &MatchContext<'_>) -> Result<Resolved, ResolveError> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(source, ctx))
        .ok_or_else(|| ResolveError::UnresolvedElement {
            tag: ctx.tag_name.to_string(),
        })
}

/// Strategy 1: the fragment found verbatim, and found exactly once.
///
/// The occurrence count runs over the whole document, not just forward from
/// the first hit, so uniqueness can never depend on search order. Identical
/// sibling elements or any collision with unrelated text disqualify this
/// strategy.
fn direct_search(source: &str, ctx: &MatchContext<'_>) -> Option<Resolved> {
    if ctx.fragment.is_empty() {
        return None;
    }
    let mut occurrences = memmem::find_iter(source.as_bytes(), ctx.fragment.as_bytes());
    let first = occurrences.next()?;
    if occurrences.next().is_some() {
        return None;
    }
    Some(Resolved {
        offset: first,
        method: ResolveMethod::DirectSearch,
    })
}

/// Strategy 2: count same-named opening tags in the raw text up to the
/// match's ordinal. Works for duplicated or normalized fragments because it
/// locates structural position rather than textual content.
fn occurrence_count(source: &str, ctx: &MatchContext<'_>) -> Option<Resolved> {
    let ordinal = ctx.ordinal?;
    let offset = nth_tag_offset(source, ctx.tag_name, ordinal)?;
    Some(Resolved {
        offset,
        method: ResolveMethod::OccurrenceCount,
    })
}
