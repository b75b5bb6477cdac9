//! Query orchestration: selector evaluation plus per-match source location.

use crate::dom::errors::SelectorError;
use crate::dom::node::{Document, NodeId};
use crate::dom::parser::parse;
use crate::dom::selector::Selector;
use crate::locate::errors::ResolveError;
use crate::locate::position::line_col;
use crate::locate::resolver::{resolve, MatchContext, ResolveMethod};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FindError {
    /// Source text and selector are both required and must be non-empty.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    #[error("invalid selector `{selector}`: {source}")]
    Selector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error(transparent)]
    Resolution(#[from] ResolveError),
}

/// Line/column of an element's opening tag in the original source text,
/// 1-based, tagged with the strategy that resolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub method: ResolveMethod,
}

/// One record per match, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Handle into [`FindResults::document`].
    pub element: NodeId,
    /// Serialized fragment for the element and its descendants.
    pub html: String,
    /// Present only when locations were requested.
    #[serde(flatten)]
    pub location: Option<Location>,
}

/// Output of [`find`]: the records plus the parsed document their element
/// handles point into.
#[derive(Debug, Clone)]
pub struct FindResults {
    pub document: Document,
    pub records: Vec<ResultRecord>,
}

/// Find all elements matching `selector` in `source`.
///
/// When `locations` is true, each record additionally carries the 1-based
/// line and column at which the element's opening tag begins in the raw
/// text. Resolution is all-or-nothing: if any match cannot be mapped back to
/// the source, the whole call fails rather than silently omitting a
/// location.
pub fn find(source: &str, selector: &str, locations: bool) -> Result<FindResults, FindError> {
    if source.is_empty() {
        return Err(FindError::InvalidInput {
            reason: "source document is empty",
        });
    }
    if selector.is_empty() {
        return Err(FindError::InvalidInput {
            reason: "selector is empty",
        });
    }

    let parsed_selector = Selector::parse(selector).map_err(|source_err| FindError::Selector {
        selector: selector.to_string(),
        source: source_err,
    })?;

    let document = parse(source);
    let matches = document.select(&parsed_selector);

    let mut records = Vec::with_capacity(matches.len());
    for id in matches {
        let html = document.outer_html(id);
        let location = if locations {
            Some(locate_match(source, &document, id, &html)?)
        } else {
            None
        };
        records.push(ResultRecord {
            element: id,
            html,
            location,
        });
    }

    Ok(FindResults { document, records })
}

fn locate_match(
    source: &str,
    document: &Document,
    id: NodeId,
    html: &str,
) -> Result<Location, FindError> {
    let tag_name = document
        .tag_name(id)
        .expect("selector matches are always elements");

    // Identity position among elements of the same exact tag name; feeds the
    // occurrence-count fallback.
    let ordinal = document
        .elements_named(tag_name)
        .iter()
        .position(|candidate| *candidate == id);

    let resolved = resolve(
        source,
        &MatchContext {
            tag_name,
            fragment: html,
            ordinal,
        },
    )?;
    let (line, column) = line_col(source, resolved.offset);
    Ok(Location {
        line,
        column,
        method: resolved.method,
    })
}
