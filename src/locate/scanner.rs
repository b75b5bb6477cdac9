//! Comment-aware scanner counting opening-tag occurrences in raw markup.

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Scanner state. One character (or one comment delimiter) is consumed per
/// step; every state handles end-of-text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Default: looking for a comment opener or a tag-start candidate.
    Scanning,
    /// Inside `<!--` ... `-->`; nothing in here counts. Comments do not nest.
    InComment,
    /// A `<tagname` candidate was recorded; the next character decides whether
    /// it is a real occurrence or a prefix of a longer name.
    BoundaryCheck,
    /// Candidate confirmed; bump the count and decide whether to stop.
    TagCounted,
}

/// Return true when `needle` appears in `text` starting exactly at `index`.
pub(crate) fn has_prefix_at(text: &str, needle: &str, index: usize) -> bool {
    text.as_bytes()
        .get(index..)
        .is_some_and(|rest| rest.starts_with(needle.as_bytes()))
}

/// Find the byte offset of the start of the `occurrence + 1`-th opening tag
/// named exactly `tag_name` (case-sensitive) in `source`, ignoring anything
/// inside HTML comments. Returns `None` when the document holds fewer
/// occurrences than requested.
///
/// A candidate `<tagname` only counts when the character immediately after the
/// name is ASCII whitespace or `>`, so scanning for `li` never matches inside
/// `<link>` or `<list>`.
pub fn nth_tag_offset(source: &str, tag_name: &str, occurrence: usize) -> Option<usize> {
    let mut state = State::Scanning;
    let mut i = 0;
    let mut candidate = 0;
    let mut count = 0;

    loop {
        match state {
            State::Scanning => {
                if i >= source.len() {
                    return None;
                }
                if has_prefix_at(source, COMMENT_OPEN, i) {
                    i += COMMENT_OPEN.len();
                    state = State::InComment;
                } else if source.as_bytes()[i] == b'<' && has_prefix_at(source, tag_name, i + 1) {
                    candidate = i;
                    i += 1 + tag_name.len();
                    state = State::BoundaryCheck;
                } else {
                    i += 1;
                }
            }
            State::InComment => {
                if i >= source.len() {
                    return None;
                }
                if has_prefix_at(source, COMMENT_CLOSE, i) {
                    i += COMMENT_CLOSE.len();
                    state = State::Scanning;
                } else {
                    i += 1;
                }
            }
            State::BoundaryCheck => match source.as_bytes().get(i) {
                Some(byte) if byte.is_ascii_whitespace() || *byte == b'>' => {
                    state = State::TagCounted;
                }
                Some(_) => {
                    // Prefix of a longer tag name; resume one character on.
                    i += 1;
                    state = State::Scanning;
                }
                None => return None,
            },
            State::TagCounted => {
                count += 1;
                if count == occurrence + 1 {
                    return Some(candidate);
                }
                state = State::Scanning;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn finds_nth_occurrence() {
        let source = "<ul><li>a</li><li>b</li><li>c</li></ul>";
        assert_eq!(nth_tag_offset(source, "li", 0), Some(4));
        assert_eq!(nth_tag_offset(source, "li", 1), Some(14));
        assert_eq!(nth_tag_offset(source, "li", 2), Some(24));
        assert_eq!(nth_tag_offset(source, "li", 3), None);
    }

    #[test]
    fn boundary_rejects_longer_names() {
        let source = "<link rel=\"x\"><list><li>a</li></list>";
        assert_eq!(nth_tag_offset(source, "li", 0), Some(20));
        assert_eq!(nth_tag_offset(source, "li", 1), None);
    }

    #[test]
    fn tags_inside_comments_do_not_count() {
        let source = "<!-- <li>old</li> --><li>real</li>";
        assert_eq!(nth_tag_offset(source, "li", 0), Some(21));
    }

    #[test]
    fn multiline_comment_block_is_inert() {
        let source = "<!--\n<li>a</li>\n<li>b</li>\n-->\n<li>c</li>";
        assert_eq!(nth_tag_offset(source, "li", 0), Some(31));
        assert_eq!(nth_tag_offset(source, "li", 1), None);
    }

    #[test]
    fn tag_name_matching_is_case_sensitive() {
        let source = "<LI>a</LI><li>b</li><LI>c</LI>";
        assert_eq!(nth_tag_offset(source, "LI", 0), Some(0));
        assert_eq!(nth_tag_offset(source, "LI", 1), Some(20));
        assert_eq!(nth_tag_offset(source, "li", 0), Some(10));
        assert_eq!(nth_tag_offset(source, "li", 1), None);
    }

    #[test]
    fn unterminated_comment_swallows_the_rest() {
        let source = "<!-- <li>a</li><li>b</li>";
        assert_eq!(nth_tag_offset(source, "li", 0), None);
    }

    #[test]
    fn candidate_at_end_of_text_is_not_counted() {
        assert_eq!(nth_tag_offset("text<li", "li", 0), None);
    }

    #[test]
    fn whitespace_after_name_counts_as_boundary() {
        let source = "<li class=\"a\">x</li>";
        assert_eq!(nth_tag_offset(source, "li", 0), Some(0));
    }

    #[test]
    fn prefix_helper_handles_out_of_range_index() {
        assert!(has_prefix_at("abc", "bc", 1));
        assert!(!has_prefix_at("abc", "bc", 2));
        assert!(!has_prefix_at("abc", "x", 10));
    }

    proptest! {
        #[test]
        fn locates_synthetically_placed_tags(
            fillers in proptest::collection::vec("[a-z ]{0,12}", 1..8),
            target in 0usize..8,
        ) {
            // Interleave filler text with <li> tags; the scanner must report
            // the exact offset where each tag was placed.
            let mut source = String::new();
            let mut placed = Vec::new();
            for filler in &fillers {
                source.push_str(filler);
                placed.push(source.len());
                source.push_str("<li>item</li>");
            }
            match nth_tag_offset(&source, "li", target) {
                Some(offset) => prop_assert_eq!(offset, placed[target]),
                None => prop_assert!(target >= placed.len()),
            }
        }
    }
}
