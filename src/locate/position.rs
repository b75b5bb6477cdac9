//! Byte offset to line/column conversion.

use memchr::{memchr_iter, memrchr};

/// Convert a byte offset into a 1-based `(line, column)` pair.
///
/// The line number is one more than the count of newlines strictly before
/// `offset`; the column is the distance back to the most recent newline, or to
/// the start of the text when there is none. A document with no newlines
/// therefore reports line 1 and column `offset + 1`.
///
/// Total for any `offset <= source.len()`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source.as_bytes()[..offset];
    let line = memchr_iter(b'\n', before).count() + 1;
    let column = match memrchr(b'\n', before) {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn offset_zero_is_line_one_column_one() {
        assert_eq!(line_col("hello", 0), (1, 1));
        assert_eq!(line_col("", 0), (1, 1));
    }

    #[test]
    fn no_newlines_counts_columns_directly() {
        let source = "abcdef";
        assert_eq!(line_col(source, 3), (1, 4));
        assert_eq!(line_col(source, 6), (1, 7));
    }

    #[test]
    fn column_resets_after_newline() {
        let source = "ab\ncd\nef";
        assert_eq!(line_col(source, 2), (1, 3)); // the newline itself
        assert_eq!(line_col(source, 3), (2, 1));
        assert_eq!(line_col(source, 4), (2, 2));
        assert_eq!(line_col(source, 6), (3, 1));
    }

    #[test]
    fn offset_at_end_of_text() {
        assert_eq!(line_col("ab\ncd", 5), (2, 3));
    }

    fn naive_line_col(source: &str, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for byte in source.as_bytes()[..offset].iter() {
            if *byte == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    proptest! {
        #[test]
        fn agrees_with_naive_count(source in "[a-z\n]{0,200}", frac in 0.0f64..=1.0) {
            let offset = (source.len() as f64 * frac) as usize;
            prop_assert_eq!(line_col(&source, offset), naive_line_col(&source, offset));
        }
    }
}
