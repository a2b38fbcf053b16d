//! Row layout and cursor arithmetic for the PromptBox.
//!
//! Wrapping is done by `textwrap`, then each wrapped segment is located in the
//! buffer so every visual row is a byte range. A cursor byte offset maps to
//! one `(row, column)` pair, with columns in display cells (`unicode-width`),
//! so wide characters take two.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (2) + padding (2) consumed horizontally
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the box scrolls internally
pub(super) const MAX_VISIBLE_ROWS: u16 = 6;
/// Border + padding on the left edge
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

pub(super) fn inner_width(area_width: u16) -> usize {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize
}

/// textwrap options for a prompt row `width` cells wide.
pub(super) fn wrap_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Splits `text` into visual rows no wider than `width` cells.
///
/// textwrap trims the spaces at a break; here they stay at the end of the row
/// they follow (they may overhang the edge) so every byte belongs to a row.
/// Newlines end a row and are not part of any range. Never returns an empty vec.
pub(super) fn layout_rows(text: &str, width: usize) -> Vec<Range<usize>> {
    let options = wrap_options(width);
    let mut rows = Vec::new();
    let mut line_start = 0;
    for line in text.split('\n') {
        let line_end = line_start + line.len();
        let starts = segment_starts(text, line_start..line_end, &options);
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(line_end);
            rows.push(start..end);
        }
        line_start = line_end + 1;
    }
    rows
}

/// Byte offset in `text` where each wrapped segment of `line` begins.
fn segment_starts(text: &str, line: Range<usize>, options: &textwrap::Options<'_>) -> Vec<usize> {
    let mut starts = vec![line.start];
    let mut scan = line.start;
    for segment in textwrap::wrap(&text[line.clone()], options) {
        if segment.is_empty() {
            continue;
        }
        let start = text[scan..line.end]
            .find(&*segment)
            .map(|i| scan + i)
            .unwrap_or(scan);
        if start > line.start {
            starts.push(start);
        }
        scan = start + segment.len();
    }
    starts
}

/// `(row, column)` of the byte offset `pos`. At a soft wrap the cursor
/// belongs to the start of the following row.
pub(super) fn cursor_row_col(rows: &[Range<usize>], text: &str, pos: usize) -> (usize, usize) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= pos && pos <= r.end)
        .unwrap_or(0);
    let col = rows
        .get(row)
        .map(|r| text[r.start..pos.max(r.start)].width())
        .unwrap_or(0);
    (row, col)
}

/// Byte offset of the first character at or past cell `col` in `row`,
/// clamped to the row's end.
pub(super) fn offset_at(rows: &[Range<usize>], text: &str, row: usize, col: usize) -> usize {
    let Some(range) = rows.get(row) else {
        return text.len();
    };
    let mut cells = 0;
    for (i, ch) in text[range.clone()].char_indices() {
        if cells >= col {
            return range.start + i;
        }
        cells += ch.width().unwrap_or(0);
    }
    range.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_start(text: &str, pos: usize) -> usize {
    let before = text[..pos].trim_end_matches(|c: char| !c.is_alphanumeric());
    before
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_end(text: &str, pos: usize) -> usize {
    let after = &text[pos..];
    let skipped = after.len() - after.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let rest = &after[skipped..];
    let word = rest.find(|c: char| !c.is_alphanumeric()).unwrap_or(rest.len());
    pos + skipped + word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(text: &str, width: usize) -> Vec<&str> {
        layout_rows(text, width)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn empty_text_is_one_empty_row() {
        assert_eq!(rows_of("", 10), vec![""]);
    }

    #[test]
    fn short_text_is_one_row() {
        assert_eq!(rows_of("hello", 10), vec!["hello"]);
    }

    #[test]
    fn wraps_after_spaces() {
        assert_eq!(rows_of("hello world", 8), vec!["hello ", "world"]);
    }

    #[test]
    fn long_words_break_mid_word() {
        assert_eq!(rows_of("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn long_word_after_space_moves_to_next_row() {
        assert_eq!(rows_of("a bcdefgh", 4), vec!["a ", "bcde", "fgh"]);
    }

    #[test]
    fn newlines_end_rows() {
        assert_eq!(rows_of("a\n\nb\n", 10), vec!["a", "", "b", ""]);
    }

    #[test]
    fn cursor_at_soft_wrap_moves_to_next_row() {
        let text = "hello world";
        let rows = layout_rows(text, 8);
        assert_eq!(cursor_row_col(&rows, text, 6), (1, 0));
        assert_eq!(cursor_row_col(&rows, text, 5), (0, 5));
        assert_eq!(cursor_row_col(&rows, text, 11), (1, 5));
    }

    #[test]
    fn cursor_after_newline_is_on_next_row() {
        let text = "ab\n";
        let rows = layout_rows(text, 10);
        assert_eq!(cursor_row_col(&rows, text, 2), (0, 2));
        assert_eq!(cursor_row_col(&rows, text, 3), (1, 0));
    }

    #[test]
    fn wide_characters_wrap_by_display_width() {
        // Six cells hold three double-width characters
        assert_eq!(rows_of("一二三四五六七八", 6), vec!["一二三", "四五六", "七八"]);
    }

    #[test]
    fn cursor_columns_count_cells_for_wide_characters() {
        let text = "一二三四五六七八";
        let rows = layout_rows(text, 6);
        assert_eq!(cursor_row_col(&rows, text, text.len()), (2, 4));
        assert_eq!(offset_at(&rows, text, 1, 2), "一二三四".len());
        assert_eq!(offset_at(&rows, text, 1, 3), "一二三四五".len());
    }

    #[test]
    fn leading_spaces_stay_on_first_row() {
        assert_eq!(rows_of("  indented", 20), vec!["  indented"]);
    }

    #[test]
    fn cursor_columns_count_chars_not_bytes() {
        let text = "café au lait";
        let rows = layout_rows(text, 40);
        assert_eq!(cursor_row_col(&rows, text, "café".len()), (0, 4));
    }

    #[test]
    fn offset_at_clamps_to_row_end() {
        let text = "ab\nlonger";
        let rows = layout_rows(text, 10);
        assert_eq!(offset_at(&rows, text, 0, 5), 2);
        assert_eq!(offset_at(&rows, text, 1, 3), 6);
        assert_eq!(offset_at(&rows, text, 9, 0), text.len());
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 0), 0);
        assert_eq!(next_char_boundary(s, s.len()), s.len());
    }

    #[test]
    fn word_motions() {
        let s = "hello, quiet world";
        assert_eq!(prev_word_start(s, s.len()), 13);
        assert_eq!(prev_word_start(s, 13), 7);
        assert_eq!(prev_word_start(s, 3), 0);
        assert_eq!(next_word_end(s, 0), 5);
        assert_eq!(next_word_end(s, 5), 12);
        assert_eq!(next_word_end(s, s.len()), s.len());
    }
}
