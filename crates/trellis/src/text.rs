//! Display-width helpers for canvas text.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Return the display width of a grapheme cluster, clamped to terminal cell widths.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    UnicodeWidthStr::width(grapheme).clamp(1, 2)
}

/// Return the display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Slice a string by display columns, returning exactly `end - start` columns.
///
/// When the slice boundary falls inside a double-width glyph, the surviving
/// half is replaced with a blank so the result width is exact.
pub fn slice_columns(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    let want = end - start;
    let mut out = String::new();
    let mut out_cols = 0usize;
    let mut col = 0usize;

    for grapheme in s.graphemes(true) {
        let width = grapheme_width(grapheme);
        if out_cols >= want {
            break;
        }
        let g_start = col;
        let g_end = col + width;
        col = g_end;

        if g_end <= start {
            continue;
        }
        if g_start < start {
            // Glyph straddles the left boundary; keep only its right half.
            for _ in start..g_end.min(end) {
                out.push(' ');
                out_cols += 1;
            }
            continue;
        }
        if g_end > end {
            // Glyph straddles the right boundary; keep only its left half.
            for _ in g_start..end {
                out.push(' ');
                out_cols += 1;
            }
            break;
        }
        out.push_str(grapheme);
        out_cols += width;
    }

    for _ in out_cols..want {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_plain_text() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn width_of_wide_and_combining() {
        assert_eq!(display_width("a界b"), 4);
        assert_eq!(display_width("A\u{0301}"), 1);
    }

    #[test]
    fn slice_plain() {
        assert_eq!(slice_columns("hello", 0, 5), "hello");
        assert_eq!(slice_columns("hello", 1, 4), "ell");
        assert_eq!(slice_columns("hello", 4, 5), "o");
    }

    #[test]
    fn slice_pads_short_input() {
        assert_eq!(slice_columns("hi", 0, 4), "hi  ");
        assert_eq!(slice_columns("hi", 3, 5), "  ");
    }

    #[test]
    fn slice_blanks_split_wide_glyphs() {
        // Cutting through 界 leaves a blank for the surviving half.
        assert_eq!(slice_columns("a界b", 0, 2), "a ");
        assert_eq!(slice_columns("a界b", 2, 4), " b");
        assert_eq!(slice_columns("a界b", 1, 3), "界");
    }

    #[test]
    fn slice_empty_range() {
        assert_eq!(slice_columns("hello", 3, 3), "");
        assert_eq!(slice_columns("hello", 4, 2), "");
    }

    #[test]
    fn slice_keeps_zwj_sequences_whole() {
        let s = "A👩‍💻B";
        assert_eq!(slice_columns(s, 0, 3), "A👩‍💻");
        assert_eq!(slice_columns(s, 1, 3), "👩‍💻");
        assert_eq!(slice_columns(s, 3, 4), "B");
    }
}
