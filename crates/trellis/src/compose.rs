//! Compositor operators that build larger canvases from smaller ones.
//!
//! These are pure functions: they consume child canvases and produce a new
//! one, re-establishing the canvas width invariants as they go. The
//! remaining operators, which act on a single canvas, live on
//! [`Canvas`] itself (`pad_trim`, `overlay`, `fill_attr_where_none`).

use crate::{
    canvas::{Canvas, Row},
    geom::Point,
};

/// Lay canvases out left to right at explicit column offsets.
///
/// Each offset is where the part's left edge lands. Gaps between the running
/// right edge and the next offset are filled with blank, unattributed cells.
/// The result height is the tallest part; shorter parts are bottom-padded.
/// The first part carrying a cursor supplies the result cursor, translated
/// by its offset.
///
/// # Panics
///
/// Panics if an offset is left of the running right edge of the previous
/// parts. Overlapping parts are a usage error.
pub fn join(parts: Vec<(Canvas, u32)>) -> Canvas {
    let height = parts.iter().map(|(c, _)| c.rows()).max().unwrap_or(0);
    let mut rows: Vec<Row> = (0..height).map(|_| Row::text("")).collect();
    let mut cursor: Option<Point> = None;
    let mut edge = 0u32;

    for (part, offset) in &parts {
        assert!(
            *offset >= edge,
            "join part at offset {offset} overlaps the previous right edge {edge}"
        );
        let gap = offset - edge;
        for (y, row) in rows.iter_mut().enumerate() {
            if gap > 0 {
                row.extend(&Row::blank(gap));
            }
            if (y as u32) < part.rows() {
                row.extend(part.row(y as u32));
            } else {
                row.extend(&Row::blank(part.cols()));
            }
        }
        if cursor.is_none()
            && let Some(p) = part.cursor()
        {
            cursor = Some(Point::new(p.x + offset, p.y));
        }
        edge = offset + part.cols();
    }

    Canvas::new(rows, edge, cursor)
}

/// Stack canvases top to bottom.
///
/// All parts must already be full width; widening narrower parts is the
/// caller's job. The first part carrying a cursor supplies the result
/// cursor, translated by the rows stacked above it.
///
/// # Panics
///
/// Panics if the parts disagree on width.
pub fn combine(parts: Vec<Canvas>) -> Canvas {
    let cols = parts.first().map(Canvas::cols).unwrap_or(0);
    let mut rows: Vec<Row> = Vec::new();
    let mut cursor: Option<Point> = None;

    for part in parts {
        assert_eq!(
            part.cols(),
            cols,
            "combine requires equal-width canvases"
        );
        let offset = rows.len() as u32;
        if cursor.is_none()
            && let Some(p) = part.cursor()
        {
            cursor = Some(Point::new(p.x, p.y + offset));
        }
        for y in 0..part.rows() {
            rows.push(part.row(y).clone());
        }
    }

    Canvas::new(rows, cols, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Attr;

    fn canvas(lines: &[&str]) -> Canvas {
        let cols = lines
            .iter()
            .map(|l| crate::text::display_width(l) as u32)
            .max()
            .unwrap_or(0);
        Canvas::from_text(lines, cols)
    }

    fn with_cursor(lines: &[&str], x: u32, y: u32) -> Canvas {
        let mut c = canvas(lines);
        c.set_cursor(Some(Point::new(x, y)));
        c
    }

    #[test]
    fn join_abuts_parts() {
        let c = join(vec![(canvas(&["one"]), 0), (canvas(&["two"]), 3)]);
        assert_eq!(c.cols(), 6);
        assert_eq!(c.row_text(0), "onetwo");
    }

    #[test]
    fn join_fills_gaps_with_blanks() {
        let c = join(vec![(canvas(&["one"]), 0), (canvas(&["two"]), 4)]);
        assert_eq!(c.cols(), 7);
        assert_eq!(c.row_text(0), "one two");
    }

    #[test]
    fn join_bottom_pads_short_parts() {
        let c = join(vec![(canvas(&["a", "b"]), 0), (canvas(&["x"]), 1)]);
        assert_eq!(c.rows(), 2);
        assert_eq!(c.row_text(0), "ax");
        assert_eq!(c.row_text(1), "b ");
    }

    #[test]
    fn join_translates_first_cursor() {
        let c = join(vec![
            (canvas(&["aa"]), 0),
            (with_cursor(&["bb"], 1, 0), 3),
        ]);
        assert_eq!(c.cursor(), Some(Point::new(4, 0)));
    }

    #[test]
    #[should_panic(expected = "overlaps the previous right edge")]
    fn join_rejects_overlap() {
        let _ = join(vec![(canvas(&["one"]), 0), (canvas(&["two"]), 2)]);
    }

    #[test]
    fn join_of_nothing_is_empty() {
        let c = join(Vec::new());
        assert_eq!(c.cols(), 0);
        assert_eq!(c.rows(), 0);
    }

    #[test]
    fn combine_stacks_rows() {
        let c = combine(vec![canvas(&["aa", "bb"]), canvas(&["cc"])]);
        assert_eq!(c.rows(), 3);
        assert_eq!(c.row_text(2), "cc");
    }

    #[test]
    fn combine_translates_cursor_by_stacked_rows() {
        let c = combine(vec![canvas(&["aa", "bb"]), with_cursor(&["cc"], 1, 0)]);
        assert_eq!(c.cursor(), Some(Point::new(1, 2)));
    }

    #[test]
    #[should_panic(expected = "equal-width")]
    fn combine_rejects_width_mismatch() {
        let _ = combine(vec![canvas(&["aa"]), canvas(&["ccc"])]);
    }

    #[test]
    fn join_keeps_attributes() {
        let hot = Attr::new("hot");
        let mut left = canvas(&["ab"]);
        left.fill_attr_where_none(&hot);
        let c = join(vec![(left, 0), (canvas(&["cd"]), 3)]);
        let runs = c.content().next().unwrap();
        assert_eq!(runs[0], (Some(hot), None, "ab".to_string()));
        assert_eq!(runs[1], (None, None, " cd".to_string()));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn pad_trim_round_trips(
                left in 0i32..4,
                right in 0i32..4,
                top in 0i32..4,
                bottom in 0i32..4,
                lines in proptest::collection::vec("[a-z]{4}", 1..5),
            ) {
                let orig = Canvas::from_text(&lines, 4);
                let mut c = orig.clone();
                c.pad_trim(left, right, top, bottom);
                c.pad_trim(-left, -right, -top, -bottom);
                prop_assert_eq!(c, orig);
            }

            #[test]
            fn join_width_is_last_edge(offsets in proptest::collection::vec(0u32..4, 1..5)) {
                let mut parts = Vec::new();
                let mut edge = 0;
                for gap in &offsets {
                    let offset = edge + gap;
                    parts.push((Canvas::from_text(&["ab"], 2), offset));
                    edge = offset + 2;
                }
                let c = join(parts);
                prop_assert_eq!(c.cols(), edge);
                for y in 0..c.rows() {
                    prop_assert_eq!(crate::text::display_width(c.row_text(y)) as u32, edge);
                }
            }
        }
    }
}
