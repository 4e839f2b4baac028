//! The rendered output of a widget: text rows, attribute and charset runs,
//! and an optional cursor, for a fixed column width.

use std::{fmt, sync::Arc};

use crate::{
    geom::Point,
    rle::{self, Span},
    text::{display_width, slice_columns},
};

/// An opaque display attribute tag.
///
/// The canvas records which attribute covers which cells; resolving a tag to
/// concrete colors is the job of whatever writes the canvas to a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attr(Arc<str>);

impl Attr {
    /// Construct an attribute tag from a name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Attr {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Charset tag for a run of cells. An unset run is plain ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// UTF-8 text.
    Utf8,
    /// DEC special graphics.
    Dec,
}

/// A single canvas row: text plus attribute and charset coverage.
///
/// Invariant once stored in a [`Canvas`]: the text display width and the
/// totals of both span lists all equal the canvas width.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row text. Display width equals the canvas width exactly.
    text: String,
    /// Attribute runs covering the row.
    attr: Vec<Span<Attr>>,
    /// Charset runs covering the row.
    charset: Vec<Span<Charset>>,
}

impl Row {
    /// Construct a row from text and optional attribute/charset runs.
    ///
    /// Runs shorter than the text are extended with unset runs. Runs longer
    /// than the text are a construction error, reported when the row is
    /// handed to [`Canvas::new`].
    pub fn new(
        text: impl Into<String>,
        attr: Vec<Span<Attr>>,
        charset: Vec<Span<Charset>>,
    ) -> Self {
        Self {
            text: text.into(),
            attr,
            charset,
        }
    }

    /// Construct a row of text with no attributes.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new(), Vec::new())
    }

    /// A blank row of the given width.
    pub fn blank(cols: u32) -> Self {
        let mut row = Self::text(" ".repeat(cols as usize));
        row.pad_spans(cols);
        row
    }

    /// The row text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Attribute runs.
    pub fn attr_spans(&self) -> &[Span<Attr>] {
        &self.attr
    }

    /// Charset runs.
    pub fn charset_spans(&self) -> &[Span<Charset>] {
        &self.charset
    }

    /// Extend both span lists with unset runs up to `cols`.
    fn pad_spans(&mut self, cols: u32) {
        let alen = rle::len(&self.attr);
        rle::push(&mut self.attr, None, cols.saturating_sub(alen));
        let clen = rle::len(&self.charset);
        rle::push(&mut self.charset, None, cols.saturating_sub(clen));
    }

    /// Right-pad the row with blank, unattributed cells to `cols`.
    fn pad_to(&mut self, cols: u32) {
        let width = display_width(&self.text) as u32;
        for _ in width..cols {
            self.text.push(' ');
        }
        self.pad_spans(cols);
    }

    /// Clone the column range `[start, end)` of this row.
    pub(crate) fn slice(&self, start: u32, end: u32) -> Self {
        Self {
            text: slice_columns(&self.text, start as usize, end as usize),
            attr: rle::subseg(&self.attr, start, end),
            charset: rle::subseg(&self.charset, start, end),
        }
    }

    /// Append another row's cells to this one.
    pub(crate) fn extend(&mut self, other: &Self) {
        self.text.push_str(&other.text);
        rle::append(&mut self.attr, &other.attr);
        rle::append(&mut self.charset, &other.charset);
    }

    /// The (attr, charset, text) runs of this row, split at every boundary of
    /// either span list.
    fn runs(&self) -> Vec<(Option<Attr>, Option<Charset>, String)> {
        let mut out = Vec::new();
        let mut ai = self.attr.iter();
        let mut ci = self.charset.iter();
        let mut a = ai.next();
        let mut c = ci.next();
        let mut a_left = a.map(|s| s.n).unwrap_or(0);
        let mut c_left = c.map(|s| s.n).unwrap_or(0);
        let mut col = 0u32;
        while let (Some(aspan), Some(cspan)) = (a, c) {
            let n = a_left.min(c_left);
            out.push((
                aspan.value.clone(),
                cspan.value,
                slice_columns(&self.text, col as usize, (col + n) as usize),
            ));
            col += n;
            a_left -= n;
            c_left -= n;
            if a_left == 0 {
                a = ai.next();
                a_left = a.map(|s| s.n).unwrap_or(0);
            }
            if c_left == 0 {
                c = ci.next();
                c_left = c.map(|s| s.n).unwrap_or(0);
            }
        }
        out
    }
}

/// A rectangular buffer of rendered rows.
///
/// A canvas is produced once per render call and handed up the widget tree;
/// containers compose child canvases with the operators in [`crate::compose`]
/// and the methods here, then hand the result on untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// Canvas rows, top to bottom.
    rows: Vec<Row>,
    /// Canvas width in display columns.
    cols: u32,
    /// Cursor position, if any. Always within the canvas bounds.
    cursor: Option<Point>,
}

impl Canvas {
    /// Construct a canvas from raw rows.
    ///
    /// Rows narrower than `cols` are right-padded with blank, unattributed
    /// cells.
    ///
    /// # Panics
    ///
    /// Panics if a row's text is wider than `cols`, or if a row's span totals
    /// exceed its text width. These indicate a bug in the widget that built
    /// the rows.
    pub fn new(rows: Vec<Row>, cols: u32, cursor: Option<Point>) -> Self {
        let mut rows = rows;
        for (y, row) in rows.iter_mut().enumerate() {
            let width = display_width(&row.text) as u32;
            assert!(
                width <= cols,
                "canvas row {y} is {width} columns wide, wider than the declared {cols}"
            );
            assert!(
                rle::len(&row.attr) <= width,
                "canvas row {y}: attribute spans cover more than the row text"
            );
            assert!(
                rle::len(&row.charset) <= width,
                "canvas row {y}: charset spans cover more than the row text"
            );
            row.pad_to(cols);
        }
        let mut canvas = Self {
            rows,
            cols,
            cursor: None,
        };
        canvas.set_cursor(cursor);
        canvas
    }

    /// A blank canvas of the given dimensions.
    pub fn blank(cols: u32, rows: u32) -> Self {
        Self {
            rows: (0..rows).map(|_| Row::blank(cols)).collect(),
            cols,
            cursor: None,
        }
    }

    /// Construct an unattributed canvas from text lines, padded to `cols`.
    pub fn from_text<S: AsRef<str>>(lines: &[S], cols: u32) -> Self {
        Self::new(
            lines.iter().map(|l| Row::text(l.as_ref())).collect(),
            cols,
            None,
        )
    }

    /// Canvas width in display columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Canvas height in rows.
    pub fn rows(&self) -> u32 {
        self.rows.len() as u32
    }

    /// The cursor position, if any.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Set or clear the cursor. A position outside the canvas is dropped.
    pub fn set_cursor(&mut self, cursor: Option<Point>) {
        self.cursor = cursor.filter(|p| p.x < self.cols && p.y < self.rows());
    }

    /// The text of row `y`.
    pub fn row_text(&self, y: u32) -> &str {
        self.rows[y as usize].as_str()
    }

    /// Borrow row `y`.
    pub fn row(&self, y: u32) -> &Row {
        &self.rows[y as usize]
    }

    /// Iterate rows as (attr, charset, text) runs, for writing to a screen.
    pub fn content(&self) -> impl Iterator<Item = Vec<(Option<Attr>, Option<Charset>, String)>> {
        self.rows.iter().map(Row::runs)
    }

    /// Pad or trim each edge. Positive deltas pad with blank, unattributed
    /// cells; negative deltas trim. The cursor is shifted by `(left, top)`
    /// and dropped if it leaves the canvas.
    pub fn pad_trim(&mut self, left: i32, right: i32, top: i32, bottom: i32) {
        let old_cols = self.cols as i64;
        let new_cols = (old_cols + left as i64 + right as i64).max(0) as u32;

        if left != 0 || right != 0 {
            let keep_start = (-left).max(0) as u32;
            let keep_end = ((old_cols + (right as i64).min(0)).max(0) as u32).max(keep_start);
            let pad_left = left.max(0) as u32;
            for row in &mut self.rows {
                let mut out = if pad_left > 0 {
                    Row::blank(pad_left)
                } else {
                    Row::text("")
                };
                out.extend(&row.slice(keep_start, keep_end));
                out.pad_to(new_cols);
                *row = out;
            }
            self.cols = new_cols;
        }

        if top < 0 {
            let n = ((-top) as usize).min(self.rows.len());
            self.rows.drain(..n);
        } else {
            for _ in 0..top {
                self.rows.insert(0, Row::blank(self.cols));
            }
        }
        if bottom < 0 {
            let n = ((-bottom) as usize).min(self.rows.len());
            let keep = self.rows.len() - n;
            self.rows.truncate(keep);
        } else {
            for _ in 0..bottom {
                self.rows.push(Row::blank(self.cols));
            }
        }

        let moved = self.cursor.and_then(|p| {
            let x = p.x as i64 + left as i64;
            let y = p.y as i64 + top as i64;
            if x >= 0 && y >= 0 {
                Some(Point::new(x as u32, y as u32))
            } else {
                None
            }
        });
        self.cursor = None;
        self.set_cursor(moved);
    }

    /// Splice `other` into the rectangle implied by the four margins.
    ///
    /// The result cursor is `other`'s cursor translated by `(left, top)`.
    ///
    /// # Panics
    ///
    /// Panics if `other`'s dimensions disagree with the margins. That is a
    /// protocol violation by the caller, not a runtime condition.
    pub fn overlay(&mut self, other: Self, left: u32, right: u32, top: u32, bottom: u32) {
        assert_eq!(
            other.cols as i64,
            self.cols as i64 - left as i64 - right as i64,
            "overlay width disagrees with the horizontal margins"
        );
        assert_eq!(
            other.rows() as i64,
            self.rows() as i64 - top as i64 - bottom as i64,
            "overlay height disagrees with the vertical margins"
        );
        let cols = self.cols;
        for (i, orow) in other.rows.into_iter().enumerate() {
            let base = &self.rows[top as usize + i];
            let mut out = base.slice(0, left);
            out.extend(&orow);
            out.extend(&base.slice(cols - right, cols));
            self.rows[top as usize + i] = out;
        }
        let moved = other
            .cursor
            .map(|p| Point::new(p.x + left, p.y + top));
        self.cursor = None;
        self.set_cursor(moved);
    }

    /// Rewrite every unset attribute run to `attr`, leaving set runs alone.
    pub fn fill_attr_where_none(&mut self, attr: &Attr) {
        for row in &mut self.rows {
            let mut out = Vec::with_capacity(row.attr.len());
            for span in &row.attr {
                let value = span.value.clone().or_else(|| Some(attr.clone()));
                rle::push(&mut out, value, span.n);
            }
            row.attr = out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::Span;

    fn canvas(lines: &[&str]) -> Canvas {
        let cols = lines
            .iter()
            .map(|l| display_width(l) as u32)
            .max()
            .unwrap_or(0);
        Canvas::from_text(lines, cols)
    }

    #[test]
    fn construction_pads_narrow_rows() {
        let c = Canvas::from_text(&["ab", "a"], 4);
        assert_eq!(c.cols(), 4);
        assert_eq!(c.row_text(0), "ab  ");
        assert_eq!(c.row_text(1), "a   ");
        assert_eq!(rle::len(c.row(1).attr_spans()), 4);
        assert_eq!(rle::len(c.row(1).charset_spans()), 4);
    }

    #[test]
    #[should_panic(expected = "wider than the declared")]
    fn construction_rejects_wide_rows() {
        let _ = Canvas::from_text(&["hello"], 3);
    }

    #[test]
    #[should_panic(expected = "attribute spans cover more")]
    fn construction_rejects_overlong_spans() {
        let row = Row::new("ab", vec![Span::new(Some(Attr::new("x")), 5)], Vec::new());
        let _ = Canvas::new(vec![row], 4, None);
    }

    #[test]
    fn cursor_outside_bounds_is_dropped() {
        let c = Canvas::new(vec![Row::text("ab")], 2, Some(Point::new(5, 0)));
        assert_eq!(c.cursor(), None);
        let c = Canvas::new(vec![Row::text("ab")], 2, Some(Point::new(1, 0)));
        assert_eq!(c.cursor(), Some(Point::new(1, 0)));
    }

    #[test]
    fn pad_trim_pads_all_edges() {
        let mut c = canvas(&["ab", "cd"]);
        c.pad_trim(1, 2, 1, 0);
        assert_eq!(c.cols(), 5);
        assert_eq!(c.rows(), 3);
        assert_eq!(c.row_text(0), "     ");
        assert_eq!(c.row_text(1), " ab  ");
        assert_eq!(c.row_text(2), " cd  ");
    }

    #[test]
    fn pad_trim_trims() {
        let mut c = canvas(&["abcd", "efgh", "ijkl"]);
        c.pad_trim(-1, -1, -1, 0);
        assert_eq!(c.cols(), 2);
        assert_eq!(c.rows(), 2);
        assert_eq!(c.row_text(0), "fg");
        assert_eq!(c.row_text(1), "jk");
    }

    #[test]
    fn pad_trim_round_trip() {
        let orig = canvas(&["abcd", "efgh"]);
        let mut c = orig.clone();
        c.pad_trim(2, 1, 1, 3);
        c.pad_trim(-2, -1, -1, -3);
        assert_eq!(c, orig);
    }

    #[test]
    fn pad_trim_moves_cursor() {
        let mut c = Canvas::new(vec![Row::text("ab"), Row::text("cd")], 2, Some(Point::new(1, 1)));
        c.pad_trim(2, 0, 1, 0);
        assert_eq!(c.cursor(), Some(Point::new(3, 2)));
        c.pad_trim(-4, 0, 0, 0);
        assert_eq!(c.cursor(), None);
    }

    #[test]
    fn overlay_splices_rows() {
        let mut base = canvas(&["....", "....", "...."]);
        let top = canvas(&["ab"]);
        base.overlay(top, 1, 1, 1, 1);
        assert_eq!(base.row_text(0), "....");
        assert_eq!(base.row_text(1), ".ab.");
        assert_eq!(base.row_text(2), "....");
    }

    #[test]
    fn overlay_takes_top_cursor() {
        let mut base = Canvas::new(
            vec![Row::text("...."), Row::text("....")],
            4,
            Some(Point::new(0, 0)),
        );
        let top = Canvas::new(vec![Row::text("ab")], 2, Some(Point::new(1, 0)));
        base.overlay(top, 1, 1, 1, 0);
        assert_eq!(base.cursor(), Some(Point::new(2, 1)));
    }

    #[test]
    #[should_panic(expected = "overlay width")]
    fn overlay_rejects_bad_width() {
        let mut base = canvas(&["....", "...."]);
        base.overlay(canvas(&["abc"]), 1, 1, 0, 1);
    }

    #[test]
    fn fill_attr_only_touches_unset_runs() {
        let highlight = Attr::new("highlight");
        let row = Row::new(
            "abcd",
            vec![Span::new(Some(highlight.clone()), 2)],
            Vec::new(),
        );
        let mut c = Canvas::new(vec![row], 4, None);
        let dim = Attr::new("dim");
        c.fill_attr_where_none(&dim);
        assert_eq!(
            c.row(0).attr_spans(),
            &[
                Span::new(Some(highlight), 2),
                Span::new(Some(dim), 2),
            ]
        );
    }

    #[test]
    fn content_runs_split_at_both_boundaries() {
        let a = Attr::new("a");
        let row = Row::new(
            "abcd",
            vec![Span::new(Some(a.clone()), 2)],
            vec![Span::new(Some(Charset::Utf8), 3)],
        );
        let c = Canvas::new(vec![row], 4, None);
        let runs: Vec<_> = c.content().next().unwrap();
        assert_eq!(
            runs,
            vec![
                (Some(a), Some(Charset::Utf8), "ab".to_string()),
                (None, Some(Charset::Utf8), "c".to_string()),
                (None, None, "d".to_string()),
            ]
        );
    }

    #[test]
    fn wide_glyphs_survive_whole_column_ops() {
        let mut c = Canvas::from_text(&["a界b"], 4);
        c.pad_trim(-1, 0, 0, 0);
        assert_eq!(c.row_text(0), "界b");
        let mut c = Canvas::from_text(&["a界b"], 4);
        c.pad_trim(-2, 0, 0, 0);
        assert_eq!(c.row_text(0), " b");
    }
}
