//! Wrapped text widget.

use crate::{
    align::{Align, ResolvedWidth, left_right_padding},
    canvas::{Canvas, Row},
    error::{Error, Result},
    sizing::{Size, Sizing},
    text::{display_width, slice_columns},
    widget::Widget,
};

/// A block of text, wrapped to the available width.
///
/// Flows at any width and packs to its widest natural line, so it can be
/// used in `Pack` columns and fixed layouts alike.
pub struct Text {
    /// Raw text content. Embedded newlines are hard line breaks.
    content: String,
    /// Horizontal alignment of each line.
    align: Align,
}

impl Text {
    /// Construct a text widget.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            align: Align::Left,
        }
    }

    /// Set the line alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// The raw text content.
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Replace the text content.
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// The text wrapped to a width, one entry per canvas row.
    fn wrapped(&self, cols: u32) -> Vec<String> {
        let width = cols.max(1) as usize;
        let mut lines = Vec::new();
        for paragraph in self.content.split('\n') {
            for line in textwrap::wrap(paragraph, width) {
                lines.push(line.into_owned());
            }
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// Natural dimensions: the widest hard line and the line count.
    fn natural(&self) -> (u32, u32) {
        let mut cols = 0;
        let mut rows = 0;
        for line in self.content.split('\n') {
            cols = cols.max(display_width(line) as u32);
            rows += 1;
        }
        (cols, rows.max(1))
    }

    /// Render wrapped lines into a canvas of the given width.
    fn render_width(&self, cols: u32) -> Canvas {
        let rows = self
            .wrapped(cols)
            .into_iter()
            .map(|line| {
                // An unbreakable grapheme can defeat the wrap width; clip it.
                let mut line = line;
                let mut w = display_width(&line) as u32;
                if w > cols {
                    line = slice_columns(&line, 0, cols as usize);
                    w = cols;
                }
                let (left, _) = left_right_padding(
                    cols,
                    self.align,
                    ResolvedWidth::Given(w),
                    None,
                    0,
                    0,
                );
                let mut text = " ".repeat(left.max(0) as usize);
                text.push_str(&line);
                Row::text(text)
            })
            .collect();
        Canvas::new(rows, cols, None)
    }
}

impl Widget for Text {
    fn sizing(&self) -> Sizing {
        Sizing::FLOW | Sizing::FIXED
    }

    fn rows(&self, cols: u32, _focus: bool) -> Result<u32> {
        Ok(self.wrapped(cols).len() as u32)
    }

    fn pack(&self, size: Size, focus: bool) -> Result<(u32, u32)> {
        match size {
            Size::Fixed => Ok(self.natural()),
            Size::Flow { cols } => {
                let lines = self.wrapped(cols);
                let width = lines
                    .iter()
                    .map(|l| display_width(l) as u32)
                    .max()
                    .unwrap_or(0)
                    .min(cols);
                Ok((width, lines.len() as u32))
            }
            Size::Box { cols, rows } => Ok((cols, rows)),
        }
    }

    fn render(&self, size: Size, _focus: bool) -> Result<Canvas> {
        match size {
            Size::Flow { cols } => Ok(self.render_width(cols)),
            Size::Fixed => {
                let (cols, _) = self.natural();
                Ok(self.render_width(cols))
            }
            Size::Box { .. } => Err(Error::Sizing(format!(
                "text does not box-size, asked for {size}"
            ))),
        }
    }

    fn name(&self) -> String {
        "Text".to_string()
    }
}
