//! Horizontal divider widget.

use std::iter::repeat_n;

use crate::{
    canvas::{Canvas, Row},
    error::{Error, Result},
    sizing::{Size, Sizing},
    widget::Widget,
};

/// A horizontal rule: one repeated glyph with optional blank rows around it.
pub struct Divider {
    /// The rule glyph. Must occupy a single display column.
    ch: char,
    /// Blank rows above the rule.
    top: u32,
    /// Blank rows below the rule.
    bottom: u32,
}

impl Divider {
    /// Construct a divider from a single-width glyph.
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            top: 0,
            bottom: 0,
        }
    }

    /// Add blank rows above and below the rule.
    pub fn with_blank(mut self, top: u32, bottom: u32) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }
}

impl Widget for Divider {
    fn sizing(&self) -> Sizing {
        Sizing::FLOW
    }

    fn rows(&self, _cols: u32, _focus: bool) -> Result<u32> {
        Ok(self.top + 1 + self.bottom)
    }

    fn render(&self, size: Size, _focus: bool) -> Result<Canvas> {
        let Size::Flow { cols } = size else {
            return Err(Error::Sizing(format!(
                "divider only flow-sizes, asked for {size}"
            )));
        };
        let mut rows = Vec::with_capacity((self.top + 1 + self.bottom) as usize);
        for _ in 0..self.top {
            rows.push(Row::blank(cols));
        }
        rows.push(Row::text(repeat_n(self.ch, cols as usize).collect::<String>()));
        for _ in 0..self.bottom {
            rows.push(Row::blank(cols));
        }
        Ok(Canvas::new(rows, cols, None))
    }

    fn name(&self) -> String {
        "Divider".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rule_between_blanks() {
        let d = Divider::new('-').with_blank(1, 0);
        assert_eq!(d.rows(4, false).unwrap(), 2);
        let c = d.render(Size::flow(4), false).unwrap();
        assert_eq!(c.row_text(0), "    ");
        assert_eq!(c.row_text(1), "----");
    }
}
