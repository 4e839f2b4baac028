//! Solid fill widget.

use std::iter::repeat_n;

use crate::{
    canvas::{Canvas, Row},
    error::{Error, Result},
    sizing::{Size, Sizing},
    widget::Widget,
};

/// Fills its whole box with one glyph.
pub struct SolidFill {
    /// The fill glyph. Must occupy a single display column.
    ch: char,
}

impl SolidFill {
    /// Construct a fill from a single-width glyph.
    pub fn new(ch: char) -> Self {
        Self { ch }
    }
}

impl Widget for SolidFill {
    fn sizing(&self) -> Sizing {
        Sizing::BOX
    }

    fn render(&self, size: Size, _focus: bool) -> Result<Canvas> {
        let Size::Box { cols, rows } = size else {
            return Err(Error::Sizing(format!(
                "solid fill only box-sizes, asked for {size}"
            )));
        };
        let line: String = repeat_n(self.ch, cols as usize).collect();
        Ok(Canvas::new(
            (0..rows).map(|_| Row::text(line.clone())).collect(),
            cols,
            None,
        ))
    }

    fn name(&self) -> String {
        "SolidFill".to_string()
    }
}
