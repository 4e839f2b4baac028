//! Horizontal alignment decorator for a single child.

use std::result::Result as StdResult;

use tracing::warn;

use crate::{
    align::{Align, ResolvedWidth, Width, left_right_padding},
    canvas::Canvas,
    error::{Error, PaddingError, Result},
    event::{Key, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget, render_sized},
};

/// Aligns a single child horizontally, with optional fixed margins.
///
/// The child's width comes from the [`Width`] mode; leftover columns are
/// split between the sides according to the [`Align`] value, using the same
/// percentage scaling as [`crate::Filler`] does vertically.
pub struct Padding {
    /// The wrapped child.
    child: Box<dyn Widget>,
    /// Horizontal alignment of the child.
    align: Align,
    /// Width mode for the child.
    width: Width,
    /// Floor for relative widths.
    min_width: Option<u32>,
    /// Fixed columns always kept on the left.
    left: u32,
    /// Fixed columns always kept on the right.
    right: u32,
}

impl Padding {
    /// Wrap `child` with the given alignment and width mode.
    ///
    /// `Pack` and `Clip` widths render the child at its natural size, so
    /// they require a fixed-capable child.
    pub fn new(
        child: impl Into<Box<dyn Widget>>,
        align: Align,
        width: Width,
    ) -> StdResult<Self, PaddingError> {
        let child = child.into();
        match width {
            Width::Pack if !child.sizing().contains(Sizing::FIXED) => {
                return Err(PaddingError::PackRequiresFixed);
            }
            Width::Clip if !child.sizing().contains(Sizing::FIXED) => {
                return Err(PaddingError::ClipRequiresFixed);
            }
            _ => {}
        }
        Ok(Self {
            child,
            align,
            width,
            min_width: None,
            left: 0,
            right: 0,
        })
    }

    /// Set a floor for relative widths.
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Keep fixed blank margins on both sides in addition to the alignment
    /// padding.
    pub fn with_margins(mut self, left: u32, right: u32) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Borrow the wrapped child.
    pub fn base(&self) -> &dyn Widget {
        self.child.as_ref()
    }

    /// Mutably borrow the wrapped child.
    pub fn base_mut(&mut self) -> &mut (dyn Widget + 'static) {
        self.child.as_mut()
    }

    /// Unwrap into the child.
    pub fn into_base(self) -> Box<dyn Widget> {
        self.child
    }

    /// Resolve the left and right padding for a container width.
    fn resolve(&self, maxcol: u32, focus: bool) -> Result<(i32, i32)> {
        let extent = match self.width {
            Width::Given(n) => ResolvedWidth::Given(n),
            Width::Relative(pct) => ResolvedWidth::Relative(pct),
            Width::Pack => ResolvedWidth::Given(self.child.pack(Size::fixed(), focus)?.0),
            Width::Clip => ResolvedWidth::Clip(self.child.pack(Size::fixed(), focus)?.0),
        };
        Ok(left_right_padding(
            maxcol,
            self.align,
            extent,
            self.min_width,
            self.left,
            self.right,
        ))
    }

    /// The size the child is driven with, given the resolved padding.
    fn child_size(&self, maxcol: u32, maxrow: Option<u32>, left: i32, right: i32) -> Size {
        match self.width {
            Width::Pack | Width::Clip => Size::fixed(),
            _ => {
                let inner = (maxcol as i64 - left as i64 - right as i64).max(0) as u32;
                match maxrow {
                    Some(rows) if self.child.sizing().contains(Sizing::BOX) => {
                        Size::boxed(inner, rows)
                    }
                    _ => Size::flow(inner),
                }
            }
        }
    }
}

impl Widget for Padding {
    fn sizing(&self) -> Sizing {
        match self.width {
            Width::Pack | Width::Clip => Sizing::FLOW | Sizing::BOX,
            _ => {
                let s = self.child.sizing() & (Sizing::FLOW | Sizing::BOX);
                if s.is_empty() {
                    warn!(
                        "padding around {} cannot infer sizing, assuming box+flow",
                        self.child.name()
                    );
                    Sizing::BOX | Sizing::FLOW
                } else {
                    s
                }
            }
        }
    }

    fn selectable(&self) -> bool {
        self.child.selectable()
    }

    fn rows(&self, cols: u32, focus: bool) -> Result<u32> {
        match self.width {
            Width::Pack | Width::Clip => Ok(self.child.pack(Size::fixed(), focus)?.1),
            _ => {
                let (left, right) = self.resolve(cols, focus)?;
                let cs = self.child_size(cols, None, left, right);
                match cs {
                    Size::Flow { cols } => self.child.rows(cols, focus),
                    _ => unreachable!("padding child size is flow without a row bound"),
                }
            }
        }
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("padding cannot render without a width".to_string())
        })?;
        let (left, right) = self.resolve(cols, focus)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        let mut canvas = render_sized(self.child.as_ref(), cs, focus)?;
        canvas.pad_trim(left, right, 0, 0);
        if canvas.cols() != cols {
            canvas.pad_trim(0, cols as i32 - canvas.cols() as i32, 0, 0);
        }
        if let Some(rows) = size.rows() {
            let delta = rows as i64 - canvas.rows() as i64;
            if delta != 0 {
                canvas.pad_trim(0, 0, 0, delta as i32);
            }
        }
        Ok(canvas)
    }

    fn keypress(&mut self, size: Size, key: Key) -> Result<Option<Key>> {
        let Some(cols) = size.cols() else {
            return Ok(Some(key));
        };
        let (left, right) = self.resolve(cols, true)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        self.child.keypress(cs, key)
    }

    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let Some(cols) = size.cols() else {
            return Ok(false);
        };
        let (left, right) = self.resolve(cols, focus)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        let x = event.pos.x as i64 - left as i64;
        if x < 0 {
            return Ok(false);
        }
        let mut child_event = *event;
        child_event.pos = Point::new(x as u32, event.pos.y);
        self.child.mouse_event(cs, &child_event, focus)
    }

    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        let Some(cols) = size.cols() else {
            return Ok(None);
        };
        let (left, right) = self.resolve(cols, true)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        let Some(p) = self.child.get_cursor_coords(cs)? else {
            return Ok(None);
        };
        let x = p.x as i64 + left as i64;
        if x < 0 || x >= cols as i64 {
            return Ok(None);
        }
        Ok(Some(Point::new(x as u32, p.y)))
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        let Some(cols) = size.cols() else {
            return Ok(false);
        };
        let (left, right) = self.resolve(cols, true)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        let child_col = match col {
            PrefCol::Col(x) => PrefCol::Col((x as i64 - left as i64).max(0) as u32),
            sentinel => sentinel,
        };
        self.child.move_cursor_to_coords(cs, child_col, row)
    }

    fn get_pref_col(&self, size: Size) -> Result<Option<PrefCol>> {
        let Some(cols) = size.cols() else {
            return Ok(None);
        };
        let (left, right) = self.resolve(cols, true)?;
        let cs = self.child_size(cols, size.rows(), left, right);
        Ok(self.child.get_pref_col(cs)?.map(|pref| match pref {
            PrefCol::Col(x) => PrefCol::Col((x as i64 + left as i64).max(0) as u32),
            sentinel => sentinel,
        }))
    }

    fn name(&self) -> String {
        "Padding".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buf,
        testing::{CanvasTest, CursorGrid},
        widgets::{SolidFill, Text},
    };

    #[test]
    fn centered_given_width() {
        let p = Padding::new(Text::new("hi"), Align::Center, Width::Given(6)).unwrap();
        let canvas = p.render(Size::flow(10), false).unwrap();
        assert_eq!(canvas.cols(), 10);
        assert_eq!(canvas.row_text(0), "  hi      ");
    }

    #[test]
    fn pack_width_uses_the_natural_size() {
        let p = Padding::new(Text::new("hi"), Align::Right, Width::Pack).unwrap();
        let canvas = p.render(Size::flow(6), false).unwrap();
        assert_eq!(canvas.row_text(0), "    hi");
    }

    #[test]
    fn clip_trims_an_oversize_child() {
        let p = Padding::new(Text::new("abcdef"), Align::Left, Width::Clip).unwrap();
        let canvas = p.render(Size::flow(4), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf!["abcd"]);
        let p = Padding::new(Text::new("abcdef"), Align::Right, Width::Clip).unwrap();
        let canvas = p.render(Size::flow(4), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf!["cdef"]);
    }

    #[test]
    fn relative_width_respects_the_minimum() {
        let p = Padding::new(Text::new("abcdef"), Align::Left, Width::Relative(10))
            .unwrap()
            .with_min_width(4);
        let canvas = p.render(Size::flow(10), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf![
            "abcd"
            "ef"
        ]);
    }

    #[test]
    fn pack_needs_a_fixed_capable_child() {
        assert_eq!(
            Padding::new(SolidFill::new('#'), Align::Left, Width::Pack).err(),
            Some(PaddingError::PackRequiresFixed)
        );
        assert_eq!(
            Padding::new(SolidFill::new('#'), Align::Left, Width::Clip).err(),
            Some(PaddingError::ClipRequiresFixed)
        );
    }

    #[test]
    fn box_render_pads_both_axes() {
        let p = Padding::new(SolidFill::new('#'), Align::Left, Width::Given(2)).unwrap();
        let canvas = p.render(Size::boxed(5, 2), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf![
            "##"
            "##"
        ]);
        assert_eq!(canvas.cols(), 5);
    }

    #[test]
    fn rows_accounts_for_the_inner_width() {
        let p = Padding::new(Text::new("aa bb"), Align::Left, Width::Given(2)).unwrap();
        assert_eq!(p.rows(10, false).unwrap(), 2);
    }

    #[test]
    fn cursor_and_events_are_translated() {
        let mut p = Padding::new(CursorGrid::new(1), Align::Center, Width::Given(4)).unwrap();
        assert!(
            p.move_cursor_to_coords(Size::flow(10), PrefCol::Col(5), 0)
                .unwrap()
        );
        // left padding is 3, so container column 5 is child column 2.
        assert_eq!(
            p.get_cursor_coords(Size::flow(10)).unwrap(),
            Some(Point::new(5, 0))
        );
        assert_eq!(
            p.get_pref_col(Size::flow(10)).unwrap(),
            Some(PrefCol::Col(5))
        );
    }

    #[test]
    fn selectability_is_forwarded() {
        let p = Padding::new(CursorGrid::new(1), Align::Left, Width::Given(2)).unwrap();
        assert!(p.selectable());
        let p = Padding::new(Text::new("x"), Align::Left, Width::Given(2)).unwrap();
        assert!(!p.selectable());
    }
}
