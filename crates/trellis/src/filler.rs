//! Vertical alignment decorator for a single child.

use std::result::Result as StdResult;

use crate::{
    align::{Height, ResolvedHeight, VAlign, top_bottom_filler},
    canvas::Canvas,
    error::{Error, FillerError, Result},
    event::{Key, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget, render_sized},
};

/// Aligns a single child vertically inside a box, filling the leftover rows
/// with blanks.
///
/// The vertical twin of [`crate::Padding`]: the child's height comes from
/// the [`Height`] mode, the leftover rows are split according to the
/// [`VAlign`] value with the shared percentage scaling.
pub struct Filler {
    /// The wrapped child.
    child: Box<dyn Widget>,
    /// Vertical alignment of the child.
    valign: VAlign,
    /// Height mode for the child.
    height: Height,
    /// Floor for relative heights.
    min_height: Option<u32>,
    /// Fixed rows always kept at the top.
    top: u32,
    /// Fixed rows always kept at the bottom.
    bottom: u32,
}

impl Filler {
    /// Wrap `child` with the given alignment and height mode.
    ///
    /// A `Pack` height asks the child for its flow height; a `Given` or
    /// `Relative` height renders the child as a box.
    pub fn new(
        child: impl Into<Box<dyn Widget>>,
        valign: VAlign,
        height: Height,
    ) -> StdResult<Self, FillerError> {
        let child = child.into();
        let s = child.sizing();
        match height {
            Height::Pack if !s.contains(Sizing::FLOW) => {
                return Err(FillerError::PackRequiresFlow);
            }
            Height::Given(_) | Height::Relative(_) if !s.contains(Sizing::BOX) => {
                return Err(FillerError::GivenRequiresBox);
            }
            _ => {}
        }
        Ok(Self {
            child,
            valign,
            height,
            min_height: None,
            top: 0,
            bottom: 0,
        })
    }

    /// Set a floor for relative heights.
    pub fn with_min_height(mut self, min_height: u32) -> Self {
        self.min_height = Some(min_height);
        self
    }

    /// Keep fixed blank rows above and below in addition to the alignment
    /// filler.
    pub fn with_margins(mut self, top: u32, bottom: u32) -> Self {
        self.top = top;
        self.bottom = bottom;
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

    /// Resolve the top and bottom filler rows for a container size.
    fn resolve(&self, cols: u32, rows: u32, focus: bool) -> Result<(i32, i32)> {
        let extent = match self.height {
            Height::Given(n) => ResolvedHeight::Given(n),
            Height::Relative(pct) => ResolvedHeight::Relative(pct),
            Height::Pack => ResolvedHeight::Given(self.child.rows(cols, focus)?),
        };
        Ok(top_bottom_filler(
            rows,
            self.valign,
            extent,
            self.min_height,
            self.top,
            self.bottom,
        ))
    }

    /// The size the child is driven with, given the resolved filler rows.
    fn child_size(&self, cols: u32, rows: u32, top: i32, bottom: i32) -> Size {
        match self.height {
            Height::Pack => Size::flow(cols),
            _ => {
                let inner = (rows as i64 - top as i64 - bottom as i64).max(0) as u32;
                Size::boxed(cols, inner)
            }
        }
    }

    /// Resolve the filler rows and child size in one step.
    fn layout(&self, size: Size, focus: bool) -> Result<(i32, i32, Size)> {
        let (Some(cols), Some(rows)) = (size.cols(), size.rows()) else {
            return Err(Error::Sizing(
                "filler only renders as a box".to_string(),
            ));
        };
        let (top, bottom) = self.resolve(cols, rows, focus)?;
        Ok((top, bottom, self.child_size(cols, rows, top, bottom)))
    }
}

impl Widget for Filler {
    fn sizing(&self) -> Sizing {
        Sizing::BOX
    }

    fn selectable(&self) -> bool {
        self.child.selectable()
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let (top, bottom, cs) = self.layout(size, focus)?;
        let mut canvas = render_sized(self.child.as_ref(), cs, focus)?;
        canvas.pad_trim(0, 0, top, bottom);
        Ok(canvas)
    }

    fn keypress(&mut self, size: Size, key: Key) -> Result<Option<Key>> {
        let (_, _, cs) = self.layout(size, true)?;
        self.child.keypress(cs, key)
    }

    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let (top, _, cs) = self.layout(size, focus)?;
        let y = event.pos.y as i64 - top as i64;
        if y < 0 {
            return Ok(false);
        }
        let mut child_event = *event;
        child_event.pos = Point::new(event.pos.x, y as u32);
        self.child.mouse_event(cs, &child_event, focus)
    }

    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        let (top, _, cs) = self.layout(size, true)?;
        let Some(p) = self.child.get_cursor_coords(cs)? else {
            return Ok(None);
        };
        let y = p.y as i64 + top as i64;
        if y < 0 || y >= size.rows().unwrap_or(0) as i64 {
            return Ok(None);
        }
        Ok(Some(Point::new(p.x, y as u32)))
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        let (top, _, cs) = self.layout(size, true)?;
        let child_row = (row as i64 - top as i64).max(0) as u32;
        self.child.move_cursor_to_coords(cs, col, child_row)
    }

    fn get_pref_col(&self, size: Size) -> Result<Option<PrefCol>> {
        let (_, _, cs) = self.layout(size, true)?;
        self.child.get_pref_col(cs)
    }

    fn name(&self) -> String {
        "Filler".to_string()
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
    fn middle_alignment_splits_the_leftover_rows() {
        let f = Filler::new(SolidFill::new('#'), VAlign::Middle, Height::Given(2)).unwrap();
        let canvas = f.render(Size::boxed(3, 6), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf![
            ""
            ""
            "###"
            "###"
            ""
            ""
        ]);
    }

    #[test]
    fn pack_height_asks_the_child() {
        let f = Filler::new(Text::new("hi"), VAlign::Middle, Height::Pack).unwrap();
        let canvas = f.render(Size::boxed(4, 5), false).unwrap();
        assert_eq!((canvas.cols(), canvas.rows()), (4, 5));
        CanvasTest::new(&canvas).assert_matches(buf![
            ""
            ""
            "hi"
            ""
            ""
        ]);
    }

    #[test]
    fn oversize_child_is_trimmed() {
        let f = Filler::new(SolidFill::new('#'), VAlign::Top, Height::Given(6)).unwrap();
        let canvas = f.render(Size::boxed(3, 4), false).unwrap();
        assert_eq!((canvas.cols(), canvas.rows()), (3, 4));
        CanvasTest::new(&canvas).assert_matches(buf![
            "###"
            "###"
            "###"
            "###"
        ]);
    }

    #[test]
    fn height_modes_validate_the_child() {
        assert_eq!(
            Filler::new(SolidFill::new('#'), VAlign::Top, Height::Pack).err(),
            Some(FillerError::PackRequiresFlow)
        );
        assert_eq!(
            Filler::new(Text::new("x"), VAlign::Top, Height::Given(2)).err(),
            Some(FillerError::GivenRequiresBox)
        );
    }

    #[test]
    fn cursor_is_translated_vertically() {
        let f = Filler::new(CursorGrid::new(1), VAlign::Middle, Height::Pack).unwrap();
        assert_eq!(
            f.get_cursor_coords(Size::boxed(4, 5)).unwrap(),
            Some(Point::new(0, 2))
        );
        let canvas = f.render(Size::boxed(4, 5), true).unwrap();
        assert_eq!(canvas.cursor(), Some(Point::new(0, 2)));
    }

    #[test]
    fn only_boxes_are_accepted() {
        let f = Filler::new(Text::new("x"), VAlign::Top, Height::Pack).unwrap();
        assert!(f.render(Size::flow(4), false).is_err());
        assert_eq!(f.sizing(), Sizing::BOX);
    }
}
