//! A floating widget stacked over a full-size backdrop.

use std::result::Result as StdResult;

use crate::{
    align::{
        Align, Height, ResolvedHeight, ResolvedWidth, VAlign, Width, left_right_padding,
        top_bottom_filler,
    },
    canvas::Canvas,
    error::{Error, OverlayError, Result},
    event::{Key, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget, render_sized},
};

/// Which of the two stacked widgets owns the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The floating widget.
    Top,
    /// The backdrop.
    Bottom,
}

/// Stacks a top widget over a bottom widget.
///
/// The bottom widget is always a box rendered at the full requested size.
/// The top widget's placement is resolved with the same margin math as
/// [`crate::Padding`] and [`crate::Filler`], both axes at once, and spliced
/// in with [`Canvas::overlay`].
pub struct Overlay {
    /// The floating widget.
    top: Box<dyn Widget>,
    /// The backdrop, always box-rendered at full size.
    bottom: Box<dyn Widget>,
    /// Horizontal alignment of the top widget.
    align: Align,
    /// Width mode for the top widget.
    width: Width,
    /// Vertical alignment of the top widget.
    valign: VAlign,
    /// Height mode for the top widget.
    height: Height,
    /// Floor for relative widths.
    min_width: Option<u32>,
    /// Floor for relative heights.
    min_height: Option<u32>,
    /// Fixed columns kept clear on the left.
    left: u32,
    /// Fixed columns kept clear on the right.
    right: u32,
    /// Fixed rows kept clear at the top.
    top_margin: u32,
    /// Fixed rows kept clear at the bottom.
    bottom_margin: u32,
    /// The part input is routed to.
    focus_part: Part,
}

/// The resolved placement of the top widget for one container size.
struct Placement {
    /// Columns left of the top widget.
    left: i32,
    /// Columns right of the top widget.
    right: i32,
    /// Rows above the top widget.
    top: i32,
    /// Rows below the top widget.
    bottom: i32,
    /// The size the top widget renders with.
    top_size: Size,
}

impl Overlay {
    /// Stack `top` over `bottom`.
    ///
    /// The width/height modes must match the top widget's capabilities:
    /// pack width and height need a fixed top widget, a pack height with a
    /// set width needs a flowing one, and set width and height need a box.
    pub fn new(
        top: impl Into<Box<dyn Widget>>,
        bottom: impl Into<Box<dyn Widget>>,
        align: Align,
        width: Width,
        valign: VAlign,
        height: Height,
    ) -> StdResult<Self, OverlayError> {
        let top = top.into();
        let s = top.sizing();
        match (width, height) {
            (Width::Clip, _) => return Err(OverlayError::ClipWidth),
            (Width::Pack, Height::Pack) => {
                if !s.contains(Sizing::FIXED) {
                    return Err(OverlayError::PackSizeRequiresFixed);
                }
            }
            (Width::Pack, _) => return Err(OverlayError::PackWidthWithGivenHeight),
            (_, Height::Pack) => {
                if !s.contains(Sizing::FLOW) {
                    return Err(OverlayError::PackHeightRequiresFlow);
                }
            }
            (_, _) => {
                if !s.contains(Sizing::BOX) {
                    return Err(OverlayError::GivenSizeRequiresBox);
                }
            }
        }
        Ok(Self {
            top,
            bottom: bottom.into(),
            align,
            width,
            valign,
            height,
            min_width: None,
            min_height: None,
            left: 0,
            right: 0,
            top_margin: 0,
            bottom_margin: 0,
            focus_part: Part::Top,
        })
    }

    /// Set floors for relative widths and heights.
    pub fn with_minimums(mut self, min_width: Option<u32>, min_height: Option<u32>) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Keep fixed clear margins around the top widget.
    pub fn with_margins(mut self, left: u32, right: u32, top: u32, bottom: u32) -> Self {
        self.left = left;
        self.right = right;
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    /// The part input is routed to.
    pub fn focus_part(&self) -> Part {
        self.focus_part
    }

    /// Route input to the given part.
    pub fn set_focus_part(&mut self, part: Part) {
        self.focus_part = part;
    }

    /// Borrow the floating widget.
    pub fn top(&self) -> &dyn Widget {
        self.top.as_ref()
    }

    /// Mutably borrow the floating widget.
    pub fn top_mut(&mut self) -> &mut (dyn Widget + 'static) {
        self.top.as_mut()
    }

    /// Borrow the backdrop.
    pub fn bottom(&self) -> &dyn Widget {
        self.bottom.as_ref()
    }

    /// Mutably borrow the backdrop.
    pub fn bottom_mut(&mut self) -> &mut (dyn Widget + 'static) {
        self.bottom.as_mut()
    }

    /// Resolve where the top widget lands for a container size.
    fn placement(&self, size: Size, focus: bool) -> Result<Placement> {
        let (Some(cols), Some(rows)) = (size.cols(), size.rows()) else {
            return Err(Error::Sizing("overlay only renders as a box".to_string()));
        };
        let focus_top = focus && self.focus_part == Part::Top;

        let (left, right, width) = match self.width {
            Width::Pack => {
                let (w, _) = self.top.pack(Size::fixed(), focus_top)?;
                let (l, r) = left_right_padding(
                    cols,
                    self.align,
                    ResolvedWidth::Given(w),
                    self.min_width,
                    self.left,
                    self.right,
                );
                (l, r, w)
            }
            Width::Given(n) => {
                let (l, r) = left_right_padding(
                    cols,
                    self.align,
                    ResolvedWidth::Given(n),
                    self.min_width,
                    self.left,
                    self.right,
                );
                (l, r, (cols as i64 - l as i64 - r as i64).max(0) as u32)
            }
            Width::Clip => unreachable!("clip width is rejected at construction"),
            Width::Relative(pct) => {
                let (l, r) = left_right_padding(
                    cols,
                    self.align,
                    ResolvedWidth::Relative(pct),
                    self.min_width,
                    self.left,
                    self.right,
                );
                (l, r, (cols as i64 - l as i64 - r as i64).max(0) as u32)
            }
        };

        let (top, bottom, top_size) = match self.height {
            Height::Pack if matches!(self.width, Width::Pack) => {
                let (_, h) = self.top.pack(Size::fixed(), focus_top)?;
                let (t, b) = top_bottom_filler(
                    rows,
                    self.valign,
                    ResolvedHeight::Given(h),
                    self.min_height,
                    self.top_margin,
                    self.bottom_margin,
                );
                (t, b, Size::fixed())
            }
            Height::Pack => {
                let h = self.top.rows(width, focus_top)?;
                let (t, b) = top_bottom_filler(
                    rows,
                    self.valign,
                    ResolvedHeight::Given(h),
                    self.min_height,
                    self.top_margin,
                    self.bottom_margin,
                );
                (t, b, Size::flow(width))
            }
            Height::Given(n) => {
                let (t, b) = top_bottom_filler(
                    rows,
                    self.valign,
                    ResolvedHeight::Given(n),
                    self.min_height,
                    self.top_margin,
                    self.bottom_margin,
                );
                let inner = (rows as i64 - t as i64 - b as i64).max(0) as u32;
                (t, b, Size::boxed(width, inner))
            }
            Height::Relative(pct) => {
                let (t, b) = top_bottom_filler(
                    rows,
                    self.valign,
                    ResolvedHeight::Relative(pct),
                    self.min_height,
                    self.top_margin,
                    self.bottom_margin,
                );
                let inner = (rows as i64 - t as i64 - b as i64).max(0) as u32;
                (t, b, Size::boxed(width, inner))
            }
        };

        Ok(Placement {
            left,
            right,
            top,
            bottom,
            top_size,
        })
    }

    /// The size the focused part is driven with.
    fn part_size(&self, size: Size, part: Part) -> Result<Size> {
        match part {
            Part::Bottom => Ok(size),
            Part::Top => Ok(self.placement(size, true)?.top_size),
        }
    }
}

impl Widget for Overlay {
    fn sizing(&self) -> Sizing {
        Sizing::BOX
    }

    fn selectable(&self) -> bool {
        match self.focus_part {
            Part::Top => self.top.selectable(),
            Part::Bottom => self.bottom.selectable(),
        }
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let (Some(cols), Some(rows)) = (size.cols(), size.rows()) else {
            return Err(Error::Sizing("overlay only renders as a box".to_string()));
        };
        let focus_top = self.focus_part == Part::Top;
        let mut bottom_canvas =
            render_sized(self.bottom.as_ref(), size, focus && !focus_top)?;

        let p = self.placement(size, focus)?;
        let mut top_canvas = render_sized(self.top.as_ref(), p.top_size, focus && focus_top)?;

        // Clamp a top widget that will not fit inside the backdrop.
        let left = p.left.max(0) as u32;
        let right = p.right.max(0) as u32;
        let top = p.top.max(0) as u32;
        let bottom = p.bottom.max(0) as u32;
        let want_cols = (cols - left - right) as i64;
        let want_rows = (rows - top - bottom) as i64;
        if top_canvas.cols() as i64 != want_cols {
            top_canvas.pad_trim(0, (want_cols - top_canvas.cols() as i64) as i32, 0, 0);
        }
        if top_canvas.rows() as i64 != want_rows {
            top_canvas.pad_trim(0, 0, 0, (want_rows - top_canvas.rows() as i64) as i32);
        }

        bottom_canvas.overlay(top_canvas, left, right, top, bottom);
        Ok(bottom_canvas)
    }

    fn keypress(&mut self, size: Size, key: Key) -> Result<Option<Key>> {
        let part_size = self.part_size(size, self.focus_part)?;
        match self.focus_part {
            Part::Top => self.top.keypress(part_size, key),
            Part::Bottom => self.bottom.keypress(part_size, key),
        }
    }

    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let p = self.placement(size, focus)?;
        let (Some(cols), Some(rows)) = (size.cols(), size.rows()) else {
            return Ok(false);
        };
        let left = p.left.max(0) as u32;
        let right = p.right.max(0) as u32;
        let top = p.top.max(0) as u32;
        let bottom = p.bottom.max(0) as u32;
        let inside = event.pos.x >= left
            && event.pos.x < cols - right
            && event.pos.y >= top
            && event.pos.y < rows - bottom;
        if inside {
            let child_event = event.translated(left, top);
            self.top
                .mouse_event(p.top_size, &child_event, focus && self.focus_part == Part::Top)
        } else {
            self.bottom
                .mouse_event(size, event, focus && self.focus_part == Part::Bottom)
        }
    }

    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        match self.focus_part {
            Part::Bottom => self.bottom.get_cursor_coords(size),
            Part::Top => {
                let p = self.placement(size, true)?;
                let Some(c) = self.top.get_cursor_coords(p.top_size)? else {
                    return Ok(None);
                };
                let x = c.x as i64 + p.left as i64;
                let y = c.y as i64 + p.top as i64;
                if x < 0 || y < 0 {
                    return Ok(None);
                }
                Ok(Some(Point::new(x as u32, y as u32)))
            }
        }
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        match self.focus_part {
            Part::Bottom => self.bottom.move_cursor_to_coords(size, col, row),
            Part::Top => {
                let p = self.placement(size, true)?;
                let child_col = match col {
                    PrefCol::Col(x) => {
                        PrefCol::Col((x as i64 - p.left as i64).max(0) as u32)
                    }
                    sentinel => sentinel,
                };
                let child_row = (row as i64 - p.top as i64).max(0) as u32;
                self.top
                    .move_cursor_to_coords(p.top_size, child_col, child_row)
            }
        }
    }

    fn get_pref_col(&self, size: Size) -> Result<Option<PrefCol>> {
        match self.focus_part {
            Part::Bottom => self.bottom.get_pref_col(size),
            Part::Top => {
                let p = self.placement(size, true)?;
                Ok(self.top.get_pref_col(p.top_size)?.map(|pref| match pref {
                    PrefCol::Col(x) => PrefCol::Col((x as i64 + p.left as i64).max(0) as u32),
                    sentinel => sentinel,
                }))
            }
        }
    }

    fn name(&self) -> String {
        "Overlay".to_string()
    }
}
