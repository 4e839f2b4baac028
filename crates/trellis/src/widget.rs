//! The widget trait: the sizing protocol every leaf and container satisfies.

use std::any::type_name;

use crate::{
    canvas::Canvas,
    error::{Error, Result},
    event::{Key, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
};

/// A preferred horizontal cursor position, remembered across vertical moves.
///
/// The sentinels let a widget ask for "as far left/right as you can" without
/// knowing the neighbor's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefCol {
    /// An absolute column.
    Col(u32),
    /// The leftmost position the widget can place its cursor.
    Leftmost,
    /// The rightmost position the widget can place its cursor.
    Rightmost,
}

/// The protocol every widget implements.
///
/// A widget declares its capabilities through [`Widget::sizing`] and must
/// accept every method call made with a size variant in that set. Callers,
/// in turn, must not stray outside it; doing so is a programming error
/// reported through [`Error::Sizing`].
pub trait Widget {
    /// The sizing modes this widget supports.
    ///
    /// For containers this is derived from the children and their layout
    /// options, so it can change when contents change.
    fn sizing(&self) -> Sizing;

    /// True when this widget accepts focus.
    fn selectable(&self) -> bool {
        false
    }

    /// Render into a canvas.
    ///
    /// The returned canvas dimensions must equal the request exactly for
    /// `Flow` and `Box`; for `Fixed` the widget chooses both dimensions and
    /// must report the same ones from [`Widget::pack`].
    fn render(&self, size: Size, focus: bool) -> Result<Canvas>;

    /// The number of rows this widget needs at the given width.
    ///
    /// Required for widgets declaring `FLOW`.
    fn rows(&self, cols: u32, focus: bool) -> Result<u32> {
        let _ = (cols, focus);
        Err(Error::Sizing(format!(
            "{} does not implement rows()",
            self.name()
        )))
    }

    /// The (cols, rows) this widget wants for the given request.
    ///
    /// Required for widgets declaring `FIXED`; also usable as a size probe
    /// under `Flow` and `Box` requests, where the default answers from
    /// [`Widget::rows`] and the request itself.
    fn pack(&self, size: Size, focus: bool) -> Result<(u32, u32)> {
        match size {
            Size::Fixed => Err(Error::Sizing(format!(
                "{} does not implement pack()",
                self.name()
            ))),
            Size::Flow { cols } => Ok((cols, self.rows(cols, focus)?)),
            Size::Box { cols, rows } => Ok((cols, rows)),
        }
    }

    /// Handle a key press. `Ok(None)` consumes the key; `Ok(Some(key))`
    /// bubbles it to the enclosing container.
    fn keypress(&mut self, size: Size, key: Key) -> Result<Option<Key>> {
        let _ = size;
        Ok(Some(key))
    }

    /// Handle a mouse event positioned in this widget's coordinates.
    /// Returns true when the event was handled.
    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let _ = (size, event, focus);
        Ok(false)
    }

    /// The cursor position this widget would show at the given size.
    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        let _ = size;
        Ok(None)
    }

    /// Try to place the cursor at the given coordinates.
    ///
    /// Widgets without a cursor accept unconditionally so focus can still
    /// enter them; cursor-bearing widgets return false for rows they cannot
    /// place a cursor on.
    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        let _ = (size, col, row);
        Ok(true)
    }

    /// The column the cursor would like to keep across vertical moves.
    fn get_pref_col(&self, size: Size) -> Result<Option<PrefCol>> {
        let _ = size;
        Ok(None)
    }

    /// Short name used in diagnostics.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

/// Render a widget and check the returned canvas against the request.
///
/// Containers always render children through this; a disagreement means the
/// child violated the sizing protocol and the render pass must stop.
pub fn render_sized(widget: &dyn Widget, size: Size, focus: bool) -> Result<Canvas> {
    let canvas = widget.render(size, focus)?;
    let cols_ok = size.cols().is_none_or(|c| canvas.cols() == c);
    let rows_ok = size.rows().is_none_or(|r| canvas.rows() == r);
    if cols_ok && rows_ok {
        Ok(canvas)
    } else {
        Err(Error::SizeMismatch {
            widget: widget.name(),
            request: size,
            cols: canvas.cols(),
            rows: canvas.rows(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Row;

    struct Fixed3x2;

    impl Widget for Fixed3x2 {
        fn sizing(&self) -> Sizing {
            Sizing::FIXED
        }

        fn render(&self, _size: Size, _focus: bool) -> Result<Canvas> {
            Ok(Canvas::new(vec![Row::text("abc"), Row::text("def")], 3, None))
        }

        fn pack(&self, _size: Size, _focus: bool) -> Result<(u32, u32)> {
            Ok((3, 2))
        }
    }

    struct LyingFlow;

    impl Widget for LyingFlow {
        fn sizing(&self) -> Sizing {
            Sizing::FLOW
        }

        fn rows(&self, _cols: u32, _focus: bool) -> Result<u32> {
            Ok(1)
        }

        fn render(&self, _size: Size, _focus: bool) -> Result<Canvas> {
            Ok(Canvas::from_text(&["xx"], 2))
        }
    }

    #[test]
    fn render_sized_accepts_honest_widgets() {
        let c = render_sized(&Fixed3x2, Size::fixed(), false).unwrap();
        assert_eq!((c.cols(), c.rows()), (3, 2));
    }

    #[test]
    fn render_sized_reports_mismatch() {
        let err = render_sized(&LyingFlow, Size::flow(10), false).unwrap_err();
        match err {
            Error::SizeMismatch { cols, rows, .. } => {
                assert_eq!((cols, rows), (2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_pack_probes_flow_widgets() {
        let w = LyingFlow;
        assert_eq!(w.pack(Size::flow(7), false).unwrap(), (7, 1));
        assert!(w.pack(Size::fixed(), false).is_err());
    }

    #[test]
    fn diagnostics_use_the_short_type_name() {
        assert_eq!(Fixed3x2.name(), "Fixed3x2");
    }
}
