//! A protocol-complete widget for exercising containers in tests.

use std::{iter::repeat_n, ops::Range};

use crate::{
    canvas::{Canvas, Row},
    error::Result,
    event::{Action, Key, KeyCode, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget},
};

/// A selectable widget with a movable cursor.
///
/// Renders as a grid of dots, accepts cursor placement on a configurable
/// row range, consumes a configurable set of keys, and records the last
/// mouse event it saw. Containers under test route focus, keys, and
/// coordinates through it.
pub struct CursorGrid {
    /// Flow height of the grid.
    rows: u32,
    /// Current cursor position within the grid.
    cursor: Point,
    /// Rows that accept cursor placement. `None` accepts every row.
    accept_rows: Option<Range<u32>>,
    /// Key codes this widget consumes.
    consume: Vec<KeyCode>,
    /// The last mouse event delivered to this widget.
    pub last_mouse: Option<MouseEvent>,
}

impl CursorGrid {
    /// A grid of the given flow height.
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            cursor: Point::new(0, 0),
            accept_rows: None,
            consume: Vec::new(),
            last_mouse: None,
        }
    }

    /// Only accept cursor placement on the given rows.
    pub fn accepting(mut self, rows: Range<u32>) -> Self {
        self.accept_rows = Some(rows);
        self
    }

    /// Consume the given keys instead of bubbling them.
    pub fn consuming(mut self, keys: Vec<KeyCode>) -> Self {
        self.consume = keys;
        self
    }

    /// The current cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }
}

impl Widget for CursorGrid {
    fn sizing(&self) -> Sizing {
        Sizing::FLOW | Sizing::BOX
    }

    fn selectable(&self) -> bool {
        true
    }

    fn rows(&self, _cols: u32, _focus: bool) -> Result<u32> {
        Ok(self.rows)
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let cols = size.cols().unwrap_or(0);
        let rows = size.rows().unwrap_or(self.rows);
        let line: String = repeat_n('.', cols as usize).collect();
        Ok(Canvas::new(
            (0..rows).map(|_| Row::text(line.clone())).collect(),
            cols,
            focus.then_some(self.cursor),
        ))
    }

    fn keypress(&mut self, _size: Size, key: Key) -> Result<Option<Key>> {
        if self.consume.contains(&key.code) {
            Ok(None)
        } else {
            Ok(Some(key))
        }
    }

    fn mouse_event(&mut self, _size: Size, event: &MouseEvent, _focus: bool) -> Result<bool> {
        self.last_mouse = Some(*event);
        Ok(event.action == Action::Down)
    }

    fn get_cursor_coords(&self, _size: Size) -> Result<Option<Point>> {
        Ok(Some(self.cursor))
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        if let Some(accept) = &self.accept_rows
            && !accept.contains(&row)
        {
            return Ok(false);
        }
        let cols = size.cols().unwrap_or(1);
        let x = match col {
            PrefCol::Col(x) => x.min(cols.saturating_sub(1)),
            PrefCol::Leftmost => 0,
            PrefCol::Rightmost => cols.saturating_sub(1),
        };
        self.cursor = Point::new(x, row);
        Ok(true)
    }

    fn get_pref_col(&self, _size: Size) -> Result<Option<PrefCol>> {
        Ok(Some(PrefCol::Col(self.cursor.x)))
    }

    fn name(&self) -> String {
        "CursorGrid".to_string()
    }
}
