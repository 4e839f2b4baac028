//! Vertical container stacking children into rows.

use std::{cmp::Ordering, mem, result::Result as StdResult};

use tracing::warn;

use crate::{
    canvas::Canvas,
    compose,
    container::{Allocation, focus_after_insert, focus_after_remove},
    error::{Error, PileError, Result},
    event::{Action, Key, KeyCode, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget, render_sized},
};

/// One pile row: a child widget plus its allocation.
struct Entry {
    /// The child widget.
    widget: Box<dyn Widget>,
    /// Main-axis allocation for the child.
    alloc: Allocation,
}

/// A vertical arrangement of child widgets.
///
/// `Given` children occupy a fixed number of rows, `Pack` children their
/// natural height, and `Weight` children share whatever a box-sized pile
/// has left over. Like [`crate::Columns`], the pile's own [`Sizing`] is
/// derived from its contents on every call.
pub struct Pile {
    /// Row entries in visual order.
    entries: Vec<Entry>,
    /// Focused row, `None` only when empty.
    focus: Option<usize>,
}

impl Pile {
    /// Construct an empty pile.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            focus: None,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a child.
    pub fn push(
        &mut self,
        widget: impl Into<Box<dyn Widget>>,
        alloc: Allocation,
    ) -> StdResult<(), PileError> {
        let index = self.entries.len();
        self.insert(index, widget, alloc)
    }

    /// Insert a child at `index`, re-deriving the focus position.
    pub fn insert(
        &mut self,
        index: usize,
        widget: impl Into<Box<dyn Widget>>,
        alloc: Allocation,
    ) -> StdResult<(), PileError> {
        if index > self.entries.len() {
            return Err(PileError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = alloc.invalid_weight() {
            return Err(PileError::InvalidWeight { weight });
        }
        self.entries.insert(
            index,
            Entry {
                widget: widget.into(),
                alloc,
            },
        );
        self.focus = focus_after_insert(self.focus, index);
        Ok(())
    }

    /// Remove and return the child at `index`, re-deriving the focus
    /// position.
    pub fn remove(&mut self, index: usize) -> StdResult<Box<dyn Widget>, PileError> {
        if index >= self.entries.len() {
            return Err(PileError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        self.focus = focus_after_remove(self.focus, index, self.entries.len());
        Ok(entry.widget)
    }

    /// Replace the child at `index`, returning the old widget. Focus stays
    /// on the same position.
    pub fn replace(
        &mut self,
        index: usize,
        widget: impl Into<Box<dyn Widget>>,
        alloc: Allocation,
    ) -> StdResult<Box<dyn Widget>, PileError> {
        if index >= self.entries.len() {
            return Err(PileError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = alloc.invalid_weight() {
            return Err(PileError::InvalidWeight { weight });
        }
        let mut entry = Entry {
            widget: widget.into(),
            alloc,
        };
        mem::swap(&mut self.entries[index], &mut entry);
        Ok(entry.widget)
    }

    /// Change the allocation of the child at `index`.
    pub fn set_allocation(&mut self, index: usize, alloc: Allocation) -> StdResult<(), PileError> {
        if index >= self.entries.len() {
            return Err(PileError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = alloc.invalid_weight() {
            return Err(PileError::InvalidWeight { weight });
        }
        self.entries[index].alloc = alloc;
        Ok(())
    }

    /// Borrow the child at `index`.
    pub fn widget(&self, index: usize) -> Option<&dyn Widget> {
        self.entries.get(index).map(|e| e.widget.as_ref())
    }

    /// Mutably borrow the child at `index`.
    pub fn widget_mut(&mut self, index: usize) -> Option<&mut (dyn Widget + 'static)> {
        self.entries.get_mut(index).map(|e| e.widget.as_mut())
    }

    /// The allocation of the child at `index`.
    pub fn allocation(&self, index: usize) -> Option<Allocation> {
        self.entries.get(index).map(|e| e.alloc)
    }

    /// The focused row index, `None` only when empty.
    pub fn focus_position(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus to the given row.
    pub fn set_focus(&mut self, index: usize) -> StdResult<(), PileError> {
        if index >= self.entries.len() {
            return Err(PileError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.focus = Some(index);
        Ok(())
    }

    /// The number of rows each child occupies at the given size.
    ///
    /// Flowing piles give every child its natural height; box piles carve
    /// the rows left after fixed and packed children out of the weighted
    /// children, ascending by weight with the running remainder corrected
    /// after every allocation.
    pub fn item_rows(&self, size: Size, focus: bool) -> Result<Vec<u32>> {
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile cannot size itself without a width".to_string())
        })?;

        let mut rows: Vec<i64> = Vec::with_capacity(self.entries.len());
        let mut weighted: Vec<(f64, usize)> = Vec::new();
        let mut fixed_total = 0i64;
        let box_rows = size.rows();

        for (i, e) in self.entries.iter().enumerate() {
            let focus_child = focus && Some(i) == self.focus;
            match e.alloc {
                Allocation::Given(n) => {
                    rows.push(n as i64);
                    fixed_total += n as i64;
                }
                Allocation::Weight(weight) if box_rows.is_some() => {
                    weighted.push((weight, i));
                    rows.push(0);
                }
                Allocation::Pack | Allocation::Weight(_) => {
                    let h = self.natural_rows(i, cols, focus_child)?;
                    rows.push(h as i64);
                    fixed_total += h as i64;
                }
            }
        }

        if let Some(maxrow) = box_rows {
            if weighted.is_empty() {
                return Err(PileError::NoWeightedChildren.into());
            }
            let mut remaining = (maxrow as i64 - fixed_total).max(0);
            let mut wtotal: f64 = weighted.iter().map(|(w, _)| w).sum();
            weighted.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            for (weight, i) in weighted {
                let h = if wtotal > 0.0 {
                    (remaining as f64 * weight / wtotal + 0.5) as i64
                } else {
                    0
                };
                let h = h.clamp(0, remaining);
                rows[i] = h;
                remaining -= h;
                wtotal -= weight;
            }
        }

        Ok(rows.into_iter().map(|r| r.max(0) as u32).collect())
    }

    /// The natural height of the child at `index` at the given width.
    fn natural_rows(&self, index: usize, cols: u32, focus: bool) -> Result<u32> {
        let e = &self.entries[index];
        let s = e.widget.sizing();
        if s.contains(Sizing::FLOW) {
            e.widget.rows(cols, focus)
        } else if s.contains(Sizing::FIXED) {
            Ok(e.widget.pack(Size::fixed(), focus)?.1)
        } else {
            Err(Error::Sizing(format!(
                "pile row {index} ({}) has no height of its own",
                e.widget.name()
            )))
        }
    }

    /// The size the child at `index` is driven with.
    fn child_size(&self, index: usize, cols: u32, rows: u32, box_mode: bool) -> Size {
        let e = &self.entries[index];
        let boxed = match e.alloc {
            Allocation::Given(_) => true,
            Allocation::Weight(_) => box_mode,
            Allocation::Pack => false,
        };
        if boxed && e.widget.sizing().contains(Sizing::BOX) {
            Size::boxed(cols, rows)
        } else {
            Size::flow(cols)
        }
    }

    /// The canvas y offset of row `index` for a set of item rows.
    fn row_offset(rows: &[u32], index: usize) -> u32 {
        rows.iter().take(index).sum()
    }

    /// Walk sibling candidates outward from the focus after an unhandled
    /// vertical key, entering the first selectable child that accepts the
    /// cursor at a row nearest the direction of travel.
    fn move_focus_vertical(
        &mut self,
        size: Size,
        item_rows: &[u32],
        down: bool,
    ) -> Result<bool> {
        let Some(f) = self.focus else {
            return Ok(false);
        };
        let cols = size.cols().unwrap_or(0);
        let box_mode = matches!(size, Size::Box { .. });

        let from_size = self.child_size(f, cols, item_rows[f], box_mode);
        let pref = self.entries[f]
            .widget
            .get_pref_col(from_size)?
            .unwrap_or(PrefCol::Leftmost);

        let candidates: Vec<usize> = if down {
            (f + 1..self.entries.len()).collect()
        } else {
            (0..f).rev().collect()
        };
        for i in candidates {
            if !self.entries[i].widget.selectable() {
                continue;
            }
            let h = item_rows[i];
            let cs = self.child_size(i, cols, h, box_mode);
            let rows_to_try: Vec<u32> = if down {
                (0..h.max(1)).collect()
            } else {
                (0..h.max(1)).rev().collect()
            };
            for row in rows_to_try {
                if self.entries[i].widget.move_cursor_to_coords(cs, pref, row)? {
                    self.focus = Some(i);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Default for Pile {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Pile {
    fn sizing(&self) -> Sizing {
        if self.entries.is_empty() {
            warn!("pile with no children cannot infer sizing, assuming box+flow");
            return Sizing::BOX | Sizing::FLOW;
        }

        let mut any_weight = false;
        let mut flow_ok = true;
        let mut box_ok = true;
        let mut ambiguous = false;

        for e in &self.entries {
            let s = e.widget.sizing();
            if s.is_empty() {
                ambiguous = true;
                continue;
            }
            let has_height = s.contains(Sizing::FLOW) || s.contains(Sizing::FIXED);
            match e.alloc {
                Allocation::Given(_) => {}
                Allocation::Pack => {
                    if !has_height {
                        flow_ok = false;
                        box_ok = false;
                        ambiguous = true;
                    }
                }
                Allocation::Weight(_) => {
                    any_weight = true;
                    if !has_height {
                        flow_ok = false;
                    }
                    if !has_height && !s.contains(Sizing::BOX) {
                        box_ok = false;
                    }
                }
            }
        }

        let mut result = Sizing::empty();
        if box_ok && any_weight {
            result |= Sizing::BOX;
        }
        if flow_ok {
            result |= Sizing::FLOW;
        }
        if ambiguous || result.is_empty() {
            warn!("cannot infer pile sizing from contents, assuming box+flow");
            return Sizing::BOX | Sizing::FLOW;
        }
        result
    }

    fn selectable(&self) -> bool {
        self.entries.iter().any(|e| e.widget.selectable())
    }

    fn rows(&self, cols: u32, focus: bool) -> Result<u32> {
        Ok(self.item_rows(Size::flow(cols), focus)?.iter().sum())
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile cannot render without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, focus)?;

        let mut parts = Vec::with_capacity(self.entries.len());
        for (i, e) in self.entries.iter().enumerate() {
            let h = item_rows[i];
            let focus_child = focus && Some(i) == self.focus;
            let cs = self.child_size(i, cols, h, box_mode);
            let mut canvas = render_sized(e.widget.as_ref(), cs, focus_child)?;
            if canvas.rows() != h {
                if matches!(e.alloc, Allocation::Pack) {
                    warn!(
                        "pile row {i} ({}) rendered {} rows but reported {h}",
                        e.widget.name(),
                        canvas.rows()
                    );
                }
                canvas.pad_trim(0, 0, 0, h as i32 - canvas.rows() as i32);
            }
            parts.push(canvas);
        }

        let mut canvas = compose::combine(parts);
        if box_mode
            && let Some(maxrow) = size.rows()
        {
            let delta = maxrow as i64 - canvas.rows() as i64;
            if delta != 0 {
                canvas.pad_trim(0, 0, 0, delta as i32);
            }
        }
        Ok(canvas)
    }

    fn keypress(&mut self, size: Size, key: Key) -> Result<Option<Key>> {
        let Some(f) = self.focus else {
            return Ok(Some(key));
        };
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile cannot route keys without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, true)?;

        let key = if self.entries[f].widget.selectable() {
            let cs = self.child_size(f, cols, item_rows[f], box_mode);
            match self.entries[f].widget.keypress(cs, key)? {
                None => return Ok(None),
                Some(key) => key,
            }
        } else {
            key
        };

        if key.is_plain(KeyCode::Up) && self.move_focus_vertical(size, &item_rows, false)? {
            return Ok(None);
        }
        if key.is_plain(KeyCode::Down) && self.move_focus_vertical(size, &item_rows, true)? {
            return Ok(None);
        }
        Ok(Some(key))
    }

    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile cannot route mouse events without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, focus)?;

        let mut start = 0u32;
        for i in 0..self.entries.len() {
            let h = item_rows[i];
            if event.pos.y < start + h {
                if event.action == Action::Down && self.entries[i].widget.selectable() {
                    self.focus = Some(i);
                }
                let cs = self.child_size(i, cols, h, box_mode);
                let child_event = event.translated(0, start);
                let focus_child = focus && Some(i) == self.focus;
                return self.entries[i]
                    .widget
                    .mouse_event(cs, &child_event, focus_child);
            }
            start += h;
        }
        Ok(false)
    }

    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        let Some(f) = self.focus else {
            return Ok(None);
        };
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile has no cursor without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, true)?;
        let cs = self.child_size(f, cols, item_rows[f], box_mode);
        let Some(p) = self.entries[f].widget.get_cursor_coords(cs)? else {
            return Ok(None);
        };
        Ok(Some(Point::new(p.x, p.y + Self::row_offset(&item_rows, f))))
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile cannot place a cursor without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, true)?;

        // Pick the selectable child nearest the requested row.
        let mut best: Option<(u32, usize, u32)> = None;
        let mut start = 0u32;
        for i in 0..self.entries.len() {
            let h = item_rows[i];
            let end = start + h;
            if self.entries[i].widget.selectable() {
                let distance = if row < start {
                    start - row
                } else if row >= end && h > 0 {
                    row - (end - 1)
                } else if h == 0 {
                    u32::MAX
                } else {
                    0
                };
                if best.map(|(d, _, _)| distance < d).unwrap_or(true) {
                    best = Some((distance, i, start));
                }
            }
            start = end;
        }
        let Some((_, i, item_start)) = best else {
            return Ok(false);
        };

        let h = item_rows[i];
        let child_row = row
            .saturating_sub(item_start)
            .min(h.saturating_sub(1));
        let cs = self.child_size(i, cols, h, box_mode);
        if self.entries[i]
            .widget
            .move_cursor_to_coords(cs, col, child_row)?
        {
            self.focus = Some(i);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_pref_col(&self, size: Size) -> Result<Option<PrefCol>> {
        let Some(f) = self.focus else {
            return Ok(None);
        };
        let cols = size.cols().ok_or_else(|| {
            Error::Sizing("pile has no preferred column without a width".to_string())
        })?;
        let box_mode = matches!(size, Size::Box { .. });
        let item_rows = self.item_rows(size, true)?;
        let cs = self.child_size(f, cols, item_rows[f], box_mode);
        self.entries[f].widget.get_pref_col(cs)
    }

    fn name(&self) -> String {
        "Pile".to_string()
    }
}
