//! Horizontal container distributing columns among its children.

use std::{cmp::Ordering, mem, result::Result as StdResult};

use tracing::warn;

use crate::{
    canvas::Canvas,
    compose,
    container::{Allocation, focus_after_insert, focus_after_remove},
    error::{ColumnsError, Error, Result},
    event::{Action, Key, KeyCode, MouseEvent},
    geom::Point,
    sizing::{Size, Sizing},
    widget::{PrefCol, Widget, render_sized},
};

/// Layout options for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnOptions {
    /// Main-axis allocation for the child.
    pub alloc: Allocation,
    /// Box-render this child even when the container itself flows.
    pub box_widget: bool,
}

impl ColumnOptions {
    /// A column with a fixed width.
    pub fn given(cols: u32) -> Self {
        Self {
            alloc: Allocation::Given(cols),
            box_widget: false,
        }
    }

    /// A column taking a weighted share of the leftover width.
    pub fn weight(weight: f64) -> Self {
        Self {
            alloc: Allocation::Weight(weight),
            box_widget: false,
        }
    }

    /// A column at the child's natural width.
    pub fn pack() -> Self {
        Self {
            alloc: Allocation::Pack,
            box_widget: false,
        }
    }

    /// Mark the child as box-rendered even under a flow container.
    pub fn boxed(mut self) -> Self {
        self.box_widget = true;
        self
    }
}

/// One column: a child widget plus its layout options.
struct Entry {
    /// The child widget.
    widget: Box<dyn Widget>,
    /// Layout options for the child.
    options: ColumnOptions,
}

/// Computed layout for one container size: per-column widths, the shared
/// height box children render at, and the full canvas width.
struct ColLayout {
    /// Width of every column; zero means hidden.
    widths: Vec<u32>,
    /// Height box-rendered children receive.
    target: u32,
    /// Total canvas width the render must produce.
    total: u32,
}

impl ColLayout {
    /// The canvas x offset of column `i`, counting dividers between visible
    /// columns only.
    fn offset(&self, index: usize, divide: u32) -> u32 {
        let mut off = 0;
        for w in self.widths.iter().take(index) {
            if *w > 0 {
                off += w + divide;
            }
        }
        off
    }
}

/// A horizontal arrangement of child widgets.
///
/// Each child carries [`ColumnOptions`] controlling how the available width
/// is divided; the container's own [`Sizing`] is derived from its contents
/// on every call, never stored.
pub struct Columns {
    /// Column entries in visual order.
    entries: Vec<Entry>,
    /// Focused column, `None` only when empty.
    focus: Option<usize>,
    /// Blank columns between adjacent visible columns.
    dividechars: u32,
    /// Width floor for weighted columns.
    min_width: u32,
}

impl Columns {
    /// Construct an empty columns container.
    pub fn new(dividechars: u32) -> Self {
        Self {
            entries: Vec::new(),
            focus: None,
            dividechars,
            min_width: 1,
        }
    }

    /// Set the width floor for weighted columns.
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = min_width;
        self
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a child.
    pub fn push(
        &mut self,
        widget: impl Into<Box<dyn Widget>>,
        options: ColumnOptions,
    ) -> StdResult<(), ColumnsError> {
        let index = self.entries.len();
        self.insert(index, widget, options)
    }

    /// Insert a child at `index`, re-deriving the focus position.
    pub fn insert(
        &mut self,
        index: usize,
        widget: impl Into<Box<dyn Widget>>,
        options: ColumnOptions,
    ) -> StdResult<(), ColumnsError> {
        if index > self.entries.len() {
            return Err(ColumnsError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = options.alloc.invalid_weight() {
            return Err(ColumnsError::InvalidWeight { weight });
        }
        self.entries.insert(
            index,
            Entry {
                widget: widget.into(),
                options,
            },
        );
        self.focus = focus_after_insert(self.focus, index);
        Ok(())
    }

    /// Remove and return the child at `index`, re-deriving the focus
    /// position.
    pub fn remove(&mut self, index: usize) -> StdResult<Box<dyn Widget>, ColumnsError> {
        if index >= self.entries.len() {
            return Err(ColumnsError::IndexOutOfRange {
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
        options: ColumnOptions,
    ) -> StdResult<Box<dyn Widget>, ColumnsError> {
        if index >= self.entries.len() {
            return Err(ColumnsError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = options.alloc.invalid_weight() {
            return Err(ColumnsError::InvalidWeight { weight });
        }
        let mut entry = Entry {
            widget: widget.into(),
            options,
        };
        mem::swap(&mut self.entries[index], &mut entry);
        Ok(entry.widget)
    }

    /// Change the layout options of the child at `index`.
    pub fn set_options(&mut self, index: usize, options: ColumnOptions) -> StdResult<(), ColumnsError> {
        if index >= self.entries.len() {
            return Err(ColumnsError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if let Some(weight) = options.alloc.invalid_weight() {
            return Err(ColumnsError::InvalidWeight { weight });
        }
        self.entries[index].options = options;
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

    /// The layout options of the child at `index`.
    pub fn options(&self, index: usize) -> Option<ColumnOptions> {
        self.entries.get(index).map(|e| e.options)
    }

    /// The focused column index, `None` only when empty.
    pub fn focus_position(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus to the given column.
    pub fn set_focus(&mut self, index: usize) -> StdResult<(), ColumnsError> {
        if index >= self.entries.len() {
            return Err(ColumnsError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.focus = Some(index);
        Ok(())
    }

    /// Divide the available width among the columns.
    ///
    /// `Given` and `Pack` columns consume their width first; weighted
    /// columns share what is left, no narrower than the configured floor.
    /// Under a deficit, columns are hidden from the left (sparing the focus
    /// column when possible) until the rest fits. A width of zero hides a
    /// column entirely.
    pub fn column_widths(&self, cols: u32, focus: bool) -> Result<Vec<u32>> {
        let divide = self.dividechars as i64;
        let mut widths: Vec<i64> = Vec::with_capacity(self.entries.len());
        let mut weighted: Vec<(f64, usize)> = Vec::new();
        let mut shared = cols as i64 + divide;

        for (i, e) in self.entries.iter().enumerate() {
            let w = match e.options.alloc {
                Allocation::Given(n) => n as i64,
                Allocation::Pack => self.pack_probe(i, cols, focus)? as i64,
                Allocation::Weight(weight) => {
                    weighted.push((weight, i));
                    self.min_width as i64
                }
            };
            shared -= w + divide;
            widths.push(w);
        }

        if shared < 0 {
            for i in 0..widths.len() {
                if shared >= 0 {
                    break;
                }
                if Some(i) == self.focus {
                    continue;
                }
                if widths[i] > 0 {
                    shared += widths[i] + divide;
                    widths[i] = 0;
                }
            }
            if shared < 0
                && let Some(f) = self.focus
                && widths.get(f).copied().unwrap_or(0) > 0
            {
                shared += widths[f] + divide;
                widths[f] = 0;
            }
        }

        // Hidden columns stay hidden; they take no part in the share-out.
        let live: Vec<(f64, usize)> = weighted
            .into_iter()
            .filter(|(_, i)| widths[*i] > 0)
            .collect();
        if !live.is_empty() && shared > 0 {
            let mut grow = shared + live.len() as i64 * self.min_width as i64;
            let mut wtotal: f64 = live.iter().map(|(w, _)| w).sum();
            let mut order = live;
            order.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            for (weight, i) in order {
                let w = if wtotal > 0.0 {
                    (grow as f64 * weight / wtotal + 0.5) as i64
                } else {
                    0
                };
                let w = w.max(self.min_width as i64);
                widths[i] = w;
                grow -= w;
                wtotal -= weight;
            }
        }

        Ok(widths.into_iter().map(|w| w.max(0) as u32).collect())
    }

    /// The natural width of a `Pack` column.
    fn pack_probe(&self, index: usize, cols: u32, focus: bool) -> Result<u32> {
        let e = &self.entries[index];
        let focus_child = focus && Some(index) == self.focus;
        let s = e.widget.sizing();
        if s.contains(Sizing::FIXED) {
            Ok(e.widget.pack(Size::fixed(), focus_child)?.0)
        } else if s.contains(Sizing::FLOW) {
            Ok(e.widget.pack(Size::flow(cols), focus_child)?.0)
        } else {
            warn!(
                "pack column {index} ({}) supports neither fixed nor flow sizing, \
                 giving it the full width",
                e.widget.name()
            );
            Ok(cols)
        }
    }

    /// Natural per-column widths for fixed sizing, where no caller width is
    /// available to distribute.
    fn natural_widths(&self, focus: bool) -> Result<Vec<u32>> {
        let mut widths = Vec::with_capacity(self.entries.len());
        for (i, e) in self.entries.iter().enumerate() {
            let focus_child = focus && Some(i) == self.focus;
            let w = match e.options.alloc {
                Allocation::Given(n) => n,
                Allocation::Pack => {
                    if e.widget.sizing().contains(Sizing::FIXED) {
                        e.widget.pack(Size::fixed(), focus_child)?.0
                    } else {
                        return Err(Error::Sizing(format!(
                            "pack column {i} ({}) cannot report a natural width",
                            e.widget.name()
                        )));
                    }
                }
                Allocation::Weight(_) => {
                    if e.options.box_widget {
                        self.min_width
                    } else {
                        return Err(Error::Sizing(format!(
                            "weighted column {i} ({}) prevents fixed sizing",
                            e.widget.name()
                        )));
                    }
                }
            };
            widths.push(w);
        }
        Ok(widths)
    }

    /// Total canvas width for a set of widths: visible columns plus the
    /// dividers between them.
    fn joined_width(&self, widths: &[u32]) -> u32 {
        let visible = widths.iter().filter(|w| **w > 0).count() as u32;
        let dividers = visible.saturating_sub(1) * self.dividechars;
        widths.iter().sum::<u32>() + dividers
    }

    /// Resolve the widths and shared height for a container size.
    fn layout_for(&self, size: Size, focus: bool) -> Result<ColLayout> {
        let (widths, box_rows) = match size {
            Size::Fixed => (self.natural_widths(focus)?, None),
            Size::Flow { cols } => (self.column_widths(cols, focus)?, None),
            Size::Box { cols, rows } => (self.column_widths(cols, focus)?, Some(rows)),
        };
        let total = size.cols().unwrap_or_else(|| self.joined_width(&widths));

        let mut target = box_rows.unwrap_or(0);
        if box_rows.is_none() {
            for (i, e) in self.entries.iter().enumerate() {
                if widths[i] == 0 || e.options.box_widget {
                    continue;
                }
                let focus_child = focus && Some(i) == self.focus;
                let s = e.widget.sizing();
                if s.contains(Sizing::FLOW) {
                    target = target.max(e.widget.rows(widths[i], focus_child)?);
                } else if s.contains(Sizing::FIXED) && e.options.alloc == Allocation::Pack {
                    target = target.max(e.widget.pack(Size::fixed(), focus_child)?.1);
                }
            }
        }

        Ok(ColLayout {
            widths,
            target,
            total,
        })
    }

    /// The size the child at `index` is driven with under this layout.
    fn child_size(&self, index: usize, layout: &ColLayout) -> Size {
        let e = &self.entries[index];
        let width = layout.widths[index];
        let s = e.widget.sizing();
        if e.options.box_widget || !s.contains(Sizing::FLOW) {
            if !s.contains(Sizing::BOX)
                && s.contains(Sizing::FIXED)
                && e.options.alloc == Allocation::Pack
            {
                Size::fixed()
            } else {
                Size::boxed(width, layout.target)
            }
        } else {
            Size::flow(width)
        }
    }

    /// Move focus to the next selectable column in the given direction.
    /// Returns true when focus moved.
    fn move_focus(&mut self, right: bool) -> bool {
        let Some(f) = self.focus else {
            return false;
        };
        let candidates: Vec<usize> = if right {
            (f + 1..self.entries.len()).collect()
        } else {
            (0..f).rev().collect()
        };
        for i in candidates {
            if self.entries[i].widget.selectable() {
                self.focus = Some(i);
                return true;
            }
        }
        false
    }
}

impl Widget for Columns {
    fn sizing(&self) -> Sizing {
        if self.entries.is_empty() {
            warn!("columns with no children cannot infer sizing, assuming box+flow");
            return Sizing::BOX | Sizing::FLOW;
        }

        let mut all_box = true;
        let mut any_flow = false;
        let mut any_fixed = false;
        let mut flow_blocked = false;
        let mut fixed_blocked = false;
        let mut ambiguous = false;

        for e in &self.entries {
            let s = e.widget.sizing();
            if s.is_empty() {
                ambiguous = true;
                continue;
            }
            if !s.contains(Sizing::BOX) {
                all_box = false;
            }
            let strictly_box = s == Sizing::BOX;
            if strictly_box && !e.options.box_widget {
                flow_blocked = true;
                fixed_blocked = true;
            }
            match e.options.alloc {
                Allocation::Given(_) => {
                    if s.contains(Sizing::FLOW) {
                        any_flow = true;
                        any_fixed = true;
                    } else if s.contains(Sizing::FIXED) {
                        any_fixed = true;
                    }
                }
                Allocation::Pack => {
                    if s.contains(Sizing::FIXED) {
                        any_fixed = true;
                        any_flow = true;
                    } else if s.contains(Sizing::FLOW) {
                        any_flow = true;
                    } else {
                        ambiguous = true;
                    }
                }
                Allocation::Weight(_) => {
                    if s.contains(Sizing::FLOW) {
                        any_flow = true;
                    }
                    if !e.options.box_widget {
                        fixed_blocked = true;
                    }
                }
            }
        }

        let mut result = Sizing::empty();
        if all_box {
            result |= Sizing::BOX;
        }
        if any_flow && !flow_blocked {
            result |= Sizing::FLOW;
        }
        if any_fixed && !fixed_blocked {
            result |= Sizing::FIXED;
        }
        if ambiguous || result.is_empty() {
            warn!("cannot infer columns sizing from contents, assuming box+flow");
            return Sizing::BOX | Sizing::FLOW;
        }
        result
    }

    fn selectable(&self) -> bool {
        self.entries.iter().any(|e| e.widget.selectable())
    }

    fn rows(&self, cols: u32, focus: bool) -> Result<u32> {
        let layout = self.layout_for(Size::flow(cols), focus)?;
        Ok(layout.target)
    }

    fn pack(&self, size: Size, focus: bool) -> Result<(u32, u32)> {
        match size {
            Size::Fixed => {
                let layout = self.layout_for(Size::Fixed, focus)?;
                Ok((layout.total, layout.target))
            }
            Size::Flow { cols } => Ok((cols, self.rows(cols, focus)?)),
            Size::Box { cols, rows } => Ok((cols, rows)),
        }
    }

    fn render(&self, size: Size, focus: bool) -> Result<Canvas> {
        let layout = self.layout_for(size, focus)?;
        let box_mode = matches!(size, Size::Box { .. });
        let divide = self.dividechars;

        let mut parts = Vec::new();
        let mut offset = 0u32;
        let mut first = true;
        for (i, e) in self.entries.iter().enumerate() {
            let width = layout.widths[i];
            if width == 0 {
                continue;
            }
            if !first {
                offset += divide;
            }
            first = false;
            let focus_child = focus && Some(i) == self.focus;
            let child_size = self.child_size(i, &layout);
            if !box_mode && !e.options.box_widget && matches!(child_size, Size::Box { .. }) {
                warn!(
                    "column {i} ({}) only box-sizes but is not flagged box_widget; \
                     rendering it at the shared height {}",
                    e.widget.name(),
                    layout.target
                );
            }
            let canvas = render_sized(e.widget.as_ref(), child_size, focus_child)?;
            if child_size == Size::Fixed && canvas.cols() != width {
                return Err(Error::SizeMismatch {
                    widget: e.widget.name(),
                    request: child_size,
                    cols: canvas.cols(),
                    rows: canvas.rows(),
                });
            }
            parts.push((canvas, offset));
            offset += width;
        }

        let mut canvas = compose::join(parts);
        if canvas.cols() < layout.total {
            canvas.pad_trim(0, (layout.total - canvas.cols()) as i32, 0, 0);
        }
        if box_mode {
            let delta = layout.target as i64 - canvas.rows() as i64;
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
        let layout = self.layout_for(size, true)?;

        let key = if layout.widths[f] > 0 {
            let child_size = self.child_size(f, &layout);
            match self.entries[f].widget.keypress(child_size, key)? {
                None => return Ok(None),
                Some(key) => key,
            }
        } else {
            key
        };

        if key.is_plain(KeyCode::Left) && self.move_focus(false) {
            return Ok(None);
        }
        if key.is_plain(KeyCode::Right) && self.move_focus(true) {
            return Ok(None);
        }
        Ok(Some(key))
    }

    fn mouse_event(&mut self, size: Size, event: &MouseEvent, focus: bool) -> Result<bool> {
        let layout = self.layout_for(size, focus)?;
        for i in 0..self.entries.len() {
            let width = layout.widths[i];
            if width == 0 {
                continue;
            }
            let start = layout.offset(i, self.dividechars);
            if event.pos.x < start {
                break;
            }
            if event.pos.x >= start + width {
                continue;
            }
            if event.action == Action::Down && self.entries[i].widget.selectable() {
                self.focus = Some(i);
            }
            let child_size = self.child_size(i, &layout);
            let child_event = event.translated(start, 0);
            let focus_child = focus && Some(i) == self.focus;
            return self.entries[i]
                .widget
                .mouse_event(child_size, &child_event, focus_child);
        }
        Ok(false)
    }

    fn get_cursor_coords(&self, size: Size) -> Result<Option<Point>> {
        let Some(f) = self.focus else {
            return Ok(None);
        };
        let layout = self.layout_for(size, true)?;
        if layout.widths[f] == 0 {
            return Ok(None);
        }
        let child_size = self.child_size(f, &layout);
        let Some(p) = self.entries[f].widget.get_cursor_coords(child_size)? else {
            return Ok(None);
        };
        let off = layout.offset(f, self.dividechars);
        Ok(Some(Point::new(p.x + off, p.y)))
    }

    fn move_cursor_to_coords(&mut self, size: Size, col: PrefCol, row: u32) -> Result<bool> {
        let layout = self.layout_for(size, true)?;

        let mut target: Option<usize> = None;
        match col {
            PrefCol::Leftmost => {
                target = (0..self.entries.len())
                    .find(|i| layout.widths[*i] > 0 && self.entries[*i].widget.selectable());
            }
            PrefCol::Rightmost => {
                target = (0..self.entries.len())
                    .rev()
                    .find(|i| layout.widths[*i] > 0 && self.entries[*i].widget.selectable());
            }
            PrefCol::Col(x) => {
                for i in 0..self.entries.len() {
                    let width = layout.widths[i];
                    if width == 0 || !self.entries[i].widget.selectable() {
                        continue;
                    }
                    target = Some(i);
                    let start = layout.offset(i, self.dividechars);
                    if x < start + width {
                        break;
                    }
                }
            }
        }
        let Some(i) = target else {
            return Ok(false);
        };

        let start = layout.offset(i, self.dividechars);
        let width = layout.widths[i];
        let child_col = match col {
            PrefCol::Col(x) => {
                PrefCol::Col(x.saturating_sub(start).min(width.saturating_sub(1)))
            }
            sentinel => sentinel,
        };
        let child_size = self.child_size(i, &layout);
        if self.entries[i]
            .widget
            .move_cursor_to_coords(child_size, child_col, row)?
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
        let layout = self.layout_for(size, true)?;
        if layout.widths[f] == 0 {
            return Ok(None);
        }
        let child_size = self.child_size(f, &layout);
        let Some(pref) = self.entries[f].widget.get_pref_col(child_size)? else {
            return Ok(None);
        };

        let first_visible = (0..self.entries.len()).find(|i| layout.widths[*i] > 0);
        let last_visible = (0..self.entries.len()).rev().find(|i| layout.widths[*i] > 0);
        let off = layout.offset(f, self.dividechars);
        Ok(Some(match pref {
            PrefCol::Col(x) => PrefCol::Col(x + off),
            PrefCol::Leftmost if first_visible == Some(f) => PrefCol::Leftmost,
            PrefCol::Leftmost => PrefCol::Col(off),
            PrefCol::Rightmost if last_visible == Some(f) => PrefCol::Rightmost,
            PrefCol::Rightmost => PrefCol::Col(off + layout.widths[f].saturating_sub(1)),
        }))
    }

    fn name(&self) -> String {
        "Columns".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buf,
        event::Button,
        testing::{CanvasTest, CursorGrid},
        widgets::{SolidFill, Text},
    };

    fn packed(items: &[&str], divide: u32) -> Columns {
        let mut c = Columns::new(divide);
        for s in items {
            c.push(Text::new(*s), ColumnOptions::pack()).unwrap();
        }
        c
    }

    #[test]
    fn pack_columns_render_side_by_side() {
        let c = packed(&["one", "two"], 1);
        let canvas = c.render(Size::flow(9), false).unwrap();
        assert_eq!(canvas.cols(), 9);
        assert_eq!(canvas.row_text(0), "one two  ");
    }

    #[test]
    fn equal_weights_share_evenly() {
        let mut c = Columns::new(1);
        c.push(Text::new("a"), ColumnOptions::weight(1.0)).unwrap();
        c.push(Text::new("b"), ColumnOptions::weight(1.0)).unwrap();
        assert_eq!(c.column_widths(9, false).unwrap(), vec![4, 4]);
    }

    #[test]
    fn unequal_weights_share_proportionally() {
        let mut c = Columns::new(1);
        c.push(Text::new("a"), ColumnOptions::weight(1.0)).unwrap();
        c.push(Text::new("b"), ColumnOptions::weight(3.0)).unwrap();
        assert_eq!(c.column_widths(9, false).unwrap(), vec![2, 6]);
    }

    #[test]
    fn given_columns_consume_before_weighted() {
        let mut c = Columns::new(0);
        c.push(SolidFill::new('#'), ColumnOptions::given(4).boxed())
            .unwrap();
        c.push(Text::new("x"), ColumnOptions::weight(1.0)).unwrap();
        assert_eq!(c.column_widths(10, false).unwrap(), vec![4, 6]);
    }

    #[test]
    fn deficit_hides_columns_from_the_left_sparing_focus() {
        let mut c = Columns::new(0);
        c.push(Text::new("aaaaaa"), ColumnOptions::given(6)).unwrap();
        c.push(Text::new("bbbbbb"), ColumnOptions::given(6)).unwrap();
        // Focus starts on column 0, so the deficit falls on column 1.
        assert_eq!(c.column_widths(8, false).unwrap(), vec![6, 0]);
        c.set_focus(1).unwrap();
        assert_eq!(c.column_widths(8, false).unwrap(), vec![0, 6]);
    }

    #[test]
    fn hidden_columns_are_not_rendered() {
        let mut c = Columns::new(1);
        c.push(Text::new("aaaaa"), ColumnOptions::given(5)).unwrap();
        c.push(Text::new("bbbbb"), ColumnOptions::given(5)).unwrap();
        let canvas = c.render(Size::flow(8), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf!["aaaaa"]);
        assert_eq!(canvas.cols(), 8);
    }

    #[test]
    fn width_conservation_with_dividers() {
        let mut c = Columns::new(2);
        c.push(Text::new("head"), ColumnOptions::pack()).unwrap();
        c.push(Text::new("a"), ColumnOptions::weight(1.0)).unwrap();
        c.push(Text::new("b"), ColumnOptions::weight(2.0)).unwrap();
        let widths = c.column_widths(20, false).unwrap();
        let visible = widths.iter().filter(|w| **w > 0).count() as u32;
        assert!(widths.iter().sum::<u32>() + 2 * (visible - 1) <= 20);
        assert_eq!(widths[0], 4);
    }

    #[test]
    fn pack_probe_uses_natural_width() {
        let c = packed(&["one", "two"], 1);
        assert_eq!(c.column_widths(9, false).unwrap(), vec![3, 3]);
    }

    #[test]
    fn fixed_pack_and_render_agree() {
        let c = packed(&["one", "two"], 1);
        assert_eq!(c.pack(Size::fixed(), false).unwrap(), (7, 1));
        let canvas = c.render(Size::fixed(), false).unwrap();
        assert_eq!((canvas.cols(), canvas.rows()), (7, 1));
        assert_eq!(canvas.row_text(0), "one two");
    }

    #[test]
    fn sizing_of_pack_texts() {
        let c = packed(&["one", "two"], 1);
        assert_eq!(c.sizing(), Sizing::FLOW | Sizing::FIXED);
    }

    #[test]
    fn sizing_of_weighted_texts_is_flow_only() {
        let mut c = Columns::new(0);
        c.push(Text::new("a"), ColumnOptions::weight(1.0)).unwrap();
        assert_eq!(c.sizing(), Sizing::FLOW);
    }

    #[test]
    fn sizing_of_weighted_fills_is_box_only() {
        let mut c = Columns::new(0);
        c.push(SolidFill::new('#'), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(SolidFill::new('.'), ColumnOptions::weight(1.0))
            .unwrap();
        assert_eq!(c.sizing(), Sizing::BOX);
    }

    #[test]
    fn irreconcilable_contents_fall_back_to_box_flow() {
        let mut c = Columns::new(0);
        c.push(Text::new("a"), ColumnOptions::weight(1.0)).unwrap();
        c.push(SolidFill::new('#'), ColumnOptions::weight(1.0))
            .unwrap();
        assert_eq!(c.sizing(), Sizing::BOX | Sizing::FLOW);
    }

    #[test]
    fn flagged_box_children_span_the_flow_height() {
        let mut c = Columns::new(1);
        c.push(Text::new("abc def"), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(SolidFill::new('#'), ColumnOptions::weight(1.0).boxed())
            .unwrap();
        let canvas = c.render(Size::flow(7), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf![
            "abc ###"
            "def ###"
        ]);
    }

    #[test]
    fn unflagged_box_only_child_still_renders_under_flow() {
        let mut c = Columns::new(0);
        c.push(Text::new("hi"), ColumnOptions::pack()).unwrap();
        c.push(SolidFill::new('#'), ColumnOptions::given(2)).unwrap();
        let canvas = c.render(Size::flow(8), false).unwrap();
        CanvasTest::new(&canvas).assert_matches(buf!["hi##"]);
    }

    #[test]
    fn box_render_pads_and_trims_to_the_requested_rows() {
        let mut c = Columns::new(0);
        c.push(Text::new("hi"), ColumnOptions::weight(1.0)).unwrap();
        let canvas = c.render(Size::boxed(4, 3), false).unwrap();
        assert_eq!((canvas.cols(), canvas.rows()), (4, 3));
    }

    #[test]
    fn focus_tracks_mutations() {
        let mut c = packed(&["a", "b", "c"], 0);
        assert_eq!(c.focus_position(), Some(0));
        c.set_focus(2).unwrap();
        c.insert(0, Text::new("z"), ColumnOptions::pack()).unwrap();
        assert_eq!(c.focus_position(), Some(3));
        let _ = c.remove(1).unwrap();
        assert_eq!(c.focus_position(), Some(2));
        let _ = c.remove(2).unwrap();
        assert_eq!(c.focus_position(), Some(1));
        let _ = c.remove(0).unwrap();
        let _ = c.remove(0).unwrap();
        assert_eq!(c.focus_position(), None);
        assert!(c.is_empty());
    }

    #[test]
    fn malformed_options_are_rejected() {
        let mut c = Columns::new(0);
        assert_eq!(
            c.push(Text::new("x"), ColumnOptions::weight(-1.0)),
            Err(ColumnsError::InvalidWeight { weight: -1.0 })
        );
        assert_eq!(
            c.insert(3, Text::new("x"), ColumnOptions::pack()),
            Err(ColumnsError::IndexOutOfRange { index: 3, len: 0 })
        );
        assert!(c.set_focus(0).is_err());
    }

    #[test]
    fn arrow_keys_move_focus_between_selectable_columns() {
        let mut c = Columns::new(0);
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(Text::new("x"), ColumnOptions::pack()).unwrap();
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        assert_eq!(c.focus_position(), Some(0));

        let unhandled = c
            .keypress(Size::flow(9), Key::new(KeyCode::Right))
            .unwrap();
        assert_eq!(unhandled, None);
        assert_eq!(c.focus_position(), Some(2));

        let unhandled = c.keypress(Size::flow(9), Key::new(KeyCode::Left)).unwrap();
        assert_eq!(unhandled, None);
        assert_eq!(c.focus_position(), Some(0));

        // Vertical motion bubbles out for an enclosing pile.
        let unhandled = c.keypress(Size::flow(9), Key::new(KeyCode::Up)).unwrap();
        assert_eq!(unhandled, Some(Key::new(KeyCode::Up)));
    }

    #[test]
    fn cursor_coordinates_are_offset_by_preceding_columns() {
        let mut c = Columns::new(1);
        c.push(CursorGrid::new(2), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(CursorGrid::new(2), ColumnOptions::weight(1.0))
            .unwrap();
        // Widths are [4, 4] at 9 with one divider.
        assert!(
            c.move_cursor_to_coords(Size::flow(9), PrefCol::Col(7), 1)
                .unwrap()
        );
        assert_eq!(c.focus_position(), Some(1));
        assert_eq!(
            c.get_cursor_coords(Size::flow(9)).unwrap(),
            Some(Point::new(7, 1))
        );
        let canvas = c.render(Size::flow(9), true).unwrap();
        assert_eq!(canvas.cursor(), Some(Point::new(7, 1)));
    }

    #[test]
    fn pref_col_is_absolute_or_sentinel() {
        let mut c = Columns::new(1);
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        c.set_focus(1).unwrap();
        assert!(
            c.move_cursor_to_coords(Size::flow(9), PrefCol::Col(6), 0)
                .unwrap()
        );
        assert_eq!(
            c.get_pref_col(Size::flow(9)).unwrap(),
            Some(PrefCol::Col(6))
        );
    }

    #[test]
    fn mouse_press_moves_focus() {
        let mut c = Columns::new(1);
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        c.push(CursorGrid::new(1), ColumnOptions::weight(1.0))
            .unwrap();
        let event = MouseEvent::press(Button::Left, (6, 0));
        assert!(c.mouse_event(Size::flow(9), &event, true).unwrap());
        assert_eq!(c.focus_position(), Some(1));
        // A press in the divider gap lands on no column.
        let gap = MouseEvent::press(Button::Left, (4, 0));
        assert!(!c.mouse_event(Size::flow(9), &gap, true).unwrap());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn weighted_widths_conserve_columns(
                weights in proptest::collection::vec(0.0f64..8.0, 1..6),
                maxcol in 0u32..40,
                divide in 0u32..3,
            ) {
                let mut c = Columns::new(divide);
                for w in &weights {
                    c.push(Text::new("x"), ColumnOptions::weight(*w)).unwrap();
                }
                let widths = c.column_widths(maxcol, false).unwrap();
                let visible = widths.iter().filter(|w| **w > 0).count() as u32;
                let total = widths.iter().sum::<u32>()
                    + divide * visible.saturating_sub(1);
                prop_assert!(total <= maxcol || visible <= 1);
            }

            #[test]
            fn focus_stays_valid_through_mutations(ops in proptest::collection::vec(0u8..3, 0..20)) {
                let mut c = Columns::new(0);
                for op in ops {
                    match op {
                        0 => c.push(Text::new("x"), ColumnOptions::pack()).unwrap(),
                        1 => {
                            let len = c.len();
                            if len > 0 {
                                let _ = c.remove(len / 2).unwrap();
                            }
                        }
                        _ => {
                            let len = c.len();
                            c.insert(len / 2, Text::new("y"), ColumnOptions::pack()).unwrap();
                        }
                    }
                    match c.focus_position() {
                        Some(f) => prop_assert!(f < c.len()),
                        None => prop_assert!(c.is_empty()),
                    }
                }
            }
        }
    }
}
