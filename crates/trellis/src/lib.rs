//! Trellis: layout negotiation and canvas compositing for terminal UIs.
//!
//! Trellis is the sizing and rendering substrate of a terminal widget
//! toolkit. Widgets implement the [`Widget`] protocol, declare which of the
//! three sizing modes they support (BOX, FLOW, FIXED), and render into
//! [`Canvas`] buffers that containers compose with the operators in
//! [`compose`] and on [`Canvas`] itself.
//!
//! # Quick start
//!
//! ```
//! use trellis::{Columns, ColumnOptions, Size, Widget, widgets::Text};
//!
//! let mut cols = Columns::new(1);
//! cols.push(Text::new("one"), ColumnOptions::pack()).unwrap();
//! cols.push(Text::new("two"), ColumnOptions::pack()).unwrap();
//! let canvas = cols.render(Size::flow(9), false).unwrap();
//! assert_eq!(canvas.row_text(0), "one two  ");
//! ```
//!
//! # Module organization
//!
//! - [`canvas`] / [`compose`] - the rendered-output data structure and its
//!   composition operators
//! - [`widget`] / [`sizing`] - the protocol every widget satisfies
//! - [`Columns`], [`Pile`] - space-distributing containers
//! - [`Padding`], [`Filler`], [`Overlay`] - alignment decorators
//! - [`widgets`] - minimal leaf widgets

#![warn(missing_docs)]

/// Shared alignment and percentage-scaling math.
pub mod align;
/// The canvas data structure.
pub mod canvas;
/// Compositor operators over canvases.
pub mod compose;
/// Error types.
pub mod error;
/// Input event vocabulary.
pub mod event;
/// Coordinate primitives.
pub mod geom;
/// Run-length encoded span lists.
pub mod rle;
/// Size requests and capability sets.
pub mod sizing;
/// Display-width helpers.
pub mod text;
/// The widget protocol.
pub mod widget;
/// Minimal leaf widgets.
pub mod widgets;

/// Horizontal container.
mod columns;
/// Shared container contracts.
mod container;
/// Vertical filler decorator.
mod filler;
/// Two-widget stack.
mod overlay;
/// Horizontal padding decorator.
mod padding;
/// Vertical container.
mod pile;

/// Test utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use align::{Align, Height, VAlign, Width};
pub use canvas::{Attr, Canvas, Charset, Row};
pub use columns::{ColumnOptions, Columns};
pub use container::Allocation;
pub use error::{Error, Result};
pub use event::{Key, KeyCode, MouseEvent};
pub use filler::Filler;
pub use geom::Point;
pub use overlay::{Overlay, Part};
pub use padding::Padding;
pub use pile::Pile;
pub use sizing::{Size, Sizing};
pub use widget::{PrefCol, Widget, render_sized};
