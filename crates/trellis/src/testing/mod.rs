//! Utilities for testing widgets and canvases.

mod buf;
mod grid;

pub use buf::CanvasTest;
pub use grid::CursorGrid;
