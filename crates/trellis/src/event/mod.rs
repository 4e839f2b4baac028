//! Input event vocabulary consumed by the widget protocol.
//!
//! Translating terminal escape sequences into these types is the run loop's
//! job; this crate only routes them through the widget tree.

pub mod key;
pub mod mouse;

pub use key::{Key, KeyCode, Mods};
pub use mouse::{Action, Button, MouseEvent};
