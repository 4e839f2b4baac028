//! Mouse input primitives.

use crate::{event::key::Mods, geom::Point};

/// Mouse button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// No button (for move/scroll).
    None,
}

/// Mouse action kinds.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button press.
    Down,
    /// Button release.
    Up,
    /// Mouse drag with button held.
    Drag,
    /// Mouse moved without button.
    Moved,
    /// Scroll wheel down.
    ScrollDown,
    /// Scroll wheel up.
    ScrollUp,
}

/// A mouse event positioned in the coordinates of the receiving widget.
///
/// Containers translate `pos` as they delegate inward.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MouseEvent {
    /// Action kind.
    pub action: Action,
    /// Button involved, `Button::None` for motion and scroll.
    pub button: Button,
    /// Keyboard modifiers held.
    pub mods: Mods,
    /// Event position.
    pub pos: Point,
}

impl MouseEvent {
    /// A plain button press at a position.
    pub fn press(button: Button, pos: impl Into<Point>) -> Self {
        Self {
            action: Action::Down,
            button,
            mods: Mods::default(),
            pos: pos.into(),
        }
    }

    /// This event translated left and up by the given offsets.
    pub fn translated(&self, dx: u32, dy: u32) -> Self {
        Self {
            pos: Point::new(self.pos.x.saturating_sub(dx), self.pos.y.saturating_sub(dy)),
            ..*self
        }
    }
}
