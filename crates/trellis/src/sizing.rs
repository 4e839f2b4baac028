//! Size requests and widget capability sets.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The sizing modes a widget supports.
    ///
    /// Containers derive their own set from their children's sets and the
    /// per-child layout options, so a container's capabilities can change
    /// when its contents change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sizing: u8 {
        /// Both dimensions fixed by the caller.
        const BOX = 1 << 0;
        /// Caller fixes the width, the widget chooses its height.
        const FLOW = 1 << 1;
        /// The widget chooses both dimensions.
        const FIXED = 1 << 2;
    }
}

/// A size request, passed by every caller to every callee.
///
/// A widget must never be asked to render with a variant outside its
/// advertised [`Sizing`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    /// Render at your natural size.
    Fixed,
    /// You choose rows, I choose columns.
    Flow {
        /// Available width in display columns.
        cols: u32,
    },
    /// Both dimensions fixed by the caller.
    Box {
        /// Width in display columns.
        cols: u32,
        /// Height in rows.
        rows: u32,
    },
}

impl Size {
    /// A `Fixed` request.
    pub fn fixed() -> Self {
        Self::Fixed
    }

    /// A `Flow` request for the given width.
    pub fn flow(cols: u32) -> Self {
        Self::Flow { cols }
    }

    /// A `Box` request for the given dimensions.
    pub fn boxed(cols: u32, rows: u32) -> Self {
        Self::Box { cols, rows }
    }

    /// The requested width, when this variant specifies one.
    pub fn cols(&self) -> Option<u32> {
        match self {
            Self::Fixed => None,
            Self::Flow { cols } | Self::Box { cols, .. } => Some(*cols),
        }
    }

    /// The requested height, when this variant specifies one.
    pub fn rows(&self) -> Option<u32> {
        match self {
            Self::Box { rows, .. } => Some(*rows),
            _ => None,
        }
    }

    /// The capability flag this request variant corresponds to.
    pub fn flag(&self) -> Sizing {
        match self {
            Self::Fixed => Sizing::FIXED,
            Self::Flow { .. } => Sizing::FLOW,
            Self::Box { .. } => Sizing::BOX,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Flow { cols } => write!(f, "flow({cols})"),
            Self::Box { cols, rows } => write!(f, "box({cols}x{rows})"),
        }
    }
}
