//! Minimal leaf widgets.
//!
//! Just enough leaves to exercise the layout engine: styled text, a solid
//! box fill, and a horizontal divider. Richer widget sets are expected to
//! live outside this crate, implementing the same protocol.

mod divider;
mod fill;
mod text;

pub use divider::Divider;
pub use fill::SolidFill;
pub use text::Text;
