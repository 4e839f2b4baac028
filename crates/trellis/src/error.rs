//! Error types.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::sizing::Size;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Top-level error type.
///
/// Configuration errors are raised at the point of construction or mutation
/// with a container-specific type and converted here when they cross the
/// widget protocol boundary. Protocol violations are fatal to the render
/// pass and expected to stop the run loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A widget was driven with a size variant outside its capabilities, or
    /// asked for a protocol method it does not implement.
    #[error("sizing: {0}")]
    Sizing(String),

    /// A widget returned a canvas whose dimensions disagree with the size it
    /// was asked to render. A bug in the widget, never papered over.
    #[error("render size mismatch: {widget} returned {cols}x{rows} for {request}")]
    SizeMismatch {
        /// Short name of the offending widget.
        widget: String,
        /// The size it was asked to render.
        request: Size,
        /// Width of the canvas it returned.
        cols: u32,
        /// Height of the canvas it returned.
        rows: u32,
    },

    /// Columns configuration error.
    #[error(transparent)]
    Columns(#[from] ColumnsError),

    /// Pile configuration error.
    #[error(transparent)]
    Pile(#[from] PileError),

    /// Padding configuration error.
    #[error(transparent)]
    Padding(#[from] PaddingError),

    /// Filler configuration error.
    #[error(transparent)]
    Filler(#[from] FillerError),

    /// Overlay configuration error.
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Configuration errors raised by [`crate::Columns`] mutation methods.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnsError {
    /// A child index outside the current contents.
    #[error("column index {index} out of range for {len} columns")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of columns at the time of the call.
        len: usize,
    },

    /// A weight that is negative, NaN, or infinite.
    #[error("column weight must be finite and non-negative, got {weight}")]
    InvalidWeight {
        /// The offending weight.
        weight: f64,
    },
}

/// Configuration errors raised by [`crate::Pile`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PileError {
    /// A child index outside the current contents.
    #[error("pile index {index} out of range for {len} rows")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of rows at the time of the call.
        len: usize,
    },

    /// A weight that is negative, NaN, or infinite.
    #[error("pile weight must be finite and non-negative, got {weight}")]
    InvalidWeight {
        /// The offending weight.
        weight: f64,
    },

    /// A pile rendered as a box needs at least one weighted child to carve
    /// the remaining rows into.
    #[error("no weighted children to size a box pile")]
    NoWeightedChildren,
}

/// Configuration errors raised by [`crate::Padding`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaddingError {
    /// Pack width needs a child that can report a natural size.
    #[error("pack width requires a fixed-capable child")]
    PackRequiresFixed,

    /// Clip width renders the child at its natural size.
    #[error("clip width requires a fixed-capable child")]
    ClipRequiresFixed,
}

/// Configuration errors raised by [`crate::Filler`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillerError {
    /// Pack height needs a flow child to ask for its row count.
    #[error("pack height requires a flow-capable child")]
    PackRequiresFlow,

    /// A fixed or relative height renders the child as a box.
    #[error("given or relative height requires a box-capable child")]
    GivenRequiresBox,
}

/// Configuration errors raised by [`crate::Overlay`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Pack width and height size the top widget naturally.
    #[error("pack width and height require a fixed-capable top widget")]
    PackSizeRequiresFixed,

    /// Pack height with a set width flows the top widget.
    #[error("pack height requires a flow-capable top widget")]
    PackHeightRequiresFlow,

    /// Set width and height box the top widget.
    #[error("given width and height require a box-capable top widget")]
    GivenSizeRequiresBox,

    /// A pack width cannot be combined with a set height.
    #[error("pack width cannot be combined with a given or relative height")]
    PackWidthWithGivenHeight,

    /// Clipping only makes sense for padding, not for a floating widget.
    #[error("clip width is not supported by overlay")]
    ClipWidth,
}
