//! Error types for plane-core.
//!
//! Only container construction and checked element access can fail in this
//! crate. The quantization model and the [`Grid`](crate::Grid) capability
//! traits are infallible; operations that combine several grids report their
//! own shape errors from `plane-ops`.
//!
//! # Usage
//!
//! ```rust
//! use plane_core::{Error, PlaneView};
//!
//! let data = [0u8; 6];
//! let err = PlaneView::new(&data, 4, 2, 3).unwrap_err();
//! assert!(matches!(err, Error::InvalidStride { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or addressing a plane.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row stride is smaller than the row width.
    ///
    /// Every row must hold at least `width` samples; padding may only be
    /// appended after the active columns.
    #[error("stride {stride} is less than width {width}")]
    InvalidStride {
        /// Provided stride (in samples)
        stride: usize,
        /// Plane width (in samples)
        width: usize,
    },

    /// Backing buffer cannot hold the requested geometry.
    #[error("buffer of {got} samples is too small for {width}x{height} (stride {stride}), need {required}")]
    BufferTooSmall {
        /// Plane width
        width: usize,
        /// Plane height
        height: usize,
        /// Row stride
        stride: usize,
        /// Minimum number of samples needed
        required: usize,
        /// Samples actually supplied
        got: usize,
    },

    /// Sample coordinates are outside the active area.
    #[error("sample ({x}, {y}) out of bounds for plane {width}x{height}")]
    OutOfBounds {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Plane width
        width: usize,
        /// Plane height
        height: usize,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is a geometry error raised at construction.
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::InvalidStride { .. } | Self::BufferTooSmall { .. })
    }
}
