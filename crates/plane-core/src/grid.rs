//! Grid capability traits.
//!
//! Operations in `plane-ops` never own sample storage. They only need to know
//! the geometry of a grid and to reach its samples through a slice:
//!
//! ```text
//!            width            stride
//!   |<------------------->|<------->|
//!   [s s s s s s s s s s s p p p p p]  row 0   (p = padding)
//!   [s s s s s s s s s s s p p p p p]  row 1
//!   ...
//!   [s s s s s s s s s s s]            row h-1 (trailing padding optional)
//! ```
//!
//! The linear index of `(x, y)` is `y * stride + x`. Padding samples are
//! never read by the engine.
//!
//! # Implementing
//!
//! ```rust
//! use plane_core::Grid;
//!
//! struct Luma {
//!     samples: Vec<u8>,
//!     width: usize,
//! }
//!
//! impl Grid for Luma {
//!     type Sample = u8;
//!     fn width(&self) -> usize { self.width }
//!     fn height(&self) -> usize { self.samples.len() / self.width }
//!     fn stride(&self) -> usize { self.width }
//!     fn as_slice(&self) -> &[u8] { &self.samples }
//! }
//!
//! let luma = Luma { samples: vec![1, 2, 3, 4, 5, 6], width: 3 };
//! assert_eq!(luma.row(1), &[4, 5, 6]);
//! ```

/// Read access to a strided 2-D sample grid.
///
/// Implementors guarantee that `as_slice()` holds at least
/// [`min_len`]`(width, height, stride)` samples and that
/// `stride() >= width()`.
pub trait Grid {
    /// Sample type stored in the grid.
    type Sample: Copy;

    /// Number of active columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Samples per row including padding.
    fn stride(&self) -> usize;

    /// Raw sample storage, row-major with [`stride`](Grid::stride) spacing.
    fn as_slice(&self) -> &[Self::Sample];

    /// Returns `(width, height)`.
    #[inline]
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Returns `true` if the grid has no active samples.
    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Active samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height()`.
    #[inline]
    fn row(&self, y: usize) -> &[Self::Sample] {
        let start = y * self.stride();
        &self.as_slice()[start..start + self.width()]
    }

    /// Linear index of `(x, y)`.
    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.stride() + x
    }
}

/// Write access to a strided 2-D sample grid.
pub trait GridMut: Grid {
    /// Mutable raw sample storage.
    fn as_mut_slice(&mut self) -> &mut [Self::Sample];

    /// Mutable active samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height()`.
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Self::Sample] {
        let start = y * self.stride();
        let width = self.width();
        &mut self.as_mut_slice()[start..start + width]
    }
}

/// Minimum backing length for a grid of the given geometry.
///
/// The last row does not need trailing padding, so this is
/// `(height - 1) * stride + width` for non-empty grids and `0` otherwise.
///
/// ```
/// use plane_core::grid::min_len;
///
/// assert_eq!(min_len(3, 2, 4), 7);
/// assert_eq!(min_len(0, 5, 4), 0);
/// ```
#[inline]
pub const fn min_len(width: usize, height: usize, stride: usize) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height - 1) * stride + width
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    type Sample = G::Sample;

    #[inline]
    fn width(&self) -> usize {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> usize {
        (**self).height()
    }

    #[inline]
    fn stride(&self) -> usize {
        (**self).stride()
    }

    #[inline]
    fn as_slice(&self) -> &[Self::Sample] {
        (**self).as_slice()
    }
}
