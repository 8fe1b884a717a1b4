//! Plane containers.
//!
//! - [`Plane`] - owned single-channel sample buffer with optional row padding
//! - [`PlaneView`] - borrowed read-only plane over a caller slice
//! - [`PlaneViewMut`] - borrowed writable plane over a caller slice
//!
//! All three implement [`Grid`]; the owned plane and the mutable view also
//! implement [`GridMut`], so any of them can be handed to `plane-ops`.
//!
//! # Usage
//!
//! ```rust
//! use plane_core::{Grid, Plane, PlaneView};
//!
//! // 4x2 plane with rows padded to 8 samples
//! let mut plane: Plane<u16> = Plane::with_stride(4, 2, 8).unwrap();
//! plane.set(3, 1, 940);
//! assert_eq!(plane.get(3, 1), 940);
//! assert_eq!(plane.as_slice().len(), 16);
//!
//! // Wrap foreign memory without copying
//! let raw = [1u8, 2, 3, 4, 5, 6];
//! let view = PlaneView::new(&raw, 3, 2, 3).unwrap();
//! assert_eq!(view.row(1), &[4, 5, 6]);
//! ```

use crate::grid::{min_len, Grid, GridMut};
use crate::{Error, Result};

fn check_layout(width: usize, height: usize, stride: usize, len: usize) -> Result<()> {
    if stride < width {
        return Err(Error::InvalidStride { stride, width });
    }
    let required = min_len(width, height, stride);
    if len < required {
        return Err(Error::BufferTooSmall {
            width,
            height,
            stride,
            required,
            got: len,
        });
    }
    Ok(())
}

/// Owned plane of samples.
///
/// Rows are `stride` samples apart; columns `width..stride` of each row are
/// padding and keep whatever value they were created with.
#[derive(Clone, PartialEq)]
pub struct Plane<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
    stride: usize,
}

impl<T: Copy + Default> Plane<T> {
    /// Creates a tightly packed plane filled with `T::default()`.
    ///
    /// ```rust
    /// use plane_core::{Grid, Plane};
    ///
    /// let p: Plane<f32> = Plane::new(16, 9);
    /// assert_eq!(p.dimensions(), (16, 9));
    /// assert_eq!(p.stride(), 16);
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Creates a padded plane filled with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStride`] if `stride < width`.
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self> {
        check_layout(width, height, stride, stride * height)?;
        Ok(Self {
            data: vec![T::default(); stride * height],
            width,
            height,
            stride,
        })
    }
}

impl<T: Copy> Plane<T> {
    /// Creates a tightly packed plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
            stride: width,
        }
    }

    /// Creates a plane from existing row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStride`] if `stride < width`, or
    /// [`Error::BufferTooSmall`] if `data` cannot hold the geometry.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize, stride: usize) -> Result<Self> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Creates a tightly packed plane by evaluating `f(x, y)` at every position.
    ///
    /// ```rust
    /// use plane_core::Plane;
    ///
    /// let ramp = Plane::from_fn(4, 4, |x, y| (y * 4 + x) as i32);
    /// assert_eq!(ramp.get(3, 2), 11);
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
            stride: width,
        }
    }

    /// Returns the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the active area.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y * self.stride + x]
    }

    /// Returns the sample at `(x, y)`, or an error if out of bounds.
    pub fn try_get(&self, x: usize, y: usize) -> Result<T> {
        if x < self.width && y < self.height {
            Ok(self.data[y * self.stride + x])
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the active area.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y * self.stride + x] = value;
    }

    /// Sets every active sample to `value`, leaving padding untouched.
    pub fn fill(&mut self, value: T) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }

    /// Copies the active samples into a tightly packed vector.
    pub fn to_packed(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// Consumes the plane and returns its backing storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Borrows the plane as a read-only view.
    pub fn view(&self) -> PlaneView<'_, T> {
        PlaneView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Borrows the plane as a writable view.
    pub fn view_mut(&mut self) -> PlaneViewMut<'_, T> {
        PlaneViewMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

impl<T: Copy> Grid for Plane<T> {
    type Sample = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> GridMut for Plane<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> std::fmt::Debug for Plane<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plane")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &std::any::type_name::<T>())
            .finish()
    }
}

/// Read-only plane borrowed from a caller slice.
#[derive(Clone, Copy)]
pub struct PlaneView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T: Copy> PlaneView<'a, T> {
    /// Wraps `data` as a `width x height` plane with the given stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStride`] or [`Error::BufferTooSmall`].
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> Result<Self> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Wraps tightly packed `data`; height is `data.len() / width`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `data.len()` is not a multiple of `width`.
    pub fn packed(data: &'a [T], width: usize) -> Result<Self> {
        let height = if width == 0 { 0 } else { data.len() / width };
        if width != 0 && data.len() % width != 0 {
            return Err(Error::BufferTooSmall {
                width,
                height: height + 1,
                stride: width,
                required: (height + 1) * width,
                got: data.len(),
            });
        }
        Self::new(data, width, height, width)
    }
}

impl<T: Copy> Grid for PlaneView<'_, T> {
    type Sample = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.data
    }
}

impl<T> std::fmt::Debug for PlaneView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaneView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

/// Writable plane borrowed from a caller slice.
pub struct PlaneViewMut<'a, T> {
    data: &'a mut [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T: Copy> PlaneViewMut<'a, T> {
    /// Wraps `data` as a writable `width x height` plane with the given stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStride`] or [`Error::BufferTooSmall`].
    pub fn new(data: &'a mut [T], width: usize, height: usize, stride: usize) -> Result<Self> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }
}

impl<T: Copy> Grid for PlaneViewMut<'_, T> {
    type Sample = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &*self.data
    }
}

impl<T: Copy> GridMut for PlaneViewMut<'_, T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

impl<T> std::fmt::Debug for PlaneViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaneViewMut")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_packed() {
        let p: Plane<u8> = Plane::new(5, 3);
        assert_eq!(p.stride(), 5);
        assert_eq!(p.as_slice().len(), 15);
        assert!(p.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_with_stride_rejects_narrow_stride() {
        let err = Plane::<u8>::with_stride(8, 2, 4).unwrap_err();
        assert_eq!(err, Error::InvalidStride { stride: 4, width: 8 });
    }

    #[test]
    fn test_fill_keeps_padding() {
        let mut p = Plane::from_vec(vec![9u8; 8], 3, 2, 4).unwrap();
        p.fill(1);
        assert_eq!(p.as_slice(), &[1, 1, 1, 9, 1, 1, 1, 9]);
        assert_eq!(p.to_packed(), vec![1; 6]);
    }

    #[test]
    fn test_from_vec_short_last_row() {
        // Last row without trailing padding is accepted.
        let p = Plane::from_vec(vec![0i32; 7], 3, 2, 4).unwrap();
        assert_eq!(p.row(1).len(), 3);

        let err = Plane::from_vec(vec![0i32; 6], 3, 2, 4).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { required: 7, got: 6, .. }));
    }

    #[test]
    fn test_try_get() {
        let p = Plane::from_fn(2, 2, |x, y| x + 10 * y);
        assert_eq!(p.try_get(1, 1), Ok(11));
        assert!(p.try_get(2, 0).is_err());
    }

    #[test]
    fn test_views() {
        let mut p = Plane::from_fn(3, 2, |x, y| (x + y) as f32);
        {
            let mut v = p.view_mut();
            v.row_mut(0)[0] = -1.0;
        }
        let v = p.view();
        assert_eq!(v.row(0), &[-1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_packed_view() {
        let data = [1u16, 2, 3, 4, 5, 6];
        let v = PlaneView::packed(&data, 2).unwrap();
        assert_eq!(v.dimensions(), (2, 3));
        assert!(PlaneView::packed(&data, 4).is_err());
    }

    #[test]
    fn test_empty_plane() {
        let p: Plane<f32> = Plane::new(0, 4);
        assert!(p.is_empty());
        let data: [u8; 0] = [];
        assert!(PlaneView::new(&data, 4, 0, 4).is_ok());
    }
}
