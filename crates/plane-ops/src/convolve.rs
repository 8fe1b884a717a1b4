//! Sliding-window convolution with edge replication.
//!
//! For every output sample the kernel receives the neighborhood of the
//! matching source sample. Rather than reading the whole neighborhood at
//! each column, the window is kept between columns: each step shifts every
//! window row left by one slot and appends a single new source column. Per
//! output sample that costs one shift of the window instead of a fresh
//! gather.
//!
//! # Borders
//!
//! Positions outside the grid take the value of the nearest edge sample,
//! vertically and horizontally. There is no zero fill and no wraparound.
//! Grids narrower or shorter than the window are handled the same way.
//!
//! ```text
//! row [a, b, c], 1x3 window
//!
//!   x = 0   (a, a, b)
//!   x = 1   (a, b, c)
//!   x = 2   (b, c, c)
//! ```
//!
//! # Column bookkeeping
//!
//! Before the shift for output column `x`, window slot `k` holds source
//! column `clamp(x + k - h_radius - 1, 0, width - 1)`. The row prologue
//! establishes this for `x = 0`; after a shift, the last slot receives
//! column `x + h_radius` while it is inside the grid and otherwise keeps
//! its previous value, which is already the last column.
//!
//! # Parallelism
//!
//! Output rows are independent. Partitioned execution hands each tile a
//! disjoint block of destination rows and one window of its own.

use plane_core::{Grid, GridMut};
use tracing::trace;

use crate::exec::Execution;
use crate::tile::{block_rows, run_row_blocks_mut};
use crate::transform::check_shape;
use crate::window::{DynWindow, Slots, Window};
use crate::OpsResult;

/// Source row feeding window row `k` for output row `y`.
#[inline]
fn clamp_row(y: usize, k: usize, v_radius: usize, height: usize) -> usize {
    (y + k).saturating_sub(v_radius).min(height - 1)
}

/// Produces one output row.
///
/// `bases[k]` is the offset of the source row behind window row `k`.
fn scan_row<T, U, W, F>(window: &mut W, src: &[T], bases: &[usize], width: usize, h_radius: usize, out: &mut [U], f: &F)
where
    T: Copy,
    W: Slots<T>,
    F: Fn(&W) -> U,
{
    let last = width - 1;
    for (k, &base) in bases.iter().enumerate() {
        for (s, slot) in window.slots_mut(k).iter_mut().enumerate() {
            *slot = src[base + s.saturating_sub(h_radius + 1).min(last)];
        }
    }

    for (x, dst) in out.iter_mut().enumerate() {
        let incoming = x + h_radius;
        for (k, &base) in bases.iter().enumerate() {
            let slots = window.slots_mut(k);
            slots.copy_within(1.., 0);
            if incoming < width {
                slots[slots.len() - 1] = src[base + incoming];
            }
        }
        *dst = f(window);
    }
}

/// Applies `f` to the `ROWS x COLS` neighborhood of every source sample.
///
/// `ROWS` and `COLS` are the window dimensions, `2 * radius + 1` along each
/// axis, and must both be odd. A radius of zero on one axis filters along
/// the other axis only; `convolve::<1, 1, ..>` is a plain [`transform`].
///
/// [`transform`]: crate::transform::transform
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`](crate::OpsError::ShapeMismatch) if `src` and
/// `dst` differ in width or height, before anything is written.
///
/// # Example
///
/// ```rust
/// use plane_core::Plane;
/// use plane_ops::convolve::convolve;
/// use plane_ops::exec::Execution;
///
/// // 3x3 box sum
/// let src = Plane::filled(5, 4, 1u16);
/// let mut dst: Plane<u16> = Plane::new(5, 4);
/// convolve::<3, 3, _, _, _>(&mut dst, &src, &Execution::Sequential, |w| w.iter().sum()).unwrap();
/// assert_eq!(dst.get(0, 0), 9);
/// ```
pub fn convolve<const ROWS: usize, const COLS: usize, D, S, F>(
    dst: &mut D,
    src: &S,
    exec: &Execution,
    f: F,
) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    S: Grid + ?Sized,
    S::Sample: Sync,
    F: Fn(&Window<S::Sample, ROWS, COLS>) -> D::Sample + Sync + Send,
{
    const { assert!(ROWS % 2 == 1 && COLS % 2 == 1, "window dimensions must be odd") };
    let (v_radius, h_radius) = (ROWS / 2, COLS / 2);
    let (width, height) = dst.dimensions();
    trace!(width, height, v_radius, h_radius, exec = exec.name(), "convolve");
    check_shape("convolve", (width, height), src)?;
    if src.is_empty() {
        return Ok(());
    }

    let (data, src_stride) = (src.as_slice(), src.stride());
    let seed = data[0];
    let dst_stride = dst.stride();
    run_row_blocks_mut(dst.as_mut_slice(), width, height, dst_stride, exec, "convolve", |y0, block| {
        let mut window = Window::<S::Sample, ROWS, COLS>::filled(seed);
        for (dy, out) in block_rows(block, width, dst_stride).enumerate() {
            let y = y0 + dy;
            let bases: [usize; ROWS] = std::array::from_fn(|k| clamp_row(y, k, v_radius, height) * src_stride);
            scan_row(&mut window, data, &bases, width, h_radius, out, &f);
        }
    })
}

/// Like [`convolve`], with radii chosen at run time.
///
/// Each tile allocates one [`DynWindow`] and reuses it for all its rows.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`](crate::OpsError::ShapeMismatch) if `src` and
/// `dst` differ in width or height.
///
/// ```rust
/// use plane_core::Plane;
/// use plane_ops::convolve::convolve_dyn;
/// use plane_ops::exec::Execution;
///
/// // horizontal 1x5 max
/// let src = Plane::from_fn(6, 1, |x, _| x as u8);
/// let mut dst: Plane<u8> = Plane::new(6, 1);
/// convolve_dyn(&mut dst, &src, 0, 2, &Execution::partitioned(), |w| w.iter().max().unwrap_or(0)).unwrap();
/// assert_eq!(dst.to_packed(), vec![2, 3, 4, 5, 5, 5]);
/// ```
pub fn convolve_dyn<D, S, F>(
    dst: &mut D,
    src: &S,
    v_radius: usize,
    h_radius: usize,
    exec: &Execution,
    f: F,
) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    S: Grid + ?Sized,
    S::Sample: Sync,
    F: Fn(&DynWindow<S::Sample>) -> D::Sample + Sync + Send,
{
    let (width, height) = dst.dimensions();
    trace!(width, height, v_radius, h_radius, exec = exec.name(), "convolve_dyn");
    check_shape("convolve_dyn", (width, height), src)?;
    if src.is_empty() {
        return Ok(());
    }

    let (data, src_stride) = (src.as_slice(), src.stride());
    let seed = data[0];
    let dst_stride = dst.stride();
    run_row_blocks_mut(dst.as_mut_slice(), width, height, dst_stride, exec, "convolve_dyn", |y0, block| {
        let mut window = DynWindow::new(v_radius, h_radius, seed);
        let mut bases = vec![0usize; window.rows()];
        for (dy, out) in block_rows(block, width, dst_stride).enumerate() {
            let y = y0 + dy;
            for (k, base) in bases.iter_mut().enumerate() {
                *base = clamp_row(y, k, v_radius, height) * src_stride;
            }
            scan_row(&mut window, data, &bases, width, h_radius, out, &f);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Tiling;
    use crate::transform::transform;
    use crate::OpsError;
    use plane_core::{Plane, PlaneView};

    fn small_tiles() -> Execution {
        Execution::Partitioned(Tiling::default().with_tile_height(2))
    }

    /// Weighs each cell by its row-major position so that misplaced
    /// samples change the result.
    fn weighted(cells: impl Iterator<Item = i64>) -> i64 {
        cells.zip(1i64..).map(|(v, w)| v * w).sum()
    }

    /// O(window-area) gather with clamped coordinates.
    fn reference(src: &Plane<i64>, v: usize, h: usize) -> Plane<i64> {
        let (w, ht) = src.dimensions();
        Plane::from_fn(w, ht, |x, y| {
            let mut cells = Vec::new();
            for r in 0..2 * v + 1 {
                for c in 0..2 * h + 1 {
                    let sy = (y + r).saturating_sub(v).min(ht - 1);
                    let sx = (x + c).saturating_sub(h).min(w - 1);
                    cells.push(src.get(sx, sy));
                }
            }
            weighted(cells.into_iter())
        })
    }

    fn ramp(w: usize, h: usize) -> Plane<i64> {
        Plane::from_fn(w, h, |x, y| (y * w + x) as i64)
    }

    /// Packs a 3-cell window into one number, most significant first.
    fn digits(cells: impl Iterator<Item = i32>) -> i32 {
        cells.fold(0, |acc, v| acc * 10 + v)
    }

    #[test]
    fn test_horizontal_border_replication() {
        let src = Plane::from_vec(vec![1, 2, 3], 3, 1, 3).unwrap();
        for exec in [Execution::Sequential, small_tiles()] {
            let mut dst: Plane<i32> = Plane::new(3, 1);
            convolve::<1, 3, _, _, _>(&mut dst, &src, &exec, |w| digits(w.iter())).unwrap();
            assert_eq!(dst.to_packed(), vec![112, 123, 233]);
        }
    }

    #[test]
    fn test_vertical_border_replication() {
        let src = Plane::from_vec(vec![1, 2, 3], 1, 3, 1).unwrap();
        for exec in [Execution::Sequential, small_tiles()] {
            let mut dst: Plane<i32> = Plane::new(1, 3);
            convolve::<3, 1, _, _, _>(&mut dst, &src, &exec, |w| digits(w.iter())).unwrap();
            assert_eq!(dst.to_packed(), vec![112, 123, 233]);
        }
    }

    #[test]
    fn test_single_cell_window_is_transform() {
        let src = ramp(7, 5);
        let mut a: Plane<i64> = Plane::new(7, 5);
        let mut b: Plane<i64> = Plane::new(7, 5);
        convolve::<1, 1, _, _, _>(&mut a, &src, &small_tiles(), |w| w.center() * 3 - 1).unwrap();
        transform(&mut b, &src, &Execution::Sequential, |v| v * 3 - 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_box_sum_4x4() {
        let src = ramp(4, 4);
        let mut dst: Plane<i64> = Plane::new(4, 4);
        convolve::<3, 3, _, _, _>(&mut dst, &src, &Execution::Sequential, |w| w.iter().sum()).unwrap();

        assert_eq!(dst.get(0, 0), 15);
        assert_eq!(dst.get(3, 3), 120);
        assert_eq!(dst.get(1, 1), (0..3).flat_map(|y| (0..3).map(move |x| y * 4 + x)).sum::<i64>());

        let expected = Plane::from_fn(4, 4, |x, y| {
            let mut sum = 0;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let sy = (y as isize + dy).clamp(0, 3) as usize;
                    let sx = (x as isize + dx).clamp(0, 3) as usize;
                    sum += src.get(sx, sy);
                }
            }
            sum
        });
        assert_eq!(dst, expected);
    }

    #[test]
    fn test_matches_reference() {
        let src = ramp(13, 9);
        let mut dst: Plane<i64> = Plane::new(13, 9);
        convolve::<5, 3, _, _, _>(&mut dst, &src, &small_tiles(), |w| weighted(w.iter())).unwrap();
        assert_eq!(dst, reference(&src, 2, 1));
    }

    #[test]
    fn test_grid_narrower_than_window() {
        // 2x3 grid, 3x7 window
        let src = ramp(2, 3);
        let mut dst: Plane<i64> = Plane::new(2, 3);
        convolve::<3, 7, _, _, _>(&mut dst, &src, &Execution::Sequential, |w| weighted(w.iter())).unwrap();
        assert_eq!(dst, reference(&src, 1, 3));

        let single = Plane::filled(1, 1, 4i64);
        let mut out: Plane<i64> = Plane::new(1, 1);
        convolve_dyn(&mut out, &single, 3, 3, &Execution::Sequential, |w| w.iter().sum()).unwrap();
        assert_eq!(out.get(0, 0), 4 * 49);
    }

    #[test]
    fn test_sequential_matches_partitioned() {
        let src = Plane::from_fn(31, 17, |x, y| ((x * 7 + y * 13) % 23) as i64);
        let mut seq: Plane<i64> = Plane::new(31, 17);
        let mut par: Plane<i64> = Plane::new(31, 17);
        let kernel = |w: &Window<i64, 3, 5>| weighted(w.iter());
        convolve::<3, 5, _, _, _>(&mut seq, &src, &Execution::Sequential, kernel).unwrap();
        convolve::<3, 5, _, _, _>(&mut par, &src, &small_tiles(), kernel).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_dyn_matches_const() {
        let src = ramp(11, 8);
        let mut fixed: Plane<i64> = Plane::new(11, 8);
        let mut dynamic: Plane<i64> = Plane::new(11, 8);
        convolve::<5, 5, _, _, _>(&mut fixed, &src, &small_tiles(), |w| weighted(w.iter())).unwrap();
        convolve_dyn(&mut dynamic, &src, 2, 2, &small_tiles(), |w| weighted(w.iter())).unwrap();
        assert_eq!(fixed, dynamic);
        assert_eq!(dynamic, reference(&src, 2, 2));
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let src = ramp(6, 4);
        let mut dst: Plane<i64> = Plane::new(6, 4);
        convolve_dyn(&mut dst, &src, 0, 0, &small_tiles(), |w| w.center()).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_strided_source_and_destination() {
        // 3x3 source padded to stride 5
        let raw = [1, 2, 3, 99, 99, 4, 5, 6, 99, 99, 7, 8, 9];
        let src = PlaneView::new(&raw, 3, 3, 5).unwrap();
        let mut dst: Plane<i32> = Plane::with_stride(3, 3, 4).unwrap();
        convolve::<3, 3, _, _, _>(&mut dst, &src, &small_tiles(), |w| w.get(-1, -1) + w.get(1, 1)).unwrap();
        assert_eq!(dst.get(0, 0), 1 + 5);
        assert_eq!(dst.get(1, 1), 1 + 9);
        assert_eq!(dst.get(2, 2), 5 + 9);
        assert!((0..2).all(|y| dst.as_slice()[y * 4 + 3] == 0));
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let src = PlaneView::<i64>::new(&[], 0, 3, 3).unwrap();
        let mut dst: Plane<i64> = Plane::new(0, 3);
        for exec in [Execution::Sequential, small_tiles()] {
            convolve::<3, 3, _, _, _>(&mut dst, &src, &exec, |w| w.center()).unwrap();
            convolve_dyn(&mut dst, &src, 2, 2, &exec, |w| w.center()).unwrap();
        }
        let flat = PlaneView::<i64>::new(&[], 5, 0, 5).unwrap();
        let mut out: Plane<i64> = Plane::new(5, 0);
        convolve::<3, 3, _, _, _>(&mut out, &flat, &small_tiles(), |w| w.center()).unwrap();
    }

    #[test]
    fn test_shape_mismatch() {
        let src = ramp(4, 4);
        let mut dst = Plane::filled(4, 5, -1i64);
        let err = convolve::<3, 3, _, _, _>(&mut dst, &src, &Execution::Sequential, |w| w.center()).unwrap_err();
        assert_eq!(
            err,
            OpsError::ShapeMismatch {
                op: "convolve",
                expected: (4, 5),
                got: (4, 4),
            }
        );
        assert!(dst.as_slice().iter().all(|&v| v == -1));
    }

    #[test]
    fn test_type_changing_kernel() {
        let src = Plane::filled(3, 3, 200u8);
        let mut dst: Plane<f32> = Plane::new(3, 3);
        convolve::<3, 3, _, _, _>(&mut dst, &src, &Execution::Sequential, |w| {
            w.iter().map(f32::from).sum::<f32>() / 9.0
        })
        .unwrap();
        approx::assert_relative_eq!(dst.get(1, 1), 200.0);
    }
}
