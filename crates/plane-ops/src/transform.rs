//! Elementwise transforms and reductions.
//!
//! All grids taking part in one call must share width and height; strides
//! may differ, each grid is addressed with its own. Shapes are checked before
//! anything is written.
//!
//! | function               | effect                                        |
//! |------------------------|-----------------------------------------------|
//! | [`for_each`]           | `f(&data[i])`, side effects only              |
//! | [`transform_in_place`] | `data[i] = f(data[i])`                        |
//! | [`transform`]          | `dst[i] = f(a[i])`                            |
//! | [`transform2`]         | `dst[i] = f(a[i], b[i])`                      |
//! | [`transform3`]         | `dst[i] = f(a[i], b[i], c[i])`                |
//! | [`transform4`]         | `dst[i] = f(a[i], b[i], c[i], d[i])`          |
//! | [`fold`]               | associative reduction over all samples        |
//!
//! With [`Execution::Partitioned`] the destination is cut into disjoint row
//! blocks; `f` must not depend on visitation order.
//!
//! # Example
//!
//! ```rust
//! use plane_core::{Grid, Plane};
//! use plane_ops::exec::Execution;
//! use plane_ops::transform::transform2;
//!
//! let a = Plane::filled(4, 4, 10u8);
//! let b = Plane::filled(4, 4, 3u8);
//! let mut diff: Plane<i16> = Plane::new(4, 4);
//! transform2(&mut diff, &a, &b, &Execution::partitioned(), |x, y| x as i16 - y as i16).unwrap();
//! assert!(diff.as_slice().iter().all(|&v| v == 7));
//! ```

use plane_core::{Grid, GridMut};
use tracing::trace;

use crate::exec::Execution;
use crate::tile::{block_rows, map_tiles, row_bands, run_row_blocks_mut};
use crate::{loops, OpsError, OpsResult};

/// Fails with [`OpsError::ShapeMismatch`] unless `src` has `dims`.
#[inline]
pub(crate) fn check_shape<S: Grid + ?Sized>(op: &'static str, dims: (usize, usize), src: &S) -> OpsResult<()> {
    let got = src.dimensions();
    if got != dims {
        return Err(OpsError::ShapeMismatch {
            op,
            expected: dims,
            got,
        });
    }
    Ok(())
}

/// Row `y` of a strided slice.
#[inline]
fn src_row<T>(data: &[T], stride: usize, width: usize, y: usize) -> &[T] {
    let start = y * stride;
    &data[start..start + width]
}

/// Drives `f(y, dst_row)` over the destination rows.
fn for_dst_rows<D, F>(dst: &mut D, exec: &Execution, op: &'static str, f: F) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    F: Fn(usize, &mut [D::Sample]) + Sync + Send,
{
    let (width, height, stride) = (dst.width(), dst.height(), dst.stride());
    run_row_blocks_mut(dst.as_mut_slice(), width, height, stride, exec, op, |y0, block| {
        for (dy, row) in block_rows(block, width, stride).enumerate() {
            f(y0 + dy, row);
        }
    })
}

/// Calls `f` on every active sample, without writing back.
///
/// ```rust
/// use plane_core::Plane;
/// use plane_ops::exec::Execution;
/// use plane_ops::transform::for_each;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// let plane = Plane::from_fn(3, 3, |x, y| (x + y) as u32);
/// let total = AtomicU32::new(0);
/// for_each(&plane, &Execution::partitioned(), |&v| {
///     total.fetch_add(v, Ordering::Relaxed);
/// })
/// .unwrap();
/// assert_eq!(total.into_inner(), 18);
/// ```
pub fn for_each<G, F>(grid: &G, exec: &Execution, f: F) -> OpsResult<()>
where
    G: Grid + ?Sized,
    G::Sample: Sync,
    F: Fn(&G::Sample) + Sync + Send,
{
    let (width, height, stride) = (grid.width(), grid.height(), grid.stride());
    trace!(width, height, exec = exec.name(), "for_each");
    let data = grid.as_slice();
    loops::linear(height, width, stride, exec, |i| f(&data[i]))
}

/// Replaces every active sample with `f(sample)`.
pub fn transform_in_place<G, F>(grid: &mut G, exec: &Execution, f: F) -> OpsResult<()>
where
    G: GridMut + ?Sized,
    G::Sample: Send,
    F: Fn(G::Sample) -> G::Sample + Sync + Send,
{
    trace!(width = grid.width(), height = grid.height(), exec = exec.name(), "transform_in_place");
    for_dst_rows(grid, exec, "transform_in_place", |_, row| {
        for v in row.iter_mut() {
            *v = f(*v);
        }
    })
}

/// `dst[i] = f(src[i])`.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if `src` differs from `dst` in width or height.
pub fn transform<D, A, F>(dst: &mut D, src: &A, exec: &Execution, f: F) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    A: Grid + ?Sized,
    A::Sample: Sync,
    F: Fn(A::Sample) -> D::Sample + Sync + Send,
{
    let dims = dst.dimensions();
    trace!(width = dims.0, height = dims.1, exec = exec.name(), "transform");
    check_shape("transform", dims, src)?;

    let (a, sa) = (src.as_slice(), src.stride());
    for_dst_rows(dst, exec, "transform", |y, row| {
        let ra = src_row(a, sa, dims.0, y);
        for (d, &x) in row.iter_mut().zip(ra) {
            *d = f(x);
        }
    })
}

/// `dst[i] = f(a[i], b[i])`.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if any source differs from `dst` in width or height.
pub fn transform2<D, A, B, F>(dst: &mut D, src_a: &A, src_b: &B, exec: &Execution, f: F) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    A: Grid + ?Sized,
    A::Sample: Sync,
    B: Grid + ?Sized,
    B::Sample: Sync,
    F: Fn(A::Sample, B::Sample) -> D::Sample + Sync + Send,
{
    let dims = dst.dimensions();
    trace!(width = dims.0, height = dims.1, exec = exec.name(), "transform2");
    check_shape("transform2", dims, src_a)?;
    check_shape("transform2", dims, src_b)?;

    let (a, sa) = (src_a.as_slice(), src_a.stride());
    let (b, sb) = (src_b.as_slice(), src_b.stride());
    for_dst_rows(dst, exec, "transform2", |y, row| {
        let ra = src_row(a, sa, dims.0, y);
        let rb = src_row(b, sb, dims.0, y);
        for (x, d) in row.iter_mut().enumerate() {
            *d = f(ra[x], rb[x]);
        }
    })
}

/// `dst[i] = f(a[i], b[i], c[i])`.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if any source differs from `dst` in width or height.
pub fn transform3<D, A, B, C, F>(
    dst: &mut D,
    src_a: &A,
    src_b: &B,
    src_c: &C,
    exec: &Execution,
    f: F,
) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    A: Grid + ?Sized,
    A::Sample: Sync,
    B: Grid + ?Sized,
    B::Sample: Sync,
    C: Grid + ?Sized,
    C::Sample: Sync,
    F: Fn(A::Sample, B::Sample, C::Sample) -> D::Sample + Sync + Send,
{
    let dims = dst.dimensions();
    trace!(width = dims.0, height = dims.1, exec = exec.name(), "transform3");
    check_shape("transform3", dims, src_a)?;
    check_shape("transform3", dims, src_b)?;
    check_shape("transform3", dims, src_c)?;

    let (a, sa) = (src_a.as_slice(), src_a.stride());
    let (b, sb) = (src_b.as_slice(), src_b.stride());
    let (c, sc) = (src_c.as_slice(), src_c.stride());
    for_dst_rows(dst, exec, "transform3", |y, row| {
        let ra = src_row(a, sa, dims.0, y);
        let rb = src_row(b, sb, dims.0, y);
        let rc = src_row(c, sc, dims.0, y);
        for (x, d) in row.iter_mut().enumerate() {
            *d = f(ra[x], rb[x], rc[x]);
        }
    })
}

/// `dst[i] = f(a[i], b[i], c[i], d[i])`.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if any source differs from `dst` in width or height.
#[allow(clippy::too_many_arguments)]
pub fn transform4<D, A, B, C, E, F>(
    dst: &mut D,
    src_a: &A,
    src_b: &B,
    src_c: &C,
    src_d: &E,
    exec: &Execution,
    f: F,
) -> OpsResult<()>
where
    D: GridMut + ?Sized,
    D::Sample: Send,
    A: Grid + ?Sized,
    A::Sample: Sync,
    B: Grid + ?Sized,
    B::Sample: Sync,
    C: Grid + ?Sized,
    C::Sample: Sync,
    E: Grid + ?Sized,
    E::Sample: Sync,
    F: Fn(A::Sample, B::Sample, C::Sample, E::Sample) -> D::Sample + Sync + Send,
{
    let dims = dst.dimensions();
    trace!(width = dims.0, height = dims.1, exec = exec.name(), "transform4");
    check_shape("transform4", dims, src_a)?;
    check_shape("transform4", dims, src_b)?;
    check_shape("transform4", dims, src_c)?;
    check_shape("transform4", dims, src_d)?;

    let (a, sa) = (src_a.as_slice(), src_a.stride());
    let (b, sb) = (src_b.as_slice(), src_b.stride());
    let (c, sc) = (src_c.as_slice(), src_c.stride());
    let (e, se) = (src_d.as_slice(), src_d.stride());
    for_dst_rows(dst, exec, "transform4", |y, row| {
        let ra = src_row(a, sa, dims.0, y);
        let rb = src_row(b, sb, dims.0, y);
        let rc = src_row(c, sc, dims.0, y);
        let re = src_row(e, se, dims.0, y);
        for (x, d) in row.iter_mut().enumerate() {
            *d = f(ra[x], rb[x], rc[x], re[x]);
        }
    })
}

/// Reduces all active samples with an associative `combine`.
///
/// An empty grid yields `identity`.
///
/// Each tile folds its samples into a fresh copy of `identity` with `step`;
/// partial results are then combined in tile order, so an associative
/// `combine` gives the same answer for every execution.
///
/// ```rust
/// use plane_core::Plane;
/// use plane_ops::exec::Execution;
/// use plane_ops::transform::fold;
///
/// let plane = Plane::from_fn(8, 8, |x, y| (x * y) as u8);
/// let max = fold(&plane, &Execution::partitioned(), 0u8, |m, v| m.max(v), |a, b| a.max(b)).unwrap();
/// assert_eq!(max, 49);
/// ```
pub fn fold<G, A, S, C>(grid: &G, exec: &Execution, identity: A, step: S, combine: C) -> OpsResult<A>
where
    G: Grid + ?Sized,
    G::Sample: Sync,
    A: Clone + Send + Sync,
    S: Fn(A, G::Sample) -> A + Sync + Send,
    C: Fn(A, A) -> A,
{
    let (width, height, stride) = (grid.width(), grid.height(), grid.stride());
    trace!(width, height, exec = exec.name(), "fold");
    if grid.is_empty() {
        return Ok(identity);
    }
    let data = grid.as_slice();
    let fold_rows = |rows: std::ops::Range<usize>, init: A| {
        rows.fold(init, |acc, y| src_row(data, stride, width, y).iter().fold(acc, |acc, &v| step(acc, v)))
    };

    match exec {
        Execution::Sequential => Ok(fold_rows(0..height, identity)),
        Execution::Partitioned(tiling) => {
            let bands = row_bands(width, height, tiling.rows());
            let partials = map_tiles(&bands, tiling, "fold", |band| fold_rows(band.rows(), identity.clone()))?;
            Ok(partials.into_iter().fold(identity, combine))
        }
    }
}
