//! Iteration shapes over a grid's index space.
//!
//! | loop              | yields                      | sequential order        | partitioned tiles      |
//! |-------------------|-----------------------------|-------------------------|------------------------|
//! | [`rows`]          | `j`                         | ascending               | row bands              |
//! | [`rows_rev`]      | `j`                         | descending              | row bands, descending inside |
//! | [`row_bounds`]    | `(j, lower, upper)`         | ascending               | row x column blocks    |
//! | [`row_bounds_rev`]| `(j, lower, upper)`         | descending              | row x column blocks, descending inside |
//! | [`linear`]        | `i`                         | row-major               | row bands              |
//! | [`linear_pair`]   | `(i_a, i_b)` for two strides| row-major               | row bands              |
//!
//! `lower = j * stride + x0` and `upper = lower + span` delimit the active
//! columns a callback may touch for row `j`; sequential loops always pass the
//! whole row (`x0 = 0`, `span = width`).
//!
//! Callbacks only receive indices. Writing through them is the caller's
//! business; the elementwise and convolution engines use row blocks instead.
//!
//! # Example
//!
//! ```rust
//! use plane_ops::exec::Execution;
//! use plane_ops::loops;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let sum = AtomicUsize::new(0);
//! loops::linear(2, 3, 4, &Execution::partitioned(), |i| {
//!     sum.fetch_add(i, Ordering::Relaxed);
//! })
//! .unwrap();
//! // indices 0,1,2 and 4,5,6
//! assert_eq!(sum.load(Ordering::Relaxed), 18);
//! ```

use tracing::trace;

use crate::exec::Execution;
use crate::tile::{generate_tiles, row_bands, run_tiles};
use crate::OpsResult;

/// Visits row indices `0..height`.
pub fn rows<F>(height: usize, exec: &Execution, f: F) -> OpsResult<()>
where
    F: Fn(usize) + Sync + Send,
{
    trace!(height, exec = exec.name(), "loops::rows");
    match exec {
        Execution::Sequential => {
            (0..height).for_each(f);
            Ok(())
        }
        Execution::Partitioned(tiling) => {
            let bands = row_bands(0, height, tiling.rows());
            run_tiles(&bands, tiling, "rows", |band| band.rows().for_each(&f))
        }
    }
}

/// Visits row indices `height-1` down to `0`.
pub fn rows_rev<F>(height: usize, exec: &Execution, f: F) -> OpsResult<()>
where
    F: Fn(usize) + Sync + Send,
{
    trace!(height, exec = exec.name(), "loops::rows_rev");
    match exec {
        Execution::Sequential => {
            (0..height).rev().for_each(f);
            Ok(())
        }
        Execution::Partitioned(tiling) => {
            let bands = row_bands(0, height, tiling.rows());
            run_tiles(&bands, tiling, "rows_rev", |band| band.rows().rev().for_each(&f))
        }
    }
}

/// Visits each row with the linear bounds of its active columns.
pub fn row_bounds<F>(height: usize, width: usize, stride: usize, exec: &Execution, f: F) -> OpsResult<()>
where
    F: Fn(usize, usize, usize) + Sync + Send,
{
    trace!(height, width, stride, exec = exec.name(), "loops::row_bounds");
    bounds_impl(height, width, stride, exec, false, "row_bounds", f)
}

/// Like [`row_bounds`], rows in descending order.
pub fn row_bounds_rev<F>(height: usize, width: usize, stride: usize, exec: &Execution, f: F) -> OpsResult<()>
where
    F: Fn(usize, usize, usize) + Sync + Send,
{
    trace!(height, width, stride, exec = exec.name(), "loops::row_bounds_rev");
    bounds_impl(height, width, stride, exec, true, "row_bounds_rev", f)
}

fn bounds_impl<F>(
    height: usize,
    width: usize,
    stride: usize,
    exec: &Execution,
    reverse: bool,
    op: &'static str,
    f: F,
) -> OpsResult<()>
where
    F: Fn(usize, usize, usize) + Sync + Send,
{
    let visit = |j: usize, x0: usize, span: usize| {
        let lower = j * stride + x0;
        f(j, lower, lower + span);
    };

    match exec {
        Execution::Sequential => {
            if reverse {
                (0..height).rev().for_each(|j| visit(j, 0, width));
            } else {
                (0..height).for_each(|j| visit(j, 0, width));
            }
            Ok(())
        }
        Execution::Partitioned(tiling) => {
            let tiles = generate_tiles(width, height, tiling.cols(), tiling.rows());
            run_tiles(&tiles, tiling, op, |tile| {
                if reverse {
                    tile.rows().rev().for_each(|j| visit(j, tile.x, tile.width));
                } else {
                    tile.rows().for_each(|j| visit(j, tile.x, tile.width));
                }
            })
        }
    }
}

/// Visits every active linear index `j * stride + x` in row-major order.
pub fn linear<F>(height: usize, width: usize, stride: usize, exec: &Execution, f: F) -> OpsResult<()>
where
    F: Fn(usize) + Sync + Send,
{
    trace!(height, width, stride, exec = exec.name(), "loops::linear");
    let visit_rows = |rows: std::ops::Range<usize>| {
        for j in rows {
            let lower = j * stride;
            (lower..lower + width).for_each(&f);
        }
    };

    match exec {
        Execution::Sequential => {
            visit_rows(0..height);
            Ok(())
        }
        Execution::Partitioned(tiling) => {
            let bands = row_bands(width, height, tiling.rows());
            run_tiles(&bands, tiling, "linear", |band| visit_rows(band.rows()))
        }
    }
}

/// Visits matching positions of two grids with different strides.
///
/// Yields `(j * stride_a + x, j * stride_b + x)` in row-major order.
///
/// ```rust
/// use plane_ops::exec::Execution;
/// use plane_ops::loops;
/// use std::sync::Mutex;
///
/// let seen = Mutex::new(Vec::new());
/// loops::linear_pair(2, 2, 3, 2, &Execution::Sequential, |a, b| {
///     seen.lock().unwrap().push((a, b));
/// })
/// .unwrap();
/// assert_eq!(seen.into_inner().unwrap(), vec![(0, 0), (1, 1), (3, 2), (4, 3)]);
/// ```
pub fn linear_pair<F>(
    height: usize,
    width: usize,
    stride_a: usize,
    stride_b: usize,
    exec: &Execution,
    f: F,
) -> OpsResult<()>
where
    F: Fn(usize, usize) + Sync + Send,
{
    trace!(height, width, stride_a, stride_b, exec = exec.name(), "loops::linear_pair");
    let visit_rows = |rows: std::ops::Range<usize>| {
        for j in rows {
            let (a, b) = (j * stride_a, j * stride_b);
            for x in 0..width {
                f(a + x, b + x);
            }
        }
    };

    match exec {
        Execution::Sequential => {
            visit_rows(0..height);
            Ok(())
        }
        Execution::Partitioned(tiling) => {
            let bands = row_bands(width, height, tiling.rows());
            run_tiles(&bands, tiling, "linear_pair", |band| visit_rows(band.rows()))
        }
    }
}
