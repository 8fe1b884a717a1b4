//! Tiles and the partitioned drivers built on them.
//!
//! Two kinds of partitioning are used:
//!
//! - index-space tiles ([`Tile`]), handed to read-only or index-yielding
//!   callbacks by [`crate::loops`]
//! - row blocks of a destination slice, handed out as disjoint `&mut`
//!   chunks so that each tile owns the rows it writes
//!
//! Cancellation is checked before a tile starts, never inside one.

use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::exec::{Execution, Tiling};
use crate::{OpsError, OpsResult};

/// A rectangular region of a grid's index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// First column.
    pub x: usize,
    /// First row.
    pub y: usize,
    /// Columns in the tile.
    pub width: usize,
    /// Rows in the tile.
    pub height: usize,
}

impl Tile {
    /// Creates a tile.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Whole grid as a single tile.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Row indices covered by the tile.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    /// Column indices covered by the tile.
    #[inline]
    pub fn cols(&self) -> Range<usize> {
        self.x..self.x + self.width
    }
}

/// Cuts a `width x height` grid into row-major tiles.
///
/// Edge tiles are clipped to the grid. Tile sizes of zero are treated as one.
///
/// ```rust
/// use plane_ops::tile::generate_tiles;
///
/// let tiles = generate_tiles(1000, 600, 512, 512);
/// assert_eq!(tiles.len(), 4);
/// assert_eq!(tiles[1].x, 512);
/// assert_eq!(tiles[1].width, 488);
/// ```
pub fn generate_tiles(width: usize, height: usize, tile_width: usize, tile_height: usize) -> Vec<Tile> {
    let tile_width = tile_width.max(1);
    row_bands(width, height, tile_height)
        .into_iter()
        .filter(|_| width > 0)
        .flat_map(move |band| {
            (0..width)
                .step_by(tile_width)
                .map(move |x| Tile::new(x, band.y, tile_width.min(width - x), band.height))
        })
        .collect()
}

/// Cuts a grid into full-width bands of `tile_height` rows.
///
/// Unlike [`generate_tiles`], bands are produced even when `width` is zero,
/// so row-only loops do not depend on the column count.
pub fn row_bands(width: usize, height: usize, tile_height: usize) -> Vec<Tile> {
    let tile_height = tile_height.max(1);
    (0..height)
        .step_by(tile_height)
        .map(|y| Tile::new(0, y, width, tile_height.min(height - y)))
        .collect()
}

/// Evaluates `f` once per tile and returns the results in tile order.
pub(crate) fn map_tiles<R, F>(tiles: &[Tile], tiling: &Tiling, op: &'static str, f: F) -> OpsResult<Vec<R>>
where
    R: Send,
    F: Fn(&Tile) -> R + Sync + Send,
{
    debug!(op, tiles = tiles.len(), tile_w = tiling.cols(), tile_h = tiling.rows(), "tile plan");

    let run = |tile: &Tile| {
        if tiling.is_cancelled() {
            None
        } else {
            Some(f(tile))
        }
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Option<R>> = tiles.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Option<R>> = tiles.iter().map(run).collect();

    let done = results.iter().filter(|r| r.is_some()).count();
    if done < tiles.len() {
        debug!(op, done, total = tiles.len(), "cancelled");
        return Err(OpsError::Cancelled { op });
    }
    Ok(results.into_iter().flatten().collect())
}

/// Runs `f` once per tile.
pub(crate) fn run_tiles<F>(tiles: &[Tile], tiling: &Tiling, op: &'static str, f: F) -> OpsResult<()>
where
    F: Fn(&Tile) + Sync + Send,
{
    map_tiles(tiles, tiling, op, f).map(|_| ())
}

/// Hands disjoint row blocks of `data` to `f`.
///
/// `f(first_row, block)` receives a slice starting at row `first_row`; rows
/// inside the block are `stride` samples apart and the last row may lack its
/// trailing padding. Use [`block_rows`] to walk them. Sequential execution
/// passes the whole grid as one block.
pub(crate) fn run_row_blocks_mut<T, F>(
    data: &mut [T],
    width: usize,
    height: usize,
    stride: usize,
    exec: &Execution,
    op: &'static str,
    f: F,
) -> OpsResult<()>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let len = plane_core::grid::min_len(width, height, stride);
    if len == 0 {
        return Ok(());
    }
    let data = &mut data[..len];

    let tiling = match exec {
        Execution::Sequential => {
            f(0, data);
            return Ok(());
        }
        Execution::Partitioned(tiling) => tiling,
    };

    let rows = tiling.rows();
    let block_len = rows * stride;
    let blocks = height.div_ceil(rows);
    debug!(op, blocks, rows_per_block = rows, "row block plan");

    let run = |(i, block): (usize, &mut [T])| {
        if tiling.is_cancelled() {
            return true;
        }
        f(i * rows, block);
        false
    };

    #[cfg(feature = "parallel")]
    let skipped = data
        .par_chunks_mut(block_len)
        .enumerate()
        .map(run)
        .filter(|&skipped| skipped)
        .count();
    #[cfg(not(feature = "parallel"))]
    let skipped = data
        .chunks_mut(block_len)
        .enumerate()
        .map(run)
        .filter(|&skipped| skipped)
        .count();

    if skipped > 0 {
        debug!(op, skipped, total = blocks, "cancelled");
        return Err(OpsError::Cancelled { op });
    }
    Ok(())
}

/// Active rows of a block produced by [`run_row_blocks_mut`].
#[inline]
pub(crate) fn block_rows<T>(block: &mut [T], width: usize, stride: usize) -> impl Iterator<Item = &mut [T]> {
    block.chunks_mut(stride).map(move |row| &mut row[..width])
}
