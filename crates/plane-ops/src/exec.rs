//! Execution strategy.
//!
//! Every engine entry point takes an [`Execution`] instead of coming in a
//! serial and a parallel flavour:
//!
//! - [`Execution::Sequential`] - one thread, strict visitation order
//! - [`Execution::Partitioned`] - the index space is cut into disjoint tiles
//!   that run on the rayon pool (feature `parallel`, on by default)
//!
//! Without the `parallel` feature, partitioned execution still cuts tiles
//! but visits them in order on the calling thread. Results are identical
//! either way for pure callbacks.
//!
//! # Example
//!
//! ```rust
//! use plane_ops::exec::{CancelToken, Execution, Tiling};
//!
//! let token = CancelToken::new();
//! let exec = Execution::Partitioned(
//!     Tiling::default()
//!         .with_tile_height(64)
//!         .with_cancel(token.clone()),
//! );
//! assert!(exec.is_partitioned());
//! token.cancel();
//! assert!(token.is_cancelled());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default tile height in rows.
pub const DEFAULT_TILE_HEIGHT: usize = 256;

/// Default tile width in columns.
pub const DEFAULT_TILE_WIDTH: usize = 256;

/// Shared cancellation flag.
///
/// Partitioned execution checks the flag before starting each tile. A tile
/// that has started always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the "not cancelled" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tile geometry for partitioned execution.
///
/// Tile sizes only affect performance. A size of zero is treated as one.
#[derive(Debug, Clone)]
pub struct Tiling {
    /// Rows per tile.
    pub tile_height: usize,
    /// Columns per tile, for loops that also split along columns.
    pub tile_width: usize,
    /// Optional cooperative cancellation.
    pub cancel: Option<CancelToken>,
}

impl Default for Tiling {
    fn default() -> Self {
        Self {
            tile_height: DEFAULT_TILE_HEIGHT,
            tile_width: DEFAULT_TILE_WIDTH,
            cancel: None,
        }
    }
}

impl Tiling {
    /// Sets rows per tile.
    pub fn with_tile_height(mut self, rows: usize) -> Self {
        self.tile_height = rows;
        self
    }

    /// Sets columns per tile.
    pub fn with_tile_width(mut self, cols: usize) -> Self {
        self.tile_width = cols;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Rows per tile, at least one.
    #[inline]
    pub fn rows(&self) -> usize {
        self.tile_height.max(1)
    }

    /// Columns per tile, at least one.
    #[inline]
    pub fn cols(&self) -> usize {
        self.tile_width.max(1)
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// How an operation visits its index space.
#[derive(Debug, Clone)]
pub enum Execution {
    /// Single thread, rows and columns in the documented order.
    Sequential,
    /// Disjoint tiles, no ordering between tiles.
    Partitioned(Tiling),
}

impl Default for Execution {
    /// Partitioned with default tiles when the `parallel` feature is on,
    /// sequential otherwise.
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Self::Partitioned(Tiling::default())
        } else {
            Self::Sequential
        }
    }
}

impl Execution {
    /// Partitioned execution with default tiles.
    pub fn partitioned() -> Self {
        Self::Partitioned(Tiling::default())
    }

    /// Returns `true` for [`Execution::Partitioned`].
    #[inline]
    pub fn is_partitioned(&self) -> bool {
        matches!(self, Self::Partitioned(_))
    }

    /// Human-readable name, used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Partitioned(_) => "partitioned",
        }
    }
}
