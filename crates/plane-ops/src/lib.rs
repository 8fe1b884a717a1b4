//! # plane-ops
//!
//! Data-parallel operations over 2-D sample planes.
//!
//! Every entry point takes an [`Execution`] that selects a single-threaded
//! scan or a partitioned one over disjoint tiles. Pure callbacks give the
//! same result either way.
//!
//! # Modules
//!
//! - [`loops`] - Index-space iteration: rows, row bounds, linear indices
//! - [`transform`] - Elementwise `for_each`, `transform` (0 to 4 sources), `fold`
//! - [`convolve`] - Sliding-window neighborhood filters with edge replication
//! - [`window`] - Neighborhood snapshots passed to convolution kernels
//! - [`exec`] - Execution strategy, tile sizes, cancellation
//! - [`tile`] - Tile geometry
//!
//! # Example
//!
//! ```rust
//! use plane_core::prelude::*;
//! use plane_ops::{convolve, transform_in_place, Execution};
//!
//! let q = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Luma);
//! let src = Plane::from_fn(64, 48, |x, y| ((x * 5 + y * 3) % 256) as u8);
//! let exec = Execution::default();
//!
//! // 3x3 mean
//! let mut blurred: Plane<u8> = Plane::new(64, 48);
//! convolve::<3, 3, _, _, _>(&mut blurred, &src, &exec, |w| {
//!     (w.iter().map(u32::from).sum::<u32>() / 9) as u8
//! })
//! .unwrap();
//!
//! // clamp into studio range
//! transform_in_place(&mut blurred, &exec, |v| q.clamp(v)).unwrap();
//! assert!(blurred.as_slice().iter().all(|&v| q.contains(v)));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - run partitioned tiles on the rayon thread pool.
//!   Without it, tiles still exist but run in order on the calling thread.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convolve;
pub mod exec;
pub mod loops;
pub mod tile;
pub mod transform;
pub mod window;

pub use convolve::{convolve, convolve_dyn};
pub use error::{OpsError, OpsResult};
pub use exec::{CancelToken, Execution, Tiling};
pub use transform::{fold, for_each, transform, transform2, transform3, transform4, transform_in_place};
pub use window::{DynWindow, Window};
