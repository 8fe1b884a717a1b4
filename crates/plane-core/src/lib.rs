//! # plane-core
//!
//! Core types for 2-D sample planes.
//!
//! This crate provides the shared vocabulary used by `plane-ops`:
//!
//! - [`Sample`] - Numeric sample types (u8, u16, u32, i16, i32, f16, f32, f64)
//! - [`Grid`], [`GridMut`] - Capability traits: width, height, stride, raw slice
//! - [`Plane`], [`PlaneView`], [`PlaneViewMut`] - Owned and borrowed containers
//! - [`quant`] - Floor / neutral / ceiling sample bounds per bit depth and role
//!
//! ## Crate Structure
//!
//! ```text
//! plane-core (this crate)
//!    ^
//!    |
//!    +-- plane-ops   (loops, transforms, sliding-window convolution)
//!    +-- plane-bench (criterion benchmarks)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use plane_core::prelude::*;
//!
//! let plane: Plane<u16> = Plane::filled(8, 4, 512);
//! let chroma = QuantRange::<u16>::derive(10, SampleRange::Limited, ChannelRole::Chroma);
//! assert_eq!(plane.get(0, 0), chroma.neutral);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod grid;
pub mod plane;
pub mod quant;
pub mod sample;

pub use error::{Error, Result};
pub use grid::{Grid, GridMut};
pub use plane::{Plane, PlaneView, PlaneViewMut};
pub use quant::{ChannelRole, QuantRange, SampleRange, YuvQuant};
pub use sample::{Sample, SampleDomain};

/// Prelude module for convenient imports.
///
/// ```
/// use plane_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Grid, GridMut};
    pub use crate::plane::{Plane, PlaneView, PlaneViewMut};
    pub use crate::quant::{derive_range, floor_ceiling, ChannelRole, QuantRange, SampleRange, YuvQuant};
    pub use crate::sample::{Sample, SampleDomain};
}
