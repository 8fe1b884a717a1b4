//! Sample types stored in planes.
//!
//! A plane stores one numeric value per position. The engine itself only
//! needs samples to be `Copy` and shareable across threads; the extra
//! information carried by [`Sample`] is what the quantization model needs to
//! decide between integer and floating-point range rules.
//!
//! # Supported types
//!
//! | type            | domain  | bits |
//! |-----------------|---------|------|
//! | `u8`            | integer | 8    |
//! | `u16`           | integer | 16   |
//! | `u32`           | integer | 32   |
//! | `i16`           | integer | 16   |
//! | `i32`           | integer | 32   |
//! | [`half::f16`]   | float   | 16   |
//! | `f32`           | float   | 32   |
//! | `f64`           | float   | 64   |

use half::f16;

/// Numeric domain of a sample type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleDomain {
    /// Integer code values; ranges scale with bit depth.
    Integer,
    /// Floating-point values; ranges are normalized.
    Float,
}

impl SampleDomain {
    /// Returns `true` for [`SampleDomain::Float`].
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float)
    }
}

/// Trait for plane sample types.
///
/// # Example
///
/// ```
/// use plane_core::{Sample, SampleDomain};
///
/// assert_eq!(<u16 as Sample>::DOMAIN, SampleDomain::Integer);
/// assert_eq!(u8::from_f64(300.0), 255);
/// assert_eq!(f32::from_f64(0.25), 0.25);
/// ```
pub trait Sample: Copy + Default + Send + Sync + PartialOrd + 'static {
    /// Storage width in bits.
    const BITS: u32;

    /// Whether this is a floating-point type.
    const IS_FLOAT: bool;

    /// Numeric domain, derived from [`IS_FLOAT`](Sample::IS_FLOAT).
    const DOMAIN: SampleDomain = if Self::IS_FLOAT {
        SampleDomain::Float
    } else {
        SampleDomain::Integer
    };

    /// Converts to `f64` without normalization.
    fn to_f64(self) -> f64;

    /// Converts from `f64` without normalization.
    ///
    /// Integer types round to nearest and saturate at their limits.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_int_sample {
    ($($ty:ty),*) => {$(
        impl Sample for $ty {
            const BITS: u32 = <$ty>::BITS;
            const IS_FLOAT: bool = false;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v.round() as $ty
            }
        }
    )*};
}

impl_int_sample!(u8, u16, u32, i16, i32);

impl Sample for f16 {
    const BITS: u32 = 16;
    const IS_FLOAT: bool = true;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }
}

impl Sample for f32 {
    const BITS: u32 = 32;
    const IS_FLOAT: bool = true;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Sample for f64 {
    const BITS: u32 = 64;
    const IS_FLOAT: bool = true;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}
