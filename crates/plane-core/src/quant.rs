//! Quantization ranges for luma and chroma planes.
//!
//! A [`QuantRange`] is the `(floor, neutral, ceiling)` triple that defines
//! which sample values are meaningful for a plane:
//!
//! | domain  | range   | role   | floor            | neutral          | ceiling            |
//! |---------|---------|--------|------------------|------------------|--------------------|
//! | integer | full    | luma   | `0`              | floor            | `2^bps - 1`        |
//! | integer | full    | chroma | `0`              | `2^(bps-1)`      | `2^bps - 1`        |
//! | integer | limited | luma   | `16 << (bps-8)`  | floor            | `235 << (bps-8)`   |
//! | integer | limited | chroma | `16 << (bps-8)`  | `2^(bps-1)`      | `240 << (bps-8)`   |
//! | float   | any     | luma   | `0`              | `0`              | `1`                |
//! | float   | any     | chroma | `-0.5`           | `0`              | `0.5`              |
//!
//! A triple describes a chroma plane iff `floor < neutral`.
//!
//! Bit depths are trusted. Values outside `8..=32` for limited range, or
//! `1..=32` for full range, give consistent but meaningless results.
//!
//! # Example
//!
//! ```rust
//! use plane_core::quant::{ChannelRole, QuantRange, SampleRange};
//!
//! let y = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Luma);
//! assert_eq!((y.floor, y.neutral, y.ceiling), (16, 16, 235));
//!
//! let c = y.reclassify(ChannelRole::Chroma);
//! assert_eq!(c.neutral, 126);
//! assert!(c.is_chroma());
//! ```

use crate::sample::{Sample, SampleDomain};

/// Code value convention of a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleRange {
    /// Headroom reserved above and below ("TV" range).
    #[default]
    Limited,
    /// Whole representable span ("PC" range).
    Full,
}

impl SampleRange {
    /// Maps a `full range` flag to a range.
    #[inline]
    pub const fn from_full(full: bool) -> Self {
        if full { Self::Full } else { Self::Limited }
    }

    /// Returns `true` for [`SampleRange::Full`].
    #[inline]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Role of a plane within a color model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelRole {
    /// Intensity plane; neutral sits at the floor.
    #[default]
    Luma,
    /// Color-difference plane; neutral sits at the midpoint.
    Chroma,
}

impl ChannelRole {
    /// Maps a `chroma` flag to a role.
    #[inline]
    pub const fn from_chroma(chroma: bool) -> Self {
        if chroma { Self::Chroma } else { Self::Luma }
    }

    /// Returns `true` for [`ChannelRole::Chroma`].
    #[inline]
    pub const fn is_chroma(self) -> bool {
        matches!(self, Self::Chroma)
    }
}

/// `(floor, neutral, ceiling)` sample bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantRange<T> {
    /// Lowest valid sample value.
    pub floor: T,
    /// Value representing "no signal" (black for luma, grey for chroma).
    pub neutral: T,
    /// Highest valid sample value.
    pub ceiling: T,
}

#[inline]
fn scale(bit_depth: u32) -> f64 {
    2f64.powi(bit_depth as i32 - 8)
}

/// Derives the quantization range for an explicit sample domain.
///
/// Results are expressed in `f64`; use [`QuantRange::cast`] to convert to
/// the plane's sample type.
///
/// ```rust
/// use plane_core::quant::{derive_range, ChannelRole, SampleRange};
/// use plane_core::SampleDomain;
///
/// let c = derive_range(8, SampleRange::Limited, ChannelRole::Chroma, SampleDomain::Integer);
/// assert_eq!((c.floor, c.neutral, c.ceiling), (16.0, 128.0, 240.0));
///
/// let f = derive_range(10, SampleRange::Full, ChannelRole::Luma, SampleDomain::Float);
/// assert_eq!((f.floor, f.neutral, f.ceiling), (0.0, 0.0, 1.0));
/// ```
pub fn derive_range(
    bit_depth: u32,
    range: SampleRange,
    role: ChannelRole,
    domain: SampleDomain,
) -> QuantRange<f64> {
    if domain.is_float() {
        return match role {
            ChannelRole::Luma => QuantRange {
                floor: 0.0,
                neutral: 0.0,
                ceiling: 1.0,
            },
            ChannelRole::Chroma => QuantRange {
                floor: -0.5,
                neutral: 0.0,
                ceiling: 0.5,
            },
        };
    }

    let half = 2f64.powi(bit_depth as i32 - 1);
    let (floor, ceiling) = match (range, role) {
        (SampleRange::Full, _) => (0.0, 2f64.powi(bit_depth as i32) - 1.0),
        (SampleRange::Limited, ChannelRole::Luma) => (16.0 * scale(bit_depth), 235.0 * scale(bit_depth)),
        (SampleRange::Limited, ChannelRole::Chroma) => (16.0 * scale(bit_depth), 240.0 * scale(bit_depth)),
    };
    let neutral = if role.is_chroma() { half } else { floor };

    QuantRange {
        floor,
        neutral,
        ceiling,
    }
}

/// Luma floor and ceiling only.
///
/// Integer domain: `(16 << (bps-8), 235 << (bps-8))` for limited range,
/// `(0, 2^bps - 1)` for full range. Float domain: `(0, 1)`.
pub fn floor_ceiling<T: Sample>(bit_depth: u32, range: SampleRange) -> (T, T) {
    let q = QuantRange::<T>::derive(bit_depth, range, ChannelRole::Luma);
    (q.floor, q.ceiling)
}

impl<T: Sample> QuantRange<T> {
    /// Derives the range for sample type `T`, taking the domain from `T`.
    pub fn derive(bit_depth: u32, range: SampleRange, role: ChannelRole) -> Self {
        derive_range(bit_depth, range, role, T::DOMAIN).cast()
    }

    /// Converts each bound to another sample type.
    pub fn cast<U: Sample>(self) -> QuantRange<U> {
        QuantRange {
            floor: U::from_f64(self.floor.to_f64()),
            neutral: U::from_f64(self.neutral.to_f64()),
            ceiling: U::from_f64(self.ceiling.to_f64()),
        }
    }

    /// Returns `true` if this triple describes a chroma plane.
    #[inline]
    pub fn is_chroma(&self) -> bool {
        self.floor < self.neutral
    }

    /// Role implied by the triple.
    #[inline]
    pub fn role(&self) -> ChannelRole {
        ChannelRole::from_chroma(self.is_chroma())
    }

    /// `ceiling - floor`, in `f64`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.ceiling.to_f64() - self.floor.to_f64()
    }

    /// Flags integer chroma ranges whose `floor + ceiling` is odd.
    ///
    /// Such ranges (e.g. full-range 8-bit chroma, `0..=255`) have no exact
    /// integer center. Always `false` for float samples.
    ///
    /// ```rust
    /// use plane_core::quant::{ChannelRole, QuantRange, SampleRange};
    ///
    /// let pc = QuantRange::<u8>::derive(8, SampleRange::Full, ChannelRole::Chroma);
    /// assert!(pc.has_odd_symmetric_range());
    ///
    /// let tv = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Chroma);
    /// assert!(!tv.has_odd_symmetric_range());
    /// ```
    pub fn has_odd_symmetric_range(&self) -> bool {
        if T::IS_FLOAT {
            return false;
        }
        self.is_chroma() && (self.floor.to_f64() + self.ceiling.to_f64()) % 2.0 == 1.0
    }

    /// Re-derives the bounds for another role.
    ///
    /// Integer samples keep floor and ceiling: promoting to chroma moves the
    /// neutral to `(floor + ceiling + 1) / 2`, demoting collapses it to the
    /// floor. Float samples keep the span: chroma becomes
    /// `[-span/2, span/2]` around zero, luma becomes `[0, span]`.
    /// Returns `self` unchanged if it already has the requested role.
    pub fn reclassify(self, role: ChannelRole) -> Self {
        let from_chroma = self.is_chroma();
        let to_chroma = role.is_chroma();
        if from_chroma == to_chroma {
            return self;
        }

        if T::IS_FLOAT {
            let span = self.span();
            let (floor, neutral, ceiling) = if to_chroma {
                (-span / 2.0, 0.0, span / 2.0)
            } else {
                (0.0, 0.0, span)
            };
            return QuantRange {
                floor: T::from_f64(floor),
                neutral: T::from_f64(neutral),
                ceiling: T::from_f64(ceiling),
            };
        }

        let neutral = if to_chroma {
            T::from_f64(((self.floor.to_f64() + self.ceiling.to_f64() + 1.0) / 2.0).trunc())
        } else {
            self.floor
        };
        QuantRange { neutral, ..self }
    }

    /// Clamps `v` into `[floor, ceiling]`.
    #[inline]
    pub fn clamp(&self, v: T) -> T {
        if v < self.floor {
            self.floor
        } else if v > self.ceiling {
            self.ceiling
        } else {
            v
        }
    }

    /// Returns `true` if `floor <= v <= ceiling`.
    #[inline]
    pub fn contains(&self, v: T) -> bool {
        self.floor <= v && v <= self.ceiling
    }
}

/// Luma and chroma ranges for one bit depth and range convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YuvQuant<T> {
    /// Range of the luma plane.
    pub luma: QuantRange<T>,
    /// Range of both chroma planes.
    pub chroma: QuantRange<T>,
}

impl<T: Sample> YuvQuant<T> {
    /// Derives both ranges at once.
    ///
    /// ```rust
    /// use plane_core::quant::{SampleRange, YuvQuant};
    ///
    /// let q = YuvQuant::<u16>::derive(10, SampleRange::Limited);
    /// assert_eq!((q.luma.floor, q.luma.ceiling), (64, 940));
    /// assert_eq!((q.chroma.floor, q.chroma.neutral, q.chroma.ceiling), (64, 512, 960));
    /// ```
    pub fn derive(bit_depth: u32, range: SampleRange) -> Self {
        Self {
            luma: QuantRange::derive(bit_depth, range, ChannelRole::Luma),
            chroma: QuantRange::derive(bit_depth, range, ChannelRole::Chroma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use half::f16;

    fn triple<T: Copy>(q: QuantRange<T>) -> (T, T, T) {
        (q.floor, q.neutral, q.ceiling)
    }

    #[test]
    fn test_limited_8bit() {
        let y = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Luma);
        assert_eq!(triple(y), (16, 16, 235));
        let c = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Chroma);
        assert_eq!(triple(c), (16, 128, 240));
    }

    #[test]
    fn test_full_10bit() {
        let y = QuantRange::<u16>::derive(10, SampleRange::Full, ChannelRole::Luma);
        assert_eq!(triple(y), (0, 0, 1023));
        let c = QuantRange::<u16>::derive(10, SampleRange::Full, ChannelRole::Chroma);
        assert_eq!(triple(c), (0, 512, 1023));
    }

    #[test]
    fn test_limited_16bit() {
        let c = QuantRange::<u16>::derive(16, SampleRange::Limited, ChannelRole::Chroma);
        assert_eq!(triple(c), (4096, 32768, 61440));
    }

    #[test]
    fn test_float_ignores_depth_and_range() {
        for depth in [8, 10, 16, 32] {
            for range in [SampleRange::Limited, SampleRange::Full] {
                let y = QuantRange::<f32>::derive(depth, range, ChannelRole::Luma);
                assert_eq!(triple(y), (0.0, 0.0, 1.0));
                let c = QuantRange::<f32>::derive(depth, range, ChannelRole::Chroma);
                assert_eq!(triple(c), (-0.5, 0.0, 0.5));
            }
        }
        let h = QuantRange::<f16>::derive(8, SampleRange::Limited, ChannelRole::Chroma);
        assert_eq!(h.floor, f16::from_f32(-0.5));
    }

    #[test]
    fn test_explicit_domain() {
        let q = derive_range(12, SampleRange::Limited, ChannelRole::Luma, SampleDomain::Integer);
        assert_eq!(triple(q), (256.0, 256.0, 3760.0));
        let q = derive_range(12, SampleRange::Limited, ChannelRole::Luma, SampleDomain::Float);
        assert_eq!(triple(q), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_floor_ceiling() {
        assert_eq!(floor_ceiling::<u8>(8, SampleRange::Limited), (16, 235));
        assert_eq!(floor_ceiling::<u16>(12, SampleRange::Full), (0, 4095));
        assert_eq!(floor_ceiling::<f64>(12, SampleRange::Full), (0.0, 1.0));
    }

    #[test]
    fn test_is_chroma() {
        let y = QuantRange::<u8>::derive(8, SampleRange::Full, ChannelRole::Luma);
        let c = QuantRange::<u8>::derive(8, SampleRange::Full, ChannelRole::Chroma);
        assert!(!y.is_chroma());
        assert!(c.is_chroma());
        assert_eq!(c.role(), ChannelRole::Chroma);
    }

    #[test]
    fn test_odd_symmetric_range() {
        let pc = QuantRange::<u16>::derive(10, SampleRange::Full, ChannelRole::Chroma);
        assert!(pc.has_odd_symmetric_range());
        let pc_luma = QuantRange::<u16>::derive(10, SampleRange::Full, ChannelRole::Luma);
        assert!(!pc_luma.has_odd_symmetric_range());
        let fc = QuantRange::<f32>::derive(8, SampleRange::Full, ChannelRole::Chroma);
        assert!(!fc.has_odd_symmetric_range());
    }

    #[test]
    fn test_reclassify_integer() {
        let y = QuantRange::<u8>::derive(8, SampleRange::Full, ChannelRole::Luma);
        let c = y.reclassify(ChannelRole::Chroma);
        // (0 + 255 + 1) / 2
        assert_eq!(triple(c), (0, 128, 255));
        let back = c.reclassify(ChannelRole::Luma);
        assert_eq!(triple(back), (0, 0, 255));
    }

    #[test]
    fn test_reclassify_float() {
        let y = QuantRange::<f32>::derive(8, SampleRange::Full, ChannelRole::Luma);
        let c = y.reclassify(ChannelRole::Chroma);
        assert_eq!(triple(c), (-0.5, 0.0, 0.5));
        let back = c.reclassify(ChannelRole::Luma);
        assert_eq!(triple(back), (0.0, 0.0, 1.0));

        let wide = QuantRange {
            floor: 0.0f64,
            neutral: 0.0,
            ceiling: 3.0,
        };
        let c = wide.reclassify(ChannelRole::Chroma);
        assert_relative_eq!(c.floor, -1.5);
        assert_relative_eq!(c.ceiling, 1.5);
    }

    #[test]
    fn test_reclassify_idempotent() {
        let y = QuantRange::<u16>::derive(10, SampleRange::Limited, ChannelRole::Luma);
        for role in [ChannelRole::Luma, ChannelRole::Chroma] {
            let once = y.reclassify(role);
            assert_eq!(once.reclassify(role), once);
        }
        let f = QuantRange::<f32>::derive(8, SampleRange::Limited, ChannelRole::Chroma);
        for role in [ChannelRole::Luma, ChannelRole::Chroma] {
            let once = f.reclassify(role);
            assert_eq!(once.reclassify(role), once);
        }
    }

    #[test]
    fn test_clamp_contains() {
        let y = QuantRange::<u8>::derive(8, SampleRange::Limited, ChannelRole::Luma);
        assert_eq!(y.clamp(3), 16);
        assert_eq!(y.clamp(250), 235);
        assert_eq!(y.clamp(100), 100);
        assert!(y.contains(235));
        assert!(!y.contains(236));
        assert_relative_eq!(y.span(), 219.0);
    }

    #[test]
    fn test_flags() {
        assert_eq!(SampleRange::from_full(true), SampleRange::Full);
        assert!(!SampleRange::from_full(false).is_full());
        assert_eq!(ChannelRole::from_chroma(true), ChannelRole::Chroma);
    }

    #[test]
    fn test_yuv_quant() {
        let q = YuvQuant::<u8>::derive(8, SampleRange::Full);
        assert_eq!(triple(q.luma), (0, 0, 255));
        assert_eq!(triple(q.chroma), (0, 128, 255));
    }
}
