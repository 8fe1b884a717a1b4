//! Error types for plane operations.

use thiserror::Error;

/// Error type for plane operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Grids participating in one operation disagree in width or height.
    ///
    /// Raised before anything is written to the destination.
    #[error("{op}: shape mismatch, expected {}x{}, got {}x{}", .expected.0, .expected.1, .got.0, .got.1)]
    ShapeMismatch {
        /// Operation name
        op: &'static str,
        /// Destination `(width, height)`
        expected: (usize, usize),
        /// Offending source `(width, height)`
        got: (usize, usize),
    },

    /// Partitioned execution was cancelled between tiles.
    ///
    /// Tiles that finished before the cancellation keep their output;
    /// the remaining tiles were never started.
    #[error("{op}: cancelled")]
    Cancelled {
        /// Operation name
        op: &'static str,
    },

    /// Error from plane-core.
    ///
    /// Engine calls never produce it themselves. It lets code returning
    /// [`OpsResult`] build its views with `?`:
    ///
    /// ```rust
    /// use plane_core::{Plane, PlaneView};
    /// use plane_ops::{transform, Execution, OpsError, OpsResult};
    ///
    /// fn invert(raw: &[u8], width: usize, height: usize, stride: usize) -> OpsResult<Plane<u8>> {
    ///     let src = PlaneView::new(raw, width, height, stride)?;
    ///     let mut dst = Plane::new(width, height);
    ///     transform(&mut dst, &src, &Execution::default(), |v| 255 - v)?;
    ///     Ok(dst)
    /// }
    ///
    /// assert_eq!(invert(&[0, 10], 2, 1, 2).unwrap().get(1, 0), 245);
    /// assert!(matches!(invert(&[0, 10], 2, 1, 1), Err(OpsError::Core(_))));
    /// ```
    #[error(transparent)]
    Core(#[from] plane_core::Error),
}

impl OpsError {
    /// Returns `true` for [`OpsError::ShapeMismatch`].
    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }

    /// Returns `true` for [`OpsError::Cancelled`].
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for plane operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = OpsError::ShapeMismatch {
            op: "transform",
            expected: (640, 480),
            got: (320, 240),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("transform"));
        assert!(msg.contains("640x480"));
        assert!(msg.contains("320x240"));
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_core_conversion() {
        let err: OpsError = plane_core::Error::InvalidStride { stride: 1, width: 2 }.into();
        assert!(matches!(err, OpsError::Core(_)));
        assert!(!err.is_cancelled());
    }
}
