//! Error types shared across the optics-rs workspace.
//!
//! One enum serves every crate in the workspace; the numerical surface is
//! small enough that per-crate error types would only add conversion noise.
//!
//! # Usage
//!
//! ```rust
//! use optic_core::{Error, Result};
//!
//! fn halve(samples: &[f64], expected: usize) -> Result<Vec<f64>> {
//!     if samples.len() != expected {
//!         return Err(Error::shape_mismatch(expected, samples.len()));
//!     }
//!     Ok(samples.iter().map(|s| s * 0.5).collect())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Display/Error derive

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the computational core.
///
/// All failures are immediate and terminal for the call that raised them;
/// nothing is retried or recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was neither of the forms an operation accepts, or its
    /// contents were unusable (empty grid, zero direction vector, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two arrays expected to have identical shapes differ.
    #[error("shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch {
        /// Element count of the reference operand
        expected: usize,
        /// Element count of the offending operand
        got: usize,
    },

    /// An image had the wrong number of channels for the operation.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: u8,
        /// Actual channel count
        got: u8,
    },

    /// A computation was requested before its input data was loaded.
    #[error("no data loaded")]
    NoData,

    /// A named color transform is not in the registry.
    ///
    /// Names must match a registered transform exactly; nothing is listed
    /// implicitly.
    #[error("{0} is not a known transform")]
    UnknownTransform(String),

    /// A matrix that had to be inverted was singular.
    #[error("singular transform: {0}")]
    SingularTransform(String),

    /// I/O failure while reading or writing an image file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An image file could not be decoded or encoded.
    #[error("codec error: {0}")]
    Decode(String),
}

impl Error {
    /// Creates an [`Error::InvalidInput`] error.
    #[inline]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an [`Error::ShapeMismatch`] error.
    #[inline]
    pub fn shape_mismatch(expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { expected, got }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u8, got: u8) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::SingularTransform`] error.
    #[inline]
    pub fn singular(ctx: impl Into<String>) -> Self {
        Self::SingularTransform(ctx.into())
    }

    /// Returns `true` if this is a shape or channel mismatch.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::ChannelMismatch { .. }
        )
    }
}
