//! Error types for fourier operations.
//!
//! A single [`Error`] enum covers every failure mode of the engine:
//!
//! - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter) for
//!   out-of-range numeric arguments (std_dev, size_f, thresholds, quality)
//! - **I/O errors**: [`Io`](Error::Io) for missing or unwritable files
//! - **Codec errors**: [`Format`](Error::Format) for malformed JPEG data
//! - **Color errors**: [`UnsupportedConversion`](Error::UnsupportedConversion)
//! - **Geometry errors**: [`InvalidDimensions`](Error::InvalidDimensions),
//!   [`OutOfBounds`](Error::OutOfBounds)
//!
//! # Usage
//!
//! ```rust
//! use fourier_core::{Error, Result};
//!
//! fn check_std_dev(std_dev: f32) -> Result<()> {
//!     if !(std_dev > 0.0) {
//!         return Err(Error::invalid_parameter(format!(
//!             "std_dev must be positive, got {}",
//!             std_dev
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_std_dev(-1.0).is_err());
//! ```

use thiserror::Error;

use crate::ColorSpace;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during image processing operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A numeric argument is out of range.
    ///
    /// Non-positive std_dev, negative size_f, lower threshold above the upper
    /// one, JPEG quality outside [0, 100], malformed kernels.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// File I/O error (missing, unreadable or unwritable file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unsupported encoded image data.
    #[error("format error: {0}")]
    Format(String),

    /// The requested color space pair has no defined transform.
    #[error("unsupported conversion: {from} -> {to}")]
    UnsupportedConversion {
        /// Source color space
        from: ColorSpace,
        /// Requested target color space
        to: ColorSpace,
    },

    /// Image dimensions are inconsistent with the sample data.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample coordinates are outside the buffer.
    #[error("sample ({x}, {y}, {channel}) out of bounds for buffer {width}x{height}x{channels}")]
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Channel index
        channel: usize,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Buffer channel count
        channels: usize,
    },

    /// A shared image handle was poisoned by a panicking writer.
    #[error("image lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Creates an [`Error::Format`] error.
    #[inline]
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Creates an [`Error::UnsupportedConversion`] error.
    #[inline]
    pub fn unsupported_conversion(from: ColorSpace, to: ColorSpace) -> Self {
        Self::UnsupportedConversion { from, to }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a parameter validation error.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns `true` if this is a codec format error.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
