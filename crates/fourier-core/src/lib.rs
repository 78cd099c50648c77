//! # fourier-core
//!
//! Core types for the fourier image engine.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace:
//!
//! - [`PixelBuffer`] - Interleaved 8-bit sample storage with geometry
//! - [`ColorSpace`] - The three supported color spaces (RGB, YCbCr, Gray)
//! - [`Error`] / [`Result`] - The error taxonomy of the engine
//!
//! ## Crate Structure
//!
//! ```text
//! fourier-core (this crate)
//!    ^
//!    |
//!    +-- fourier-color (color space conversion)
//!    +-- fourier-ops (kernels, convolution, edge detection)
//!    +-- fourier-io (JPEG codec, text dump)
//!    +-- fourier (Image composition root)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod colorspace;
pub mod error;

pub use buffer::PixelBuffer;
pub use colorspace::ColorSpace;
pub use error::{Error, Result};

/// Maximum value of an 8-bit sample.
pub const MAX_SAMPLE: f32 = 255.0;

/// Rounds a floating point sample to the nearest integer and clamps it to [0, 255].
///
/// Halves round away from zero (`f32::round`). NaN maps to 0.
///
/// ```rust
/// use fourier_core::quantize;
///
/// assert_eq!(quantize(127.5), 128);
/// assert_eq!(quantize(-3.0), 0);
/// assert_eq!(quantize(300.0), 255);
/// ```
#[inline]
pub fn quantize(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, MAX_SAMPLE) as u8
}

/// Prelude module for convenient imports.
///
/// ```
/// use fourier_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::colorspace::ColorSpace;
    pub use crate::error::{Error, Result};
    pub use crate::quantize;
}
