//! # fourier
//!
//! An image engine over 8-bit rasters: color space conversion (RGB, YCbCr,
//! grayscale), Gaussian smoothing through the frequency domain, Canny edge
//! detection, elementwise arithmetic and JPEG persistence.
//!
//! # Architecture
//!
//! ```text
//!                  fourier (this crate)
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//! fourier-color     fourier-ops        fourier-io
//!     |                  |                  |
//!     +------------------+------------------+
//!                        |
//!                  fourier-core
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fourier::{CannyParams, Image};
//!
//! let mut img = Image::read_jpeg("input.jpg")?;
//! img.gaussian_blur(1.4, 2)?;
//! img.canny_edge_detect(&CannyParams::default())?;
//! img.write_jpeg("edges.jpg", 100)?;
//! # Ok::<(), fourier::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod image;
mod shared;

pub use image::Image;
pub use shared::SharedImage;

pub use fourier_core::{ColorSpace, Error, PixelBuffer, Result};
pub use fourier_io::jpeg::{DEFAULT_QUALITY, JpegWriterOptions};
pub use fourier_ops::canny::{CannyStage, Direction, EdgeClass};
pub use fourier_ops::{BlurParams, BorderMode, CannyParams, Kernel};

/// Lower-level building blocks.
pub mod ops {
    pub use fourier_color as color;
    pub use fourier_io as io;
    pub use fourier_ops::{arith, canny, fft, filter, kernel};
}
