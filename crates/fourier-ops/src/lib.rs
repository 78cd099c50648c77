//! # fourier-ops
//!
//! Numeric core of the fourier image engine.
//!
//! # Modules
//!
//! - [`kernel`] - Gaussian, box and Sobel kernels
//! - [`fft`] - Frequency-domain convolution and Gaussian blur
//! - [`filter`] - Direct spatial convolution, naive Gaussian and box blur
//! - [`canny`] - Canny edge detection
//! - [`border`] - Border policies shared by both convolution engines
//! - [`arith`] - Elementwise sample arithmetic
//!
//! # Example
//!
//! ```rust
//! use fourier_core::PixelBuffer;
//! use fourier_ops::{BorderMode, fft};
//!
//! let mut buf = PixelBuffer::from_vec(4, 4, 1, vec![100; 16]).unwrap();
//! fft::blur(&mut buf, 1.4, 2, BorderMode::Clamp).unwrap();
//! assert!(buf.as_slice().iter().all(|&v| v == 100));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - per-channel and per-row parallelism with rayon.
//!   Results are identical with or without it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod arith;
pub mod border;
pub mod canny;
pub mod fft;
pub mod filter;
pub mod kernel;
pub mod params;

pub use border::BorderMode;
pub use kernel::Kernel;
pub use params::{BlurParams, CannyParams};
