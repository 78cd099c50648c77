//! # fourier-io
//!
//! Persistence and inspection for fourier images.
//!
//! - [`jpeg`] - JPEG decode/encode through `jpeg-decoder` and `jpeg-encoder`
//! - [`dump`] - plain-text dump of raw samples
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ColorSpace, PixelBuffer};
//! use fourier_io::{dump, jpeg};
//!
//! let buf = PixelBuffer::from_vec(2, 2, 1, vec![10, 20, 30, 40]).unwrap();
//! let bytes = jpeg::encode(&buf, ColorSpace::Gray, 100).unwrap();
//! let back = jpeg::decode(&bytes).unwrap();
//! assert_eq!(back.buffer.dimensions(), (2, 2));
//! assert!(dump::dump(&buf, ColorSpace::Gray).starts_with("Color space: Gray"));
//! ```

#![warn(missing_docs)]

pub mod dump;
#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use dump::dump;
