//! Convolution kernels.
//!
//! - [`gaussian_1d`] / [`gaussian_2d`] - normalized Gaussian weights
//! - [`box_1d`] - uniform weights
//! - [`SOBEL_X`] / [`SOBEL_Y`] - fixed 3x3 derivative pair
//!
//! Every kernel built here has odd dimensions `2 * size_f + 1`, is symmetric
//! about its center and sums to 1.0.
//!
//! # Example
//!
//! ```rust
//! use fourier_ops::kernel::{gaussian_1d, gaussian_2d};
//!
//! let k = gaussian_1d(1.4, 2).unwrap();
//! assert_eq!(k.width, 5);
//! assert!((k.sum() - 1.0).abs() < 1e-6);
//!
//! let k2 = gaussian_2d(1.4, 2).unwrap();
//! assert_eq!((k2.width, k2.height), (5, 5));
//! ```

use fourier_core::{Error, Result};
use tracing::trace;

/// Horizontal Sobel derivative, row-major, positive towards +x.
#[rustfmt::skip]
pub const SOBEL_X: [f32; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];

/// Vertical Sobel derivative, row-major, positive towards +y (down).
#[rustfmt::skip]
pub const SOBEL_Y: [f32; 9] = [
    -1.0, -2.0, -1.0,
    0.0, 0.0, 0.0,
    1.0, 2.0, 1.0,
];

/// Convolution kernel: row-major weights with odd width and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a kernel from raw weights.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if a dimension is even or zero, the data
    /// length does not match, or a weight is not finite.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(Error::invalid_parameter(format!(
                "kernel dimensions must be odd, got {}x{}",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(Error::invalid_parameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        if data.iter().any(|w| !w.is_finite()) {
            return Err(Error::invalid_parameter("kernel weights must be finite"));
        }
        Ok(Self { data, width, height })
    }

    /// Single-tap identity kernel.
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            width: 1,
            height: 1,
        }
    }

    /// Outer product `column x row` of two 1D kernels.
    ///
    /// Both inputs are read as flat weight lists regardless of their shape.
    pub fn outer(row: &Kernel, column: &Kernel) -> Self {
        let mut data = Vec::with_capacity(row.data.len() * column.data.len());
        for &cy in &column.data {
            data.extend(row.data.iter().map(|&rx| cy * rx));
        }
        Self {
            data,
            width: row.data.len(),
            height: column.data.len(),
        }
    }

    /// Returns the kernel radius `(rx, ry)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Transposes a kernel (a row kernel becomes a column kernel).
    pub fn transposed(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.data[y * self.width + x]);
            }
        }
        Self {
            data,
            width: self.height,
            height: self.width,
        }
    }
}

/// Validates the Gaussian parameters and returns `size_f` as a radius.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `std_dev` is not a positive finite number
/// or `size_f` is negative.
pub fn check_gaussian(std_dev: f32, size_f: i32) -> Result<usize> {
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(Error::invalid_parameter(format!(
            "std_dev must be positive and finite, got {}",
            std_dev
        )));
    }
    check_size(size_f)
}

/// Validates a kernel half-size and returns it as a radius.
pub fn check_size(size_f: i32) -> Result<usize> {
    usize::try_from(size_f).map_err(|_| {
        Error::invalid_parameter(format!("size_f must be non-negative, got {}", size_f))
    })
}

/// Builds a normalized 1D Gaussian of length `2 * size_f + 1`.
///
/// The weight at offset `k` is proportional to `exp(-k^2 / (2 * std_dev^2))`.
/// `size_f == 0` yields the single tap `[1.0]`.
pub fn gaussian_1d(std_dev: f32, size_f: i32) -> Result<Kernel> {
    let r = check_gaussian(std_dev, size_f)?;
    trace!(std_dev, size_f, "gaussian_1d");

    let two_var = 2.0 * std_dev * std_dev;
    let mut data: Vec<f32> = (-(r as i64)..=r as i64)
        .map(|k| (-((k * k) as f32) / two_var).exp())
        .collect();
    let sum: f32 = data.iter().sum();
    for w in &mut data {
        *w /= sum;
    }

    Ok(Kernel {
        data,
        width: 2 * r + 1,
        height: 1,
    })
}

/// Builds a normalized 2D Gaussian as the outer product of [`gaussian_1d`].
pub fn gaussian_2d(std_dev: f32, size_f: i32) -> Result<Kernel> {
    let k = gaussian_1d(std_dev, size_f)?;
    Ok(Kernel::outer(&k, &k))
}

/// Builds a uniform 1D kernel of length `2 * size_f + 1`.
pub fn box_1d(size_f: i32) -> Result<Kernel> {
    let r = check_size(size_f)?;
    let n = 2 * r + 1;
    Ok(Kernel {
        data: vec![1.0 / n as f32; n],
        width: n,
        height: 1,
    })
}
