//! Frequency-domain convolution.
//!
//! Convolution through a 2D FFT costs `O(W*H*log(W*H))` regardless of the
//! kernel size, where direct convolution costs `O(W*H*k^2)`.
//!
//! The plane is embedded in a zero buffer padded to
//! `next_power_of_two(W + kw - 1) x next_power_of_two(H + kh - 1)`, so the
//! circular convolution computed by the FFT never wraps image content onto
//! itself. The kernel is placed centered with wrap-around; both are forward
//! transformed (rows then columns), multiplied elementwise and inverse
//! transformed. The real part of the original-bounds region, scaled by
//! `1 / (PW * PH)`, is the result.
//!
//! # Example
//!
//! ```rust
//! use fourier_ops::{BorderMode, fft::convolve_plane};
//!
//! let src = vec![0.5f32; 16 * 16];
//! let kernel = vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
//! let out = convolve_plane(&src, 16, 16, &kernel, 3, 3, BorderMode::Zero).unwrap();
//! assert!((out[8 * 16 + 8] - 0.5).abs() < 1e-4);
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use fourier_core::{Error, PixelBuffer, Result};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::border::{BorderMode, crop, extend_clamped};
use crate::kernel::{Kernel, gaussian_2d};

/// Reusable FFT convolution for one image geometry and one kernel.
///
/// The kernel spectrum and FFT plans are computed once, so every channel
/// of a multi-channel image is convolved with the identical kernel at the
/// cost of a single kernel transform.
pub struct FftConvolver {
    width: usize,
    height: usize,
    border: BorderMode,
    // margin added by the clamp extension
    margin: (usize, usize),
    pw: usize,
    ph: usize,
    spectrum: Vec<Complex<f32>>,
    row_fwd: Arc<dyn Fft<f32>>,
    row_inv: Arc<dyn Fft<f32>>,
    col_fwd: Arc<dyn Fft<f32>>,
    col_inv: Arc<dyn Fft<f32>>,
}

impl FftConvolver {
    /// Plans a convolution of `width x height` planes with `kernel`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for an empty image.
    pub fn new(width: usize, height: usize, kernel: &Kernel, border: BorderMode) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width as u32,
                height as u32,
                "cannot convolve an empty plane",
            ));
        }

        let (rx, ry) = kernel.radius();
        let margin = match border {
            BorderMode::Zero => (0, 0),
            BorderMode::Clamp => (rx, ry),
        };
        let sw = width + 2 * margin.0;
        let sh = height + 2 * margin.1;
        let pw = (sw + kernel.width - 1).next_power_of_two();
        let ph = (sh + kernel.height - 1).next_power_of_two();

        debug!(
            width,
            height,
            pw,
            ph,
            ?border,
            kw = kernel.width,
            kh = kernel.height,
            "planning FFT convolution"
        );

        let mut planner = FftPlanner::new();
        let row_fwd = planner.plan_fft_forward(pw);
        let row_inv = planner.plan_fft_inverse(pw);
        let col_fwd = planner.plan_fft_forward(ph);
        let col_inv = planner.plan_fft_inverse(ph);

        // Kernel centered at the origin with wrap-around
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); pw * ph];
        for ky in 0..kernel.height {
            for kx in 0..kernel.width {
                let tx = (kx + pw - rx) % pw;
                let ty = (ky + ph - ry) % ph;
                spectrum[ty * pw + tx] = Complex::new(kernel.data[ky * kernel.width + kx], 0.0);
            }
        }
        transform(&mut spectrum, pw, ph, row_fwd.as_ref(), col_fwd.as_ref());

        Ok(Self {
            width,
            height,
            border,
            margin,
            pw,
            ph,
            spectrum,
            row_fwd,
            row_inv,
            col_fwd,
            col_inv,
        })
    }

    /// Padded transform size `(PW, PH)`.
    pub fn padded_size(&self) -> (usize, usize) {
        (self.pw, self.ph)
    }

    /// Convolves one plane.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if the plane length does not match the
    /// planned geometry.
    pub fn apply(&self, plane: &[f32]) -> Result<Vec<f32>> {
        if plane.len() != self.width * self.height {
            return Err(Error::invalid_dimensions(
                self.width as u32,
                self.height as u32,
                format!("expected {} values, got {}", self.width * self.height, plane.len()),
            ));
        }

        let (mx, my) = self.margin;
        let (src, sw, sh): (Cow<'_, [f32]>, usize, usize) = match self.border {
            BorderMode::Zero => (Cow::Borrowed(plane), self.width, self.height),
            BorderMode::Clamp => {
                let (ext, ew, eh) = extend_clamped(plane, self.width, self.height, mx, my);
                (Cow::Owned(ext), ew, eh)
            }
        };

        let (pw, ph) = (self.pw, self.ph);
        let mut data = vec![Complex::new(0.0f32, 0.0); pw * ph];
        for y in 0..sh {
            let row = &src[y * sw..(y + 1) * sw];
            for (dst, &v) in data[y * pw..y * pw + sw].iter_mut().zip(row) {
                *dst = Complex::new(v, 0.0);
            }
        }

        transform(&mut data, pw, ph, self.row_fwd.as_ref(), self.col_fwd.as_ref());
        for (v, k) in data.iter_mut().zip(&self.spectrum) {
            *v *= *k;
        }
        inverse(&mut data, pw, ph, self.row_inv.as_ref(), self.col_inv.as_ref());

        let scale = 1.0 / (pw * ph) as f32;
        let real: Vec<f32> = data.iter().map(|c| c.re * scale).collect();
        Ok(crop(&real, pw, mx, my, self.width, self.height))
    }
}

/// Forward 2D transform: rows, then columns.
fn transform(
    data: &mut [Complex<f32>],
    pw: usize,
    ph: usize,
    rows: &dyn Fft<f32>,
    cols: &dyn Fft<f32>,
) {
    rows.process(data);
    columns(data, pw, ph, cols);
}

/// Inverse 2D transform: columns, then rows.
fn inverse(
    data: &mut [Complex<f32>],
    pw: usize,
    ph: usize,
    rows: &dyn Fft<f32>,
    cols: &dyn Fft<f32>,
) {
    columns(data, pw, ph, cols);
    rows.process(data);
}

/// Runs `fft` over every column through a transposed scratch buffer.
fn columns(data: &mut [Complex<f32>], pw: usize, ph: usize, fft: &dyn Fft<f32>) {
    let mut t = vec![Complex::new(0.0f32, 0.0); pw * ph];
    for y in 0..ph {
        for x in 0..pw {
            t[x * ph + y] = data[y * pw + x];
        }
    }
    fft.process(&mut t);
    for x in 0..pw {
        for y in 0..ph {
            data[y * pw + x] = t[x * ph + y];
        }
    }
}

/// Convolves a single plane with a `kw x kh` kernel in the frequency domain.
///
/// # Arguments
///
/// * `plane` - Source values, row-major, `width * height`
/// * `kernel` - Kernel weights, row-major, `kw * kh` (odd dimensions)
/// * `border` - How samples outside the image are read
///
/// An empty plane yields an empty result.
pub fn convolve_plane(
    plane: &[f32],
    width: usize,
    height: usize,
    kernel: &[f32],
    kw: usize,
    kh: usize,
    border: BorderMode,
) -> Result<Vec<f32>> {
    trace!(width, height, kw, kh, ?border, "fft::convolve_plane");

    let kernel = Kernel::new(kernel.to_vec(), kw, kh)?;
    if plane.len() != width * height {
        return Err(Error::invalid_dimensions(
            width as u32,
            height as u32,
            format!("expected {} values, got {}", width * height, plane.len()),
        ));
    }
    if plane.is_empty() {
        return Ok(Vec::new());
    }
    FftConvolver::new(width, height, &kernel, border)?.apply(plane)
}

/// Convolves every channel of `buffer` with `kernel` in place.
///
/// All channels are computed before the buffer is written, so an error
/// leaves it untouched.
pub fn convolve_buffer(
    buffer: &mut PixelBuffer,
    kernel: &Kernel,
    border: BorderMode,
) -> Result<()> {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    if buffer.is_empty() {
        return Ok(());
    }
    let conv = FftConvolver::new(w, h, kernel, border)?;
    let src: &PixelBuffer = buffer;
    let run = |c: usize| -> Result<Vec<f32>> { conv.apply(&src.channel_plane(c)?) };

    #[cfg(feature = "parallel")]
    let planes: Result<Vec<Vec<f32>>> = (0..buffer.channels()).into_par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let planes: Result<Vec<Vec<f32>>> = (0..buffer.channels()).map(run).collect();

    for (c, plane) in planes?.iter().enumerate() {
        buffer.store_plane(c, plane)?;
    }
    Ok(())
}

/// Gaussian blur through the frequency domain.
///
/// Builds the `(2 * size_f + 1)^2` Gaussian and applies it to every channel.
/// Results are rounded to nearest and clamped to [0, 255].
///
/// # Errors
///
/// [`Error::InvalidParameter`] for non-positive `std_dev` or negative
/// `size_f`; the buffer is not modified.
pub fn blur(buffer: &mut PixelBuffer, std_dev: f32, size_f: i32, border: BorderMode) -> Result<()> {
    trace!(std_dev, size_f, ?border, width = buffer.width(), height = buffer.height(), "fft::blur");
    let kernel = gaussian_2d(std_dev, size_f)?;
    convolve_buffer(buffer, &kernel, border)
}
