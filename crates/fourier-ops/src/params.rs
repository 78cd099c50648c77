//! Operation parameters with their defaults.
//!
//! Both structs deserialize from partial documents; omitted fields take the
//! default value.
//!
//! ```rust
//! use fourier_ops::CannyParams;
//!
//! let p: CannyParams = serde_yaml::from_str("upper_threshold: 90.0").unwrap();
//! assert_eq!(p.upper_threshold, 90.0);
//! assert_eq!(p.lower_threshold, 25.6);
//! ```

use fourier_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::kernel::check_gaussian;

/// Default Gaussian standard deviation.
pub const DEFAULT_STD_DEV: f32 = 1.4;
/// Default kernel half-size.
pub const DEFAULT_SIZE_F: i32 = 2;
/// Default strong-edge threshold.
pub const DEFAULT_UPPER_THRESHOLD: f32 = 76.8;
/// Default weak-edge threshold.
pub const DEFAULT_LOWER_THRESHOLD: f32 = 25.6;

/// Gaussian blur parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Standard deviation of the Gaussian.
    pub std_dev: f32,
    /// Kernel half-size; the kernel is `2 * size_f + 1` wide.
    pub size_f: i32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_STD_DEV,
            size_f: DEFAULT_SIZE_F,
        }
    }
}

impl BlurParams {
    /// Checks `std_dev > 0` and `size_f >= 0`.
    pub fn validate(&self) -> Result<()> {
        check_gaussian(self.std_dev, self.size_f).map(|_| ())
    }
}

/// Canny edge detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Standard deviation of the smoothing Gaussian.
    pub std_dev: f32,
    /// Half-size of the smoothing kernel.
    pub size_f: i32,
    /// Gradient magnitude at or above which a pixel is a strong edge.
    pub upper_threshold: f32,
    /// Gradient magnitude at or above which a pixel is a weak edge.
    pub lower_threshold: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_STD_DEV,
            size_f: DEFAULT_SIZE_F,
            upper_threshold: DEFAULT_UPPER_THRESHOLD,
            lower_threshold: DEFAULT_LOWER_THRESHOLD,
        }
    }
}

impl CannyParams {
    /// Smoothing part of the parameters.
    pub fn blur(&self) -> BlurParams {
        BlurParams {
            std_dev: self.std_dev,
            size_f: self.size_f,
        }
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for a bad smoothing setup, a negative or
    /// non-finite threshold, or `lower_threshold > upper_threshold`.
    pub fn validate(&self) -> Result<()> {
        self.blur().validate()?;
        for (name, t) in [
            ("upper_threshold", self.upper_threshold),
            ("lower_threshold", self.lower_threshold),
        ] {
            if !(t.is_finite() && t >= 0.0) {
                return Err(Error::invalid_parameter(format!(
                    "{} must be a non-negative number, got {}",
                    name, t
                )));
            }
        }
        if self.lower_threshold > self.upper_threshold {
            return Err(Error::invalid_parameter(format!(
                "lower_threshold {} exceeds upper_threshold {}",
                self.lower_threshold, self.upper_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = CannyParams::default();
        assert_eq!(p.std_dev, 1.4);
        assert_eq!(p.size_f, 2);
        assert_eq!(p.upper_threshold, 76.8);
        assert_eq!(p.lower_threshold, 25.6);
        assert!(p.validate().is_ok());
        assert_eq!(p.blur(), BlurParams::default());
    }

    #[test]
    fn test_threshold_order() {
        let p = CannyParams {
            upper_threshold: 10.0,
            lower_threshold: 20.0,
            ..Default::default()
        };
        assert!(p.validate().unwrap_err().is_invalid_parameter());

        let equal = CannyParams {
            upper_threshold: 20.0,
            lower_threshold: 20.0,
            ..Default::default()
        };
        assert!(equal.validate().is_ok());
    }

    #[test]
    fn test_bad_values() {
        let cases = [
            CannyParams { std_dev: 0.0, ..Default::default() },
            CannyParams { size_f: -1, ..Default::default() },
            CannyParams { lower_threshold: -1.0, ..Default::default() },
            CannyParams { upper_threshold: f32::NAN, ..Default::default() },
        ];
        for p in cases {
            assert!(p.validate().is_err(), "{:?}", p);
        }
    }

    #[test]
    fn test_yaml_partial() {
        let p: BlurParams = serde_yaml::from_str("size_f: 4").unwrap();
        assert_eq!(p.size_f, 4);
        assert_eq!(p.std_dev, DEFAULT_STD_DEV);
    }
}
