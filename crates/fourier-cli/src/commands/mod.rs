//! CLI command implementations

pub mod blur;
pub mod canny;
pub mod color;
pub mod dump;
pub mod info;

use anyhow::{Context, Result};
use fourier::{BlurParams, CannyParams, Image};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Parameter file contents; missing sections and fields keep their defaults.
///
/// ```yaml
/// blur:
///   std_dev: 2.0
/// canny:
///   upper_threshold: 90.0
///   lower_threshold: 30.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsFile {
    pub blur: BlurParams,
    pub canny: CannyParams,
}

/// Loads the parameter file, or defaults when no file is given.
pub fn load_params(path: Option<&Path>) -> Result<ParamsFile> {
    let Some(path) = path else {
        return Ok(ParamsFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params: {}", path.display()))?;
    let params = parse_params(&text)
        .with_context(|| format!("Invalid params file: {}", path.display()))?;
    debug!(?params, path = %path.display(), "loaded params");
    Ok(params)
}

fn parse_params(text: &str) -> Result<ParamsFile> {
    if text.trim().is_empty() {
        return Ok(ParamsFile::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    Image::read_jpeg(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image, quality: i32) -> Result<()> {
    image
        .write_jpeg(path, quality)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
