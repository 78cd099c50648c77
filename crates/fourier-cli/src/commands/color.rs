//! Color space conversion commands (`gray`, `ycbcr`, `rgb`).

use crate::ConvertArgs;
use anyhow::{Context, Result};
use fourier::{ColorSpace, Image};
use tracing::{info, trace};

pub fn run(args: ConvertArgs, target: ColorSpace, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), %target, "color::run");

    let mut image = super::load_image(&args.input)?;
    if let Some(space) = args.assume {
        image = Image::from_buffer(image.into_buffer(), space)
            .with_context(|| format!("{} does not hold {} samples", args.input.display(), space))?;
    }

    info!(from = %image.color_space(), to = %target, "Converting");
    if verbose {
        println!("Converting {} -> {}: {}", image.color_space(), target, args.input.display());
    }

    image
        .convert_to(target)
        .with_context(|| format!("Cannot convert {}", args.input.display()))?;
    super::save_image(&args.output, &image, args.quality)?;

    if verbose {
        println!("Done.");
    }
    Ok(())
}
