//! Image info command.

use crate::InfoArgs;
use anyhow::{Context, Result};
use std::fs;

/// Prints geometry, channel layout and color space of each input.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let many = args.input.len() > 1;
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let image = super::load_image(path)?;

        println!("{}", path.display());
        println!("  Resolution:  {}x{}", image.width(), image.height());
        println!("  Channels:    {}", image.channels());
        println!("  Color space: {}", image.color_space());
        println!("  File size:   {} bytes", file_size);
        if verbose {
            println!("  Channel names: {}", image.color_space().channel_names().join(", "));
            println!("  {}", image);
        }

        if many {
            println!();
        }
    }
    Ok(())
}
