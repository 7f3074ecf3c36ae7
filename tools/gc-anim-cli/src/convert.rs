//! Convert command - turn an .anm bundle into .bca/.bck files
//!
//! Each entry keeps its interpolation style: .dca becomes .bca and .dck
//! becomes .bck.

use anyhow::{Result, bail};
use clap::Args;
use std::path::{Path, PathBuf};

use gc_anim::{Family, TranscodeOptions, transcode};

use crate::files::{load_bundle, output_dir, write_animation};

/// Arguments for the convert command
#[derive(Args)]
pub struct ConvertArgs {
    /// Input .anm bundle
    pub input: PathBuf,

    /// Output directory (default: next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fold rotations into [-angle, angle] degrees
    #[arg(short, long)]
    pub clamp: Option<f32>,

    /// Multiply translations after conversion
    #[arg(short, long, default_value_t = 1.0)]
    pub scale: f32,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs) -> Result<()> {
    let written = convert_bundle(&args.input, args.output.as_deref(), args.clamp, args.scale)?;
    tracing::info!("Converted {} animations", written.len());
    Ok(())
}

/// Reject clamp and scale values that would produce garbage
pub fn check_settings(clamp: Option<f32>, scale: f32) -> Result<()> {
    if let Some(clamp) = clamp.filter(|c| !(c.is_finite() && *c >= 1.0)) {
        bail!("Invalid clamp angle {} (must be at least 1 degree)", clamp);
    }
    if !scale.is_finite() {
        bail!("Invalid scale {}", scale);
    }
    Ok(())
}

/// Transcode every entry of `input` to the J3D family and write it out
pub fn convert_bundle(
    input: &Path,
    output: Option<&Path>,
    clamp: Option<f32>,
    scale: f32,
) -> Result<Vec<PathBuf>> {
    check_settings(clamp, scale)?;

    let bundle = load_bundle(input)?;
    let dir = output_dir(input, output)?;
    tracing::info!("Converting {} -> {}", input.display(), dir.display());

    let options = TranscodeOptions {
        clamp_degrees: clamp,
    };
    bundle
        .into_animations()
        .map(|anim| {
            let mut anim = transcode(anim, Family::Quantized, &options);
            if scale != 1.0 {
                anim.scale_translations(scale);
            }
            write_animation(&dir, &anim)
        })
        .collect()
}
