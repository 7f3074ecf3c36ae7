//! Info command - summarize an animation or bundle

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;

use gc_anim::{BUNDLE_EXTENSION, ChannelKind, Family, SkeletonAnimation, decode_animation};

use crate::files::{format_of, load_bundle};

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Input .bca, .bck, .dca, .dck or .anm file
    pub input: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let input = &args.input;
    let is_bundle = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION));

    if is_bundle {
        let bundle = load_bundle(input)?;
        tracing::info!("{}: bundle with {} animations", input.display(), bundle.len());
        for entry in bundle.iter() {
            tracing::info!("  {}", entry.name);
            log_summary(&entry.animation);
        }
        return Ok(());
    }

    let Some(format) = format_of(input) else {
        bail!(
            "Unsupported file: {:?} (use .bca, .bck, .dca, .dck or .anm)",
            input
        );
    };
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read: {}", input.display()))?;
    let anim = decode_animation(&data, format)
        .with_context(|| format!("Failed to decode: {}", input.display()))?;

    tracing::info!("{}", input.display());
    log_summary(&anim);
    Ok(())
}

fn log_summary(anim: &SkeletonAnimation) {
    let keys = |kind: ChannelKind| -> usize {
        anim.joints
            .iter()
            .map(|joint| joint.track.keys_of(kind).count())
            .sum()
    };

    tracing::info!(
        "    {:?}, {} frames, {} joints",
        anim.format,
        anim.duration,
        anim.joints.len()
    );
    if anim.family() == Family::Quantized {
        tracing::info!(
            "    loop mode {:?}, angle multiplier {}",
            anim.loop_mode,
            anim.angle_multiplier()
        );
    }
    tracing::info!(
        "    keys: {} scale, {} rotation, {} translation",
        keys(ChannelKind::Scale),
        keys(ChannelKind::Rotation),
        keys(ChannelKind::Translation)
    );
}
