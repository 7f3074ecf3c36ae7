//! Pack command - build an .anm bundle from .dca/.dck files

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::{Path, PathBuf};

use gc_anim::{Bundle, BundleEntry, Family, decode_animation, encode_bundle};

use crate::files::{format_of, stem_of};

/// Arguments for the pack command
#[derive(Args)]
pub struct PackArgs {
    /// Input .dca/.dck files, in bundle order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output .anm file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute the pack command
pub fn execute(args: PackArgs) -> Result<()> {
    let bundle = pack_files(&args.inputs)?;
    let data = encode_bundle(&bundle).context("Failed to encode bundle")?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(&args.output, data)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    tracing::info!(
        "Packed {} animations into {}",
        bundle.len(),
        args.output.display()
    );
    Ok(())
}

/// Load each input as a bundle entry named after its file
pub fn pack_files(inputs: &[PathBuf]) -> Result<Bundle> {
    let entries = inputs
        .iter()
        .map(|path| load_entry(path))
        .collect::<Result<Vec<_>>>()?;
    Ok(Bundle::new(entries))
}

fn load_entry(path: &Path) -> Result<BundleEntry> {
    let format = match format_of(path) {
        Some(format) if format.family() == Family::Flat => format,
        _ => bail!("Cannot bundle {:?} (only .dca and .dck files)", path),
    };
    let data = std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    let mut anim = decode_animation(&data, format)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    anim.name = stem_of(path);

    tracing::debug!("Adding {} ({} joints)", path.display(), anim.joints.len());
    Ok(BundleEntry::from_animation(anim))
}
