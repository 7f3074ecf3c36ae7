//! Extract command - split an .anm bundle into .dca/.dck files

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::files::{load_bundle, output_dir, write_animation};

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    /// Input .anm bundle
    pub input: PathBuf,

    /// Output directory (default: next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs) -> Result<()> {
    let written = extract_bundle(&args.input, args.output.as_deref())?;
    tracing::info!("Extracted {} animations", written.len());
    Ok(())
}

/// Write every entry of `input` into the output directory
pub fn extract_bundle(input: &Path, output: Option<&Path>) -> Result<Vec<PathBuf>> {
    let bundle = load_bundle(input)?;
    let dir = output_dir(input, output)?;
    tracing::info!("Extracting {} -> {}", input.display(), dir.display());

    bundle
        .iter()
        .map(|entry| write_animation(&dir, &entry.animation))
        .collect()
}
