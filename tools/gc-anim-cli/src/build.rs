//! Build command - run every job of a gc-anim.toml manifest

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::convert::convert_bundle;
use crate::extract::extract_bundle;
use crate::manifest::{AnimManifest, BundleJob};

/// Arguments for the build command
#[derive(Args)]
pub struct BuildArgs {
    /// Path to gc-anim.toml manifest
    #[arg(default_value = "gc-anim.toml")]
    pub manifest: PathBuf,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    tracing::info!("Building from {}", args.manifest.display());
    let manifest = AnimManifest::load(&args.manifest)?;
    manifest.validate()?;

    // Paths in the manifest are relative to its directory
    let base = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    let mut total = 0;
    for job in &manifest.bundles {
        total += run_job(base, job)
            .with_context(|| format!("Bundle {} failed", job.input.display()))?;
    }

    tracing::info!(
        "Build complete: {} bundles, {} animations",
        manifest.bundles.len(),
        total
    );
    Ok(())
}

fn run_job(base: &Path, job: &BundleJob) -> Result<usize> {
    let input = base.join(&job.input);
    let output = job.output.as_ref().map(|dir| base.join(dir));

    let written = if job.convert {
        convert_bundle(&input, output.as_deref(), job.clamp, job.scale)?
    } else {
        extract_bundle(&input, output.as_deref())?
    };
    Ok(written.len())
}
