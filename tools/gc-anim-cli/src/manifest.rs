//! gc-anim.toml manifest parsing
//!
//! ```toml
//! [[bundle]]
//! input = "anims/enemy.anm"
//! output = "out/enemy"     # optional, defaults to the input's directory
//! convert = true           # .bca/.bck instead of .dca/.dck
//! clamp = 180.0            # optional, conversion only
//! scale = 2.0              # optional, conversion only
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::check_settings;

/// gc-anim.toml manifest structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimManifest {
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleJob>,
}

/// One bundle to extract or convert
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleJob {
    /// Path to the .anm bundle, relative to the manifest
    pub input: PathBuf,

    /// Output directory, relative to the manifest
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Convert to .bca/.bck instead of extracting .dca/.dck.
    /// Default: false
    #[serde(default)]
    pub convert: bool,

    /// Fold rotations into [-clamp, clamp] degrees when converting
    #[serde(default)]
    pub clamp: Option<f32>,

    /// Translation multiplier applied after conversion.
    /// Default: 1.0
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl AnimManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse gc-anim.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        if self.bundles.is_empty() {
            bail!("gc-anim.toml declares no [[bundle]] entries");
        }

        for job in &self.bundles {
            check_settings(job.clamp, job.scale)
                .with_context(|| format!("In bundle {}", job.input.display()))?;

            if !job.convert && (job.clamp.is_some() || job.scale != 1.0) {
                tracing::warn!(
                    "{}: clamp and scale only apply when convert = true",
                    job.input.display()
                );
            }
        }
        Ok(())
    }
}
