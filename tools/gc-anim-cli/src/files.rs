//! File helpers shared by the commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use gc_anim::{AnimFormat, Bundle, SkeletonAnimation, decode_bundle, encode_animation};

/// Read and decode an .anm bundle
pub fn load_bundle(path: &Path) -> Result<Bundle> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read bundle: {}", path.display()))?;
    decode_bundle(&data).with_context(|| format!("Failed to decode bundle: {}", path.display()))
}

/// Format implied by a file's extension
pub fn format_of(path: &Path) -> Option<AnimFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(AnimFormat::from_extension)
}

/// Name of an animation loaded from `path`
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Explicit output directory, or the directory holding `input`
///
/// The directory is created if missing.
pub fn output_dir(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Encode `anim` into `dir`, named after the animation and its format
pub fn write_animation(dir: &Path, anim: &SkeletonAnimation) -> Result<PathBuf> {
    let path = dir.join(anim.file_name());
    let data = encode_animation(anim)
        .with_context(|| format!("Failed to encode animation: {}", anim.name))?;
    std::fs::write(&path, data).with_context(|| format!("Failed to write: {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_of() {
        assert_eq!(format_of(Path::new("a/walk.BCK")), Some(AnimFormat::Bck));
        assert_eq!(format_of(Path::new("walk.anm")), None);
        assert_eq!(format_of(Path::new("walk")), None);
    }

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("enemy.anm");
        assert_eq!(output_dir(&input, None).unwrap(), temp.path());
    }

    #[test]
    fn test_output_dir_is_created() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("nested/out");
        let dir = output_dir(Path::new("enemy.anm"), Some(&out)).unwrap();
        assert_eq!(dir, out);
        assert!(out.is_dir());
    }

    #[test]
    fn test_stem_of() {
        assert_eq!(stem_of(Path::new("anims/idle.dca")), "idle");
    }
}
