//! ANM bundles: several named MOD animations in one file
//!
//! ```text
//! count u32
//! count × {
//!     content_kind u32     - 2 = DCA, 3 = DCK
//!     size u32             - bytes of name and animation
//!     name_length u32
//!     name [u8; name_length]
//!     animation            - DCA or DCK table
//! }
//! ```
//!
//! The size field is written but never trusted when reading; the embedded
//! table is self-delimiting.

use std::io::Cursor;
use std::path::Path;

use crate::animation::{AnimFormat, SkeletonAnimation};
use crate::binary::{BinaryWriter, Sink, fit_u32, read_bytes, read_u32};
use crate::error::{AnimError, Result};
use crate::flat::{read_flat, write_flat};

/// Type tag of a bundle entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ContentKind {
    Dca = 2,
    Dck = 3,
}

impl ContentKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            2 => Some(Self::Dca),
            3 => Some(Self::Dck),
            _ => None,
        }
    }

    pub fn for_format(format: AnimFormat) -> Option<Self> {
        match format {
            AnimFormat::Dca => Some(Self::Dca),
            AnimFormat::Dck => Some(Self::Dck),
            AnimFormat::Bca | AnimFormat::Bck => None,
        }
    }

    pub const fn format(self) -> AnimFormat {
        match self {
            Self::Dca => AnimFormat::Dca,
            Self::Dck => AnimFormat::Dck,
        }
    }
}

/// One named animation inside a bundle
#[derive(Debug, Clone, PartialEq)]
pub struct BundleEntry {
    /// Name as stored in the bundle, usually with its extension
    pub name: String,
    pub animation: SkeletonAnimation,
}

impl BundleEntry {
    pub fn new(name: impl Into<String>, animation: SkeletonAnimation) -> Self {
        Self {
            name: name.into(),
            animation,
        }
    }

    /// Entry named after the animation's file name
    pub fn from_animation(animation: SkeletonAnimation) -> Self {
        Self::new(animation.file_name(), animation)
    }

    /// Tag derived from the animation's format
    pub fn content_kind(&self) -> Result<ContentKind> {
        ContentKind::for_format(self.animation.format)
            .ok_or(AnimError::UnbundleableFormat(self.animation.format))
    }
}

/// Ordered collection of named animations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bundle {
    pub entries: Vec<BundleEntry>,
}

impl Bundle {
    pub fn new(entries: Vec<BundleEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BundleEntry> {
        self.entries.iter()
    }

    /// Consume the bundle, yielding its animations in order
    pub fn into_animations(self) -> impl Iterator<Item = SkeletonAnimation> {
        self.entries.into_iter().map(|entry| entry.animation)
    }
}

/// Entry name without directories or extension
fn animation_name(entry_name: &str) -> String {
    Path::new(entry_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn write_bundle<S: Sink + ?Sized>(
    w: &mut BinaryWriter<'_, S>,
    bundle: &Bundle,
) -> Result<()> {
    w.write_u32(fit_u32("bundle entry count", bundle.len())?)?;

    for entry in &bundle.entries {
        let kind = entry.content_kind()?;
        w.write_u32(kind as u32)?;

        let size = w.reserve_u32()?;
        w.write_u32(fit_u32("name length", entry.name.len())?)?;

        let body_start = w.position()?;
        w.write_bytes(entry.name.as_bytes())?;
        write_flat(w, &entry.animation)?;

        let body_end = w.position()?;
        w.patch_u32(size, fit_u32("entry size", (body_end - body_start) as usize)?)?;
        w.seek(body_end)?;

        tracing::trace!("Bundled {} ({:?}, {} bytes)", entry.name, kind, body_end - body_start);
    }

    tracing::debug!("Wrote bundle with {} animations", bundle.len());
    Ok(())
}

pub(crate) fn read_bundle(data: &[u8]) -> Result<Bundle> {
    let mut cursor = Cursor::new(data);
    let count = read_u32(&mut cursor)?;

    let mut entries = Vec::new();
    for _ in 0..count {
        let raw_kind = read_u32(&mut cursor)?;
        let _size = read_u32(&mut cursor)?;
        let name_length = read_u32(&mut cursor)? as usize;
        let name = std::str::from_utf8(read_bytes(&mut cursor, name_length)?)
            .map_err(|_| AnimError::InvalidName)?
            .to_string();

        let kind = ContentKind::from_u32(raw_kind).ok_or(AnimError::UnknownContentKind(raw_kind))?;
        let mut animation = read_flat(&mut cursor, kind.format())?;
        animation.name = animation_name(&name);

        tracing::trace!("Read bundle entry {} ({:?})", name, kind);
        entries.push(BundleEntry { name, animation });
    }

    tracing::debug!("Read bundle with {} animations", entries.len());
    Ok(Bundle { entries })
}
