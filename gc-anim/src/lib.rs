//! gc-anim: GameCube skeletal animation codecs
//!
//! Reads and writes the two skeletal animation families used by GameCube
//! titles and converts between them.
//!
//! # Formats
//!
//! | Family    | Full-frame | Interpolated |
//! |-----------|------------|--------------|
//! | Quantized | `.bca` (`J3D1bca1` / `ANF1`) | `.bck` (`J3D1bck1` / `ANK1`) |
//! | Flat      | `.dca` | `.dck` |
//!
//! J3D files are magic-tagged, 32-byte aligned and store rotations as `i16`
//! multiples of an angle scale chosen from the data. MOD animations are
//! headerless float tables with rotations in radians, normally shipped
//! inside an `.anm` bundle.
//!
//! Every channel points into a per-kind value pool; identical value runs are
//! stored once (see [`find_or_insert`]).
//!
//! # Usage
//!
//! ```ignore
//! use gc_anim::{decode_bundle, encode_animation, transcode, Family, TranscodeOptions};
//!
//! let data = std::fs::read("enemy.anm").unwrap();
//! let bundle = decode_bundle(&data).unwrap();
//!
//! for anim in bundle.into_animations() {
//!     let anim = transcode(anim, Family::Quantized, &TranscodeOptions::with_clamp(180.0));
//!     std::fs::write(anim.file_name(), encode_animation(&anim).unwrap()).unwrap();
//! }
//! ```

mod animation;
pub mod binary;
mod bundle;
pub mod channel;
mod error;
mod flat;
pub mod pool;
mod quantized;
mod track;
mod transcode;

use std::io::Cursor;

pub use animation::{AnimFormat, Family, SkeletonAnimation};
pub use binary::{DEFAULT_FILLER, ForwardOnly, Sink};
pub use bundle::{Bundle, BundleEntry, ContentKind};
pub use error::{AnimError, Result};
pub use pool::find_or_insert;
pub use track::{Axis, ChannelKind, Joint, JointTrack, Keyframe, LoopMode};
pub use transcode::{FRAMES_PER_SECOND, TranscodeOptions, clamp_angle, transcode};

use binary::BinaryWriter;

// =============================================================================
// Constants
// =============================================================================

/// BCA file magic
pub const BCA_MAGIC: &[u8; 8] = b"J3D1bca1";

/// BCA data section tag
pub const BCA_SECTION: &[u8; 4] = b"ANF1";

/// BCK file magic
pub const BCK_MAGIC: &[u8; 8] = b"J3D1bck1";

/// BCK data section tag
pub const BCK_SECTION: &[u8; 4] = b"ANK1";

/// File extension of animation bundles
pub const BUNDLE_EXTENSION: &str = "anm";

// =============================================================================
// Options
// =============================================================================

/// Encoder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Bytes cycled through when padding J3D blocks; empty pads with zeros
    pub filler: Vec<u8>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            filler: DEFAULT_FILLER.to_vec(),
        }
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Decode one animation of a known format
///
/// The returned animation has an empty name; callers usually set it from
/// the file name.
pub fn decode_animation(data: &[u8], format: AnimFormat) -> Result<SkeletonAnimation> {
    match format.family() {
        Family::Quantized => quantized::read_quantized(data, format),
        Family::Flat => flat::read_flat(&mut Cursor::new(data), format),
    }
}

/// Encode one animation with default options
pub fn encode_animation(anim: &SkeletonAnimation) -> Result<Vec<u8>> {
    encode_animation_with(anim, &EncodeOptions::default())
}

/// Encode one animation into a new buffer
pub fn encode_animation_with(anim: &SkeletonAnimation, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut sink = Cursor::new(Vec::new());
    encode_animation_to(anim, &mut sink, options)?;
    Ok(sink.into_inner())
}

/// Encode one animation into `sink` at its current position
///
/// J3D encoding patches length fields after the payload, so the sink must
/// be able to seek backward.
pub fn encode_animation_to<S: Sink + ?Sized>(
    anim: &SkeletonAnimation,
    sink: &mut S,
    options: &EncodeOptions,
) -> Result<()> {
    let mut w = BinaryWriter::new(sink, &options.filler);
    match anim.family() {
        Family::Quantized => quantized::write_quantized(&mut w, anim),
        Family::Flat => flat::write_flat(&mut w, anim),
    }
}

/// Decode an `.anm` bundle
pub fn decode_bundle(data: &[u8]) -> Result<Bundle> {
    bundle::read_bundle(data)
}

/// Encode an `.anm` bundle into a new buffer
pub fn encode_bundle(bundle: &Bundle) -> Result<Vec<u8>> {
    let mut sink = Cursor::new(Vec::new());
    encode_bundle_to(bundle, &mut sink)?;
    Ok(sink.into_inner())
}

/// Encode an `.anm` bundle into `sink` at its current position
pub fn encode_bundle_to<S: Sink + ?Sized>(bundle: &Bundle, sink: &mut S) -> Result<()> {
    let mut w = BinaryWriter::new(sink, DEFAULT_FILLER);
    bundle::write_bundle(&mut w, bundle)
}

// =============================================================================
// Tests
// =============================================================================
