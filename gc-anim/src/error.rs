//! Error types for animation encoding and decoding

use std::io;

use crate::AnimFormat;
use crate::track::ChannelKind;

/// Errors that can occur while reading or writing animation data
#[derive(Debug, thiserror::Error)]
pub enum AnimError {
    /// Magic, section tag or section count does not match the expected layout
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Attempted to read past the end of the input
    #[error("truncated stream: needed {needed} bytes at offset 0x{offset:X}")]
    TruncatedStream { offset: u64, needed: usize },

    /// Bundle entry carries a content kind we do not know how to decode
    #[error("unknown bundle content kind {0} (expected 2 or 3)")]
    UnknownContentKind(u32),

    /// Reserve-then-patch attempted on a sink that cannot seek backwards
    #[error("cannot seek to 0x{target:X} on a forward-only stream (at 0x{position:X})")]
    UnseekableStream { position: u64, target: u64 },

    /// A channel entry references values outside its value pool
    #[error("{kind} channel reads {needed} values at index {index}, pool holds {len}")]
    PoolOverrun {
        kind: ChannelKind,
        index: usize,
        needed: usize,
        len: usize,
    },

    /// A value does not fit the width of its on-disk field
    #[error("{field} value {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        bits: u32,
    },

    /// A frame number or quantized rotation falls outside the `i16` pool range
    #[error("{field} {value} does not fit in a signed 16-bit pool slot")]
    PoolValueOverflow { field: &'static str, value: f32 },

    /// Only MOD-family animations can be stored in a bundle
    #[error("{0:?} animations cannot be stored in a bundle")]
    UnbundleableFormat(AnimFormat),

    /// Bundle entry name is not valid UTF-8
    #[error("bundle entry name is not valid UTF-8")]
    InvalidName,

    /// IO error from a file-backed sink
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnimError>;
