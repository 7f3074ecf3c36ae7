//! Channel codecs
//!
//! A channel is stored as a small table entry pointing into a value pool:
//!
//! ```text
//! count   u16 | u32   - number of keyframes
//! offset  u16 | u32   - index of the first value in the pool
//! mode    u16 | u32   - tangent mode (interpolated encodings only)
//! ```
//!
//! Field width is 16 bits in the J3D family and 32 bits in the MOD family.
//! A count of 1 always denotes a constant channel: one value, frame 0.
//!
//! - `full_frame` - one pool value per frame, no tangents
//! - `interpolated` - `[frame, value, tangent(s)]` runs per key

mod full_frame;
mod interpolated;

#[cfg(test)]
mod tests;

use std::io::Cursor;

pub use full_frame::FullFrame;
pub use interpolated::{Interpolated, TangentMode};

use crate::binary::{BinaryWriter, Sink, fit_u16, fit_u32, read_u16, read_u32};
use crate::error::{AnimError, Result};
use crate::track::{ChannelKind, Joint, Keyframe};
use crate::AnimFormat;

/// Degrees per stored rotation unit at multiplier 0
pub const BASE_ANGLE_SCALE: f32 = 180.0 / 32768.0;

/// Largest multiplier the interpolated encoder will choose
pub const MAX_ANGLE_MULTIPLIER: i8 = 15;

/// Convert an on-disk angle multiplier to degrees per stored unit
///
/// Negative multipliers (the full-frame `-1` marker) use the base scale.
pub fn angle_scale(multiplier: i8) -> f32 {
    let exponent = multiplier.clamp(0, MAX_ANGLE_MULTIPLIER) as i32;
    2f32.powi(exponent) * BASE_ANGLE_SCALE
}

/// Width of the count/offset/mode fields of a channel entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    U16,
    U32,
}

impl FieldWidth {
    pub(crate) fn read(self, cursor: &mut Cursor<&[u8]>) -> Result<u32> {
        match self {
            FieldWidth::U16 => Ok(read_u16(cursor)? as u32),
            FieldWidth::U32 => read_u32(cursor),
        }
    }

    pub(crate) fn write<S: Sink + ?Sized>(
        self,
        w: &mut BinaryWriter<'_, S>,
        field: &'static str,
        value: usize,
    ) -> Result<()> {
        match self {
            FieldWidth::U16 => w.write_u16(fit_u16(field, value)?),
            FieldWidth::U32 => w.write_u32(fit_u32(field, value)?),
        }
    }
}

/// A value that can live in a pool
///
/// Rotation pools of the J3D family hold quantized `i16`; everything else
/// holds `f32`. Frame numbers are stored unscaled in either.
pub(crate) trait PoolValue: Copy + PartialEq {
    fn from_frame(frame: f32) -> Result<Self>;
    fn to_frame(self) -> f32;
}

impl PoolValue for f32 {
    fn from_frame(frame: f32) -> Result<Self> {
        Ok(frame)
    }

    fn to_frame(self) -> f32 {
        self
    }
}

impl PoolValue for i16 {
    fn from_frame(frame: f32) -> Result<Self> {
        quantize("frame", frame)
    }

    fn to_frame(self) -> f32 {
        self as f32
    }
}

/// Truncate toward zero into an `i16` pool slot
fn quantize(field: &'static str, value: f32) -> Result<i16> {
    let truncated = value.trunc();
    if (i16::MIN as f32..=i16::MAX as f32).contains(&truncated) {
        Ok(truncated as i16)
    } else {
        Err(AnimError::PoolValueOverflow { field, value })
    }
}

/// Convert between keyframe values and stored pool values
pub(crate) trait ValueMap<T> {
    fn store(&self, value: f32) -> Result<T>;
    fn load(&self, stored: T) -> f32;
}

/// Values stored as-is
pub(crate) struct Raw;

impl ValueMap<f32> for Raw {
    fn store(&self, value: f32) -> Result<f32> {
        Ok(value)
    }

    fn load(&self, stored: f32) -> f32 {
        stored
    }
}

/// Degrees stored as integer multiples of the animation's angle scale
///
/// Stores truncate toward zero; anything outside the `i16` range is an error.
pub(crate) struct Angle(pub f32);

impl ValueMap<i16> for Angle {
    fn store(&self, value: f32) -> Result<i16> {
        quantize("rotation", value / self.0)
    }

    fn load(&self, stored: i16) -> f32 {
        stored as f32 * self.0
    }
}

/// Borrow `needed` values of `pool` starting at `index`
pub(crate) fn pool_slice<T>(
    pool: &[T],
    kind: ChannelKind,
    index: usize,
    needed: usize,
) -> Result<&[T]> {
    index
        .checked_add(needed)
        .and_then(|end| pool.get(index..end))
        .ok_or(AnimError::PoolOverrun {
            kind,
            index,
            needed,
            len: pool.len(),
        })
}

/// Format-specific channel reading and writing
///
/// Implemented by [`FullFrame`] and [`Interpolated`]; [`Codec`] selects one
/// per [`AnimFormat`].
pub trait ChannelCodec {
    /// Read a float channel entry at the cursor and resolve it against `pool`
    fn read_channel(
        &self,
        cursor: &mut Cursor<&[u8]>,
        kind: ChannelKind,
        pool: &[f32],
    ) -> Result<Vec<Keyframe>>;

    /// Read a quantized rotation entry, converting units to degrees
    fn read_rotation(
        &self,
        cursor: &mut Cursor<&[u8]>,
        pool: &[i16],
        angle_scale: f32,
    ) -> Result<Vec<Keyframe>>;

    /// Add `keys` to `pool` and write the channel entry
    fn write_channel<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<f32>,
    ) -> Result<()>;

    /// Quantize rotation `keys` into `pool` and write the channel entry
    fn write_rotation<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<i16>,
        angle_scale: f32,
    ) -> Result<()>;

    /// Multiplier to store in the section header for these joints
    fn angle_multiplier(&self, joints: &[Joint]) -> i8;
}

/// Channel codec selected by format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    FullFrame(FullFrame),
    Interpolated(Interpolated),
}

impl Codec {
    pub fn for_format(format: AnimFormat) -> Self {
        match format {
            AnimFormat::Bca => Codec::FullFrame(FullFrame::new(FieldWidth::U16)),
            AnimFormat::Bck => Codec::Interpolated(Interpolated::new(FieldWidth::U16, true)),
            AnimFormat::Dca => Codec::FullFrame(FullFrame::new(FieldWidth::U32)),
            AnimFormat::Dck => Codec::Interpolated(Interpolated::new(FieldWidth::U32, false)),
        }
    }
}

impl ChannelCodec for Codec {
    fn read_channel(
        &self,
        cursor: &mut Cursor<&[u8]>,
        kind: ChannelKind,
        pool: &[f32],
    ) -> Result<Vec<Keyframe>> {
        match self {
            Codec::FullFrame(c) => c.read_channel(cursor, kind, pool),
            Codec::Interpolated(c) => c.read_channel(cursor, kind, pool),
        }
    }

    fn read_rotation(
        &self,
        cursor: &mut Cursor<&[u8]>,
        pool: &[i16],
        angle_scale: f32,
    ) -> Result<Vec<Keyframe>> {
        match self {
            Codec::FullFrame(c) => c.read_rotation(cursor, pool, angle_scale),
            Codec::Interpolated(c) => c.read_rotation(cursor, pool, angle_scale),
        }
    }

    fn write_channel<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<f32>,
    ) -> Result<()> {
        match self {
            Codec::FullFrame(c) => c.write_channel(w, keys, pool),
            Codec::Interpolated(c) => c.write_channel(w, keys, pool),
        }
    }

    fn write_rotation<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<i16>,
        angle_scale: f32,
    ) -> Result<()> {
        match self {
            Codec::FullFrame(c) => c.write_rotation(w, keys, pool, angle_scale),
            Codec::Interpolated(c) => c.write_rotation(w, keys, pool, angle_scale),
        }
    }

    fn angle_multiplier(&self, joints: &[Joint]) -> i8 {
        match self {
            Codec::FullFrame(c) => c.angle_multiplier(joints),
            Codec::Interpolated(c) => c.angle_multiplier(joints),
        }
    }
}
