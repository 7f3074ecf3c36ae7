//! Interpolated channels: sparse keys with Hermite tangents

use std::io::Cursor;

use super::{
    Angle, ChannelCodec, FieldWidth, MAX_ANGLE_MULTIPLIER, PoolValue, Raw, ValueMap, pool_slice,
};
use crate::binary::{BinaryWriter, Sink};
use crate::error::Result;
use crate::pool::find_or_insert;
use crate::track::{ChannelKind, Joint, Keyframe};

/// How a multi-key channel lays out its tangents in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TangentMode {
    /// `[frame, value, tangent]` per key, in and out share the tangent
    Symmetric = 0,
    /// `[frame, value, in_tangent, out_tangent]` per key
    Piecewise = 1,
}

impl TangentMode {
    /// Anything other than 0 is read as piecewise
    pub fn from_raw(raw: u32) -> Self {
        if raw == 0 {
            TangentMode::Symmetric
        } else {
            TangentMode::Piecewise
        }
    }

    /// Pool slots used per key
    pub const fn stride(self) -> usize {
        match self {
            TangentMode::Symmetric => 3,
            TangentMode::Piecewise => 4,
        }
    }

    /// Piecewise as soon as any key has differing in/out tangents
    pub fn for_keys(keys: &[Keyframe]) -> Self {
        if keys.iter().any(Keyframe::has_split_tangents) {
            TangentMode::Piecewise
        } else {
            TangentMode::Symmetric
        }
    }
}

/// `(count, offset, mode)` entries over `[frame, value, tangent...]` runs
///
/// With `tangent_modes` off the third field is reserved: written as 0,
/// ignored on read, and every key uses the symmetric layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolated {
    width: FieldWidth,
    tangent_modes: bool,
}

impl Interpolated {
    pub const fn new(width: FieldWidth, tangent_modes: bool) -> Self {
        Self {
            width,
            tangent_modes,
        }
    }

    /// Mode the writer will use for `keys`
    pub fn mode_for(&self, keys: &[Keyframe]) -> TangentMode {
        if self.tangent_modes && keys.len() > 1 {
            TangentMode::for_keys(keys)
        } else {
            TangentMode::Symmetric
        }
    }

    fn read<T: PoolValue>(
        &self,
        cursor: &mut Cursor<&[u8]>,
        kind: ChannelKind,
        pool: &[T],
        map: &impl ValueMap<T>,
    ) -> Result<Vec<Keyframe>> {
        let count = self.width.read(cursor)? as usize;
        let offset = self.width.read(cursor)? as usize;
        let raw_mode = self.width.read(cursor)?;

        if count == 1 {
            let value = pool_slice(pool, kind, offset, 1)?[0];
            return Ok(vec![Keyframe::constant(map.load(value))]);
        }

        let mode = if self.tangent_modes {
            TangentMode::from_raw(raw_mode)
        } else {
            TangentMode::Symmetric
        };
        let stride = mode.stride();
        let needed = count.saturating_mul(stride);
        let values = pool_slice(pool, kind, offset, needed)?;

        Ok(values
            .chunks_exact(stride)
            .map(|slots| {
                let frame = slots[0].to_frame();
                let value = map.load(slots[1]);
                let in_tangent = map.load(slots[2]);
                match mode {
                    TangentMode::Symmetric => Keyframe::symmetric(frame, value, in_tangent),
                    TangentMode::Piecewise => {
                        Keyframe::piecewise(frame, value, in_tangent, map.load(slots[3]))
                    }
                }
            })
            .collect())
    }

    fn write<T: PoolValue, S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<T>,
        map: &impl ValueMap<T>,
    ) -> Result<()> {
        let mode = self.mode_for(keys);

        let sequence: Vec<T> = if keys.len() == 1 {
            vec![map.store(keys[0].value)?]
        } else {
            let mut sequence = Vec::with_capacity(keys.len() * mode.stride());
            for key in keys {
                let in_tangent = key.in_tangent.unwrap_or(0.0);
                sequence.push(T::from_frame(key.frame)?);
                sequence.push(map.store(key.value)?);
                sequence.push(map.store(in_tangent)?);
                if mode == TangentMode::Piecewise {
                    sequence.push(map.store(key.out_tangent.unwrap_or(in_tangent))?);
                }
            }
            sequence
        };
        let offset = find_or_insert(pool, &sequence);

        self.width.write(w, "keyframe count", keys.len())?;
        self.width.write(w, "pool offset", offset)?;
        self.width.write(w, "tangent mode", mode as usize)
    }
}

impl ChannelCodec for Interpolated {
    fn read_channel(
        &self,
        cursor: &mut Cursor<&[u8]>,
        kind: ChannelKind,
        pool: &[f32],
    ) -> Result<Vec<Keyframe>> {
        self.read(cursor, kind, pool, &Raw)
    }

    fn read_rotation(
        &self,
        cursor: &mut Cursor<&[u8]>,
        pool: &[i16],
        angle_scale: f32,
    ) -> Result<Vec<Keyframe>> {
        self.read(cursor, ChannelKind::Rotation, pool, &Angle(angle_scale))
    }

    fn write_channel<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<f32>,
    ) -> Result<()> {
        self.write(w, keys, pool, &Raw)
    }

    fn write_rotation<S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<i16>,
        angle_scale: f32,
    ) -> Result<()> {
        self.write(w, keys, pool, &Angle(angle_scale))
    }

    /// Smallest multiplier whose range covers the largest rotation value
    ///
    /// One multiplier serves the whole animation, so a single large angle
    /// coarsens every rotation channel.
    fn angle_multiplier(&self, joints: &[Joint]) -> i8 {
        let max_angle = joints
            .iter()
            .flat_map(|joint| joint.track.keys_of(ChannelKind::Rotation))
            .map(|key| key.value.abs())
            .fold(0.0f32, f32::max)
            .ceil();

        let mut multiplier = 0;
        while multiplier < MAX_ANGLE_MULTIPLIER && max_angle >= 180.0 * 2f32.powi(multiplier as i32)
        {
            multiplier += 1;
        }
        multiplier
    }
}
