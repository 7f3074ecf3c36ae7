//! Full-frame channels: every sampled frame stored, no interpolation

use std::io::Cursor;

use super::{Angle, ChannelCodec, FieldWidth, PoolValue, Raw, ValueMap, pool_slice};
use crate::binary::{BinaryWriter, Sink};
use crate::error::Result;
use crate::pool::find_or_insert;
use crate::track::{ChannelKind, Joint, Keyframe};

/// `(count, offset)` entries, one pool value per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullFrame {
    width: FieldWidth,
}

impl FullFrame {
    pub const fn new(width: FieldWidth) -> Self {
        Self { width }
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

        let values = pool_slice(pool, kind, offset, count)?;
        if count == 1 {
            return Ok(vec![Keyframe::constant(map.load(values[0]))]);
        }

        Ok(values
            .iter()
            .enumerate()
            .map(|(i, &v)| Keyframe::new(i as f32, map.load(v)))
            .collect())
    }

    fn write<T: PoolValue, S: Sink + ?Sized>(
        &self,
        w: &mut BinaryWriter<'_, S>,
        keys: &[Keyframe],
        pool: &mut Vec<T>,
        map: &impl ValueMap<T>,
    ) -> Result<()> {
        let sequence = keys
            .iter()
            .map(|key| map.store(key.value))
            .collect::<Result<Vec<T>>>()?;
        let offset = find_or_insert(pool, &sequence);

        self.width.write(w, "keyframe count", keys.len())?;
        self.width.write(w, "pool offset", offset)
    }
}

impl ChannelCodec for FullFrame {
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

    /// Full-frame sections always use the fixed base scale, marked as `-1`
    fn angle_multiplier(&self, _joints: &[Joint]) -> i8 {
        -1
    }
}
