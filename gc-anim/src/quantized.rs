//! J3D skeleton animations (BCA / BCK)
//!
//! # Layout
//! ```text
//! File header (32 bytes):
//! 0x00: magic [u8; 8]          - "J3D1bca1" or "J3D1bck1"
//! 0x08: file_size u32
//! 0x0C: section_count u32      - always 1
//! 0x10: reserved [u8; 16]      - 0xFF
//!
//! Data section (offsets relative to the section start):
//! 0x00: tag [u8; 4]            - "ANF1" or "ANK1"
//! 0x04: section_size u32
//! 0x08: loop_mode u8
//! 0x09: angle_multiplier i8    - -1 for full-frame
//! 0x0A: duration u16
//! 0x0C: joint_count u16
//! 0x0E: scale_count u16
//! 0x10: rotation_count u16
//! 0x12: translation_count u16
//! 0x14: track_table_offset u32
//! 0x18: scale_pool_offset u32
//! 0x1C: rotation_pool_offset u32
//! 0x20: translation_pool_offset u32
//! filler to 32, track table, filler to 32, scale pool (f32),
//! filler to 32, rotation pool (i16), filler to 32, translation pool (f32),
//! zeros to 32
//! ```
//!
//! The track table holds one channel entry per joint, per axis (X, Y, Z), per
//! kind (scale, rotation, translation).
//!
//! Only the tail after the translation pool is zero-filled. Files written by
//! older tools may carry filler there instead; readers never look at it.

use std::io::Cursor;

use crate::animation::{AnimFormat, SkeletonAnimation};
use crate::binary::{
    BLOCK_ALIGN, BinaryWriter, Sink, fit_u16, fit_u32, read_bytes, read_f32_table,
    read_i16_table, read_i8, read_u16, read_u32, read_u8, seek_to,
};
use crate::channel::{ChannelCodec, Codec, angle_scale};
use crate::error::{AnimError, Result};
use crate::track::{Axis, ChannelKind, Joint, JointTrack, LoopMode};

/// Number of data sections in every J3D animation file
pub const SECTION_COUNT: u32 = 1;

/// Size of the J3D file header
pub const FILE_HEADER_SIZE: u64 = 32;

/// Filler for the svn/svr and sound offset fields of the file header
const RESERVED_HEADER: [u8; 16] = [0xFF; 16];

fn markers(format: AnimFormat) -> Result<(&'static [u8; 8], &'static [u8; 4])> {
    format.markers().ok_or_else(|| {
        AnimError::MalformedHeader(format!("{:?} is not a J3D animation format", format))
    })
}

/// Write a complete J3D file for `anim` at the writer's current position
pub(crate) fn write_quantized<S: Sink + ?Sized>(
    w: &mut BinaryWriter<'_, S>,
    anim: &SkeletonAnimation,
) -> Result<()> {
    let (magic, tag) = markers(anim.format)?;
    let codec = Codec::for_format(anim.format);

    let file_start = w.position()?;
    w.write_bytes(magic)?;
    let file_size = w.reserve_u32()?;
    w.write_u32(SECTION_COUNT)?;
    w.write_bytes(&RESERVED_HEADER)?;

    let section_start = w.position()?;
    w.write_bytes(tag)?;
    let section_size = w.reserve_u32()?;

    let multiplier = codec.angle_multiplier(&anim.joints);
    let scale = angle_scale(multiplier);
    tracing::debug!(
        "Writing {} ({:?}): angle_multiplier {}, {} joints",
        anim.name,
        anim.format,
        multiplier,
        anim.joints.len()
    );

    w.write_u8(anim.loop_mode as u8)?;
    w.write_i8(multiplier)?;
    w.write_u16(fit_u16("duration", anim.duration as usize)?)?;
    w.write_u16(fit_u16("joint count", anim.joints.len())?)?;

    let count_fields = [w.reserve_u16()?, w.reserve_u16()?, w.reserve_u16()?];
    let offset_fields = [
        w.reserve_u32()?,
        w.reserve_u32()?,
        w.reserve_u32()?,
        w.reserve_u32()?,
    ];

    w.write_padding(BLOCK_ALIGN)?;
    let tracks_offset = w.position()?;

    let mut scale_pool: Vec<f32> = Vec::new();
    let mut rotation_pool: Vec<i16> = Vec::new();
    let mut translation_pool: Vec<f32> = Vec::new();

    for joint in &anim.joints {
        for axis in Axis::ALL {
            let track = &joint.track;
            codec.write_channel(w, track.channel(ChannelKind::Scale, axis), &mut scale_pool)?;
            codec.write_rotation(
                w,
                track.channel(ChannelKind::Rotation, axis),
                &mut rotation_pool,
                scale,
            )?;
            codec.write_channel(
                w,
                track.channel(ChannelKind::Translation, axis),
                &mut translation_pool,
            )?;
        }
    }

    w.write_padding(BLOCK_ALIGN)?;
    let scales_offset = w.position()?;
    w.write_f32_table(&scale_pool)?;

    w.write_padding(BLOCK_ALIGN)?;
    let rotations_offset = w.position()?;
    w.write_i16_table(&rotation_pool)?;

    w.write_padding(BLOCK_ALIGN)?;
    let translations_offset = w.position()?;
    w.write_f32_table(&translation_pool)?;

    w.write_zero_padding(BLOCK_ALIGN)?;
    let section_end = w.position()?;

    tracing::debug!(
        "Pools: {} scale, {} rotation, {} translation values",
        scale_pool.len(),
        rotation_pool.len(),
        translation_pool.len()
    );

    w.patch_u32(
        section_size,
        fit_u32("section size", (section_end - section_start) as usize)?,
    )?;

    let counts = [scale_pool.len(), rotation_pool.len(), translation_pool.len()];
    for (field, count) in count_fields.into_iter().zip(counts) {
        w.patch_u16(field, fit_u16("pool size", count)?)?;
    }

    let offsets = [tracks_offset, scales_offset, rotations_offset, translations_offset];
    for (field, offset) in offset_fields.into_iter().zip(offsets) {
        w.patch_u32(field, fit_u32("table offset", (offset - section_start) as usize)?)?;
    }

    w.patch_u32(
        file_size,
        fit_u32("file size", (section_end - file_start) as usize)?,
    )?;
    w.seek(section_end)
}

/// Decode a J3D file, checking its markers against `format`
pub(crate) fn read_quantized(data: &[u8], format: AnimFormat) -> Result<SkeletonAnimation> {
    let (magic, tag) = markers(format)?;
    let mut cursor = Cursor::new(data);

    let found = read_bytes(&mut cursor, magic.len())?;
    if found != magic {
        return Err(AnimError::MalformedHeader(format!(
            "expected magic {:?}, found {:?}",
            String::from_utf8_lossy(magic),
            String::from_utf8_lossy(found)
        )));
    }
    let _file_size = read_u32(&mut cursor)?;
    let section_count = read_u32(&mut cursor)?;
    if section_count != SECTION_COUNT {
        return Err(AnimError::MalformedHeader(format!(
            "expected {} data section, found {}",
            SECTION_COUNT, section_count
        )));
    }
    read_bytes(&mut cursor, RESERVED_HEADER.len())?;

    let section_start = cursor.position();
    let found = read_bytes(&mut cursor, tag.len())?;
    if found != tag {
        return Err(AnimError::MalformedHeader(format!(
            "expected section {:?}, found {:?}",
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(found)
        )));
    }
    let _section_size = read_u32(&mut cursor)?;

    let raw_loop_mode = read_u8(&mut cursor)?;
    let loop_mode = LoopMode::from_u8(raw_loop_mode).ok_or_else(|| {
        AnimError::MalformedHeader(format!("unknown loop mode {}", raw_loop_mode))
    })?;
    let multiplier = read_i8(&mut cursor)?;
    let scale = angle_scale(multiplier);
    let duration = read_u16(&mut cursor)?;
    let joint_count = read_u16(&mut cursor)?;
    let scale_count = read_u16(&mut cursor)? as usize;
    let rotation_count = read_u16(&mut cursor)? as usize;
    let translation_count = read_u16(&mut cursor)? as usize;

    let tracks_offset = section_start + read_u32(&mut cursor)? as u64;
    let scales_offset = section_start + read_u32(&mut cursor)? as u64;
    let rotations_offset = section_start + read_u32(&mut cursor)? as u64;
    let translations_offset = section_start + read_u32(&mut cursor)? as u64;

    tracing::debug!(
        "Reading {:?}: angle_multiplier {}, {} joints, pools {}/{}/{}",
        format,
        multiplier,
        joint_count,
        scale_count,
        rotation_count,
        translation_count
    );

    let scale_pool = read_f32_table(&mut cursor, scales_offset, scale_count)?;
    let rotation_pool = read_i16_table(&mut cursor, rotations_offset, rotation_count)?;
    let translation_pool = read_f32_table(&mut cursor, translations_offset, translation_count)?;

    let codec = Codec::for_format(format);
    seek_to(&mut cursor, tracks_offset)?;

    let mut joints = Vec::new();
    for index in 0..joint_count as u32 {
        let mut track = JointTrack::new();
        for axis in Axis::ALL {
            let scale_keys = codec.read_channel(&mut cursor, ChannelKind::Scale, &scale_pool)?;
            let rotation_keys = codec.read_rotation(&mut cursor, &rotation_pool, scale)?;
            let translation_keys =
                codec.read_channel(&mut cursor, ChannelKind::Translation, &translation_pool)?;
            track.set(ChannelKind::Scale, axis, scale_keys);
            track.set(ChannelKind::Rotation, axis, rotation_keys);
            track.set(ChannelKind::Translation, axis, translation_keys);
        }
        joints.push(Joint::new(track, index, 0));
    }

    Ok(SkeletonAnimation::new(
        String::new(),
        format,
        duration as u32,
        loop_mode,
        joints,
    ))
}
