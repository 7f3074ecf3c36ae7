//! Tests for channel codecs

use std::io::Cursor;

use super::*;
use crate::binary::DEFAULT_FILLER;
use crate::track::{Axis, JointTrack};

/// Write one channel entry with `write`, returning the raw entry bytes
fn entry_bytes(write: impl FnOnce(&mut BinaryWriter<'_, Cursor<Vec<u8>>>)) -> Vec<u8> {
    let mut sink = Cursor::new(Vec::new());
    let mut w = BinaryWriter::new(&mut sink, DEFAULT_FILLER);
    write(&mut w);
    sink.into_inner()
}

fn bck() -> Codec {
    Codec::for_format(AnimFormat::Bck)
}

fn bca() -> Codec {
    Codec::for_format(AnimFormat::Bca)
}

fn dck() -> Codec {
    Codec::for_format(AnimFormat::Dck)
}

fn u16s(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect()
}

fn u32s(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

// ========================================================================
// Angle scale
// ========================================================================

#[test]
fn test_angle_scale() {
    assert_eq!(angle_scale(-1), BASE_ANGLE_SCALE);
    assert_eq!(angle_scale(0), BASE_ANGLE_SCALE);
    assert_eq!(angle_scale(1), 2.0 * BASE_ANGLE_SCALE);
    assert_eq!(angle_scale(3), 8.0 * BASE_ANGLE_SCALE);
}

fn joints_with_rotation(values: &[f32]) -> Vec<Joint> {
    let mut track = JointTrack::identity();
    let keys = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Keyframe::symmetric(i as f32, v, 0.0))
        .collect();
    track.set(ChannelKind::Rotation, Axis::Z, keys);
    vec![Joint::new(track, 0, 0)]
}

#[test]
fn test_angle_multiplier_selection() {
    assert_eq!(bck().angle_multiplier(&joints_with_rotation(&[10.0, 170.0])), 0);
    assert_eq!(bck().angle_multiplier(&joints_with_rotation(&[-185.0, 0.0])), 1);
    assert_eq!(bck().angle_multiplier(&joints_with_rotation(&[0.0, 359.0])), 1);
    assert_eq!(bck().angle_multiplier(&joints_with_rotation(&[0.0, 361.0])), 2);
    assert_eq!(bck().angle_multiplier(&[]), 0);
}

#[test]
fn test_angle_multiplier_is_capped() {
    let joints = joints_with_rotation(&[f32::MAX, 0.0]);
    assert_eq!(bck().angle_multiplier(&joints), MAX_ANGLE_MULTIPLIER);
}

#[test]
fn test_full_frame_multiplier_is_fixed() {
    let joints = joints_with_rotation(&[720.0, 0.0]);
    assert_eq!(bca().angle_multiplier(&joints), -1);
}

// ========================================================================
// Full-frame
// ========================================================================

#[test]
fn test_full_frame_constant_channel() {
    let mut pool = vec![0.0f32, 2.5];
    let bytes = entry_bytes(|w| {
        bca()
            .write_channel(w, &[Keyframe::constant(2.5)], &mut pool)
            .unwrap()
    });
    assert_eq!(u16s(&bytes), vec![1, 1]);

    let keys = bca()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Scale, &pool)
        .unwrap();
    assert_eq!(keys, vec![Keyframe::new(0.0, 2.5)]);
}

#[test]
fn test_full_frame_multi_key_uses_consecutive_slots() {
    let mut pool = Vec::new();
    let keys: Vec<Keyframe> = [1.0, 2.0, 3.0]
        .iter()
        .enumerate()
        .map(|(i, &v)| Keyframe::new(i as f32, v))
        .collect();
    let bytes = entry_bytes(|w| bca().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(u16s(&bytes), vec![3, 0]);
    assert_eq!(pool, vec![1.0, 2.0, 3.0]);

    let read = bca()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Translation, &pool)
        .unwrap();
    assert_eq!(read, keys);
}

#[test]
fn test_full_frame_rotation_quantizes() {
    let scale = angle_scale(-1);
    let mut pool = Vec::new();
    let keys = [Keyframe::new(0.0, 90.0), Keyframe::new(1.0, -45.0)];
    let bytes = entry_bytes(|w| bca().write_rotation(w, &keys, &mut pool, scale).unwrap());
    assert_eq!(pool, vec![16384, -8192]);

    let read = bca()
        .read_rotation(&mut Cursor::new(&bytes[..]), &pool, scale)
        .unwrap();
    assert_eq!(read[0].value, 90.0);
    assert_eq!(read[1].value, -45.0);
    assert_eq!(read[1].frame, 1.0);
}

#[test]
fn test_rotation_truncates_toward_zero() {
    let scale = angle_scale(0);
    let mut pool = Vec::new();
    let keys = [Keyframe::new(0.0, 0.01), Keyframe::new(1.0, -0.01)];
    entry_bytes(|w| bca().write_rotation(w, &keys, &mut pool, scale).unwrap());
    // 0.01 / (180/32768) = 1.82 -> 1
    assert_eq!(pool, vec![1, -1]);
}

#[test]
fn test_rotation_tangent_out_of_range() {
    let scale = angle_scale(0);
    let mut pool = Vec::new();
    let keys = [
        Keyframe::symmetric(0.0, 0.0, 0.0),
        Keyframe::symmetric(2.0, 10.0, 500.0),
    ];
    let mut sink = Cursor::new(Vec::new());
    let mut w = BinaryWriter::new(&mut sink, DEFAULT_FILLER);
    assert!(matches!(
        bck().write_rotation(&mut w, &keys, &mut pool, scale),
        Err(AnimError::PoolValueOverflow { field: "rotation", .. })
    ));
}

#[test]
fn test_shared_pool_reuses_offsets() {
    let mut pool = Vec::new();
    let keys = [Keyframe::new(0.0, 4.0), Keyframe::new(1.0, 5.0)];
    let first = entry_bytes(|w| bca().write_channel(w, &keys, &mut pool).unwrap());
    let second = entry_bytes(|w| bca().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(first, second);
    assert_eq!(pool.len(), 2);
}

// ========================================================================
// Interpolated
// ========================================================================

#[test]
fn test_symmetric_mode_uses_three_slots() {
    let mut pool = Vec::new();
    let keys = [
        Keyframe::symmetric(0.0, 1.0, 0.5),
        Keyframe::symmetric(10.0, 2.0, -0.5),
    ];
    let bytes = entry_bytes(|w| bck().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(u16s(&bytes), vec![2, 0, TangentMode::Symmetric as u16]);
    assert_eq!(pool, vec![0.0, 1.0, 0.5, 10.0, 2.0, -0.5]);

    let read = bck()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Scale, &pool)
        .unwrap();
    assert_eq!(read, keys.to_vec());
}

#[test]
fn test_any_split_tangent_makes_channel_piecewise() {
    let mut pool = Vec::new();
    let keys = [
        Keyframe::symmetric(0.0, 1.0, 0.5),
        Keyframe::piecewise(5.0, 3.0, 0.25, 0.75),
        Keyframe::symmetric(10.0, 2.0, 0.0),
    ];
    let bytes = entry_bytes(|w| bck().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(u16s(&bytes), vec![3, 0, TangentMode::Piecewise as u16]);
    assert_eq!(pool.len(), 12);
    assert_eq!(&pool[4..8], &[5.0, 3.0, 0.25, 0.75]);

    let read = bck()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Translation, &pool)
        .unwrap();
    assert_eq!(read, keys.to_vec());
}

#[test]
fn test_missing_tangents_stored_as_zero() {
    let mut pool = Vec::new();
    let keys = [Keyframe::new(0.0, 1.0), Keyframe::new(3.0, 2.0)];
    entry_bytes(|w| bck().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(pool, vec![0.0, 1.0, 0.0, 3.0, 2.0, 0.0]);
}

#[test]
fn test_interpolated_constant_channel() {
    let mut pool = Vec::new();
    let bytes = entry_bytes(|w| {
        bck()
            .write_channel(w, &[Keyframe::constant(7.0)], &mut pool)
            .unwrap()
    });
    assert_eq!(u16s(&bytes), vec![1, 0, 0]);
    assert_eq!(pool, vec![7.0]);

    let read = bck()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Scale, &pool)
        .unwrap();
    assert_eq!(read, vec![Keyframe::constant(7.0)]);
}

#[test]
fn test_interpolated_rotation_frames_are_unscaled() {
    let scale = angle_scale(1);
    let mut pool = Vec::new();
    let keys = [
        Keyframe::symmetric(0.0, 0.0, 0.0),
        Keyframe::symmetric(30.0, 270.0, 9.0),
    ];
    let bytes = entry_bytes(|w| bck().write_rotation(w, &keys, &mut pool, scale).unwrap());
    assert_eq!(pool[3], 30);
    assert_eq!(pool[4], (270.0 / scale) as i16);

    let read = bck()
        .read_rotation(&mut Cursor::new(&bytes[..]), &pool, scale)
        .unwrap();
    assert_eq!(read[1].frame, 30.0);
    assert!((read[1].value - 270.0).abs() <= scale);
    assert!((read[1].in_tangent.unwrap() - 9.0).abs() <= scale);
}

#[test]
fn test_unknown_mode_reads_as_piecewise() {
    let pool = [0.0f32, 1.0, 2.0, 3.0, 1.0, 5.0, 6.0, 7.0];
    let entry: Vec<u8> = [2u16, 0, 9].iter().flat_map(|v| v.to_be_bytes()).collect();
    let read = bck()
        .read_channel(&mut Cursor::new(&entry[..]), ChannelKind::Scale, &pool)
        .unwrap();
    assert_eq!(read[1], Keyframe::piecewise(1.0, 5.0, 6.0, 7.0));
}

#[test]
fn test_flat_interpolated_ignores_split_tangents() {
    let mut pool = Vec::new();
    let keys = [
        Keyframe::piecewise(0.0, 1.0, 0.5, 0.9),
        Keyframe::symmetric(4.0, 2.0, 0.1),
    ];
    let bytes = entry_bytes(|w| dck().write_channel(w, &keys, &mut pool).unwrap());
    assert_eq!(u32s(&bytes), vec![2, 0, 0]);
    assert_eq!(pool, vec![0.0, 1.0, 0.5, 4.0, 2.0, 0.1]);

    let read = dck()
        .read_channel(&mut Cursor::new(&bytes[..]), ChannelKind::Rotation, &pool)
        .unwrap();
    assert_eq!(read[0], Keyframe::symmetric(0.0, 1.0, 0.5));
}

#[test]
fn test_flat_interpolated_ignores_reserved_field() {
    let pool = [0.0f32, 1.0, 2.0, 1.0, 3.0, 4.0];
    let entry: Vec<u8> = [2u32, 0, 1].iter().flat_map(|v| v.to_be_bytes()).collect();
    let read = dck()
        .read_channel(&mut Cursor::new(&entry[..]), ChannelKind::Scale, &pool)
        .unwrap();
    assert_eq!(read[1], Keyframe::symmetric(1.0, 3.0, 4.0));
}

// ========================================================================
// Errors
// ========================================================================

#[test]
fn test_entry_past_pool_end() {
    let pool = [1.0f32, 2.0];
    let entry: Vec<u8> = [2u16, 1].iter().flat_map(|v| v.to_be_bytes()).collect();
    let err = bca()
        .read_channel(&mut Cursor::new(&entry[..]), ChannelKind::Scale, &pool)
        .unwrap_err();
    assert!(matches!(
        err,
        AnimError::PoolOverrun {
            kind: ChannelKind::Scale,
            index: 1,
            needed: 2,
            len: 2
        }
    ));
}

#[test]
fn test_offset_overflows_u16_field() {
    let mut pool = vec![0.0f32; 70000];
    let mut sink = Cursor::new(Vec::new());
    let mut w = BinaryWriter::new(&mut sink, DEFAULT_FILLER);
    let err = bca()
        .write_channel(&mut w, &[Keyframe::constant(1.0)], &mut pool)
        .unwrap_err();
    assert!(matches!(
        err,
        AnimError::FieldOverflow {
            field: "pool offset",
            bits: 16,
            ..
        }
    ));
}

#[test]
fn test_truncated_entry() {
    let entry = [0u8, 2, 0];
    let err = bck()
        .read_channel(&mut Cursor::new(&entry[..]), ChannelKind::Scale, &[])
        .unwrap_err();
    assert!(matches!(err, AnimError::TruncatedStream { .. }));
}
