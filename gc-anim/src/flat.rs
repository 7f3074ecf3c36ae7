//! MOD skeleton animations (DCA / DCK)
//!
//! Headerless and unpadded; every field is a big-endian u32 or f32:
//!
//! ```text
//! joint_count u32
//! duration u32
//! scale_count u32,       scale_pool [f32; scale_count]
//! rotation_count u32,    rotation_pool [f32; rotation_count]
//! translation_count u32, translation_pool [f32; translation_count]
//! joint_count × {
//!     joint_index u32
//!     parent_index u32
//!     scale X, Y, Z        channel entries
//!     rotation X, Y, Z     channel entries
//!     translation X, Y, Z  channel entries
//! }
//! ```
//!
//! DCA entries are `(count, offset)`; DCK entries are `(count, offset, 0)`.
//! Rotations are radians and stored unquantized.

use std::io::Cursor;

use crate::animation::{AnimFormat, SkeletonAnimation};
use crate::binary::{BinaryWriter, Sink, fit_u32, read_f32_table, read_u32};
use crate::channel::{ChannelCodec, Codec};
use crate::error::Result;
use crate::track::{Axis, ChannelKind, Joint, JointTrack, LoopMode};

/// Write `anim` as a MOD table at the writer's current position
pub(crate) fn write_flat<S: Sink + ?Sized>(
    w: &mut BinaryWriter<'_, S>,
    anim: &SkeletonAnimation,
) -> Result<()> {
    let codec = Codec::for_format(anim.format);

    w.write_u32(fit_u32("joint count", anim.joints.len())?)?;
    w.write_u32(anim.duration)?;

    // Joint records follow the pools, but the pools are only complete once
    // every record has been encoded
    let mut pools: [Vec<f32>; 3] = Default::default();
    let mut records = Cursor::new(Vec::new());
    {
        let mut rw = BinaryWriter::new(&mut records, &[]);
        for joint in &anim.joints {
            rw.write_u32(joint.joint_index)?;
            rw.write_u32(joint.parent_index)?;
            for kind in ChannelKind::ALL {
                for axis in Axis::ALL {
                    let keys = joint.track.channel(kind, axis);
                    codec.write_channel(&mut rw, keys, &mut pools[kind.index()])?;
                }
            }
        }
    }

    tracing::debug!(
        "Writing {} ({:?}): {} joints, pools {}/{}/{}",
        anim.name,
        anim.format,
        anim.joints.len(),
        pools[0].len(),
        pools[1].len(),
        pools[2].len()
    );

    for pool in &pools {
        w.write_u32(fit_u32("pool size", pool.len())?)?;
        w.write_f32_table(pool)?;
    }
    w.write_bytes(records.get_ref())
}

/// Decode a MOD table starting at the cursor, leaving the cursor after it
pub(crate) fn read_flat(
    cursor: &mut Cursor<&[u8]>,
    format: AnimFormat,
) -> Result<SkeletonAnimation> {
    let codec = Codec::for_format(format);

    let joint_count = read_u32(cursor)?;
    let duration = read_u32(cursor)?;

    let mut pools: [Vec<f32>; 3] = Default::default();
    for pool in &mut pools {
        let count = read_u32(cursor)? as usize;
        let offset = cursor.position();
        *pool = read_f32_table(cursor, offset, count)?;
    }

    tracing::debug!(
        "Reading {:?}: {} joints, pools {}/{}/{}",
        format,
        joint_count,
        pools[0].len(),
        pools[1].len(),
        pools[2].len()
    );

    let mut joints = Vec::new();
    for _ in 0..joint_count {
        let joint_index = read_u32(cursor)?;
        let parent_index = read_u32(cursor)?;

        let mut track = JointTrack::new();
        for kind in ChannelKind::ALL {
            for axis in Axis::ALL {
                let keys = codec.read_channel(cursor, kind, &pools[kind.index()])?;
                track.set(kind, axis, keys);
            }
        }
        joints.push(Joint::new(track, joint_index, parent_index));
    }

    Ok(SkeletonAnimation::new(
        String::new(),
        format,
        duration,
        LoopMode::Loop,
        joints,
    ))
}
