//! Conversion between the J3D and MOD families
//!
//! J3D rotations are degrees with tangents expressed per frame; MOD rotations
//! are radians with tangents per second at 30 frames per second.

use crate::animation::{Family, SkeletonAnimation};
use crate::track::{ChannelKind, LoopMode};

/// Frame rate relating the two tangent conventions
pub const FRAMES_PER_SECOND: f32 = 30.0;

/// Options for [`transcode`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TranscodeOptions {
    /// Fold rotations into `(-c, c]` degrees when converting to J3D
    ///
    /// `c` is truncated to whole degrees; a limit below one degree is ignored.
    pub clamp_degrees: Option<f32>,
}

impl TranscodeOptions {
    pub fn with_clamp(clamp_degrees: f32) -> Self {
        Self {
            clamp_degrees: Some(clamp_degrees),
        }
    }
}

/// Fold `degrees` into `(-limit, limit]` using floored modulo
///
/// `limit` is truncated to whole degrees first. Limits that truncate to zero
/// or below leave `degrees` unchanged.
pub fn clamp_angle(degrees: f32, limit: f32) -> f32 {
    let limit = limit.trunc();
    if limit.is_nan() || limit < 1.0 {
        return degrees;
    }
    let period = 2.0 * limit;
    let mut v = degrees.rem_euclid(period).rem_euclid(period);
    if v > limit {
        v -= period;
    }
    v
}

/// Wrap radians into `[-pi, pi]` and convert to degrees
fn normalized_degrees(radians: f32) -> f32 {
    radians.sin().atan2(radians.cos()).to_degrees()
}

/// Re-encode `anim` for `target`, keeping its interpolation style
///
/// Full-frame stays full-frame and interpolated stays interpolated. An
/// animation already in `target` is returned unchanged.
pub fn transcode(
    mut anim: SkeletonAnimation,
    target: Family,
    options: &TranscodeOptions,
) -> SkeletonAnimation {
    let source = anim.format;
    if source.family() == target {
        return anim;
    }

    match target {
        Family::Flat => {
            for joint in &mut anim.joints {
                for key in joint.track.keys_of_mut(ChannelKind::Rotation) {
                    key.value = key.value.to_radians();
                }
                for key in joint.track.keys_mut() {
                    key.map_tangents(|t| t * FRAMES_PER_SECOND);
                }
            }
            anim.sort_joints();
        }
        Family::Quantized => {
            anim.sort_joints();
            for joint in &mut anim.joints {
                for key in joint.track.keys_of_mut(ChannelKind::Rotation) {
                    let degrees = normalized_degrees(key.value);
                    key.value = match options.clamp_degrees {
                        Some(limit) => clamp_angle(degrees, limit),
                        None => degrees,
                    };
                }
                for key in joint.track.keys_mut() {
                    key.map_tangents(|t| t / FRAMES_PER_SECOND);
                }
            }
            anim.loop_mode = LoopMode::Loop;
        }
    }

    anim.format = source.in_family(target);
    tracing::debug!(
        "Transcoded {} from {:?} to {:?}",
        anim.name,
        source,
        anim.format
    );
    anim
}
