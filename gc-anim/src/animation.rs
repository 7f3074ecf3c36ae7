//! Skeleton animation container types

use crate::channel::{ChannelCodec, Codec, angle_scale};
use crate::track::{ChannelKind, Joint, LoopMode};
use crate::{BCA_MAGIC, BCA_SECTION, BCK_MAGIC, BCK_SECTION};

/// The two structurally distinct encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// J3D: magic-tagged, 32-byte aligned, rotations quantized to `i16`
    Quantized,
    /// MOD: headerless float tables, rotations in radians
    Flat,
}

/// Concrete on-disk encoding of a skeleton animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFormat {
    /// J3D full-frame (`J3D1bca1` / `ANF1`)
    Bca,
    /// J3D interpolated (`J3D1bck1` / `ANK1`)
    Bck,
    /// MOD full-frame
    Dca,
    /// MOD interpolated
    Dck,
}

impl AnimFormat {
    pub const ALL: [AnimFormat; 4] = [
        AnimFormat::Bca,
        AnimFormat::Bck,
        AnimFormat::Dca,
        AnimFormat::Dck,
    ];

    pub const fn family(self) -> Family {
        match self {
            AnimFormat::Bca | AnimFormat::Bck => Family::Quantized,
            AnimFormat::Dca | AnimFormat::Dck => Family::Flat,
        }
    }

    /// True for the keyed encodings with tangents
    pub const fn is_interpolated(self) -> bool {
        matches!(self, AnimFormat::Bck | AnimFormat::Dck)
    }

    /// Same interpolation style in the other family
    pub const fn in_family(self, family: Family) -> AnimFormat {
        match (family, self.is_interpolated()) {
            (Family::Quantized, false) => AnimFormat::Bca,
            (Family::Quantized, true) => AnimFormat::Bck,
            (Family::Flat, false) => AnimFormat::Dca,
            (Family::Flat, true) => AnimFormat::Dck,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            AnimFormat::Bca => "bca",
            AnimFormat::Bck => "bck",
            AnimFormat::Dca => "dca",
            AnimFormat::Dck => "dck",
        }
    }

    /// Case-insensitive lookup, with or without the leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// File magic and data section tag (J3D family only)
    pub const fn markers(self) -> Option<(&'static [u8; 8], &'static [u8; 4])> {
        match self {
            AnimFormat::Bca => Some((BCA_MAGIC, BCA_SECTION)),
            AnimFormat::Bck => Some((BCK_MAGIC, BCK_SECTION)),
            AnimFormat::Dca | AnimFormat::Dck => None,
        }
    }
}

/// A complete skeletal animation in one of the four encodings
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonAnimation {
    pub name: String,
    pub format: AnimFormat,
    /// Length in frames
    pub duration: u32,
    /// Only stored by the J3D family; MOD data always decodes as `Loop`
    pub loop_mode: LoopMode,
    pub joints: Vec<Joint>,
}

impl SkeletonAnimation {
    pub fn new(
        name: impl Into<String>,
        format: AnimFormat,
        duration: u32,
        loop_mode: LoopMode,
        joints: Vec<Joint>,
    ) -> Self {
        Self {
            name: name.into(),
            format,
            duration,
            loop_mode,
            joints,
        }
    }

    pub fn family(&self) -> Family {
        self.format.family()
    }

    /// Multiplier the J3D encoder will write for the current rotations
    pub fn angle_multiplier(&self) -> i8 {
        Codec::for_format(self.format).angle_multiplier(&self.joints)
    }

    /// Degrees per stored rotation unit, derived from the rotation content
    pub fn angle_scale(&self) -> f32 {
        angle_scale(self.angle_multiplier())
    }

    /// Stable sort by `joint_index`; equal indices keep their order
    pub fn sort_joints(&mut self) {
        self.joints.sort_by_key(|joint| joint.joint_index);
    }

    /// Multiply every translation value by `factor`
    pub fn scale_translations(&mut self, factor: f32) {
        for joint in &mut self.joints {
            for key in joint.track.keys_of_mut(ChannelKind::Translation) {
                key.value *= factor;
            }
        }
    }

    /// `name.ext`, without doubling an extension already present
    pub fn file_name(&self) -> String {
        let ext = self.format.extension();
        match self.name.rsplit_once('.') {
            Some((_, existing)) if existing.eq_ignore_ascii_case(ext) => self.name.clone(),
            _ => format!("{}.{}", self.name, ext),
        }
    }
}
