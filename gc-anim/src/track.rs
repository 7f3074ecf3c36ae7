//! Keyframe and joint track model

use std::fmt;

/// A single key on one channel
///
/// `None` tangents mean the tangent was never evaluated (hold). Full-frame
/// channels never carry tangents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
    pub in_tangent: Option<f32>,
    pub out_tangent: Option<f32>,
}

impl Keyframe {
    /// Key without tangents
    pub const fn new(frame: f32, value: f32) -> Self {
        Self {
            frame,
            value,
            in_tangent: None,
            out_tangent: None,
        }
    }

    /// Key whose in and out tangents are the same value
    pub const fn symmetric(frame: f32, value: f32, tangent: f32) -> Self {
        Self {
            frame,
            value,
            in_tangent: Some(tangent),
            out_tangent: Some(tangent),
        }
    }

    /// Key with independent in and out tangents
    pub const fn piecewise(frame: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            frame,
            value,
            in_tangent: Some(in_tangent),
            out_tangent: Some(out_tangent),
        }
    }

    /// A constant channel is always a single key at frame 0
    pub const fn constant(value: f32) -> Self {
        Self::new(0.0, value)
    }

    /// True when the out tangent was set to something other than the in tangent
    pub fn has_split_tangents(&self) -> bool {
        self.out_tangent.is_some() && self.out_tangent != self.in_tangent
    }

    /// Apply `f` to whichever tangents are present
    pub fn map_tangents(&mut self, f: impl Fn(f32) -> f32) {
        self.in_tangent = self.in_tangent.map(&f);
        self.out_tangent = self.out_tangent.map(&f);
    }
}

/// Axis of a channel, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// SRT component of a channel, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Scale,
    Rotation,
    Translation,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Scale,
        ChannelKind::Rotation,
        ChannelKind::Translation,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Scale => write!(f, "scale"),
            ChannelKind::Rotation => write!(f, "rotation"),
            ChannelKind::Translation => write!(f, "translation"),
        }
    }
}

/// Scale, rotation and translation channels of one joint, per axis
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointTrack {
    /// Indexed `[ChannelKind::index()][Axis::index()]`
    channels: [[Vec<Keyframe>; 3]; 3],
}

impl JointTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track with every channel holding a single constant key
    ///
    /// Identity pose: scale 1, rotation 0, translation 0.
    pub fn identity() -> Self {
        let mut track = Self::new();
        for axis in Axis::ALL {
            track.set(ChannelKind::Scale, axis, vec![Keyframe::constant(1.0)]);
            track.set(ChannelKind::Rotation, axis, vec![Keyframe::constant(0.0)]);
            track.set(ChannelKind::Translation, axis, vec![Keyframe::constant(0.0)]);
        }
        track
    }

    pub fn channel(&self, kind: ChannelKind, axis: Axis) -> &[Keyframe] {
        &self.channels[kind.index()][axis.index()]
    }

    pub fn channel_mut(&mut self, kind: ChannelKind, axis: Axis) -> &mut Vec<Keyframe> {
        &mut self.channels[kind.index()][axis.index()]
    }

    pub fn set(&mut self, kind: ChannelKind, axis: Axis, keys: Vec<Keyframe>) {
        self.channels[kind.index()][axis.index()] = keys;
    }

    /// Every key of one kind, across all three axes
    pub fn keys_of(&self, kind: ChannelKind) -> impl Iterator<Item = &Keyframe> {
        self.channels[kind.index()].iter().flatten()
    }

    /// Mutable access to every key of one kind
    pub fn keys_of_mut(&mut self, kind: ChannelKind) -> impl Iterator<Item = &mut Keyframe> {
        self.channels[kind.index()].iter_mut().flatten()
    }

    /// Mutable access to every key in the track
    pub fn keys_mut(&mut self) -> impl Iterator<Item = &mut Keyframe> {
        self.channels.iter_mut().flatten().flatten()
    }
}

/// A joint track plus its placement in the skeleton
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Joint {
    pub track: JointTrack,
    /// Final position in the skeleton
    pub joint_index: u32,
    /// Carried through unchanged; the codecs never interpret it
    pub parent_index: u32,
}

impl Joint {
    pub fn new(track: JointTrack, joint_index: u32, parent_index: u32) -> Self {
        Self {
            track,
            joint_index,
            parent_index,
        }
    }
}

/// J3D playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LoopMode {
    Once = 0,
    OnceThenReset = 1,
    #[default]
    Loop = 2,
    MirroredOnce = 3,
    MirroredLoop = 4,
}

impl LoopMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Once),
            1 => Some(Self::OnceThenReset),
            2 => Some(Self::Loop),
            3 => Some(Self::MirroredOnce),
            4 => Some(Self::MirroredLoop),
            _ => None,
        }
    }
}
