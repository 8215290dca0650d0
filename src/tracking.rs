//! Hand pose data model — one timestamped snapshot of tracked hand state
//! per tick, for up to two hands.
//!
//! Models the six joints the gesture engine consumes (wrist plus five
//! fingertips), a wrist "up" orientation vector, and per-finger pinch
//! strengths.  Absence of a hand or joint is always distinguishable from
//! a zero-valued reading: missing hands are `None`, missing joints carry
//! `valid: false`.

use serde::{Deserialize, Serialize};

// ── Hand enum ──────────────────────────────────────────────

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Finger enum ────────────────────────────────────────────

/// The four fingers that participate in pinch and extension features.
/// The thumb is not listed: pinch strength already encodes finger-to-thumb
/// contact, and the extended-finger count is defined over these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Number of tracked fingers per hand.
pub const FINGER_COUNT: usize = 4;

/// All tracked fingers in index order.
pub const FINGERS: [Finger; FINGER_COUNT] =
    [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

impl Finger {
    /// Convert finger enum to array index (0-3).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// The fingertip joint belonging to this finger.
    pub fn tip(&self) -> HandJoint {
        match self {
            Self::Index => HandJoint::IndexTip,
            Self::Middle => HandJoint::MiddleTip,
            Self::Ring => HandJoint::RingTip,
            Self::Pinky => HandJoint::PinkyTip,
        }
    }
}

// ── Joint definitions ──────────────────────────────────────

/// The named joints the engine reads from the tracking boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandJoint {
    Wrist,
    ThumbTip,
    IndexTip,
    MiddleTip,
    RingTip,
    PinkyTip,
}

/// Total number of joints per hand.
pub const JOINT_COUNT: usize = 6;

impl HandJoint {
    /// Convert joint enum to array index (0-5).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbTip => "thumb-tip",
            Self::IndexTip => "index-tip",
            Self::MiddleTip => "middle-tip",
            Self::RingTip => "ring-tip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// Parse a joint from its string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wrist" => Some(Self::Wrist),
            "thumb-tip" => Some(Self::ThumbTip),
            "index-tip" => Some(Self::IndexTip),
            "middle-tip" => Some(Self::MiddleTip),
            "ring-tip" => Some(Self::RingTip),
            "pinky-tip" => Some(Self::PinkyTip),
            _ => None,
        }
    }
}

// ── Joint sample ───────────────────────────────────────────

/// One joint position for the current tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JointSample {
    /// Position in meters (x, y, z), shared coordinate space.
    pub position: [f32; 3],
    /// Whether the tracker produced data for this joint this tick.
    pub valid: bool,
}

impl Default for JointSample {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            valid: false,
        }
    }
}

// ── Hand pose ──────────────────────────────────────────────

/// Tracked state of one hand for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandPose {
    /// Joint positions indexed by `HandJoint`.
    pub joints: [JointSample; JOINT_COUNT],
    /// Wrist "up" orientation vector, or `None` if orientation was not
    /// tracked this tick.  Not required to be normalized by the producer.
    pub up: Option<[f32; 3]>,
    /// Per-finger pinch strength in [0,1], indexed by `Finger`.
    /// Encodes the tracker's confidence that the finger and thumb touch.
    pub pinch: [f32; FINGER_COUNT],
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            joints: [JointSample::default(); JOINT_COUNT],
            up: None,
            pinch: [0.0; FINGER_COUNT],
        }
    }
}

impl HandPose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of a joint, or `None` if the joint has no data this tick.
    pub fn joint(&self, joint: HandJoint) -> Option<[f32; 3]> {
        let sample = &self.joints[joint.index()];
        sample.valid.then_some(sample.position)
    }

    /// Mark a joint as tracked at the given position.
    pub fn set_joint(&mut self, joint: HandJoint, position: [f32; 3]) {
        self.joints[joint.index()] = JointSample {
            position,
            valid: true,
        };
    }

    /// Mark a joint as untracked this tick.
    pub fn clear_joint(&mut self, joint: HandJoint) {
        self.joints[joint.index()] = JointSample::default();
    }

    /// Raw pinch strength for a finger.
    pub fn pinch_strength(&self, finger: Finger) -> f32 {
        self.pinch[finger.index()]
    }

    pub fn set_pinch(&mut self, finger: Finger, strength: f32) {
        self.pinch[finger.index()] = strength.clamp(0.0, 1.0);
    }
}

// ── Pose frame ─────────────────────────────────────────────

/// One timestamped snapshot of tracked hand state for up to two hands.
///
/// Produced once per tick by the pose source; immutable for the duration
/// of the tick.  The engine never retains a frame beyond the tick — each
/// state machine keeps only the derived history it needs.  All durations
/// in the engine are computed from `timestamp_s`, so a replayed frame
/// sequence reproduces the exact same event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Sample time in seconds.  Monotonically non-decreasing across ticks.
    pub timestamp_s: f64,
    /// Left hand, or `None` if not tracked this tick.
    pub left: Option<HandPose>,
    /// Right hand, or `None` if not tracked this tick.
    pub right: Option<HandPose>,
}

impl PoseFrame {
    /// An empty frame with neither hand tracked.
    pub fn empty(timestamp_s: f64) -> Self {
        Self {
            timestamp_s,
            left: None,
            right: None,
        }
    }

    /// The pose for a given hand, or `None` if not tracked this tick.
    pub fn hand(&self, hand: Hand) -> Option<&HandPose> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }

    /// Set the pose for a given hand.
    pub fn set_hand(&mut self, hand: Hand, pose: HandPose) {
        match hand {
            Hand::Left => self.left = Some(pose),
            Hand::Right => self.right = Some(pose),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────
