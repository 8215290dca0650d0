//! Geometric feature extraction — per-frame scalar and vector features
//! derived from a `PoseFrame`.
//!
//! Everything here is a pure function of the current frame.  Missing
//! hands or joints yield `None`, never a zero reading: callers treat
//! `None` as "no transition this tick".

use crate::tracking::{Finger, Hand, HandJoint, PoseFrame, FINGERS};

// ── Vector helpers ─────────────────────────────────────────

/// Euclidean distance between two 3D points.
pub fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Vector length.
pub fn norm(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Unit vector, or `None` for a degenerate (near-zero) input.
pub fn normalize(v: [f32; 3]) -> Option<[f32; 3]> {
    let n = norm(v);
    if n < 1e-6 {
        return None;
    }
    Some([v[0] / n, v[1] / n, v[2] / n])
}

/// Angle between two vectors in degrees.  Degenerate inputs read as 0°
/// so they can never satisfy an angle threshold.
pub fn angle_deg(a: [f32; 3], b: [f32; 3]) -> f32 {
    let na = norm(a);
    let nb = norm(b);
    if na < 1e-6 || nb < 1e-6 {
        return 0.0;
    }
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]) / (na * nb);
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Component-wise linear interpolation from `a` toward `b`.
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

// ── Frame features ─────────────────────────────────────────

/// Position of a named joint on a hand, or `None` if the hand or joint
/// has no data this tick.
pub fn joint_position(frame: &PoseFrame, hand: Hand, joint: HandJoint) -> Option<[f32; 3]> {
    frame.hand(hand)?.joint(joint)
}

/// Wrist "up" orientation vector for a hand, normalized.
pub fn wrist_up(frame: &PoseFrame, hand: Hand) -> Option<[f32; 3]> {
    normalize(frame.hand(hand)?.up?)
}

/// Pinch strength in [0,1] for a finger on a hand.
pub fn pinch_strength(frame: &PoseFrame, hand: Hand, finger: Finger) -> Option<f32> {
    Some(frame.hand(hand)?.pinch_strength(finger))
}

/// Euclidean distance from the wrist to a fingertip.
pub fn extended_distance(frame: &PoseFrame, hand: Hand, finger: Finger) -> Option<f32> {
    let wrist = joint_position(frame, hand, HandJoint::Wrist)?;
    let tip = joint_position(frame, hand, finger.tip())?;
    Some(distance(wrist, tip))
}

/// Number of fingers (index, middle, ring, pinky) whose wrist-to-tip
/// distance exceeds `threshold_m`.  Returns `None` if the hand, wrist, or
/// any fingertip has no data this tick — a partially tracked hand must
/// not produce a spurious low count.
pub fn extended_finger_count(frame: &PoseFrame, hand: Hand, threshold_m: f32) -> Option<u8> {
    let mut count = 0u8;
    for finger in FINGERS {
        if extended_distance(frame, hand, finger)? > threshold_m {
            count += 1;
        }
    }
    Some(count)
}

/// Euclidean distance between two fingertips on different hands.
pub fn inter_hand_fingertip_distance(
    frame: &PoseFrame,
    hand_a: Hand,
    finger_a: Finger,
    hand_b: Hand,
    finger_b: Finger,
) -> Option<f32> {
    let a = joint_position(frame, hand_a, finger_a.tip())?;
    let b = joint_position(frame, hand_b, finger_b.tip())?;
    Some(distance(a, b))
}

// ── Tests ──────────────────────────────────────────────────
