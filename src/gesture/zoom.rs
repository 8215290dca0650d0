//! Two-hand pinch-distance zoom — while both hands hold an index pinch,
//! changes in the distance between the pinching fingertips stream out as
//! relative, clamped zoom deltas.
//!
//! Activation is delayed so the initial grab does not jolt the zoom
//! level, and sub-epsilon deltas are suppressed as tracking jitter.

use tracing::debug;

use super::GestureEvent;
use crate::config::ZoomConfig;
use crate::features::{inter_hand_fingertip_distance, pinch_strength};
use crate::tracking::{Hand, PoseFrame};

/// State machine for the two-hand zoom tracker.
#[derive(Debug, Default)]
pub struct ZoomTracker {
    active: bool,
    active_start_s: f64,
    /// Inter-fingertip distance at activation, then at each evaluation
    /// past the activation delay.  Not updated during the delay.
    last_distance: f32,
}

impl ZoomTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether both hands are currently engaged.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Evaluate one frame.  Requires pinch strength on both hands and the
    /// inter-fingertip distance; a missing hand or fingertip freezes the
    /// state (a vanished hand is not a release).
    pub fn update(&mut self, frame: &PoseFrame, config: &ZoomConfig) -> Option<GestureEvent> {
        let now = frame.timestamp_s;

        let left = pinch_strength(frame, Hand::Left, config.finger)?;
        let right = pinch_strength(frame, Hand::Right, config.finger)?;
        let both_pinching = left >= config.strength && right >= config.strength;

        if !both_pinching {
            // Either hand released: deactivate, no exit event.
            self.active = false;
            return None;
        }

        let dist = inter_hand_fingertip_distance(
            frame,
            Hand::Left,
            config.finger,
            Hand::Right,
            config.finger,
        )?;

        if !self.active {
            self.active = true;
            self.active_start_s = now;
            self.last_distance = dist;
            debug!("zoom engaged at {:.3}s, distance {:.3}m", now, dist);
            return None;
        }

        if now - self.active_start_s < config.activation_delay_s {
            return None;
        }

        let delta = ((dist - self.last_distance) * config.sensitivity)
            .clamp(-config.max_step, config.max_step);
        self.last_distance = dist;

        if delta.abs() > config.epsilon {
            return Some(GestureEvent::ZoomDelta {
                delta,
                timestamp_s: now,
            });
        }
        None
    }
}

// ── Tests ──────────────────────────────────────────────────
