//! Pinch detectors — a short tap toggles cursor mode, a sustained hold
//! fires the freeze trigger.
//!
//! Both machines are edge-triggered on the pinch strength crossing the
//! configured threshold, with durations computed from frame timestamps.
//! Missing tracking data freezes a machine in place; it is never read as
//! a release.

use tracing::debug;

use super::GestureEvent;
use crate::config::{PinchHoldConfig, PinchTapConfig};
use crate::features::pinch_strength;
use crate::tracking::{Hand, PoseFrame};

// ── Pinch tap ──────────────────────────────────────────────

/// Discrete toggle: pinch and release within the tap window.
#[derive(Debug, Default)]
pub struct PinchTapDetector {
    pinching: bool,
    pinch_start_s: f64,
}

impl PinchTapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate one frame.  Emits on the release edge of a pinch that
    /// lasted at most `tap_max_s`; a longer pinch is not-a-tap.
    pub fn update(&mut self, frame: &PoseFrame, config: &PinchTapConfig) -> Option<GestureEvent> {
        let now = frame.timestamp_s;
        let strength = pinch_strength(frame, config.hand, config.finger)?;
        let is_pinching = strength >= config.strength;

        if is_pinching && !self.pinching {
            self.pinching = true;
            self.pinch_start_s = now;
            return None;
        }

        if !is_pinching && self.pinching {
            self.pinching = false;
            let duration = now - self.pinch_start_s;
            if duration <= config.tap_max_s {
                debug!("pinch tap: {:.0}ms at {:.3}s", duration * 1000.0, now);
                return Some(GestureEvent::CursorModeToggle { timestamp_s: now });
            }
        }

        None
    }
}

// ── Pinch hold ─────────────────────────────────────────────

/// Sustained trigger: pinch held continuously for the hold window fires
/// exactly once per episode.
#[derive(Debug, Default)]
pub struct PinchHoldDetector {
    holding: bool,
    hold_start_s: f64,
    /// Set once the episode has fired; cleared only by a full release,
    /// so a continued hold cannot re-fire.
    fired: bool,
}

impl PinchHoldDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate one frame.  Active when the configured finger pinches on
    /// either hand.  Both hands untracked freezes the state.
    pub fn update(&mut self, frame: &PoseFrame, config: &PinchHoldConfig) -> Option<GestureEvent> {
        let now = frame.timestamp_s;

        let left = pinch_strength(frame, Hand::Left, config.finger);
        let right = pinch_strength(frame, Hand::Right, config.finger);
        if left.is_none() && right.is_none() {
            return None;
        }
        let active = left.is_some_and(|s| s >= config.strength)
            || right.is_some_and(|s| s >= config.strength);

        if !active {
            // Release ends the episode, firing or not.
            self.holding = false;
            self.fired = false;
            return None;
        }

        if !self.holding && !self.fired {
            self.holding = true;
            self.hold_start_s = now;
            return None;
        }

        if self.holding && now - self.hold_start_s >= config.hold_s {
            self.holding = false;
            self.fired = true;
            debug!("pinch hold fired at {:.3}s", now);
            return Some(GestureEvent::FreezeToggle { timestamp_s: now });
        }

        None
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn pinch_frame(timestamp_s: f64, hand: Hand, finger: crate::tracking::Finger, strength: f32) -> PoseFrame {
    use crate::tracking::HandPose;

    let mut pose = HandPose::new();
    pose.set_pinch(finger, strength);
    let mut frame = PoseFrame::empty(timestamp_s);
    frame.set_hand(hand, pose);
    frame
}

// ── Tests ──────────────────────────────────────────────────
