//! Wrist-flip detection — a rapid rotation of the wrist "up" vector away
//! from its smoothed baseline toggles the menu.
//!
//! The baseline trails the current orientation by a small per-tick blend,
//! so slow continuous rotation never accumulates into a false flip; only
//! a fast flip opens enough angle to trigger.

use tracing::debug;

use super::GestureEvent;
use crate::config::WristFlipConfig;
use crate::features::{angle_deg, lerp3, normalize, wrist_up};
use crate::tracking::PoseFrame;

/// State machine for wrist-flip detection.
#[derive(Debug, Default)]
pub struct WristFlipDetector {
    /// Smoothed reference orientation, seeded by the first tracked tick.
    baseline_up: Option<[f32; 3]>,
    /// Timestamp of the last emitted toggle, for the cooldown.
    last_trigger_s: Option<f64>,
}

impl WristFlipDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all history.  The next tracked tick re-seeds the baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate one frame.  If the monitored hand is untracked this tick
    /// the state is frozen and nothing is emitted.
    pub fn update(&mut self, frame: &PoseFrame, config: &WristFlipConfig) -> Option<GestureEvent> {
        let now = frame.timestamp_s;
        let up = wrist_up(frame, config.hand)?;

        let Some(baseline) = self.baseline_up else {
            // First tracked tick: seed the baseline without triggering.
            self.baseline_up = Some(up);
            return None;
        };

        let angle = angle_deg(baseline, up);
        let cooldown_over = self
            .last_trigger_s
            .is_none_or(|t| now - t >= config.cooldown_s);

        if angle >= config.flip_angle_deg && cooldown_over {
            // Snap the baseline to the flipped orientation so the reverse
            // flip back to rest does not immediately re-trigger.
            self.baseline_up = Some(up);
            self.last_trigger_s = Some(now);
            debug!("wrist flip: {:.1}° at {:.3}s", angle, now);
            return Some(GestureEvent::MenuToggle { timestamp_s: now });
        }

        // Trail the current orientation.  If the blend degenerates (near
        // opposite vectors cancelling out) keep the old baseline.
        if let Some(blended) = normalize(lerp3(baseline, up, config.baseline_blend)) {
            self.baseline_up = Some(blended);
        }
        None
    }
}

// ── Tests ──────────────────────────────────────────────────
