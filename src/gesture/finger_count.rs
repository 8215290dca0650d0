//! Extended-finger-count classification — a debounced 0–4 count of
//! extended fingers on the designated hand, plus a cooldown-gated
//! one-shot when all four fingers extend (spectrum-analysis request).
//!
//! Debounce is deliberately conservative: a new count must be observed
//! continuously for the full debounce window, and the window must also
//! have elapsed since the last accepted change, so a value flickering
//! between two counts never stabilizes.

use tracing::debug;

use super::GestureEvent;
use crate::config::FingerCountConfig;
use crate::features::extended_finger_count;
use crate::tracking::PoseFrame;

/// State machine for the extended-finger-count classifier.
#[derive(Debug)]
pub struct FingerCountClassifier {
    /// Last accepted (published) count.
    accepted: u8,
    /// Differing count under observation, with the time it first appeared.
    candidate: Option<(u8, f64)>,
    /// Timestamp of the last accepted change.
    last_change_s: Option<f64>,
    /// Timestamp of the last FFT one-shot.
    last_fft_s: Option<f64>,
}

impl Default for FingerCountClassifier {
    fn default() -> Self {
        Self {
            accepted: 0,
            candidate: None,
            last_change_s: None,
            last_fft_s: None,
        }
    }
}

impl FingerCountClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The current debounced count.
    pub fn count(&self) -> u8 {
        self.accepted
    }

    /// Evaluate one frame.  Can emit both an `FftRequest` and a
    /// `FingerCountChanged` in the same tick (one of each at most).
    /// An untracked or partially tracked hand freezes the state.
    pub fn update(&mut self, frame: &PoseFrame, config: &FingerCountConfig) -> Vec<GestureEvent> {
        let now = frame.timestamp_s;
        let Some(count) = extended_finger_count(frame, config.hand, config.extend_threshold_m)
        else {
            return Vec::new();
        };

        let mut events = Vec::new();

        // One-shot four-finger trigger: gated by cooldown only.
        if count >= 4 {
            let cooldown_over = self
                .last_fft_s
                .is_none_or(|t| now - t >= config.fft_cooldown_s);
            if cooldown_over {
                self.last_fft_s = Some(now);
                debug!("fft request on channel {} at {:.3}s", config.channel, now);
                events.push(GestureEvent::FftRequest {
                    channel: config.channel,
                    timestamp_s: now,
                });
            }
        }

        // Debounced count acceptance.
        if count == self.accepted {
            self.candidate = None;
        } else {
            match self.candidate {
                Some((value, since)) if value == count => {
                    let stable = now - since >= config.debounce_s;
                    let spaced = self
                        .last_change_s
                        .is_none_or(|t| now - t >= config.debounce_s);
                    if stable && spaced {
                        self.accepted = count;
                        self.candidate = None;
                        self.last_change_s = Some(now);
                        debug!("finger count -> {} at {:.3}s", count, now);
                        events.push(GestureEvent::FingerCountChanged {
                            hand: config.hand,
                            count,
                            timestamp_s: now,
                        });
                    }
                }
                // New differing value: restart the observation window.
                _ => self.candidate = Some((count, now)),
            }
        }

        events
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{Hand, HandJoint, HandPose, FINGERS};

    fn config() -> FingerCountConfig {
        FingerCountConfig {
            hand: Hand::Right,
            extend_threshold_m: 0.1,
            debounce_s: 0.25,
            fft_cooldown_s: 1.5,
            channel: 2,
        }
    }

    /// Right hand with the first `extended` fingers stretched out.
    fn count_frame(t: f64, extended: usize) -> PoseFrame {
        let mut pose = HandPose::new();
        pose.set_joint(HandJoint::Wrist, [0.0, 0.0, 0.0]);
        pose.set_joint(HandJoint::ThumbTip, [0.03, 0.03, 0.0]);
        for (i, finger) in FINGERS.iter().enumerate() {
            let dist = if i < extended { 0.15 } else { 0.05 };
            pose.set_joint(finger.tip(), [0.0, dist, 0.0]);
        }
        let mut frame = PoseFrame::empty(t);
        frame.set_hand(Hand::Right, pose);
        frame
    }

    fn count_changes(events: &[GestureEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match e {
                GestureEvent::FingerCountChanged { count, .. } => Some(*count),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_stable_count_accepted_after_debounce() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        assert!(classifier.update(&count_frame(0.0, 3), &cfg).is_empty());
        assert!(classifier.update(&count_frame(0.1, 3), &cfg).is_empty());
        let events = classifier.update(&count_frame(0.3, 3), &cfg);
        assert_eq!(count_changes(&events), vec![3]);
        assert_eq!(classifier.count(), 3);
    }

    #[test]
    fn test_transient_flicker_rejected() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        // 2 appears briefly, reverts to 0 before the window elapses.
        classifier.update(&count_frame(0.00, 2), &cfg);
        classifier.update(&count_frame(0.05, 2), &cfg);
        let events = classifier.update(&count_frame(0.10, 0), &cfg);
        assert!(events.is_empty());
        assert_eq!(classifier.count(), 0, "flicker must not be accepted");
    }

    #[test]
    fn test_alternating_value_never_stabilizes() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        // Alternate 1/2 every 0.1s, faster than the 0.25s window.
        for i in 0..20 {
            let count = if i % 2 == 0 { 1 } else { 2 };
            let events = classifier.update(&count_frame(i as f64 * 0.1, count), &cfg);
            assert!(count_changes(&events).is_empty(), "accepted at tick {i}");
        }
        assert_eq!(classifier.count(), 0);
    }

    #[test]
    fn test_changes_spaced_by_debounce_since_last_accept() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        // Accept 2 at t=0.25.
        classifier.update(&count_frame(0.0, 2), &cfg);
        let events = classifier.update(&count_frame(0.25, 2), &cfg);
        assert_eq!(count_changes(&events), vec![2]);

        // 3 stable from t=0.30; both windows satisfied at t=0.55.
        classifier.update(&count_frame(0.30, 3), &cfg);
        assert!(classifier.update(&count_frame(0.45, 3), &cfg).is_empty());
        let events = classifier.update(&count_frame(0.55, 3), &cfg);
        assert_eq!(count_changes(&events), vec![3]);
    }

    #[test]
    fn test_missing_hand_freezes_classifier() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        classifier.update(&count_frame(0.0, 2), &cfg);
        // Hand lost: candidate window neither advances nor clears.
        assert!(classifier.update(&PoseFrame::empty(0.1), &cfg).is_empty());
        let events = classifier.update(&count_frame(0.3, 2), &cfg);
        assert_eq!(count_changes(&events), vec![2]);
    }

    #[test]
    fn test_four_fingers_fire_fft_with_cooldown() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        let fft_count = |events: &[GestureEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GestureEvent::FftRequest { .. }))
                .count()
        };

        // First detection fires immediately (no debounce on the one-shot).
        let events = classifier.update(&count_frame(0.0, 4), &cfg);
        assert_eq!(fft_count(&events), 1);
        match &events[0] {
            GestureEvent::FftRequest { channel, .. } => assert_eq!(*channel, 2),
            other => panic!("expected FftRequest first, got {other:?}"),
        }

        // Still extended at 0.8s: inside the 1.5s cooldown.
        assert_eq!(fft_count(&classifier.update(&count_frame(0.8, 4), &cfg)), 0);

        // At 1.6s the cooldown has elapsed.
        assert_eq!(fft_count(&classifier.update(&count_frame(1.6, 4), &cfg)), 1);
    }

    #[test]
    fn test_fft_and_count_change_same_tick() {
        let mut classifier = FingerCountClassifier::new();
        let cfg = config();

        classifier.update(&count_frame(0.0, 4), &cfg); // fft fires, candidate starts
        let events = classifier.update(&count_frame(0.3, 4), &cfg);
        assert_eq!(count_changes(&events), vec![4]);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GestureEvent::FftRequest { .. })),
            "second fft still in cooldown"
        );
    }
}
