//! Gesture engine orchestration — owns the configuration and the five
//! state machines, drives them once per tick, and republishes emitted
//! events to subscribers.
//!
//! Machines are evaluated in a fixed order (wrist-flip, pinch-tap,
//! pinch-hold, zoom, finger-count) against the same immutable frame, with
//! no machine observing another's output within the tick.  All durations
//! derive from frame timestamps, so replaying a recorded frame sequence
//! reproduces the exact same event stream.

use tracing::{debug, info};

use super::finger_count::FingerCountClassifier;
use super::pinch::{PinchHoldDetector, PinchTapDetector};
use super::wrist_flip::WristFlipDetector;
use super::zoom::ZoomTracker;
use super::{EventSink, GestureEvent};
use crate::config::{ConfigError, GestureConfig};
use crate::tracking::PoseFrame;

// ── Subscriber handles ─────────────────────────────────────

/// Handle identifying a registered event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

// ── Engine ─────────────────────────────────────────────────

/// Owns the five gesture state machines and dispatches their events.
pub struct GestureEngine {
    config: GestureConfig,
    wrist_flip: WristFlipDetector,
    pinch_tap: PinchTapDetector,
    pinch_hold: PinchHoldDetector,
    zoom: ZoomTracker,
    finger_count: FingerCountClassifier,
    /// Subscribers in registration order; invoked synchronously in-tick.
    sinks: Vec<(SinkId, Box<dyn EventSink>)>,
    next_sink_id: u64,
    ticks: u64,
    events_emitted: u64,
}

impl GestureEngine {
    /// Construct an engine with a validated configuration.
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            wrist_flip: WristFlipDetector::new(),
            pinch_tap: PinchTapDetector::new(),
            pinch_hold: PinchHoldDetector::new(),
            zoom: ZoomTracker::new(),
            finger_count: FingerCountClassifier::new(),
            sinks: Vec::new(),
            next_sink_id: 0,
            ticks: 0,
            events_emitted: 0,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration between ticks.  The new values take
    /// effect on the next `tick`; machine state is preserved.
    pub fn set_config(&mut self, config: GestureConfig) -> Result<(), ConfigError> {
        config.validate()?;
        info!("gesture config replaced");
        self.config = config;
        Ok(())
    }

    /// Register an event sink.  Sinks are invoked in registration order.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) -> SinkId {
        let id = SinkId(self.next_sink_id);
        self.next_sink_id += 1;
        self.sinks.push((id, sink));
        id
    }

    /// Remove a previously registered sink.  Returns true if it existed.
    pub fn unsubscribe(&mut self, id: SinkId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sink_id, _)| *sink_id != id);
        self.sinks.len() < before
    }

    /// Evaluate one frame through every machine in fixed order and
    /// deliver the collected events to subscribers in that order.  Also
    /// returns the batch so a host can drain events without registering
    /// a sink.
    pub fn tick(&mut self, frame: &PoseFrame) -> Vec<GestureEvent> {
        self.ticks += 1;
        let mut events = Vec::new();

        if let Some(event) = self.wrist_flip.update(frame, &self.config.wrist_flip) {
            events.push(event);
        }
        if let Some(event) = self.pinch_tap.update(frame, &self.config.pinch_tap) {
            events.push(event);
        }
        if let Some(event) = self.pinch_hold.update(frame, &self.config.pinch_hold) {
            events.push(event);
        }
        if let Some(event) = self.zoom.update(frame, &self.config.zoom) {
            events.push(event);
        }
        events.extend(self.finger_count.update(frame, &self.config.finger_count));

        if !events.is_empty() {
            debug!(
                "tick {} at {:.3}s emitted {} event(s)",
                self.ticks,
                frame.timestamp_s,
                events.len()
            );
        }
        self.events_emitted += events.len() as u64;

        for event in &events {
            for (_, sink) in &mut self.sinks {
                sink.on_gesture(event);
            }
        }

        events
    }

    /// Clear all machine state, keeping configuration and subscribers.
    pub fn reset(&mut self) {
        self.wrist_flip.reset();
        self.pinch_tap.reset();
        self.pinch_hold.reset();
        self.zoom.reset();
        self.finger_count.reset();
        info!("gesture engine state reset");
    }

    /// One-line diagnostic summary.
    pub fn summary(&self) -> String {
        format!(
            "ticks={} events={} finger-count={} zoom-active={} sinks={}",
            self.ticks,
            self.events_emitted,
            self.finger_count.count(),
            self.zoom.is_active(),
            self.sinks.len(),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::tracking::{Finger, Hand, HandJoint, HandPose, FINGERS};

    /// Sink recording every delivered event.
    struct Recorder(Rc<RefCell<Vec<GestureEvent>>>);

    impl EventSink for Recorder {
        fn on_gesture(&mut self, event: &GestureEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    /// Right hand with all four fingers extended and an "up" wrist.
    fn four_finger_pose() -> HandPose {
        let mut pose = HandPose::new();
        pose.set_joint(HandJoint::Wrist, [0.0, 0.0, 0.0]);
        pose.set_joint(HandJoint::ThumbTip, [0.04, 0.04, 0.0]);
        for finger in FINGERS {
            pose.set_joint(finger.tip(), [0.0, 0.18, 0.0]);
        }
        pose.up = Some([0.0, 1.0, 0.0]);
        pose
    }

    fn four_finger_frame(t: f64) -> PoseFrame {
        let mut frame = PoseFrame::empty(t);
        frame.set_hand(Hand::Right, four_finger_pose());
        frame
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GestureConfig::default();
        config.finger_count.fft_cooldown_s = f64::NAN;
        assert!(GestureEngine::new(config).is_err());
    }

    #[test]
    fn test_set_config_rejects_invalid_and_keeps_old() {
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
        let mut bad = GestureConfig::default();
        bad.zoom.max_step = -0.1;
        assert!(engine.set_config(bad).is_err());
        assert!((engine.config().zoom.max_step - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame_emits_nothing() {
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
        for i in 0..100 {
            assert!(engine.tick(&PoseFrame::empty(i as f64 * 0.016)).is_empty());
        }
    }

    #[test]
    fn test_events_delivered_to_sinks_in_order() {
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
        let recorded = Rc::new(RefCell::new(Vec::new()));
        engine.subscribe(Box::new(Recorder(Rc::clone(&recorded))));

        let returned: Vec<GestureEvent> = (0..40)
            .flat_map(|i| engine.tick(&four_finger_frame(i as f64 * 0.1)))
            .collect();

        assert!(!returned.is_empty());
        assert_eq!(*recorded.borrow(), returned, "sink order must match batch");
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
        let recorded = Rc::new(RefCell::new(Vec::new()));
        let id = engine.subscribe(Box::new(Recorder(Rc::clone(&recorded))));

        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id), "second unsubscribe is a no-op");

        engine.tick(&four_finger_frame(0.0));
        assert!(recorded.borrow().is_empty());
    }

    #[test]
    fn test_fft_cooldown_end_to_end() {
        // Four fingers extended on the designated hand; fft_cooldown 1.5s,
        // channel 2.  First detection fires at t=0.0, t=0.8 is suppressed,
        // t=1.6 fires again.
        let mut config = GestureConfig::default();
        config.finger_count.channel = 2;
        config.finger_count.fft_cooldown_s = 1.5;
        let mut engine = GestureEngine::new(config).unwrap();

        let fft_events = |events: &[GestureEvent]| -> Vec<u32> {
            events
                .iter()
                .filter_map(|e| match e {
                    GestureEvent::FftRequest { channel, .. } => Some(*channel),
                    _ => None,
                })
                .collect()
        };

        assert_eq!(fft_events(&engine.tick(&four_finger_frame(0.0))), vec![2]);
        assert_eq!(fft_events(&engine.tick(&four_finger_frame(0.8))), Vec::<u32>::new());
        assert_eq!(fft_events(&engine.tick(&four_finger_frame(1.6))), vec![2]);
    }

    #[test]
    fn test_deterministic_replay() {
        // The same frame sequence through two engines yields identical
        // event streams.
        let frames: Vec<PoseFrame> = (0..50)
            .map(|i| {
                if i % 7 == 0 {
                    PoseFrame::empty(i as f64 * 0.1)
                } else {
                    four_finger_frame(i as f64 * 0.1)
                }
            })
            .collect();

        let run = |frames: &[PoseFrame]| -> Vec<GestureEvent> {
            let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
            frames.iter().flat_map(|f| engine.tick(f)).collect()
        };

        assert_eq!(run(&frames), run(&frames));
    }

    #[test]
    fn test_at_most_one_event_per_kind_per_tick() {
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();
        for i in 0..100 {
            let events = engine.tick(&four_finger_frame(i as f64 * 0.05));
            for event in &events {
                let same_kind = events.iter().filter(|e| e.kind() == event.kind()).count();
                assert_eq!(same_kind, 1, "duplicate {} in one tick", event.kind());
            }
        }
    }

    #[test]
    fn test_reset_clears_machine_state() {
        let mut config = GestureConfig::default();
        config.finger_count.channel = 7;
        let mut engine = GestureEngine::new(config).unwrap();

        engine.tick(&four_finger_frame(0.0)); // fft fired, cooldown running
        engine.reset();

        // After reset the cooldown history is gone: fires immediately.
        let events = engine.tick(&four_finger_frame(0.1));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GestureEvent::FftRequest { channel: 7, .. })),
            "got {events:?}"
        );
    }

    #[test]
    fn test_pinch_machines_coexist_on_shared_frame() {
        // Index tap on the right hand and middle hold on the left hand in
        // the same frames; both machines see the same data independently.
        let mut engine = GestureEngine::new(GestureConfig::default()).unwrap();

        let frame = |t: f64, index: f32, middle: f32| -> PoseFrame {
            let mut right = HandPose::new();
            right.set_pinch(Finger::Index, index);
            let mut left = HandPose::new();
            left.set_pinch(Finger::Middle, middle);
            let mut f = PoseFrame::empty(t);
            f.set_hand(Hand::Right, right);
            f.set_hand(Hand::Left, left);
            f
        };

        engine.tick(&frame(0.0, 0.9, 0.9)); // both engage
        let events = engine.tick(&frame(0.2, 0.1, 0.9)); // tap releases
        assert!(events
            .iter()
            .any(|e| matches!(e, GestureEvent::CursorModeToggle { .. })));

        let events = engine.tick(&frame(0.7, 0.1, 0.9)); // hold completes
        assert!(events
            .iter()
            .any(|e| matches!(e, GestureEvent::FreezeToggle { .. })));
    }
}
