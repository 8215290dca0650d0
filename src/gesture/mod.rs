//! Gesture recognition — five independent, temporally filtered state
//! machines over geometric pose features, orchestrated by `GestureEngine`.
//!
//! Provides:
//! - `wrist_flip`: baseline-vector flip detector (menu toggle)
//! - `pinch`: pinch-tap and pinch-hold detectors (cursor mode, freeze)
//! - `zoom`: two-hand pinch-distance tracker (continuous zoom)
//! - `finger_count`: debounced extended-finger classifier (+ FFT one-shot)
//! - `engine`: per-tick orchestration and subscriber dispatch

pub mod engine;
pub mod finger_count;
pub mod pinch;
pub mod wrist_flip;
pub mod zoom;

pub use engine::{GestureEngine, SinkId};
pub use finger_count::FingerCountClassifier;
pub use pinch::{PinchHoldDetector, PinchTapDetector};
pub use wrist_flip::WristFlipDetector;
pub use zoom::ZoomTracker;

use serde::Serialize;

use crate::tracking::{Hand, PoseFrame};

// ── Events ─────────────────────────────────────────────────

/// Events emitted by the gesture engine.  Transient: produced and
/// delivered within the tick that detected them.  Each machine emits at
/// most one event of each kind per tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GestureEvent {
    /// Wrist flip on the monitored hand.
    MenuToggle { timestamp_s: f64 },
    /// Short pinch-and-release tap.
    CursorModeToggle { timestamp_s: f64 },
    /// Relative zoom increment; the consumer accumulates deltas.
    ZoomDelta { delta: f32, timestamp_s: f64 },
    /// Sustained pinch hold completed.
    FreezeToggle { timestamp_s: f64 },
    /// Four extended fingers requested a spectrum analysis.
    FftRequest { channel: u32, timestamp_s: f64 },
    /// Debounced extended-finger count changed.
    FingerCountChanged {
        hand: Hand,
        count: u8,
        timestamp_s: f64,
    },
}

impl GestureEvent {
    /// Event kind name for logging and text output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MenuToggle { .. } => "menu-toggle",
            Self::CursorModeToggle { .. } => "cursor-mode-toggle",
            Self::ZoomDelta { .. } => "zoom-delta",
            Self::FreezeToggle { .. } => "freeze-toggle",
            Self::FftRequest { .. } => "fft-request",
            Self::FingerCountChanged { .. } => "finger-count-changed",
        }
    }

    /// Timestamp of the frame that produced this event.
    pub fn timestamp_s(&self) -> f64 {
        match self {
            Self::MenuToggle { timestamp_s }
            | Self::CursorModeToggle { timestamp_s }
            | Self::ZoomDelta { timestamp_s, .. }
            | Self::FreezeToggle { timestamp_s }
            | Self::FftRequest { timestamp_s, .. }
            | Self::FingerCountChanged { timestamp_s, .. } => *timestamp_s,
        }
    }
}

// ── Capability traits ──────────────────────────────────────

/// Supplies pose frames to the engine.  The host provides a concrete
/// adapter (live tracker, recorded replay); the engine never discovers
/// pose providers on its own.
pub trait PoseSource {
    /// The next available frame, or `None` when the stream ends.
    fn next_frame(&mut self) -> Option<PoseFrame>;
}

/// Receives gesture events, synchronously and in machine-evaluation
/// order, within the tick that produced them.
pub trait EventSink {
    fn on_gesture(&mut self, event: &GestureEvent);
}

// ── Tests ──────────────────────────────────────────────────
