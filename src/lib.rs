//! handwave — hand-skeleton gesture recognition engine for spatial
//! computing.
//!
//! Turns a per-tick stream of [`PoseFrame`]s into stable, debounced
//! gesture events: menu toggle (wrist flip), cursor-mode toggle (pinch
//! tap), freeze trigger (pinch hold), continuous zoom (two-hand pinch
//! distance), and spectrum-analysis requests (four extended fingers).
//!
//! The engine is single-threaded and tick-driven: the host calls
//! [`GestureEngine::tick`] once per frame with the latest pose data, and
//! events are delivered synchronously to registered [`EventSink`]s and
//! returned from the call.  All timing derives from frame timestamps, so
//! a recorded stream replays deterministically.

pub mod config;
pub mod features;
pub mod gesture;
pub mod replay;
pub mod tracking;

pub use config::{ConfigError, GestureConfig};
pub use gesture::{EventSink, GestureEngine, GestureEvent, PoseSource};
pub use replay::{ReplayError, ReplaySource};
pub use tracking::{Finger, Hand, HandJoint, HandPose, PoseFrame};
