//! Gesture engine configuration — per-machine thresholds, debounce and
//! cooldown durations, zoom sensitivity, and hand/finger assignments.
//!
//! Loaded once at engine construction and validated there; values may be
//! replaced between ticks via `GestureEngine::set_config` but never mutate
//! during a tick.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::tracking::{Finger, Hand};

// ── Errors ─────────────────────────────────────────────────

/// Configuration problems, surfaced once at construction and never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field}: duration must be finite and non-negative, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("{field}: must be finite and positive, got {value}")]
    InvalidThreshold { field: &'static str, value: f32 },

    #[error("{field}: must be within [0,1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn check_duration(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidDuration { field, value });
    }
    Ok(())
}

fn check_threshold(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidThreshold { field, value });
    }
    Ok(())
}

fn check_unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfUnitRange { field, value });
    }
    Ok(())
}

// ── Wrist flip ─────────────────────────────────────────────

/// Wrist-flip detector settings (menu toggle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WristFlipConfig {
    /// Hand whose wrist orientation is monitored.
    pub hand: Hand,
    /// Minimum angle (degrees) between the smoothed baseline and the
    /// current wrist up vector to count as a flip.
    pub flip_angle_deg: f32,
    /// Minimum time (seconds) between two flip triggers.
    pub cooldown_s: f64,
    /// Per-tick blend factor pulling the baseline toward the current
    /// vector, so slow rotation never accumulates into a false flip.
    pub baseline_blend: f32,
}

impl Default for WristFlipConfig {
    fn default() -> Self {
        Self {
            hand: Hand::Right,
            flip_angle_deg: 120.0,
            cooldown_s: 1.0,
            baseline_blend: 0.08,
        }
    }
}

impl WristFlipConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("wrist_flip.flip_angle_deg", self.flip_angle_deg)?;
        check_duration("wrist_flip.cooldown_s", self.cooldown_s)?;
        check_unit_range("wrist_flip.baseline_blend", self.baseline_blend)?;
        Ok(())
    }
}

// ── Pinch tap ──────────────────────────────────────────────

/// Pinch-tap detector settings (cursor-mode toggle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchTapConfig {
    /// Hand whose pinch is monitored.
    pub hand: Hand,
    /// Finger whose pinch strength is read.
    pub finger: Finger,
    /// Minimum pinch strength [0,1] to count as pinching.
    pub strength: f32,
    /// Maximum pinch duration (seconds) for a release to count as a tap.
    /// Longer pinches are not-a-tap and emit nothing on release.
    pub tap_max_s: f64,
}

impl Default for PinchTapConfig {
    fn default() -> Self {
        Self {
            hand: Hand::Right,
            finger: Finger::Index,
            strength: 0.8,
            tap_max_s: 0.35,
        }
    }
}

impl PinchTapConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("pinch_tap.strength", self.strength)?;
        check_duration("pinch_tap.tap_max_s", self.tap_max_s)?;
        Ok(())
    }
}

// ── Pinch hold ─────────────────────────────────────────────

/// Pinch-hold detector settings (freeze toggle).  Monitors the configured
/// finger on both hands; either hand can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchHoldConfig {
    /// Finger whose pinch strength is read on each hand.
    pub finger: Finger,
    /// Minimum pinch strength [0,1] to count as pinching.
    pub strength: f32,
    /// Continuous pinch duration (seconds) required to fire.
    pub hold_s: f64,
}

impl Default for PinchHoldConfig {
    fn default() -> Self {
        Self {
            finger: Finger::Middle,
            strength: 0.8,
            hold_s: 0.6,
        }
    }
}

impl PinchHoldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("pinch_hold.strength", self.strength)?;
        check_duration("pinch_hold.hold_s", self.hold_s)?;
        Ok(())
    }
}

// ── Zoom ───────────────────────────────────────────────────

/// Two-hand pinch-distance zoom tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Finger whose pinch must be held on both hands.
    pub finger: Finger,
    /// Minimum pinch strength [0,1] on each hand.
    pub strength: f32,
    /// Delay (seconds) after both hands pinch before deltas are emitted,
    /// so the initial grab does not jolt the zoom level.
    pub activation_delay_s: f64,
    /// Scale factor from inter-fingertip distance change (meters) to
    /// emitted zoom delta.
    pub sensitivity: f32,
    /// Per-tick clamp on the emitted delta magnitude.
    pub max_step: f32,
    /// Deltas at or below this magnitude are jitter and are suppressed.
    pub epsilon: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            finger: Finger::Index,
            strength: 0.8,
            activation_delay_s: 0.15,
            sensitivity: 4.0,
            max_step: 0.05,
            epsilon: 0.0005,
        }
    }
}

impl ZoomConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("zoom.strength", self.strength)?;
        check_duration("zoom.activation_delay_s", self.activation_delay_s)?;
        check_threshold("zoom.sensitivity", self.sensitivity)?;
        check_threshold("zoom.max_step", self.max_step)?;
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "zoom.epsilon",
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

// ── Finger count ───────────────────────────────────────────

/// Extended-finger-count classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerCountConfig {
    /// Hand whose fingers are counted.
    pub hand: Hand,
    /// Absolute wrist-to-fingertip distance (meters) above which a finger
    /// counts as extended.  Tuned to the deployment's hand scale.
    pub extend_threshold_m: f32,
    /// A new count must be stably observed for this long (seconds), and
    /// this long must have passed since the last accepted change, before
    /// it is published.
    pub debounce_s: f64,
    /// Minimum time (seconds) between two four-finger FFT triggers.
    pub fft_cooldown_s: f64,
    /// Channel id carried by emitted FFT requests.
    pub channel: u32,
}

impl Default for FingerCountConfig {
    fn default() -> Self {
        Self {
            hand: Hand::Right,
            extend_threshold_m: 0.12,
            debounce_s: 0.25,
            fft_cooldown_s: 1.5,
            channel: 0,
        }
    }
}

impl FingerCountConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("finger_count.extend_threshold_m", self.extend_threshold_m)?;
        check_duration("finger_count.debounce_s", self.debounce_s)?;
        check_duration("finger_count.fft_cooldown_s", self.fft_cooldown_s)?;
        Ok(())
    }
}

// ── Top-level config ───────────────────────────────────────

/// Complete gesture engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub wrist_flip: WristFlipConfig,
    pub pinch_tap: PinchTapConfig,
    pub pinch_hold: PinchHoldConfig,
    pub zoom: ZoomConfig,
    pub finger_count: FingerCountConfig,
}

impl GestureConfig {
    /// Check every section for out-of-range values.  Called once by
    /// `GestureEngine::new` and again on each `set_config`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wrist_flip.validate()?;
        self.pinch_tap.validate()?;
        self.pinch_hold.validate()?;
        self.zoom.validate()?;
        self.finger_count.validate()?;
        Ok(())
    }

    /// Load and validate a config from a JSON file.  Absent fields fall
    /// back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        if let Err(e) = config.validate() {
            warn!("rejected config {}: {}", path.as_ref().display(), e);
            return Err(e);
        }
        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────
