//! Recorded pose-stream replay — a `PoseSource` over a JSONL file, one
//! `PoseFrame` per line.
//!
//! Because the engine derives every duration from frame timestamps, a
//! replayed recording reproduces the exact event stream of the original
//! session, which makes recorded streams the primary end-to-end test
//! vehicle.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::gesture::PoseSource;
use crate::tracking::PoseFrame;

/// Problems loading a recorded pose stream.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad frame on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// Pose source that replays a pre-loaded frame sequence.
#[derive(Debug)]
pub struct ReplaySource {
    frames: std::vec::IntoIter<PoseFrame>,
}

impl ReplaySource {
    /// Load a JSONL recording.  Blank lines are skipped; any malformed
    /// line aborts the load with its line number.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut frames = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: PoseFrame =
                serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
                    line: i + 1,
                    source,
                })?;
            frames.push(frame);
        }
        info!(
            "loaded {} frame(s) from {}",
            frames.len(),
            path.as_ref().display()
        );
        Ok(Self::from_frames(frames))
    }

    /// Replay an in-memory frame sequence.
    pub fn from_frames(frames: Vec<PoseFrame>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }

    /// Frames remaining to be replayed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseSource for ReplaySource {
    fn next_frame(&mut self) -> Option<PoseFrame> {
        self.frames.next()
    }
}

// ── Tests ──────────────────────────────────────────────────
