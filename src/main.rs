//! handwave CLI — replay a recorded pose stream through the gesture
//! engine and print the recognized events.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use handwave::gesture::{EventSink, GestureEvent, PoseSource};
use handwave::{GestureConfig, GestureEngine, ReplaySource};

#[derive(Parser, Debug)]
#[command(name = "handwave", version, about = "Hand-skeleton gesture recognition engine")]
struct Cli {
    /// JSONL recording of pose frames (one PoseFrame per line)
    #[arg(long)]
    input: PathBuf,

    /// JSON gesture configuration (defaults used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

/// Sink printing each event as it is delivered.
struct Printer {
    json: bool,
}

impl EventSink for Printer {
    fn on_gesture(&mut self, event: &GestureEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(_) => println!("{event:?}"),
            }
        } else {
            match event {
                GestureEvent::ZoomDelta { delta, timestamp_s } => {
                    println!("[{timestamp_s:8.3}s] zoom-delta {delta:+.4}")
                }
                GestureEvent::FftRequest {
                    channel,
                    timestamp_s,
                } => println!("[{timestamp_s:8.3}s] fft-request channel={channel}"),
                GestureEvent::FingerCountChanged {
                    hand,
                    count,
                    timestamp_s,
                } => println!(
                    "[{timestamp_s:8.3}s] finger-count-changed {}={count}",
                    hand.as_str()
                ),
                other => println!("[{:8.3}s] {}", other.timestamp_s(), other.kind()),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handwave=info".into()),
        )
        .init();

    info!("handwave v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => GestureConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GestureConfig::default(),
    };

    let mut engine = GestureEngine::new(config)?;
    engine.subscribe(Box::new(Printer { json: cli.json }));

    let mut source = ReplaySource::from_path(&cli.input)
        .with_context(|| format!("loading recording {}", cli.input.display()))?;

    while let Some(frame) = source.next_frame() {
        engine.tick(&frame);
    }

    info!("done: {}", engine.summary());
    Ok(())
}
