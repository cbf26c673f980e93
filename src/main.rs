//! Replays a recorded input script onto a pixel surface and writes a PNG.
//!
//! Usage: `paintkit <script.json> [out.png] [--config <path>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paintkit::{init_logging, InputEvent, PaintConfig, PaintSession, PixmapSurface, VERSION};
use tracing::{info, warn};

const DEFAULT_OUTPUT: &str = "paintkit.png";

#[derive(Parser, Debug, PartialEq)]
#[command(
    name = "paintkit",
    version,
    about = "Replay a recorded input script onto a canvas and write it as PNG"
)]
struct Args {
    /// JSON list of input events
    script: PathBuf,

    /// PNG file to write
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Configuration file (JSON or TOML). Defaults to the per-user config.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<PaintConfig> {
    match path {
        Some(path) => PaintConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(PaintConfig::default_path()
            .map(|path| PaintConfig::load_or_default(&path))
            .unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();
    info!("PaintKit {} replaying {}", VERSION, args.script.display());

    let config = load_config(args.config.as_ref())?;
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let events: Vec<InputEvent> =
        serde_json::from_str(&script).context("Failed to parse input script")?;

    let surface = PixmapSurface::new(config.canvas.width, config.canvas.height)?;
    let mut session = PaintSession::from_config(surface, &config)?;
    for event in &events {
        session.handle(event);
        session.poll_responses();
    }
    session.wait_for_responses().await;

    for notice in session.take_notices() {
        warn!("{}", notice);
    }
    info!(
        "Replayed {} events into {} shapes",
        events.len(),
        session.controller().scene().shapes().len()
    );

    session
        .surface()
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());
    Ok(())
}
