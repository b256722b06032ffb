//! Headless behaviour replay
//!
//! Runs a YAML event script against recording behaviours and prints every
//! behaviour call.
//!
//! Usage:
//!   cargo run --bin behaviour-replay -- samples/two_windows.yaml
//!   cargo run --bin behaviour-replay -- samples/usage.yaml --format json
//!   RUST_LOG=debug cargo run --bin behaviour-replay -- samples/usage.yaml --log-file replay.log

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use gesture_dispatch::config::DispatchConfig;
use gesture_dispatch::replay::{self, Script};

#[derive(Parser, Debug)]
#[command(
    name = "behaviour-replay",
    version,
    about = "Replay scripted input against named behaviours"
)]
struct Args {
    /// Event script (YAML)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Output format for recorded calls
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Dispatch settings overriding the script's own
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write debug logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = gesture_dispatch::tracing::init(args.log_file.as_deref());

    let mut script = Script::load(&args.script)
        .with_context(|| format!("Failed to load script {}", args.script.display()))?;
    if let Some(path) = &args.config {
        script.config = Some(DispatchConfig::load(path));
    }

    let records = replay::run(&script)
        .with_context(|| format!("Failed to replay {}", args.script.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        match args.format {
            Format::Text => writeln!(out, "{}", record)?,
            Format::Json => writeln!(out, "{}", serde_json::to_string(record)?)?,
        }
    }

    tracing::info!("Replayed {} event(s)", script.events.len());
    Ok(())
}
