use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use toybot::{Agent, Surface};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod session;
mod transcript;

use session::Mode;

#[derive(Parser)]
#[command(name = "toybot")]
#[command(about = "Drive a toy robot on a table from a command file or stdin")]
struct Cmd {
    /// Command file; reads commands interactively when omitted
    file: Option<PathBuf>,

    /// Table width (x extent)
    #[arg(long, default_value_t = 5.0)]
    width: f64,

    /// Table length (y extent)
    #[arg(long, default_value_t = 5.0)]
    length: f64,

    /// Write a JSON transcript of executed lines (plus provenance sidecar)
    #[arg(long)]
    transcript: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cmd = Cmd::parse();

    let table = Surface::new(cmd.width, cmd.length).context("invalid table dimensions")?;
    let mut robot = Agent::new(Some(&table));
    tracing::info!(width = table.width(), length = table.length(), "table ready");

    let stdout = io::stdout();
    let entries = match &cmd.file {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            tracing::info!(file = %path.display(), "file mode");
            session::run(&mut robot, BufReader::new(file), stdout.lock(), Mode::File)?
        }
        None => session::run(&mut robot, io::stdin().lock(), stdout.lock(), Mode::Interactive)?,
    };

    if let Some(out) = &cmd.transcript {
        let params = serde_json::json!({
            "width": cmd.width,
            "length": cmd.length,
            "input": cmd.file.as_ref().map(|p| p.to_string_lossy().into_owned()),
        });
        let sidecar = transcript::write_transcript(out, &entries, params)?;
        tracing::info!(transcript = %out.display(), sidecar = %sidecar.display(), "transcript written");
    }
    Ok(())
}
