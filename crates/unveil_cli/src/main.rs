//! UNVEIL CLI
//!
//! Typewriter reveal on plain stdout, and timeline planning.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod plan;
mod play;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unveil_core::{LineSet, RevealConfig, TerminalReason};
use unveil_runtime::{RevealSequencer, spawn};
use unveil_tui::{LineSource, RevealArgs, TuiError};

use crate::play::PlayWriter;

#[derive(Parser)]
#[command(name = "unveil")]
#[command(about = "UNVEIL - staged typewriter text reveal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type the lines out on stdout
    Play {
        #[command(flatten)]
        reveal: RevealArgs,
    },
    /// Print every event of a reveal with its offset, without waiting
    Plan {
        #[command(flatten)]
        reveal: RevealArgs,
        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_env("UNVEIL_LOG").unwrap_or_else(|_| EnvFilter::new("unveil=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play { reveal } => play(&reveal).await,
        Commands::Plan { reveal, json } => {
            plan(&reveal, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolve the input and config named by `args` and read the lines
fn load(args: &RevealArgs) -> Result<(RevealConfig, LineSet), TuiError> {
    let source = LineSource::detect(args.input.clone());
    let config = args.resolve(&source)?;
    let lines = source.load(config.granularity)?;
    tracing::debug!(
        source = %source.title(),
        lines = lines.len(),
        timing = %config.timing(),
        "Loaded"
    );
    Ok((config, lines))
}

async fn play(args: &RevealArgs) -> Result<ExitCode> {
    let (config, lines) = load(args)?;

    let stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    let mut writer = PlayWriter::new(stdout, config.cursor.glyph.clone(), styled);
    if !lines.is_empty() {
        writer.start()?;
    }

    let (handle, mut events) = spawn(lines, config.timing());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(event) => writer.handle(&event)?,
                None => break,
            },
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                handle.cancel();
            }
        }
    }

    match handle.finished().await {
        TerminalReason::Completed => Ok(ExitCode::SUCCESS),
        TerminalReason::Cancelled => Ok(ExitCode::from(130)),
    }
}

fn plan(args: &RevealArgs, json: bool) -> Result<()> {
    let (config, lines) = load(args)?;

    let events = RevealSequencer::new(lines, config.timing()).timeline();
    let stdout = std::io::stdout().lock();
    if json {
        plan::write_json(stdout, &events)?;
    } else {
        plan::write_text(stdout, &events)?;
    }

    Ok(())
}
