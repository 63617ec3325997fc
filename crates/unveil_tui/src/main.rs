//! UNVEIL TUI
//!
//! Typewriter code card in the terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
use unveil_tui::demo::demo_tags;
use unveil_tui::{LineSource, RenderConfig, RevealArgs, Theme, TuiApp, TuiConfig};

#[derive(Parser)]
#[command(name = "unveil-tui")]
#[command(about = "UNVEIL - typewriter code card in the terminal", long_about = None)]
struct Args {
    #[command(flatten)]
    reveal: RevealArgs,
    /// Initial theme: `dark` or `light`
    #[arg(long, default_value = "dark")]
    theme: Theme,
    /// Redraw interval
    #[arg(long, default_value_t = 33, value_name = "MS")]
    tick_rate: u64,
    /// No colours, plain borders
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // The TUI owns the terminal, so logging is opt-in
    if let Ok(filter) = EnvFilter::try_from_env("UNVEIL_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let source = LineSource::from_arg(args.reveal.input.clone());
    let reveal = args.reveal.resolve(&source)?;
    let lines = source.load(reveal.granularity)?;
    let tags = if source == LineSource::Demo {
        demo_tags()
    } else {
        Vec::new()
    };

    let config = TuiConfig::default()
        .with_reveal(reveal)
        .with_theme(args.theme)
        .with_title(source.title())
        .with_tags(tags)
        .with_tick_rate(args.tick_rate);
    let config = if args.plain {
        config.with_render(RenderConfig::plain())
    } else {
        config
    };

    let mut app = TuiApp::new(lines, config)?;
    app.run()?;

    Ok(())
}
