//! Command-line options shared by the UNVEIL binaries.

use crate::source::{LineSource, base_config};
use crate::ui::TuiError;
use std::path::PathBuf;
use unveil_core::{CursorPlacement, Granularity, RevealConfig};

/// Input and reveal options; flags override the config file
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RevealArgs {
    /// Text file to reveal (`-` for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Delay before each reveal unit
    #[arg(long, value_name = "MS")]
    pub char_delay: Option<f64>,
    /// Pause after each line
    #[arg(long, value_name = "MS")]
    pub line_delay: Option<f64>,
    /// Reveal unit: `char` or `grapheme`
    #[arg(long)]
    pub granularity: Option<Granularity>,
    /// Cursor glyph
    #[arg(long, value_name = "GLYPH")]
    pub cursor: Option<String>,
    /// Cursor line: `last_non_empty` or `last_line`
    #[arg(long)]
    pub placement: Option<CursorPlacement>,
}

impl RevealArgs {
    /// Apply the flags on top of `config`
    ///
    /// # Errors
    ///
    /// Returns error if the result fails validation
    pub fn apply(&self, config: RevealConfig) -> Result<RevealConfig, TuiError> {
        let char_delay = self.char_delay.unwrap_or(config.timing.char_delay_ms);
        let line_delay = self.line_delay.unwrap_or(config.timing.line_delay_ms);
        let mut config = config.with_timing(char_delay, line_delay);

        if let Some(granularity) = self.granularity {
            config = config.with_granularity(granularity);
        }
        if let Some(glyph) = &self.cursor {
            config = config.with_cursor_glyph(glyph.clone());
        }
        if let Some(placement) = self.placement {
            config = config.with_cursor_placement(placement);
        }

        config.validate()?;
        Ok(config)
    }

    /// Config for `source`: file or built-in base, then flags
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be loaded or is invalid
    pub fn resolve(&self, source: &LineSource) -> Result<RevealConfig, TuiError> {
        self.apply(base_config(source, self.config.as_deref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        reveal: RevealArgs,
    }

    fn parse(args: &[&str]) -> RevealArgs {
        Cli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .reveal
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let config = RevealConfig::new().with_timing(7.0, 70.0);
        assert_eq!(parse(&[]).apply(config.clone()).unwrap(), config);
    }

    #[test]
    fn test_flags_override() {
        let args = parse(&[
            "--char-delay",
            "10",
            "--granularity",
            "grapheme",
            "--cursor",
            "_",
            "--placement",
            "last-line",
        ]);
        let config = args.apply(RevealConfig::new().with_timing(7.0, 70.0)).unwrap();

        assert_eq!(config.timing.char_delay_ms, 10.0);
        assert_eq!(config.timing.line_delay_ms, 70.0);
        assert_eq!(config.granularity, Granularity::Grapheme);
        assert_eq!(config.cursor.glyph, "_");
        assert_eq!(config.cursor.placement, CursorPlacement::LastLine);
    }

    #[test]
    fn test_invalid_flag_values() {
        assert!(Cli::try_parse_from(["test", "--granularity", "word"]).is_err());
        assert!(Cli::try_parse_from(["test", "--char-delay", "fast"]).is_err());

        let empty_glyph = parse(&["--cursor", ""]);
        assert!(matches!(
            empty_glyph.apply(RevealConfig::default()),
            Err(TuiError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_demo_timing() {
        let config = parse(&["--line-delay", "100"]).resolve(&LineSource::Demo).unwrap();
        assert_eq!(config.timing.char_delay_ms, 22.0);
        assert_eq!(config.timing.line_delay_ms, 100.0);
    }

    #[test]
    fn test_input_flag() {
        let args = parse(&["-i", "-"]);
        assert_eq!(LineSource::from_arg(args.input), LineSource::Stdin);
    }
}
