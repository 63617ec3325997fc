//! Where reveal lines and config come from.

use crate::demo::{DEMO_TITLE, demo_config, demo_lines};
use crate::ui::TuiError;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use unveil_core::{Granularity, LineSet, RevealConfig};

/// Origin of the lines to reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSource {
    /// Built-in demo card
    Demo,
    /// UTF-8 text file, one reveal line per text line
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl LineSource {
    /// Source named by an `--input` argument; `-` means stdin
    #[must_use]
    pub fn from_arg(input: Option<PathBuf>) -> Self {
        match input {
            None => Self::Demo,
            Some(path) if path.as_os_str() == "-" => Self::Stdin,
            Some(path) => Self::File(path),
        }
    }

    /// Like `from_arg`, but piped stdin is used when no path is given
    #[must_use]
    pub fn detect(input: Option<PathBuf>) -> Self {
        match Self::from_arg(input) {
            Self::Demo if !std::io::stdin().is_terminal() => Self::Stdin,
            source => source,
        }
    }

    /// Read the lines
    ///
    /// # Errors
    ///
    /// Returns error if the file or stdin cannot be read as UTF-8
    pub fn load(&self, granularity: Granularity) -> Result<LineSet, TuiError> {
        match self {
            Self::Demo => Ok(demo_lines(granularity)),
            Self::File(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| TuiError::Io(format!("{}: {e}", path.display())))?;
                Ok(LineSet::from_text(&text, granularity))
            }
            Self::Stdin => read_lines(std::io::stdin().lock(), granularity),
        }
    }

    /// Title for the card
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Demo => DEMO_TITLE.to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Read a whole text document into lines
///
/// # Errors
///
/// Returns error on I/O failure or invalid UTF-8
pub fn read_lines(mut reader: impl Read, granularity: Granularity) -> Result<LineSet, TuiError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| TuiError::Io(e.to_string()))?;
    Ok(LineSet::from_text(&text, granularity))
}

/// Load a JSON config file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a valid config
pub fn load_config(path: &Path) -> Result<RevealConfig, TuiError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TuiError::Io(format!("{}: {e}", path.display())))?;
    Ok(RevealConfig::from_json(&json)?)
}

/// Starting config before command-line overrides
///
/// An explicit config file wins; otherwise the demo card keeps its own
/// timing and everything else uses the defaults.
///
/// # Errors
///
/// Returns error if the config file cannot be loaded
pub fn base_config(source: &LineSource, config: Option<&Path>) -> Result<RevealConfig, TuiError> {
    match (config, source) {
        (Some(path), _) => load_config(path),
        (None, LineSource::Demo) => Ok(demo_config()),
        (None, _) => Ok(RevealConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use unveil_core::CursorPlacement;

    #[test]
    fn test_from_arg() {
        assert_eq!(LineSource::from_arg(None), LineSource::Demo);
        assert_eq!(LineSource::from_arg(Some("-".into())), LineSource::Stdin);
        assert_eq!(
            LineSource::from_arg(Some("card.txt".into())),
            LineSource::File("card.txt".into())
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(LineSource::Demo.title(), DEMO_TITLE);
        assert_eq!(LineSource::Stdin.title(), "<stdin>");
        assert_eq!(LineSource::File("a/b.rs".into()).title(), "a/b.rs");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "fn main() {{\n\n}}\n").unwrap();

        let lines = LineSource::File(file.path().to_path_buf())
            .load(Granularity::Char)
            .unwrap();
        assert_eq!(lines.iter().collect::<Vec<_>>(), vec!["fn main() {", "", "}"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineSource::File(dir.path().join("missing.txt"))
            .load(Granularity::Char)
            .unwrap_err();
        assert!(matches!(err, TuiError::Io(_)));
    }

    #[test]
    fn test_read_lines() {
        let lines = read_lines("a\r\nb".as_bytes(), Granularity::Grapheme).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.granularity(), Granularity::Grapheme);

        let invalid: &[u8] = &[0xff, 0xfe];
        assert!(read_lines(invalid, Granularity::Char).is_err());
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timing":{{"char_delay_ms":5}},"cursor":{{"placement":"last_line"}}}}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.timing.char_delay_ms, 5.0);
        assert_eq!(config.timing.line_delay_ms, 500.0);
        assert_eq!(config.cursor.placement, CursorPlacement::LastLine);
    }

    #[test]
    fn test_base_config() {
        let demo = base_config(&LineSource::Demo, None).unwrap();
        assert_eq!(demo.timing.char_delay_ms, 22.0);

        let plain = base_config(&LineSource::Stdin, None).unwrap();
        assert_eq!(plain, RevealConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"granularity":"grapheme"}}"#).unwrap();
        let loaded = base_config(&LineSource::Demo, Some(file.path())).unwrap();
        assert_eq!(loaded.granularity, Granularity::Grapheme);
        assert_eq!(loaded.timing.char_delay_ms, 25.0);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(load_config(file.path()), Err(TuiError::Config(_))));
    }
}
