//! Cursor glyph decoration.
//!
//! The sequencer only reports prefixes. Where the typing cursor is drawn is
//! decided here, from the latest [`RevealState`].

use unicode_width::UnicodeWidthStr;
use unveil_core::{CursorConfig, CursorPlacement, RevealState};

/// Glyph and placement of the typing cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStyle {
    glyph: String,
    placement: CursorPlacement,
}

impl CursorStyle {
    /// Create a cursor style
    #[must_use]
    pub fn new(glyph: impl Into<String>, placement: CursorPlacement) -> Self {
        Self {
            glyph: glyph.into(),
            placement,
        }
    }

    /// The glyph
    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Placement rule
    #[must_use]
    pub const fn placement(&self) -> CursorPlacement {
        self.placement
    }

    /// Terminal columns the glyph occupies
    #[must_use]
    pub fn width(&self) -> usize {
        self.glyph.width()
    }

    /// Line that carries the cursor
    ///
    /// With `LastNonEmpty`, a state where nothing is revealed yet puts the
    /// cursor on the first line. A zero-line state has no cursor.
    #[must_use]
    pub fn line_for(&self, state: &RevealState) -> Option<usize> {
        if state.is_empty() {
            return None;
        }
        match self.placement {
            CursorPlacement::LastNonEmpty => Some(state.last_non_empty().unwrap_or(0)),
            CursorPlacement::LastLine => Some(state.len() - 1),
        }
    }

    /// Revealed lines with the cursor appended
    ///
    /// A hidden cursor (blink off phase) is replaced by blanks of the same
    /// width so the text does not shift.
    #[must_use]
    pub fn decorate(&self, state: &RevealState, visible: bool) -> Vec<String> {
        let target = self.line_for(state);
        state
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if Some(i) != target {
                    return line.clone();
                }
                let mut decorated = line.clone();
                if visible {
                    decorated.push_str(&self.glyph);
                } else {
                    decorated.extend(std::iter::repeat_n(' ', self.width()));
                }
                decorated
            })
            .collect()
    }
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self::from(&CursorConfig::default())
    }
}

impl From<&CursorConfig> for CursorStyle {
    fn from(config: &CursorConfig) -> Self {
        Self::new(config.glyph.clone(), config.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(lines: &[&str]) -> RevealState {
        RevealState::from(lines.iter().map(|s| (*s).to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_default_style() {
        let style = CursorStyle::default();
        assert_eq!(style.glyph(), "█");
        assert_eq!(style.placement(), CursorPlacement::LastNonEmpty);
        assert_eq!(style.width(), 1);
    }

    #[test]
    fn test_last_non_empty_placement() {
        let style = CursorStyle::default();
        assert_eq!(style.line_for(&state(&["ab", "", ""])), Some(0));
        assert_eq!(style.line_for(&state(&["ab", "c", ""])), Some(1));
        assert_eq!(style.line_for(&state(&["", ""])), Some(0));
        assert_eq!(style.line_for(&state(&[])), None);
    }

    #[test]
    fn test_last_line_placement() {
        let style = CursorStyle::new("_", CursorPlacement::LastLine);
        assert_eq!(style.line_for(&state(&["ab", "", ""])), Some(2));
        assert_eq!(style.decorate(&state(&["ab", ""]), true), vec!["ab", "_"]);
    }

    #[test]
    fn test_decorate_visible_and_hidden() {
        let style = CursorStyle::default();
        let revealed = state(&["ab", "c", ""]);

        assert_eq!(style.decorate(&revealed, true), vec!["ab", "c█", ""]);
        assert_eq!(style.decorate(&revealed, false), vec!["ab", "c ", ""]);
    }

    #[test]
    fn test_wide_glyph_keeps_width_when_hidden() {
        let style = CursorStyle::new("▮▮", CursorPlacement::LastNonEmpty);
        assert_eq!(style.width(), 2);
        assert_eq!(style.decorate(&state(&["x"]), false), vec!["x  "]);
    }

    #[test]
    fn test_decorate_empty_state() {
        assert!(CursorStyle::default().decorate(&state(&[]), true).is_empty());
    }
}
