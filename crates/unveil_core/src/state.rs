//! Reveal state: the per-line revealed prefixes.

use crate::lines::LineSet;
use serde::{Deserialize, Serialize};

/// Snapshot of how much of each line has been revealed
///
/// Always the same length as the line set it was created for. Element `i`
/// is a prefix of line `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealState {
    lines: Vec<String>,
}

impl RevealState {
    /// All-empty state for a line set
    #[must_use]
    pub fn for_lines(lines: &LineSet) -> Self {
        Self {
            lines: vec![String::new(); lines.len()],
        }
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True for a zero-line state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Revealed text of one line
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All revealed lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Owned copy of the revealed lines
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Append one reveal unit to a line
    ///
    /// Returns false (and changes nothing) when the index is out of bounds.
    pub fn push_unit(&mut self, index: usize, unit: &str) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.push_str(unit);
                true
            }
            None => false,
        }
    }

    /// Total revealed characters across all lines
    #[must_use]
    pub fn revealed_chars(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }

    /// Index of the last line with any revealed text
    #[must_use]
    pub fn last_non_empty(&self) -> Option<usize> {
        self.lines.iter().rposition(|l| !l.is_empty())
    }

    /// Check that every line is a prefix of the matching source line
    #[must_use]
    pub fn is_prefix_of(&self, source: &LineSet) -> bool {
        self.lines.len() == source.len()
            && self
                .lines
                .iter()
                .zip(source.iter())
                .all(|(revealed, full)| full.starts_with(revealed.as_str()))
    }

    /// Check whether every line is fully revealed
    #[must_use]
    pub fn is_complete_for(&self, source: &LineSet) -> bool {
        self.lines.len() == source.len()
            && self.lines.iter().zip(source.iter()).all(|(r, full)| r == full)
    }
}

impl From<Vec<String>> for RevealState {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a RevealState {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
