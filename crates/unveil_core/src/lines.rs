//! Line sets: the fixed, ordered text a sequencer reveals.
//!
//! Each line is split once, at construction, into reveal units. A unit is
//! either a Unicode scalar value or an extended grapheme cluster, so a
//! revealed prefix always ends on a UTF-8 boundary.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Step size of a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One `char` per step
    #[default]
    Char,
    /// One extended grapheme cluster per step
    Grapheme,
}

impl Granularity {
    /// Byte offset of the end of every unit in `text`
    fn unit_ends(self, text: &str) -> Vec<usize> {
        match self {
            Self::Char => text
                .char_indices()
                .map(|(start, c)| start + c.len_utf8())
                .collect(),
            Self::Grapheme => text
                .grapheme_indices(true)
                .map(|(start, g)| start + g.len())
                .collect(),
        }
    }

    /// Config/CLI name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Grapheme => "grapheme",
        }
    }
}

impl FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "char" | "character" => Ok(Self::Char),
            "grapheme" => Ok(Self::Grapheme),
            other => Err(CoreError::UnknownGranularity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Line {
    text: String,
    /// Byte offset where unit `k` ends; `ends.len()` is the unit count
    ends: Vec<usize>,
}

impl Line {
    fn new(text: String, granularity: Granularity) -> Self {
        let ends = granularity.unit_ends(&text);
        Self { text, ends }
    }

    fn prefix(&self, units: usize) -> &str {
        match units {
            0 => "",
            n if n >= self.ends.len() => &self.text,
            n => &self.text[..self.ends[n - 1]],
        }
    }

    fn unit(&self, index: usize) -> Option<&str> {
        let end = *self.ends.get(index)?;
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        Some(&self.text[start..end])
    }
}

/// Ordered, immutable sequence of lines to reveal
///
/// Cloning is cheap: all clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSet {
    lines: Arc<[Line]>,
    granularity: Granularity,
}

impl LineSet {
    /// Create a line set revealed one `char` at a time
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_granularity(lines, Granularity::Char)
    }

    /// Create a line set with an explicit reveal unit
    #[must_use]
    pub fn with_granularity<I, S>(lines: I, granularity: Granularity) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|line| Line::new(line.into(), granularity))
            .collect();
        Self { lines, granularity }
    }

    /// A line set with zero lines
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Split a text document into lines
    ///
    /// A trailing newline does not produce an extra empty line, interior
    /// empty lines are kept, and `\r\n` endings are accepted.
    #[must_use]
    pub fn from_text(text: &str, granularity: Granularity) -> Self {
        Self::with_granularity(text.lines(), granularity)
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no lines at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reveal unit used for every line
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Full text of a line
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.text.as_str())
    }

    /// Number of reveal units in a line (0 when out of bounds)
    #[must_use]
    pub fn unit_count(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |l| l.ends.len())
    }

    /// The first `units` units of a line, clamped to the line length
    #[must_use]
    pub fn prefix(&self, index: usize, units: usize) -> &str {
        self.lines.get(index).map_or("", |l| l.prefix(units))
    }

    /// A single reveal unit
    #[must_use]
    pub fn unit(&self, index: usize, unit: usize) -> Option<&str> {
        self.lines.get(index).and_then(|l| l.unit(unit))
    }

    /// Sum of unit counts over all lines
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.lines.iter().map(|l| l.ends.len()).sum()
    }

    /// Iterate over line texts in reveal order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

impl Default for LineSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_set_basic() {
        let lines = LineSet::new(["ab", "", "c"]);
        assert_eq!(lines.len(), 3);
        assert!(!lines.is_empty());
        assert_eq!(lines.line(0), Some("ab"));
        assert_eq!(lines.line(1), Some(""));
        assert_eq!(lines.line(3), None);
        assert_eq!(lines.unit_count(0), 2);
        assert_eq!(lines.unit_count(1), 0);
        assert_eq!(lines.unit_count(9), 0);
        assert_eq!(lines.total_units(), 3);
    }

    #[test]
    fn test_line_set_empty() {
        let lines = LineSet::empty();
        assert!(lines.is_empty());
        assert_eq!(lines.total_units(), 0);
        assert_eq!(lines, LineSet::default());
    }

    #[test]
    fn test_prefix_clamps() {
        let lines = LineSet::new(["hello"]);
        assert_eq!(lines.prefix(0, 0), "");
        assert_eq!(lines.prefix(0, 3), "hel");
        assert_eq!(lines.prefix(0, 5), "hello");
        assert_eq!(lines.prefix(0, 50), "hello");
        assert_eq!(lines.prefix(4, 2), "");
    }

    #[test]
    fn test_char_units_respect_utf8() {
        let lines = LineSet::new(["héllo·"]);
        assert_eq!(lines.unit_count(0), 6);
        assert_eq!(lines.prefix(0, 2), "hé");
        assert_eq!(lines.unit(0, 5), Some("·"));
        assert_eq!(lines.unit(0, 6), None);
    }

    #[test]
    fn test_grapheme_units_keep_clusters() {
        // "e" + combining acute accent is one grapheme but two chars
        let text = "e\u{301}x";
        let by_char = LineSet::new([text]);
        let by_grapheme = LineSet::with_granularity([text], Granularity::Grapheme);

        assert_eq!(by_char.unit_count(0), 3);
        assert_eq!(by_grapheme.unit_count(0), 2);
        assert_eq!(by_grapheme.prefix(0, 1), "e\u{301}");
        assert_eq!(by_grapheme.granularity(), Granularity::Grapheme);
    }

    #[test]
    fn test_from_text() {
        let lines = LineSet::from_text("a\n\nb\n", Granularity::Char);
        assert_eq!(lines.iter().collect::<Vec<_>>(), vec!["a", "", "b"]);

        let crlf = LineSet::from_text("x\r\ny", Granularity::Char);
        assert_eq!(crlf.iter().collect::<Vec<_>>(), vec!["x", "y"]);

        assert!(LineSet::from_text("", Granularity::Char).is_empty());
    }

    #[test]
    fn test_clone_shares_storage() {
        let lines = LineSet::new(["a", "b"]);
        let copy = lines.clone();
        assert!(Arc::ptr_eq(&lines.lines, &copy.lines));
    }

    #[test]
    fn test_collect() {
        let lines: LineSet = vec!["x".to_string(), "y".to_string()].into_iter().collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("char".parse::<Granularity>().unwrap(), Granularity::Char);
        assert_eq!(" Grapheme ".parse::<Granularity>().unwrap(), Granularity::Grapheme);
        assert!("word".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Grapheme.to_string(), "grapheme");
    }
}
