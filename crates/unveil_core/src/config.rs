//! Reveal configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use crate::error::{CoreError, CoreResult};
use crate::lines::{Granularity, LineSet};
use crate::timing::Timing;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Timing section, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before each reveal unit
    pub char_delay_ms: f64,
    /// Pause after each line
    pub line_delay_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: Timing::DEFAULT_CHAR_DELAY_MS as f64,
            line_delay_ms: Timing::DEFAULT_LINE_DELAY_MS as f64,
        }
    }
}

impl From<TimingConfig> for Timing {
    fn from(config: TimingConfig) -> Self {
        Timing::from_millis(config.char_delay_ms, config.line_delay_ms)
    }
}

/// Where a renderer draws the cursor glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorPlacement {
    /// After the last line that has revealed text
    #[default]
    LastNonEmpty,
    /// After the last line of the set, even while it is still empty
    LastLine,
}

impl FromStr for CursorPlacement {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "last_non_empty" => Ok(Self::LastNonEmpty),
            "last_line" => Ok(Self::LastLine),
            other => Err(CoreError::UnknownPlacement(other.to_string())),
        }
    }
}

/// Cursor section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Glyph appended to the cursor line
    pub glyph: String,
    /// Which line carries the glyph
    pub placement: CursorPlacement,
    /// Full blink cycle; 0 keeps the cursor always visible
    pub blink_period_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            glyph: "█".to_string(),
            placement: CursorPlacement::default(),
            blink_period_ms: 1_000,
        }
    }
}

/// Top-level reveal configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delays
    pub timing: TimingConfig,
    /// Reveal unit
    pub granularity: Granularity,
    /// Cursor rendering
    pub cursor: CursorConfig,
}

impl RevealConfig {
    /// Create the default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns error if the document is malformed or fails validation
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that cannot be clamped
    ///
    /// Delays are never rejected; they are clamped when converted to
    /// [`Timing`].
    ///
    /// # Errors
    ///
    /// Returns error if the cursor glyph is empty or spans more than one line
    pub fn validate(&self) -> CoreResult<()> {
        if self.cursor.glyph.is_empty() {
            return Err(CoreError::Validation {
                field: "cursor.glyph".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.cursor.glyph.contains(['\n', '\r']) {
            return Err(CoreError::Validation {
                field: "cursor.glyph".to_string(),
                reason: "must not contain line breaks".to_string(),
            });
        }
        Ok(())
    }

    /// Clamped timing
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing.into()
    }

    /// Build a line set using the configured reveal unit
    #[must_use]
    pub fn line_set<I, S>(&self, lines: I) -> LineSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LineSet::with_granularity(lines, self.granularity)
    }

    /// Override delays
    #[must_use]
    pub fn with_timing(mut self, char_delay_ms: f64, line_delay_ms: f64) -> Self {
        self.timing = TimingConfig {
            char_delay_ms,
            line_delay_ms,
        };
        self
    }

    /// Override the reveal unit
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Override the cursor glyph
    #[must_use]
    pub fn with_cursor_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.cursor.glyph = glyph.into();
        self
    }

    /// Override the cursor placement
    #[must_use]
    pub fn with_cursor_placement(mut self, placement: CursorPlacement) -> Self {
        self.cursor.placement = placement;
        self
    }
}
