//! Cursor position and sequencer phase.

use serde::{Deserialize, Serialize};

/// Position of the reveal cursor
///
/// Ordered by line, then by offset, so cursor values compare the way a
/// reveal progresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cursor {
    /// Index of the line being revealed
    pub line: usize,
    /// Units of that line revealed so far
    pub offset: usize,
}

impl Cursor {
    /// Create a cursor
    #[must_use]
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.offset)
    }
}

/// Why a sequencer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// Every line was revealed and the final pause elapsed
    Completed,
    /// Stopped by `cancel`
    Cancelled,
}

/// Sequencer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Revealing `line`, with `offset` units already shown
    Advancing {
        /// Current line
        line: usize,
        /// Units revealed in the current line
        offset: usize,
    },
    /// `line` is fully revealed and the inter-line pause is running
    Paused {
        /// Line that just finished
        line: usize,
    },
    /// Absorbing end state
    Terminal {
        /// How the run ended
        reason: TerminalReason,
    },
}

impl Phase {
    /// Check if the phase is terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    /// Line the phase refers to, if any
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Advancing { line, .. } | Self::Paused { line } => Some(*line),
            Self::Terminal { .. } => None,
        }
    }

    /// Terminal reason, if terminal
    #[must_use]
    pub const fn terminal_reason(&self) -> Option<TerminalReason> {
        match self {
            Self::Terminal { reason } => Some(*reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advancing { line, offset } => write!(f, "advancing {}:{}", line, offset),
            Self::Paused { line } => write!(f, "paused after line {}", line),
            Self::Terminal {
                reason: TerminalReason::Completed,
            } => write!(f, "completed"),
            Self::Terminal {
                reason: TerminalReason::Cancelled,
            } => write!(f, "cancelled"),
        }
    }
}
