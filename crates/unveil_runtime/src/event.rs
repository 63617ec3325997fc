//! Events emitted by a running reveal.

use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;
use unveil_core::{Cursor, RevealState};

/// One emission of a reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RevealEvent {
    /// A unit was revealed; carries the full updated state
    Revealed {
        /// Cursor after the advance
        cursor: Cursor,
        /// Every line's revealed prefix
        state: RevealState,
    },
    /// The inter-line pause ended and the next line began
    LineStarted {
        /// Index of the new current line
        line: usize,
    },
    /// The last pause ended; nothing follows
    Completed,
    /// The reveal was cancelled; nothing follows
    Cancelled,
}

impl RevealEvent {
    /// State carried by a `Revealed` event
    #[must_use]
    pub fn state(&self) -> Option<&RevealState> {
        match self {
            Self::Revealed { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Check if this is the last event of a run
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// An event placed on the reveal's virtual clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedEvent {
    /// Offset from the start of the reveal
    #[serde(rename = "offset_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
    /// The event
    #[serde(flatten)]
    pub event: RevealEvent,
}

fn serialize_millis<S: Serializer>(at: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(at.as_secs_f64() * 1_000.0)
}
