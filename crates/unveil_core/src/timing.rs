//! Timing for reveals.
//!
//! Delays are plain `std::time::Duration`s. Construction from milliseconds
//! never fails: negative and non-finite inputs become zero, and values past
//! the range of `Duration` saturate.

use crate::lines::LineSet;
use std::time::Duration;

/// Convert a millisecond value into a delay, clamping into range
#[must_use]
pub fn clamp_millis(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    let secs = (ms / 1_000.0).floor();
    if secs >= u64::MAX as f64 {
        return Duration::MAX;
    }
    // Whole milliseconds stay exact; fractions round to the nearest nanosecond
    let nanos = ((ms - secs * 1_000.0) * 1_000_000.0).round() as u64;
    Duration::from_secs(secs as u64).saturating_add(Duration::from_nanos(nanos))
}

/// Per-unit delay and inter-line pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timing {
    /// Delay before each reveal unit
    pub char_delay: Duration,
    /// Pause after a line is fully revealed
    pub line_delay: Duration,
}

impl Timing {
    /// Default per-unit delay in milliseconds
    pub const DEFAULT_CHAR_DELAY_MS: u64 = 25;

    /// Default inter-line pause in milliseconds
    pub const DEFAULT_LINE_DELAY_MS: u64 = 500;

    /// Create timing from durations
    #[must_use]
    pub const fn new(char_delay: Duration, line_delay: Duration) -> Self {
        Self {
            char_delay,
            line_delay,
        }
    }

    /// Create timing from milliseconds, clamping invalid values to zero
    #[must_use]
    pub fn from_millis(char_delay_ms: f64, line_delay_ms: f64) -> Self {
        Self::new(clamp_millis(char_delay_ms), clamp_millis(line_delay_ms))
    }

    /// No delays at all
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Longest a full reveal of `lines` can take
    ///
    /// Sum over lines of `units * char_delay + line_delay`.
    #[must_use]
    pub fn upper_bound(&self, lines: &LineSet) -> Duration {
        (0..lines.len()).fold(Duration::ZERO, |total, index| {
            let units = u32::try_from(lines.unit_count(index)).unwrap_or(u32::MAX);
            total
                .saturating_add(self.char_delay.saturating_mul(units))
                .saturating_add(self.line_delay)
        })
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_CHAR_DELAY_MS),
            Duration::from_millis(Self::DEFAULT_LINE_DELAY_MS),
        )
    }
}

impl std::fmt::Display for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}ms/unit, {}ms/line",
            self.char_delay.as_millis(),
            self.line_delay.as_millis()
        )
    }
}
