//! Cursor blink phase.

use std::time::Duration;

/// Blink schedule of the typing cursor
///
/// The cursor is visible for the first half of every period and hidden for
/// the second half. A zero period never blinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkClock {
    period: Duration,
}

impl BlinkClock {
    /// Default blink period
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Create a blink clock
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Create from a period in milliseconds
    #[must_use]
    pub const fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Blink period
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether the cursor shows at `elapsed`
    #[must_use]
    pub fn is_visible(&self, elapsed: Duration) -> bool {
        let period = self.period.as_nanos();
        if period == 0 {
            return true;
        }
        elapsed.as_nanos() % period < period.div_ceil(2)
    }

    /// Time from `elapsed` until visibility next flips
    #[must_use]
    pub fn until_toggle(&self, elapsed: Duration) -> Option<Duration> {
        let period = self.period.as_nanos();
        if period == 0 {
            return None;
        }
        let half = period.div_ceil(2);
        let phase = elapsed.as_nanos() % period;
        let remaining = if phase < half { half - phase } else { period - phase };
        Some(Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX)))
    }
}

impl Default for BlinkClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}
