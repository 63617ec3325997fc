//! Reveal monitor for emission metrics.
//!
//! Counts what a run has emitted so renderers can show progress.

use crate::event::RevealEvent;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Per-run emission counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Units revealed so far
    pub units_revealed: u64,
    /// Lines whose pause has finished
    pub lines_completed: u64,
    /// Paused → Advancing transitions
    pub line_transitions: u64,
    /// Events published to observers
    pub events_emitted: u64,
    /// Sequencer transitions performed
    pub ticks: u64,
    /// Set once the run was cancelled
    pub cancelled: bool,
    /// Units in the whole line set
    pub total_units: u64,
}

impl Metrics {
    /// Create metrics for a run of `total_units`
    #[must_use]
    pub fn new(total_units: usize) -> Self {
        Self {
            total_units: total_units as u64,
            ..Self::default()
        }
    }

    /// Record a published event
    pub fn record(&mut self, event: &RevealEvent) {
        self.events_emitted += 1;
        match event {
            RevealEvent::Revealed { .. } => {
                self.units_revealed += 1;
                self.ticks += 1;
            }
            RevealEvent::LineStarted { .. } => {
                self.line_transitions += 1;
                self.lines_completed += 1;
                self.ticks += 1;
            }
            RevealEvent::Completed => {
                self.lines_completed += 1;
                self.ticks += 1;
            }
            RevealEvent::Cancelled => self.cancelled = true,
        }
    }

    /// Revealed fraction of the line set (0.0 - 1.0)
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_units == 0 {
            return 1.0;
        }
        self.units_revealed as f64 / self.total_units as f64
    }
}

/// Reveal monitor
///
/// Owns the metrics of one run and its start instant.
#[derive(Debug, Clone)]
pub struct RevealMonitor {
    metrics: Metrics,
    start_time: Instant,
}

impl RevealMonitor {
    /// Start monitoring a run
    #[must_use]
    pub fn new(total_units: usize) -> Self {
        Self {
            metrics: Metrics::new(total_units),
            start_time: Instant::now(),
        }
    }

    /// Record a published event
    pub fn record(&mut self, event: &RevealEvent) {
        self.metrics.record(event);
    }

    /// Current metrics
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Time since the run started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::{Cursor, RevealState};

    fn revealed() -> RevealEvent {
        RevealEvent::Revealed {
            cursor: Cursor::new(0, 1),
            state: RevealState::from(vec!["a".to_string()]),
        }
    }

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(4);
        assert_eq!(metrics.total_units, 4);
        assert_eq!(metrics.units_revealed, 0);
        assert_eq!(metrics.progress(), 0.0);
        assert!(!metrics.cancelled);
    }

    #[test]
    fn test_metrics_record() {
        let mut metrics = Metrics::new(2);
        metrics.record(&revealed());
        assert_eq!(metrics.progress(), 0.5);

        metrics.record(&RevealEvent::LineStarted { line: 1 });
        metrics.record(&revealed());
        metrics.record(&RevealEvent::Completed);

        assert_eq!(metrics.units_revealed, 2);
        assert_eq!(metrics.line_transitions, 1);
        assert_eq!(metrics.lines_completed, 2);
        assert_eq!(metrics.events_emitted, 4);
        assert_eq!(metrics.ticks, 4);
        assert_eq!(metrics.progress(), 1.0);
    }

    #[test]
    fn test_metrics_cancel_is_not_a_tick() {
        let mut metrics = Metrics::new(3);
        metrics.record(&revealed());
        metrics.record(&RevealEvent::Cancelled);

        assert!(metrics.cancelled);
        assert_eq!(metrics.ticks, 1);
        assert_eq!(metrics.events_emitted, 2);
    }

    #[test]
    fn test_metrics_empty_run_is_complete() {
        assert_eq!(Metrics::new(0).progress(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_elapsed() {
        let mut monitor = RevealMonitor::new(1);
        tokio::time::advance(Duration::from_millis(40)).await;
        monitor.record(&revealed());

        assert_eq!(monitor.elapsed(), Duration::from_millis(40));
        assert_eq!(monitor.metrics().units_revealed, 1);
    }
}
