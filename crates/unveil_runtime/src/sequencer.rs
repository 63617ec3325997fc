//! Deterministic reveal sequencer.
//!
//! The sequencer never sleeps and owns no timer:
//! - `next_delay` says how long to wait before the next transition
//! - `tick` performs exactly that transition
//! - the caller (the tokio driver, a test, or `timeline`) supplies the clock
//!
//! Phases are `Advancing(line, offset)`, `Paused(line)` and `Terminal`.
//! `Advancing(i, len(i))` is never observable: it collapses into `Paused(i)`
//! immediately, without consuming a unit or emitting anything.

use crate::event::{RevealEvent, TimedEvent};
use std::time::Duration;
use unveil_core::{Cursor, LineSet, Phase, RevealState, TerminalReason, Timing};

/// Result of one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One unit revealed; the cursor after the advance
    Revealed(Cursor),
    /// Pause over, this line is now current
    LineStarted(usize),
    /// Final pause over; the sequencer is terminal
    Completed,
    /// Already terminal; nothing changed
    Idle,
}

/// Step-driven reveal state machine
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    /// Lines being revealed
    lines: LineSet,
    /// Delays
    timing: Timing,
    /// Revealed prefixes
    state: RevealState,
    /// Current phase
    phase: Phase,
    /// Last cursor position (kept across cancellation)
    cursor: Cursor,
    /// Units revealed so far
    revealed: usize,
    /// Transitions performed
    ticks: u64,
}

impl RevealSequencer {
    /// Create a sequencer
    ///
    /// An empty line set is terminal from the start.
    #[must_use]
    pub fn new(lines: LineSet, timing: Timing) -> Self {
        let phase = if lines.is_empty() {
            Phase::Terminal {
                reason: TerminalReason::Completed,
            }
        } else {
            Phase::Advancing { line: 0, offset: 0 }
        };

        let mut sequencer = Self {
            state: RevealState::for_lines(&lines),
            lines,
            timing,
            phase,
            cursor: Cursor::default(),
            revealed: 0,
            ticks: 0,
        };
        sequencer.settle();
        sequencer
    }

    /// Collapse a fully revealed line into its pause
    fn settle(&mut self) {
        if let Phase::Advancing { line, offset } = self.phase {
            if offset >= self.lines.unit_count(line) {
                self.phase = Phase::Paused { line };
            }
        }
    }

    /// Delay before the next transition, `None` once terminal
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Advancing { .. } => Some(self.timing.char_delay),
            Phase::Paused { .. } => Some(self.timing.line_delay),
            Phase::Terminal { .. } => None,
        }
    }

    /// Perform the next transition
    ///
    /// Calling this after the sequencer is terminal is a no-op.
    pub fn tick(&mut self) -> Tick {
        let tick = match self.phase {
            Phase::Advancing { line, offset } => match self.lines.unit(line, offset) {
                Some(unit) => {
                    self.state.push_unit(line, unit);
                    self.revealed += 1;
                    self.cursor = Cursor::new(line, offset + 1);
                    self.phase = Phase::Advancing {
                        line,
                        offset: offset + 1,
                    };
                    Tick::Revealed(self.cursor)
                }
                // settle() keeps offset < unit_count while advancing
                None => {
                    self.phase = Phase::Paused { line };
                    return Tick::Idle;
                }
            },
            Phase::Paused { line } => {
                let next = line + 1;
                if next < self.lines.len() {
                    self.cursor = Cursor::new(next, 0);
                    self.phase = Phase::Advancing {
                        line: next,
                        offset: 0,
                    };
                    Tick::LineStarted(next)
                } else {
                    self.phase = Phase::Terminal {
                        reason: TerminalReason::Completed,
                    };
                    Tick::Completed
                }
            }
            Phase::Terminal { .. } => return Tick::Idle,
        };

        self.ticks += 1;
        self.settle();
        tick
    }

    /// Perform the next transition and describe it as an event
    pub fn step(&mut self) -> Option<RevealEvent> {
        match self.tick() {
            Tick::Revealed(cursor) => Some(RevealEvent::Revealed {
                cursor,
                state: self.state.clone(),
            }),
            Tick::LineStarted(line) => Some(RevealEvent::LineStarted { line }),
            Tick::Completed => Some(RevealEvent::Completed),
            Tick::Idle => None,
        }
    }

    /// Stop the sequencer, keeping the revealed state
    ///
    /// Returns false when it was already terminal.
    pub fn cancel(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = Phase::Terminal {
            reason: TerminalReason::Cancelled,
        };
        true
    }

    /// Every event of a full run, on a virtual clock starting at zero
    ///
    /// Runs a copy; `self` is not advanced.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimedEvent> {
        let mut machine = self.clone();
        let mut at = Duration::ZERO;
        let mut events = Vec::new();

        while let Some(delay) = machine.next_delay() {
            at = at.saturating_add(delay);
            if let Some(event) = machine.step() {
                events.push(TimedEvent { at, event });
            }
        }

        events
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if the sequencer is terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Cursor after the last transition
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Revealed prefixes
    #[must_use]
    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Source lines
    #[must_use]
    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    /// Delays
    #[must_use]
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Units revealed so far
    #[must_use]
    pub const fn revealed_units(&self) -> usize {
        self.revealed
    }

    /// Transitions performed so far
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}
