//! Timer driver for reveal sequencers.
//!
//! `spawn` moves a [`RevealSequencer`] onto a tokio task that sleeps for
//! each `next_delay` and then ticks. Every tick is published under a gate
//! (a mutex shared with `cancel`): once `cancel` returns, the gate is
//! closed and nothing else is ever published for that run. A
//! [`CancellationToken`] wakes the pending sleep so the task exits promptly.
//!
//! Observers get two views of the same run:
//! - [`RevealEvents`]: the ordered event stream, closed after the terminal event
//! - [`RevealHandle::watch`]: the latest [`Snapshot`]

use crate::event::RevealEvent;
use crate::monitor::{Metrics, RevealMonitor};
use crate::sequencer::RevealSequencer;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};
use unveil_core::{Cursor, LineSet, Phase, RevealConfig, RevealState, TerminalReason, Timing};

/// Latest published view of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Revealed prefixes
    pub state: RevealState,
    /// Sequencer phase
    pub phase: Phase,
    /// Cursor after the last advance
    pub cursor: Cursor,
    /// Emission counters
    pub metrics: Metrics,
    /// Time since spawn when this snapshot was published
    pub elapsed: Duration,
}

impl Snapshot {
    /// Check if the run has ended
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[derive(Debug)]
struct Gate {
    machine: RevealSequencer,
    monitor: RevealMonitor,
    /// `None` once the terminal event went out
    events: Option<mpsc::UnboundedSender<RevealEvent>>,
}

impl Gate {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.machine.state().clone(),
            phase: self.machine.phase(),
            cursor: self.machine.cursor(),
            metrics: self.monitor.metrics().clone(),
            elapsed: self.monitor.elapsed(),
        }
    }

    fn publish(&mut self, event: RevealEvent) {
        self.monitor.record(&event);
        let terminal = event.is_terminal();
        if let Some(tx) = &self.events {
            // A dropped receiver only stops the stream; snapshots keep flowing
            let _ = tx.send(event);
        }
        if terminal {
            self.events = None;
        }
    }
}

#[derive(Debug)]
struct Shared {
    gate: Mutex<Gate>,
    snapshot: watch::Sender<Snapshot>,
    token: CancellationToken,
    lines: LineSet,
    timing: Timing,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_delay(&self) -> Option<Duration> {
        self.lock().machine.next_delay()
    }

    /// Tick and publish; false once the run is over
    fn advance(&self) -> bool {
        let mut gate = self.lock();
        let Some(event) = gate.machine.step() else {
            return false;
        };

        match &event {
            RevealEvent::Revealed { cursor, .. } => trace!(%cursor, "unit revealed"),
            RevealEvent::LineStarted { line } => trace!(line, "line started"),
            RevealEvent::Completed => info!(
                units = gate.machine.revealed_units(),
                elapsed_ms = whole_millis(gate.monitor.elapsed()),
                "reveal completed"
            ),
            RevealEvent::Cancelled => {}
        }

        gate.publish(event);
        self.snapshot.send_replace(gate.snapshot());
        !gate.machine.is_terminal()
    }

    fn cancel(&self) -> bool {
        let mut gate = self.lock();
        if !gate.machine.cancel() {
            return false;
        }

        debug!(cursor = %gate.machine.cursor(), "reveal cancelled");
        gate.publish(RevealEvent::Cancelled);
        self.snapshot.send_replace(gate.snapshot());
        drop(gate);

        self.token.cancel();
        true
    }
}

/// Milliseconds in `duration`, saturating at `u64::MAX`
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn run(shared: Arc<Shared>) {
    while let Some(delay) = shared.next_delay() {
        if delay.is_zero() {
            tokio::task::yield_now().await;
            if shared.token.is_cancelled() {
                break;
            }
        } else {
            tokio::select! {
                biased;
                () = shared.token.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        if !shared.advance() {
            break;
        }
    }
}

/// Start revealing `lines` on the current tokio runtime
///
/// Returns immediately. An empty line set is terminal at once: no task is
/// spawned and the event stream is already closed.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn(lines: LineSet, timing: Timing) -> (RevealHandle, RevealEvents) {
    let machine = RevealSequencer::new(lines.clone(), timing);
    let idle = machine.is_terminal();
    let (tx, rx) = mpsc::unbounded_channel();

    let gate = Gate {
        monitor: RevealMonitor::new(lines.total_units()),
        machine,
        events: (!idle).then_some(tx),
    };
    let (snapshot, _) = watch::channel(gate.snapshot());

    debug!(
        lines = lines.len(),
        units = lines.total_units(),
        %timing,
        "reveal started"
    );

    let shared = Arc::new(Shared {
        gate: Mutex::new(gate),
        snapshot,
        token: CancellationToken::new(),
        lines,
        timing,
    });

    if !idle {
        tokio::spawn(run(Arc::clone(&shared)));
    }

    (RevealHandle { shared }, RevealEvents { rx })
}

/// Start revealing with config-driven granularity and timing
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_with_config<I, S>(config: &RevealConfig, lines: I) -> (RevealHandle, RevealEvents)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    spawn(config.line_set(lines), config.timing())
}

/// Control handle of a running reveal
///
/// Dropping the handle cancels the run.
#[derive(Debug)]
pub struct RevealHandle {
    shared: Arc<Shared>,
}

impl RevealHandle {
    /// Stop the run
    ///
    /// Once this returns, no further event or snapshot is published. Returns
    /// false if the run had already ended.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    /// Check if the run has ended
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.shared.snapshot.borrow().is_terminal()
    }

    /// Latest snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Latest revealed state
    #[must_use]
    pub fn state(&self) -> RevealState {
        self.shared.snapshot.borrow().state.clone()
    }

    /// Latest phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.snapshot.borrow().phase
    }

    /// Subscribe to snapshots
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Lines being revealed
    #[must_use]
    pub fn lines(&self) -> &LineSet {
        &self.shared.lines
    }

    /// Delays of this run
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.shared.timing
    }

    /// Wait for the run to end
    pub async fn finished(self) -> TerminalReason {
        let mut rx = self.shared.snapshot.subscribe();
        let reason = rx
            .wait_for(Snapshot::is_terminal)
            .await
            .ok()
            .and_then(|snapshot| snapshot.phase.terminal_reason());
        reason.unwrap_or(TerminalReason::Cancelled)
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

/// Ordered event stream of a run
#[derive(Debug)]
pub struct RevealEvents {
    rx: mpsc::UnboundedReceiver<RevealEvent>,
}

impl RevealEvents {
    /// Next event, `None` after the terminal event
    pub async fn next(&mut self) -> Option<RevealEvent> {
        self.rx.recv().await
    }

    /// Drain the stream until it closes
    pub async fn collect(mut self) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            events.push(event);
        }
        events
    }
}
