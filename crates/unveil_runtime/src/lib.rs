//! UNVEIL Runtime
//!
//! The reveal sequencer and the timer driver that runs it.
//! The sequencer is a deterministic, step-driven state machine; the driver
//! schedules its steps on tokio timers and owns cancellation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod event;
pub mod monitor;
pub mod sequencer;

pub use driver::{RevealEvents, RevealHandle, Snapshot, spawn, spawn_with_config};
pub use event::{RevealEvent, TimedEvent};
pub use monitor::{Metrics, RevealMonitor};
pub use sequencer::{RevealSequencer, Tick};
