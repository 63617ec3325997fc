//! UNVEIL Core Types
//!
//! Pure types for staged text reveal: the immutable line set, the revealed
//! snapshot, cursor and phase, timing, and configuration.
//! Nothing in this crate performs I/O or sleeps.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod lines;
pub mod state;
pub mod timing;

// Re-exports
pub use config::{CursorConfig, CursorPlacement, RevealConfig, TimingConfig};
pub use cursor::{Cursor, Phase, TerminalReason};
pub use error::{CoreError, CoreResult};
pub use lines::{Granularity, LineSet};
pub use state::RevealState;
pub use timing::{Timing, clamp_millis};
