//! UNVEIL TUI
//!
//! Terminal rendering of a reveal: a code card with a blinking cursor,
//! redrawn from the latest snapshot of a running sequencer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod blink;
pub mod cursor;
pub mod demo;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod source;
pub mod ui;
pub mod view;

pub use args::RevealArgs;
pub use blink::BlinkClock;
pub use cursor::CursorStyle;
pub use input::{Action, InputError, InputHandler, Keymap};
pub use layout::{CalculatedLayout, Layout};
pub use renderer::{BorderStyle, RenderConfig, RenderError, Renderer};
pub use source::{LineSource, base_config, load_config, read_lines};
pub use ui::{TuiApp, TuiConfig, TuiError};
pub use view::{CodeCardView, Palette, StatusView, Theme, View, ViewStyle};
