//! Keyboard control of a running card.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Cancel the reveal and leave
    Quit,
    /// Cancel the reveal and type the card again
    Restart,
    /// Switch between dark and light
    ToggleTheme,
}

/// Key press to action table
#[derive(Debug, Clone)]
pub struct Keymap {
    keys: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl Keymap {
    /// A keymap with nothing bound
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Bind `code` with `modifiers`, replacing any previous binding
    #[must_use]
    pub fn with(mut self, code: KeyCode, modifiers: KeyModifiers, action: Action) -> Self {
        self.keys.insert((code, modifiers), action);
        self
    }

    /// Action for a key event; releases and repeats map to nothing
    #[must_use]
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.keys.get(&(key.code, key.modifiers)).copied()
    }

    /// Number of bound keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        Self::empty()
            .with(KeyCode::Char('r'), none, Action::Restart)
            .with(KeyCode::Char('t'), none, Action::ToggleTheme)
            .with(KeyCode::Char('q'), none, Action::Quit)
            .with(KeyCode::Esc, none, Action::Quit)
            .with(KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit)
    }
}

/// Polls the terminal for key presses
#[derive(Debug, Clone)]
pub struct InputHandler {
    keymap: Keymap,
    /// Longest wait per poll; doubles as the redraw interval
    poll: Duration,
}

impl InputHandler {
    /// Default poll interval
    pub const DEFAULT_POLL: Duration = Duration::from_millis(50);

    /// Handler with the default keymap
    #[must_use]
    pub fn new() -> Self {
        Self::with_keymap(Keymap::default())
    }

    /// Handler with a custom keymap
    #[must_use]
    pub fn with_keymap(keymap: Keymap) -> Self {
        Self {
            keymap,
            poll: Self::DEFAULT_POLL,
        }
    }

    /// Change the poll interval
    #[must_use]
    pub fn with_poll(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    /// Poll interval
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll
    }

    /// Keymap in use
    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// How long the next poll waits: the poll interval, cut short by `limit`
    #[must_use]
    pub fn wait_for(&self, limit: Option<Duration>) -> Duration {
        limit.map_or(self.poll, |limit| limit.min(self.poll))
    }

    /// Wait for a bound key, at most `wait_for(limit)`
    ///
    /// `Ok(None)` means the wait ran out, or the key was not bound.
    ///
    /// # Errors
    ///
    /// Returns error if the terminal cannot be read
    pub fn next_action(&self, limit: Option<Duration>) -> Result<Option<Action>, InputError> {
        if !crossterm::event::poll(self.wait_for(limit))? {
            return Ok(None);
        }
        match crossterm::event::read()? {
            Event::Key(key) => Ok(self.keymap.action_for(&key)),
            _ => Ok(None),
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal input failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Reading events failed
    #[error("input error: {0}")]
    Io(String),
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
