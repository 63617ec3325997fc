//! TUI app: a live code card driven by a reveal.

use crate::blink::BlinkClock;
use crate::cursor::CursorStyle;
use crate::input::{Action, InputError, InputHandler};
use crate::layout::Layout;
use crate::renderer::{RenderConfig, RenderError, Renderer};
use crate::view::{CodeCardView, StatusView, Theme, View};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::Backend, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, info};
use unveil_core::{CoreError, LineSet, Phase, RevealConfig, TerminalReason};
use unveil_runtime::{RevealHandle, Snapshot, spawn};

/// TUI configuration
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Redraw interval in milliseconds
    pub tick_rate_ms: u64,
    /// Timing, granularity and cursor
    pub reveal: RevealConfig,
    /// Initial theme
    pub theme: Theme,
    /// Colours and borders
    pub render: RenderConfig,
    /// Card title
    pub title: String,
    /// Badges under the code
    pub tags: Vec<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33,
            reveal: RevealConfig::default(),
            theme: Theme::default(),
            render: RenderConfig::default(),
            title: String::new(),
            tags: Vec::new(),
        }
    }
}

impl TuiConfig {
    /// Set the reveal config
    #[must_use]
    pub fn with_reveal(mut self, reveal: RevealConfig) -> Self {
        self.reveal = reveal;
        self
    }

    /// Set the initial theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the card title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the badges
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set colours and borders
    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Set the redraw interval
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate_ms: u64) -> Self {
        self.tick_rate_ms = tick_rate_ms.max(1);
        self
    }
}

/// TUI application state
pub struct TuiApp {
    /// Runs the reveal timers while the UI loop owns this thread
    runtime: Runtime,
    /// Lines to reveal
    lines: LineSet,
    /// Configuration
    config: TuiConfig,
    /// Current run; replaced on restart
    reveal: Option<RevealHandle>,
    /// Input handler
    input: InputHandler,
    /// Renderer
    renderer: Renderer,
    /// Layout
    layout: Layout,
    /// Cursor glyph
    cursor: CursorStyle,
    /// Cursor blink
    blink: BlinkClock,
    /// Current theme
    theme: Theme,
    /// Blink epoch
    started: Instant,
    /// Runs started, including the first
    runs: u32,
    /// Should quit
    should_quit: bool,
}

impl TuiApp {
    /// Create the app and start the first reveal
    ///
    /// # Errors
    ///
    /// Returns error if the timer runtime cannot be started
    pub fn new(lines: LineSet, config: TuiConfig) -> Result<Self, TuiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("unveil-timer")
            .enable_time()
            .build()
            .map_err(|e| TuiError::Runtime(e.to_string()))?;

        let mut app = Self {
            runtime,
            lines,
            input: InputHandler::new().with_poll(Duration::from_millis(config.tick_rate_ms)),
            renderer: Renderer::new(config.render.clone()),
            layout: Layout::new(),
            cursor: CursorStyle::from(&config.reveal.cursor),
            blink: BlinkClock::from_millis(config.reveal.cursor.blink_period_ms),
            theme: config.theme,
            config,
            reveal: None,
            started: Instant::now(),
            runs: 0,
            should_quit: false,
        };
        app.restart();
        Ok(app)
    }

    /// Cancel the current run (if any) and start a new one
    pub fn restart(&mut self) {
        if let Some(previous) = self.reveal.take() {
            previous.cancel();
        }

        let _guard = self.runtime.enter();
        let (handle, _events) = spawn(self.lines.clone(), self.config.reveal.timing());
        self.reveal = Some(handle);
        self.started = Instant::now();
        self.runs += 1;
        debug!(run = self.runs, "reveal restarted");
    }

    /// Latest snapshot of the current run
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.reveal.as_ref().map(RevealHandle::snapshot)
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Runs started so far
    #[must_use]
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Whether the app has been asked to quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI
    ///
    /// # Errors
    ///
    /// Returns error if terminal setup or execution fails
    pub fn run(&mut self) -> Result<(), TuiError> {
        enable_raw_mode().map_err(|e| TuiError::Terminal(e.to_string()))?;
        execute!(std::io::stdout(), EnterAlternateScreen)
            .map_err(|e| TuiError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|e| TuiError::Terminal(e.to_string()))?;

        let result = self.run_inner(&mut terminal);

        disable_raw_mode().map_err(|e| TuiError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TuiError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| TuiError::Terminal(e.to_string()))?;

        result
    }

    fn run_inner<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), TuiError> {
        loop {
            terminal
                .draw(|f| self.draw(f))
                .map_err(RenderError::from)?;
            self.renderer.frame_done();

            if let Some(action) = self.input.next_action(self.until_blink())? {
                self.handle_action(action);
            }

            if self.should_quit {
                info!(frames = self.renderer.frames(), "tui closed");
                return Ok(());
            }
        }
    }

    /// Time until the cursor blinks, so the next frame lands on the flip
    fn until_blink(&self) -> Option<Duration> {
        self.blink.until_toggle(self.started.elapsed())
    }

    fn draw(&self, f: &mut Frame) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };

        let visible = self.blink.is_visible(self.started.elapsed());
        let card = CodeCardView::new(self.config.title.clone())
            .with_lines(self.cursor.decorate(&snapshot.state, visible))
            .with_tags(self.config.tags.clone());

        match self.layout.calculate(f.area(), card.line_count()) {
            Ok(layout) => {
                self.renderer.draw(f, layout.card_area, &card, self.theme);
                self.renderer
                    .draw(f, layout.status_area, &self.status(&snapshot), self.theme);
            }
            Err(err) => self.renderer.draw_notice(f, f.area(), &err.to_string()),
        }
    }

    fn status(&self, snapshot: &Snapshot) -> StatusView {
        let progress = match snapshot.phase {
            Phase::Terminal {
                reason: TerminalReason::Completed,
            } => "done".to_string(),
            Phase::Terminal {
                reason: TerminalReason::Cancelled,
            } => "stopped".to_string(),
            _ => format!("{:.0}%", snapshot.metrics.progress() * 100.0),
        };

        StatusView::new()
            .push(progress)
            .push(self.config.reveal.timing().to_string())
            .push(self.theme.as_str())
            .push("q quit  r restart  t theme")
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if let Some(reveal) = &self.reveal {
                    reveal.cancel();
                }
                self.should_quit = true;
            }
            Action::Restart => self.restart(),
            Action::ToggleTheme => self.theme = self.theme.toggled(),
        }
    }
}

/// TUI errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum TuiError {
    /// Terminal error
    #[error("terminal error: {0}")]
    Terminal(String),
    /// IO error
    #[error("io error: {0}")]
    Io(String),
    /// Timer runtime error
    #[error("runtime error: {0}")]
    Runtime(String),
    /// Config error
    #[error("config error: {0}")]
    Config(#[from] CoreError),
    /// Invalid command-line value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn screen(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app(lines: &[&str], char_ms: f64, line_ms: f64) -> TuiApp {
        let config = TuiConfig::default()
            .with_title("test.txt")
            .with_reveal(RevealConfig::new().with_timing(char_ms, line_ms));
        TuiApp::new(LineSet::new(lines.iter().copied()), config).unwrap()
    }

    fn wait_until_terminal(app: &TuiApp) -> Snapshot {
        for _ in 0..500 {
            if let Some(snapshot) = app.snapshot().filter(Snapshot::is_terminal) {
                return snapshot;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("reveal did not finish");
    }

    #[test]
    fn test_tui_config_default() {
        let config = TuiConfig::default();
        assert_eq!(config.tick_rate_ms, 33);
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.tags.is_empty());
        assert_eq!(TuiConfig::default().with_tick_rate(0).tick_rate_ms, 1);
    }

    #[test]
    fn test_poll_stops_at_blink() {
        let blinking = app(&["x"], 0.0, 0.0);
        let wait = blinking.until_blink().unwrap();
        assert!(wait <= Duration::from_millis(500));
        assert!(blinking.input.wait_for(Some(wait)) <= wait);

        let mut reveal = RevealConfig::new();
        reveal.cursor.blink_period_ms = 0;
        let steady =
            TuiApp::new(LineSet::new(["x"]), TuiConfig::default().with_reveal(reveal)).unwrap();
        assert_eq!(steady.until_blink(), None);
    }

    #[test]
    fn test_plain_render_config() {
        let config = TuiConfig::default()
            .with_tick_rate(100)
            .with_render(RenderConfig::plain());
        let app = TuiApp::new(LineSet::new(["x"]), config).unwrap();

        assert_eq!(app.renderer.config(), &RenderConfig::plain());
        assert_eq!(app.input.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_app_reveals_and_draws() {
        let app = app(&["hello", "world"], 0.0, 0.0);
        let snapshot = wait_until_terminal(&app);
        assert_eq!(snapshot.state.to_vec(), vec!["hello", "world"]);

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let text = screen(terminal.backend().buffer());
        assert!(text.contains("test.txt"));
        assert!(text.contains("hello"));
        assert!(text.contains("world"));
        assert!(text.contains("done"));
    }

    #[test]
    fn test_draw_too_small() {
        let app = app(&["x"], 0.0, 0.0);
        let mut terminal = Terminal::new(TestBackend::new(8, 3)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        assert!(screen(terminal.backend().buffer()).contains("terminal"));
    }

    #[test]
    fn test_quit_cancels_reveal() {
        let mut app = app(&["a long line that takes a while"], 1_000.0, 1_000.0);
        app.handle_action(Action::Quit);

        assert!(app.should_quit());
        let snapshot = app.snapshot().unwrap();
        assert_eq!(snapshot.phase.terminal_reason(), Some(TerminalReason::Cancelled));
        assert_eq!(snapshot.state.to_vec(), vec![""]);
    }

    #[test]
    fn test_restart_starts_new_run() {
        let mut app = app(&["abc"], 1_000.0, 1_000.0);
        assert_eq!(app.runs(), 1);

        app.handle_action(Action::Restart);
        assert_eq!(app.runs(), 2);
        assert!(!app.snapshot().unwrap().is_terminal());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = app(&["x"], 0.0, 0.0);
        assert_eq!(app.theme(), Theme::Dark);
        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.theme(), Theme::Light);
        app.handle_action(Action::ToggleTheme);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_tui_error_messages() {
        let err = TuiError::Terminal("test".to_string());
        assert!(err.to_string().contains("terminal"));

        let err = TuiError::from(CoreError::UnknownGranularity("word".to_string()));
        assert!(err.to_string().starts_with("config error"));
    }
}
