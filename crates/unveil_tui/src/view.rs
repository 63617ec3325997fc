//! TUI views: the code card and the status line.

use crate::ui::TuiError;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Colour scheme of the card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light text on a dark card
    #[default]
    Dark,
    /// Dark text on a light card
    Light,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Name shown in the status line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Colours of this theme
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color::Rgb(17, 24, 39),
                border: Color::Rgb(55, 65, 81),
                title_bar: Color::Rgb(31, 41, 55),
                title: Color::Rgb(107, 114, 128),
                code: Color::Rgb(134, 239, 172),
                tag: Color::Rgb(147, 197, 253),
                status: Color::Rgb(156, 163, 175),
            },
            Self::Light => Palette {
                background: Color::Rgb(255, 255, 255),
                border: Color::Rgb(229, 231, 235),
                title_bar: Color::Rgb(243, 244, 246),
                title: Color::Rgb(107, 114, 128),
                code: Color::Rgb(3, 105, 161),
                tag: Color::Rgb(29, 78, 216),
                status: Color::Rgb(75, 85, 99),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = TuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(TuiError::InvalidArgument(format!("unknown theme: {other}"))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved colours for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Card background
    pub background: Color,
    /// Card border
    pub border: Color,
    /// Title bar background
    pub title_bar: Color,
    /// File name in the title bar
    pub title: Color,
    /// Revealed code
    pub code: Color,
    /// Tag badges
    pub tag: Color,
    /// Status line text
    pub status: Color,
}

impl Palette {
    /// Terminal default colours everywhere
    #[must_use]
    pub const fn monochrome() -> Self {
        Self {
            background: Color::Reset,
            border: Color::Reset,
            title_bar: Color::Reset,
            title: Color::Reset,
            code: Color::Reset,
            tag: Color::Reset,
            status: Color::Reset,
        }
    }
}

/// How a view is drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStyle {
    /// Colours
    pub palette: Palette,
    /// Border shape
    pub border: BorderType,
    /// Allow bold text
    pub bold: bool,
}

/// Trait for TUI views
pub trait View {
    /// Render the view
    fn render(&self, f: &mut Frame, area: Rect, style: &ViewStyle);

    /// Rows of content, excluding borders
    fn line_count(&self) -> usize;
}

/// Terminal window card showing revealed code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeCardView {
    title: String,
    lines: Vec<String>,
    tags: Vec<String>,
}

impl CodeCardView {
    /// Create an empty card
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the (already decorated) code lines
    #[must_use]
    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    /// Set the badges shown under the code
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Card title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    fn title_line(&self, style: &ViewStyle) -> Line<'_> {
        let bar = Style::default().bg(style.palette.title_bar);
        let dot = |color: Color| Span::styled("● ", bar.fg(color));
        Line::from(vec![
            Span::styled(" ", bar),
            dot(Color::Rgb(248, 113, 113)),
            dot(Color::Rgb(250, 204, 21)),
            dot(Color::Rgb(74, 222, 128)),
            Span::styled(format!(" {} ", self.title), bar.fg(style.palette.title)),
        ])
    }

    fn tag_line(&self, style: &ViewStyle) -> Line<'_> {
        let mut tag_style = Style::default().fg(style.palette.tag);
        if style.bold {
            tag_style = tag_style.add_modifier(Modifier::BOLD);
        }
        let spans: Vec<Span<'_>> = self
            .tags
            .iter()
            .flat_map(|tag| [Span::styled(format!("<{tag} />"), tag_style), Span::raw(" ")])
            .collect();
        Line::from(spans)
    }
}

impl View for CodeCardView {
    fn render(&self, f: &mut Frame, area: Rect, style: &ViewStyle) {
        let palette = &style.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(style.border)
            .border_style(Style::default().fg(palette.border))
            .title(self.title_line(style))
            .style(Style::default().bg(palette.background));

        let code_style = Style::default().fg(palette.code);
        let mut text: Vec<Line<'_>> = self
            .lines
            .iter()
            .map(|line| Line::styled(line.as_str(), code_style))
            .collect();

        if !self.tags.is_empty() {
            text.push(Line::default());
            text.push(self.tag_line(style));
        }

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    fn line_count(&self) -> usize {
        if self.tags.is_empty() {
            self.lines.len()
        } else {
            self.lines.len() + 2
        }
    }
}

/// One-line status bar under the card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusView {
    segments: Vec<String>,
}

impl StatusView {
    /// Create an empty status bar
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment
    #[must_use]
    pub fn push(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Segments joined for display
    #[must_use]
    pub fn text(&self) -> String {
        format!(" {}", self.segments.join(" | "))
    }
}

impl View for StatusView {
    fn render(&self, f: &mut Frame, area: Rect, style: &ViewStyle) {
        let paragraph = Paragraph::new(self.text()).style(Style::default().fg(style.palette.status));
        f.render_widget(paragraph, area);
    }

    fn line_count(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn style() -> ViewStyle {
        ViewStyle {
            palette: Theme::Dark.palette(),
            border: BorderType::Plain,
            bold: false,
        }
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(" dark ".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
        assert_eq!(Palette::monochrome().code, Color::Reset);
    }

    #[test]
    fn test_card_renders_lines() {
        let card = CodeCardView::new("hero.jsx")
            .with_lines(vec!["const a = {".to_string(), "};█".to_string()]);
        assert_eq!(card.line_count(), 2);

        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|f| card.render(f, f.area(), &style()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(row(buffer, 0).contains("hero.jsx"));
        assert!(row(buffer, 1).starts_with("│const a = {"));
        assert!(row(buffer, 2).starts_with("│};█"));
        assert_eq!(buffer[(1, 1)].fg, Theme::Dark.palette().code);
    }

    #[test]
    fn test_card_renders_tags() {
        let card = CodeCardView::new("t")
            .with_lines(vec!["x".to_string()])
            .with_tags(vec!["Rust".to_string(), "Tokio".to_string()]);
        // code, blank separator, tags
        assert_eq!(card.line_count(), 3);

        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| card.render(f, f.area(), &style()))
            .unwrap();

        assert!(row(terminal.backend().buffer(), 3).contains("<Rust /> <Tokio />"));
    }

    #[test]
    fn test_status_view_text() {
        let status = StatusView::new().push("42%").push("q quit");
        assert_eq!(status.text(), " 42% | q quit");
        assert_eq!(status.line_count(), 1);
    }
}
