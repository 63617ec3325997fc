//! Turns a theme and render options into view styles, and draws.

use crate::view::{Palette, Theme, View, ViewStyle};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{BorderType, Paragraph, Wrap},
};
use serde::{Deserialize, Serialize};
use std::io;

/// Card border shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// Square corners
    Plain,
    /// Rounded corners, like the web card
    #[default]
    Rounded,
    /// Double lines
    Double,
    /// Heavy lines
    Thick,
}

impl From<BorderStyle> for BorderType {
    fn from(style: BorderStyle) -> Self {
        match style {
            BorderStyle::Plain => Self::Plain,
            BorderStyle::Rounded => Self::Rounded,
            BorderStyle::Double => Self::Double,
            BorderStyle::Thick => Self::Thick,
        }
    }
}

/// Render options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Card border
    pub border: BorderStyle,
    /// Use the theme's colours; off means terminal defaults
    pub colors: bool,
    /// Bold title and cursor line
    pub bold: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            border: BorderStyle::default(),
            colors: true,
            bold: true,
        }
    }
}

impl RenderConfig {
    /// Options for terminals without colour support
    #[must_use]
    pub fn plain() -> Self {
        Self {
            border: BorderStyle::Plain,
            colors: false,
            bold: false,
        }
    }
}

/// Draws views with the configured style and counts frames
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
    frames: u64,
}

impl Renderer {
    /// Create a renderer
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config, frames: 0 }
    }

    /// Render options
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// View style for `theme`
    #[must_use]
    pub fn style(&self, theme: Theme) -> ViewStyle {
        let palette = if self.config.colors {
            theme.palette()
        } else {
            Palette::monochrome()
        };
        ViewStyle {
            palette,
            border: self.config.border.into(),
            bold: self.config.bold,
        }
    }

    /// Draw `view` into `area`
    pub fn draw(&self, f: &mut Frame, area: Rect, view: &dyn View, theme: Theme) {
        view.render(f, area, &self.style(theme));
    }

    /// Draw a wrapped notice in place of the card
    pub fn draw_notice(&self, f: &mut Frame, area: Rect, message: &str) {
        let mut style = Style::default();
        if self.config.colors {
            style = style.fg(Color::Red);
        }
        if self.config.bold {
            style = style.add_modifier(Modifier::BOLD);
        }

        f.render_widget(
            Paragraph::new(message).style(style).wrap(Wrap { trim: false }),
            area,
        );
    }

    /// Count a presented frame
    pub fn frame_done(&mut self) {
        self.frames += 1;
    }

    /// Frames presented so far
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Drawing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Backend write failed
    #[error("draw failed: {0}")]
    Backend(String),
    /// Area too small to draw into
    #[error("terminal too small: need {min_width}x{min_height}")]
    TooSmall {
        /// Minimum columns
        min_width: u16,
        /// Minimum rows
        min_height: u16,
    },
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Backend(err.to_string())
    }
}
