//! TUI layout: a centred card above a status line.

use crate::renderer::RenderError;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Layout manager for calculating screen areas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Widest the card may grow
    max_card_width: u16,
    /// Status bar height
    status_height: u16,
    /// Blank cells around the card
    margin: u16,
}

impl Layout {
    /// Smallest usable card width (borders plus a few columns)
    pub const MIN_WIDTH: u16 = 12;

    /// Smallest usable height (card borders, one line, status bar)
    pub const MIN_HEIGHT: u16 = 4;

    /// Create a new layout
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_card_width: 88,
            status_height: 1,
            margin: 1,
        }
    }

    /// Set the maximum card width
    #[must_use]
    pub fn with_max_card_width(mut self, width: u16) -> Self {
        self.max_card_width = width.max(Self::MIN_WIDTH);
        self
    }

    /// Set status bar height
    #[must_use]
    pub fn with_status_height(mut self, height: u16) -> Self {
        self.status_height = height;
        self
    }

    /// Set the margin
    #[must_use]
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    /// Calculate layout areas for a given terminal size
    ///
    /// The card fits its content height when possible and is centred
    /// horizontally.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::TooSmall` when the card cannot fit.
    pub fn calculate(&self, size: Rect, content_lines: usize) -> Result<CalculatedLayout, RenderError> {
        let margins = self.margin.saturating_mul(2);
        let min_width = Self::MIN_WIDTH.saturating_add(margins);
        let min_height = (Self::MIN_HEIGHT - 1)
            .saturating_add(self.status_height)
            .saturating_add(margins);
        if size.width < min_width || size.height < min_height {
            return Err(RenderError::TooSmall {
                min_width,
                min_height,
            });
        }

        let inner_width = size.width.saturating_sub(margins);
        let inner_height = size.height.saturating_sub(margins);

        let status_height = self.status_height.min(inner_height.saturating_sub(3));
        let available = inner_height - status_height;
        let wanted = u16::try_from(content_lines.saturating_add(2)).unwrap_or(u16::MAX);
        let card_height = wanted.max(3).min(available);
        let card_width = inner_width.min(self.max_card_width);

        let card_area = Rect {
            x: size
                .x
                .saturating_add(self.margin)
                .saturating_add((inner_width - card_width) / 2),
            y: size.y.saturating_add(self.margin),
            width: card_width,
            height: card_height,
        };

        let status_area = Rect {
            x: card_area.x,
            y: card_area.y.saturating_add(card_height),
            width: card_width,
            height: status_height,
        };

        Ok(CalculatedLayout {
            card_area,
            status_area,
        })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculated layout with card and status areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatedLayout {
    /// Code card area
    pub card_area: Rect,
    /// Status bar area
    pub status_area: Rect,
}
