use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::tui::markdown;

/// Foreground for generated prose.
pub const PASSAGE_FG: Color = Color::Reset;
/// Left margin so text doesn't touch the terminal edge.
const MARGIN_X: u16 = 1;

/// One generated paragraph, rendered with emphasis.
///
/// Transient: built each frame from a borrowed paragraph string.
#[derive(Clone, Copy)]
pub struct Passage<'a> {
    pub content: &'a str,
}

impl<'a> Passage<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(markdown::render(self.content.trim(), PASSAGE_FG))
            .wrap(Wrap { trim: false })
    }

    /// Rows this passage occupies at `width`, without rendering it.
    pub fn calculate_height(content: &str, width: u16) -> u16 {
        let inner = width.saturating_sub(MARGIN_X * 2);
        if inner == 0 {
            return 1;
        }
        let rows = Passage::new(content).paragraph().line_count(inner);
        u16::try_from(rows).unwrap_or(u16::MAX).max(1)
    }
}

impl Widget for Passage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = Rect {
            x: area.x + MARGIN_X,
            width: area.width.saturating_sub(MARGIN_X * 2),
            ..area
        };
        self.paragraph().render(inner, buf);
    }
}
