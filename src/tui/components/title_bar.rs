//! # TitleBar Component
//!
//! One-line header: app name, backend label, status, and a spinner while a
//! request is outstanding.
//!
//! ```text
//! Quill (gpt-4o-mini) | Writing... ⠹
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stateless: every field is a prop.
pub struct TitleBar<'a> {
    pub backend_label: &'a str,
    pub status_message: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        backend_label: &'a str,
        status_message: &'a str,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            backend_label,
            status_message,
            is_loading,
            spinner_frame,
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled("Quill", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({})", self.backend_label)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.is_loading {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!(" {frame}"),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
