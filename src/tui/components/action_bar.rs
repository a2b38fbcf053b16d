use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Session;
use crate::tui::component::Component;

/// Bottom line listing the keys that do something right now.
pub struct ActionBar<'a> {
    pub session: &'a Session,
}

impl<'a> ActionBar<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// `(key, label)` pairs for the current session state.
    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::new();
        if !self.session.is_submitted {
            hints.push(("Ctrl+Enter", "start"));
        } else {
            if !self.session.paragraphs.is_empty() {
                hints.push(("Ctrl+Enter", "continue"));
                hints.push(("Ctrl+R", "rewrite"));
                hints.push(("Ctrl+Y", "copy"));
            }
            hints.push(("Esc", "cancel"));
        }
        hints.push(("Ctrl+C", "quit"));
        hints
    }
}

impl Component for ActionBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        for (i, (key, label)) in self.hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", label_style));
            }
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(format!(" {label}"), label_style));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(session: &Session) -> Vec<&'static str> {
        ActionBar::new(session).hints().into_iter().map(|(_, l)| l).collect()
    }

    #[test]
    fn fresh_session_offers_start() {
        assert_eq!(labels(&Session::new()), vec!["start", "quit"]);
    }

    #[test]
    fn submitted_without_output_can_only_cancel() {
        let session = Session {
            is_submitted: true,
            is_loading: true,
            ..Session::new()
        };
        assert_eq!(labels(&session), vec!["cancel", "quit"]);
    }

    #[test]
    fn submitted_with_output_offers_everything() {
        let session = Session {
            is_submitted: true,
            paragraphs: vec!["Text.".to_string()],
            ..Session::new()
        };
        assert_eq!(
            labels(&session),
            vec!["continue", "rewrite", "copy", "cancel", "quit"]
        );
    }
}
