use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ActionBar, ParagraphList, TitleBar};

/// Screen regions, top to bottom.
pub struct ScreenLayout {
    pub title: Rect,
    pub output: Rect,
    pub prompt: Rect,
    pub actions: Rect,
}

pub fn screen_layout(area: Rect, prompt_height: u16) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, output, prompt, actions] =
        Layout::vertical([Length(1), Min(0), Length(prompt_height), Length(1)]).areas(area);
    ScreenLayout {
        title,
        output,
        prompt,
        actions,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let prompt_height = tui.prompt_box.calculate_height(frame.area().width);
    let layout = screen_layout(frame.area(), prompt_height);

    TitleBar::new(
        &app.backend_label,
        &app.status_message,
        app.session.is_loading,
        tui.spinner_frame,
    )
    .render(frame, layout.title);

    ParagraphList::new(
        &mut tui.paragraph_list,
        &app.session.paragraphs,
        app.session.is_loading,
    )
    .render(frame, layout.output);

    tui.prompt_box.read_only = app.session.is_submitted;
    tui.prompt_box.render(frame, layout.prompt);

    ActionBar::new(&app.session).render(frame, layout.actions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_gives_output_the_remaining_rows() {
        let layout = screen_layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.prompt.height, 3);
        assert_eq!(layout.actions.height, 1);
        assert_eq!(layout.output.height, 19);
        assert_eq!(layout.prompt.y, 20);
    }

    #[test]
    fn test_draw_fresh_app() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Quill (test-model)"));
        assert!(text.contains("Prompt"));
        assert!(text.contains("Ctrl+Enter start"));
    }

    #[test]
    fn test_draw_submitted_session_locks_prompt() {
        let mut app = test_app();
        app.session.prompt_text = "tides".to_string();
        app.session.is_submitted = true;
        app.session.paragraphs = vec!["The sea **returns**.".to_string()];
        let mut tui = TuiState::new();

        let text = screen(&app, &mut tui);

        assert!(tui.prompt_box.read_only);
        assert!(text.contains("The sea returns."));
        assert!(text.contains("Ctrl+R rewrite"));
        assert!(text.contains("Esc to edit"));
    }
}
