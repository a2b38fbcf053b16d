use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (translated into core::Action)
    /// Ctrl+Enter / Ctrl+J / Alt+Enter: start or continue
    Shortcut,
    /// Ctrl+R
    Rewrite,
    /// Ctrl+Y
    Copy,
    /// Esc
    Cancel,
    /// Ctrl+C
    ForceQuit,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Newline,
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    WordLeft,
    WordRight,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Translate a key press. Releases and repeats reported by the keyboard
/// enhancement protocol are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);
    let meta = key_event
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META);

    match key_event.code {
        // Ctrl+J is what most terminals send for Ctrl+Enter without the kitty protocol
        KeyCode::Enter if ctrl || alt || meta => Some(TuiEvent::Shortcut),
        KeyCode::Char('j') if ctrl => Some(TuiEvent::Shortcut),
        KeyCode::Char('c') if ctrl => Some(TuiEvent::ForceQuit),
        KeyCode::Char('r') if ctrl => Some(TuiEvent::Rewrite),
        KeyCode::Char('y') if ctrl => Some(TuiEvent::Copy),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter => Some(TuiEvent::Newline),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Esc => Some(TuiEvent::Cancel),
        KeyCode::Left if ctrl || alt => Some(TuiEvent::WordLeft),
        KeyCode::Right if ctrl || alt => Some(TuiEvent::WordRight),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_enter_and_ctrl_j_are_the_shortcut() {
        assert_eq!(
            map_key(press(KeyCode::Enter, KeyModifiers::CONTROL)),
            Some(TuiEvent::Shortcut)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Shortcut)
        );
        assert_eq!(
            map_key(press(KeyCode::Enter, KeyModifiers::ALT)),
            Some(TuiEvent::Shortcut)
        );
        assert_eq!(
            map_key(press(KeyCode::Enter, KeyModifiers::SUPER)),
            Some(TuiEvent::Shortcut)
        );
    }

    #[test]
    fn plain_enter_is_a_newline() {
        assert_eq!(
            map_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Newline)
        );
    }

    #[test]
    fn control_chords_are_never_typed() {
        assert_eq!(
            map_key(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Rewrite)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('y'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Copy)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn shifted_chars_are_typed() {
        assert_eq!(
            map_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn esc_cancels() {
        assert_eq!(
            map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(TuiEvent::Cancel)
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = press(KeyCode::Enter, KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn paste_and_resize_pass_through() {
        assert_eq!(
            map_event(Event::Paste("a\nb".to_string())),
            Some(TuiEvent::Paste("a\nb".to_string()))
        );
        assert_eq!(map_event(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
