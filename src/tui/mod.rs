//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! `Effect::Generate` spawns a tokio task that runs the request on the
//! writing backend and reports back over a std channel. Requests are never
//! aborted: if several are outstanding, each result is applied as it
//! arrives and the last one wins.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod clipboard;
mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, RequestKind, update};
use crate::core::state::App;
use crate::gateway::{GenerationRequest, WritingBackend};
use crate::tui::component::EventHandler;
use crate::tui::components::{ParagraphListState, PromptBox, PromptEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const LOADING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub paragraph_list: ParagraphListState,
    pub prompt_box: PromptBox,
    pub spinner_frame: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            paragraph_list: ParagraphListState::new(),
            prompt_box: PromptBox::new(),
            spinner_frame: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+Enter arrive as its own key.
        // Terminals that don't support it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(backend: Arc<dyn WritingBackend>) -> std::io::Result<()> {
    let mut app = App::new(backend.label());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Results from request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let loading = app.session.is_loading;
        if loading {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if loading { LOADING_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            let effect = update(&mut app, action);
            if !handle_effect(&mut app, &mut tui, effect, &backend, &tx) {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if !handle_effect(&mut app, &mut tui, effect, &backend, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Turns a terminal event into an action, feeding editing and scrolling
/// events to the components that own them.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Shortcut => Some(Action::Shortcut),
        TuiEvent::Rewrite => Some(Action::Rewrite),
        TuiEvent::Copy => Some(Action::Copy),
        TuiEvent::Cancel => Some(Action::Cancel),
        TuiEvent::Resize => None,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.paragraph_list.handle_event(event);
            None
        }
        // Arrows scroll the output once the prompt is locked
        TuiEvent::CursorUp | TuiEvent::CursorDown if app.session.is_submitted => {
            tui.paragraph_list.handle_event(event);
            None
        }
        _ => {
            tui.prompt_box.read_only = app.session.is_submitted;
            match tui.prompt_box.handle_event(event)? {
                PromptEvent::Edited(text) => Some(Action::EditPrompt(text)),
            }
        }
    }
}

/// Performs an effect. Returns false when the app should exit.
fn handle_effect(
    app: &mut App,
    tui: &mut TuiState,
    effect: Effect,
    backend: &Arc<dyn WritingBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return false,
        Effect::Generate(request) => {
            if matches!(request, GenerationRequest::Generate { .. }) {
                // New output, new scroll position
                tui.paragraph_list.reset();
            }
            spawn_generation(Arc::clone(backend), request, tx.clone());
        }
        Effect::Copy(text) => {
            let count = app.session.paragraphs.len();
            match clipboard::copy_text(text) {
                Ok(()) => app.status_message = format!("Copied {count} paragraph(s)"),
                Err(e) => {
                    warn!("Clipboard unavailable: {}", e);
                    app.status_message = String::from("Clipboard unavailable");
                }
            }
        }
    }
    true
}

/// Reports the outcome of one request exactly once.
///
/// If the task ends without reporting (panic or runtime shutdown), dropping
/// the guard sends a failure so the loading flag is never left raised.
struct CompletionGuard {
    kind: RequestKind,
    tx: Option<mpsc::Sender<Action>>,
}

impl CompletionGuard {
    fn new(kind: RequestKind, tx: mpsc::Sender<Action>) -> Self {
        Self { kind, tx: Some(tx) }
    }

    fn send(&mut self, action: Action) {
        if let Some(tx) = self.tx.take()
            && tx.send(action).is_err()
        {
            warn!("Failed to report {:?} result: receiver dropped", self.kind);
        }
    }

    fn succeed(mut self, paragraphs: Vec<String>) {
        let kind = self.kind;
        self.send(Action::Generated { kind, paragraphs });
    }

    fn fail(mut self, error: String) {
        let kind = self.kind;
        self.send(Action::GenerationFailed { kind, error });
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.tx.is_some() {
            let kind = self.kind;
            self.send(Action::GenerationFailed {
                kind,
                error: String::from("request task ended without a result"),
            });
        }
    }
}

fn spawn_generation(
    backend: Arc<dyn WritingBackend>,
    request: GenerationRequest,
    tx: mpsc::Sender<Action>,
) {
    let kind = RequestKind::from(&request);
    info!("Spawning {:?} request on {}", kind, backend.label());

    tokio::spawn(async move {
        let guard = CompletionGuard::new(kind, tx);
        let started = Instant::now();
        match backend.run(&request).await {
            Ok(paragraphs) => {
                debug!(
                    "{:?} returned {} paragraph(s) in {}ms",
                    kind,
                    paragraphs.len(),
                    started.elapsed().as_millis()
                );
                guard.succeed(paragraphs);
            }
            Err(e) => guard.fail(e.to_string()),
        }
    });
}
