//! # Actions
//!
//! Everything that can happen in Quill becomes an `Action`.
//! User presses Ctrl+Enter? That's `Action::Shortcut`.
//! The backend answers? That's `Action::Generated { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the caller must perform.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The loading flag is raised only by actions that return `Effect::Generate`
//! and lowered by the matching `Generated`/`GenerationFailed` action, which the
//! request task is guaranteed to send exactly once.

use log::{debug, info, warn};

use crate::core::merge::merge_paragraphs;
use crate::core::state::App;
use crate::gateway::GenerationRequest;

/// Shown as the only paragraph when the first generation fails.
pub const GENERATION_ERROR_MESSAGE: &str = "An error occurred while generating the text.";
/// Appended as a paragraph when a continuation fails.
pub const CONTINUATION_ERROR_MESSAGE: &str = "An error occurred while continuing the text.";

/// Which operation a completed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Generate,
    Continue,
}

impl From<&GenerationRequest> for RequestKind {
    fn from(request: &GenerationRequest) -> Self {
        if request.is_continuation() {
            RequestKind::Continue
        } else {
            RequestKind::Generate
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The prompt text changed (ignored once submitted).
    EditPrompt(String),
    /// Start generating from the current prompt.
    Start,
    /// Discard the output and generate again from the same prompt.
    Rewrite,
    /// Ask for more text after the current output.
    Continue,
    /// Drop the output and unlock the prompt.
    Cancel,
    /// Modifier+Enter: start if not submitted, otherwise continue.
    Shortcut,
    /// Copy the output to the clipboard.
    Copy,
    /// A request finished successfully.
    Generated {
        kind: RequestKind,
        paragraphs: Vec<String>,
    },
    /// A request failed. The message is for logs only.
    GenerationFailed { kind: RequestKind, error: String },
    Quit,
}

/// I/O the caller must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run this request on a writing backend and report back with
    /// `Action::Generated` or `Action::GenerationFailed`.
    Generate(GenerationRequest),
    /// Put this text on the system clipboard.
    Copy(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::EditPrompt(text) => {
            if !app.session.is_submitted {
                app.session.prompt_text = text;
            }
            Effect::None
        }
        Action::Start => start(app),
        Action::Rewrite => {
            app.session.paragraphs.clear();
            start(app)
        }
        Action::Continue => continue_generation(app),
        Action::Cancel => {
            app.session.paragraphs.clear();
            app.session.is_submitted = false;
            app.status_message = String::from("Cancelled");
            Effect::None
        }
        Action::Shortcut => {
            if app.session.is_submitted {
                continue_generation(app)
            } else {
                start(app)
            }
        }
        Action::Copy => {
            if app.session.paragraphs.is_empty() {
                app.status_message = String::from("Nothing to copy");
                return Effect::None;
            }
            Effect::Copy(app.session.joined_text())
        }
        Action::Generated { kind, paragraphs } => {
            app.session.is_loading = false;
            info!("{:?} finished with {} paragraph(s)", kind, paragraphs.len());
            match kind {
                RequestKind::Generate => {
                    app.session.paragraphs = paragraphs;
                }
                RequestKind::Continue => {
                    let existing = std::mem::take(&mut app.session.paragraphs);
                    app.session.paragraphs = merge_paragraphs(existing, paragraphs);
                }
            }
            app.status_message = String::from("Done");
            Effect::None
        }
        Action::GenerationFailed { kind, error } => {
            app.session.is_loading = false;
            warn!("{:?} failed: {}", kind, error);
            match kind {
                RequestKind::Generate => {
                    app.session.paragraphs = vec![GENERATION_ERROR_MESSAGE.to_string()];
                }
                RequestKind::Continue => {
                    app.session
                        .paragraphs
                        .push(CONTINUATION_ERROR_MESSAGE.to_string());
                }
            }
            app.status_message = String::from("Generation failed");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start(app: &mut App) -> Effect {
    if !app.session.has_prompt() {
        debug!("Ignoring start: prompt is blank");
        return Effect::None;
    }
    app.session.is_submitted = true;
    app.session.is_loading = true;
    app.status_message = String::from("Writing...");
    Effect::Generate(GenerationRequest::Generate {
        prompt: app.session.prompt_text.clone(),
    })
}

fn continue_generation(app: &mut App) -> Effect {
    if !app.session.is_submitted {
        debug!("Ignoring continue: nothing submitted yet");
        return Effect::None;
    }
    app.session.is_loading = true;
    app.status_message = String::from("Continuing...");
    Effect::Generate(GenerationRequest::Continue {
        original_prompt: app.session.prompt_text.clone(),
        prior_paragraphs: app.session.paragraphs.clone(),
    })
}
