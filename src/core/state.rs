//! # Application State
//!
//! Core business state for Quill. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: Session
//! │   ├── prompt_text: String      // what the user typed
//! │   ├── is_submitted: bool       // prompt locked, output shown
//! │   ├── paragraphs: Vec<String>  // generated output, in order
//! │   └── is_loading: bool         // a request is outstanding
//! ├── backend_label: String        // model name or server URL
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

/// The complete mutable state of one writing interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub prompt_text: String,
    pub is_submitted: bool,
    pub paragraphs: Vec<String>,
    pub is_loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraphs joined the way they are copied to the clipboard.
    pub fn joined_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    /// True when the trimmed prompt has something to send.
    pub fn has_prompt(&self) -> bool {
        !self.prompt_text.trim().is_empty()
    }
}

pub struct App {
    pub session: Session,
    pub backend_label: String,
    pub status_message: String,
}

impl App {
    pub fn new(backend_label: String) -> Self {
        Self {
            session: Session::new(),
            backend_label,
            status_message: String::from("Ctrl+Enter to start writing"),
        }
    }
}
