//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (app name, backend, status, spinner)
//! ├── passage.rs         (one generated paragraph)
//! ├── paragraph_list.rs  (scrollable output, layout cache)
//! ├── action_bar.rs      (key hints for the current state)
//! └── prompt_box/        (multi-line prompt editor)
//! ```
//!
//! Stateless components (`TitleBar`, `Passage`, `ActionBar`) take everything
//! as props and are built fresh each frame. Stateful ones keep their state in
//! `TuiState`: `PromptBox` owns its buffer and cursor, `ParagraphList` borrows
//! a `ParagraphListState` for scroll position and measured heights.

pub mod action_bar;
pub mod paragraph_list;
pub mod passage;
pub mod prompt_box;
pub mod title_bar;

pub use action_bar::ActionBar;
pub use paragraph_list::{ParagraphList, ParagraphListState};
pub use prompt_box::{PromptBox, PromptEvent};
pub use title_bar::TitleBar;
