//! # Core Application Logic
//!
//! This module contains Quill's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • merge (join rule)    │
//!                    │                         │
//!                    │  update() is pure.      │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Generate
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ── WritingBackend ──────▶│  Gateway / │
//!     │  Adapter   │                          │  ApiClient │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` and `App` structs
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`merge`]: How a continuation is stitched onto earlier output
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod merge;
pub mod state;
