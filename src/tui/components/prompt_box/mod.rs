//! # PromptBox Component
//!
//! Multi-line editor for the writing prompt.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and editing keys
//! - Track the cursor and scroll long prompts internally
//! - Lock itself while the prompt is submitted (`read_only` prop)
//!
//! Enter inserts a newline; starting a request is a global shortcut handled
//! by the event loop, so the box never sees it.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_ROWS, VERTICAL_OVERHEAD, cursor_row_col,
    inner_width, layout_rows, next_char_boundary, next_word_end, offset_at, prev_char_boundary,
    prev_word_start,
};

/// High-level events emitted by the PromptBox
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// The text changed; carries the full new text.
    Edited(String),
}

pub struct PromptBox {
    buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible row when the prompt is taller than the box
    scroll_offset: usize,
    /// Width from the last render, used for vertical cursor movement
    last_width: u16,
    /// Prop: true while the prompt is submitted
    pub read_only: bool,
}

impl Default for PromptBox {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBox {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
            read_only: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Height needed for the current text at `area_width`, including borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = u16::try_from(layout_rows(&self.buffer, inner_width(area_width)).len())
            .unwrap_or(u16::MAX);
        rows.clamp(1, MAX_VISIBLE_ROWS) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<PromptEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.edited()
    }

    fn edited(&self) -> Option<PromptEvent> {
        Some(PromptEvent::Edited(self.buffer.clone()))
    }

    fn move_vertically(&mut self, down: bool) {
        let rows = layout_rows(&self.buffer, inner_width(self.last_width));
        let (row, col) = cursor_row_col(&rows, &self.buffer, self.cursor);
        let target = if down {
            row + 1
        } else {
            match row.checked_sub(1) {
                Some(r) => r,
                None => return,
            }
        };
        if target < rows.len() {
            self.cursor = offset_at(&rows, &self.buffer, target, col);
        }
    }

    fn keep_cursor_visible(&mut self, cursor_row: usize, total_rows: usize) {
        let visible = MAX_VISIBLE_ROWS as usize;
        if total_rows <= visible {
            self.scroll_offset = 0;
        } else if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + visible {
            self.scroll_offset = cursor_row + 1 - visible;
        }
    }
}

impl Component for PromptBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = area.width;
        let width = inner_width(area.width);
        let rows = layout_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_row_col(&rows, &self.buffer, self.cursor);
        self.keep_cursor_visible(cursor_row, rows.len());

        let visible: Vec<Line<'_>> = rows
            .iter()
            .skip(self.scroll_offset)
            .take(MAX_VISIBLE_ROWS as usize)
            .map(|r| Line::raw(&self.buffer[r.clone()]))
            .collect();

        let (title, style) = if self.read_only {
            (
                " Prompt (Esc to edit) ",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (" Prompt ", Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(title);
        frame.render_widget(Paragraph::new(visible).block(block).style(style), area);

        if !self.read_only {
            let col = (cursor_col as u16).min(width as u16);
            let row = (cursor_row - self.scroll_offset) as u16;
            frame.set_cursor_position((
                area.x + CONTENT_OFFSET_X + col,
                area.y + CONTENT_OFFSET_Y + row,
            ));
        }
    }
}

impl EventHandler for PromptBox {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.read_only {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Newline => self.insert("\n"),
            TuiEvent::Paste(text) => {
                // Terminals send CRLF or bare CR on some platforms
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.edited()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.edited()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::WordLeft => {
                self.cursor = prev_word_start(&self.buffer, self.cursor);
                None
            }
            TuiEvent::WordRight => {
                self.cursor = next_word_end(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::CursorUp => {
                self.move_vertically(false);
                None
            }
            TuiEvent::CursorDown => {
                self.move_vertically(true);
                None
            }
            _ => None,
        }
    }
}
