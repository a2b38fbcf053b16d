//! # ParagraphList Component
//!
//! Scrollable view of the generated paragraphs.
//!
//! `ParagraphList` is rebuilt every frame around `&mut ParagraphListState`
//! (scroll position and measured heights, persisted in `TuiState`) and the
//! session's paragraphs (props). Heights are measured once per paragraph and
//! reused until the paragraph text or the width changes, which matters while
//! a continuation grows the last paragraph.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::passage::Passage;
use crate::tui::event::TuiEvent;

/// Blank rows between paragraphs.
const PARAGRAPH_GAP: u16 = 1;
/// The scroll view reserves one column for its scrollbar.
const SCROLLBAR_WIDTH: u16 = 1;

pub struct ParagraphListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, new content scrolls into view automatically
    pub stick_to_bottom: bool,
    pub viewport_height: u16,
}

impl Default for ParagraphListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Forget scroll position, e.g. after the output is cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    fn repin_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
            self.clamp_scroll();
        }
    }
}

impl EventHandler for ParagraphListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Measured row heights, keyed by the text they were measured from.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    measured: Vec<String>,
    width: u16,
}

impl LayoutCache {
    /// Re-measure from the first paragraph that changed (or all, on resize).
    pub fn update(&mut self, paragraphs: &[String], width: u16) {
        if width != self.width {
            self.heights.clear();
            self.measured.clear();
            self.width = width;
        }
        let reusable = self
            .measured
            .iter()
            .zip(paragraphs)
            .take_while(|(seen, p)| seen == p)
            .count();
        self.heights.truncate(reusable);
        self.measured.truncate(reusable);

        for p in &paragraphs[reusable..] {
            self.heights.push(Passage::calculate_height(p, width));
            self.measured.push(p.clone());
        }
    }

    /// Total canvas height including gaps.
    /// Saturates at `u16::MAX` for very long output.
    pub fn total_height(&self) -> u16 {
        let gaps = u16::try_from(self.heights.len().saturating_sub(1))
            .unwrap_or(u16::MAX)
            .saturating_mul(PARAGRAPH_GAP);
        self.heights
            .iter()
            .fold(gaps, |total, &h| total.saturating_add(h))
    }
}

pub struct ParagraphList<'a> {
    pub state: &'a mut ParagraphListState,
    pub paragraphs: &'a [String],
    pub is_loading: bool,
}

impl<'a> ParagraphList<'a> {
    pub fn new(state: &'a mut ParagraphListState, paragraphs: &'a [String], is_loading: bool) -> Self {
        Self {
            state,
            paragraphs,
            is_loading,
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let hint = if self.is_loading {
            "Writing..."
        } else {
            "Type a prompt below, then press Ctrl+Enter to start writing."
        };
        let style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y, area.width, 1.min(area.height));
        frame.render_widget(
            Paragraph::new(hint).style(style).alignment(Alignment::Center),
            line_area,
        );
    }
}

impl Component for ParagraphList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.paragraphs.is_empty() {
            self.state.reset();
            self.render_placeholder(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(SCROLLBAR_WIDTH);
        self.state.layout.update(self.paragraphs, content_width);
        self.state.viewport_height = area.height;

        // Room for the "still writing" marker below the last paragraph
        let loading_rows = if self.is_loading { PARAGRAPH_GAP + 1 } else { 0 };
        let total_height = self.state.layout.total_height().saturating_add(loading_rows);

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (paragraph, &height) in self.paragraphs.iter().zip(&self.state.layout.heights) {
            scroll_view.render_widget(
                Passage::new(paragraph),
                Rect::new(0, y, content_width, height),
            );
            y = y.saturating_add(height).saturating_add(PARAGRAPH_GAP);
        }

        if self.is_loading {
            scroll_view.render_widget(
                Paragraph::new(" …").style(Style::default().fg(Color::DarkGray)),
                Rect::new(0, total_height - 1, content_width, 1),
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
