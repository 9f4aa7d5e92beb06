//! Scrollable conversation view.
//!
//! Follows the persistent state + transient wrapper pattern:
//! `MessageListState` lives in `TuiState`; `MessageList` is created each frame
//! with borrowed state.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

/// Persistent scroll state for the transcript.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Keep the newest message in view until the user scrolls away.
    pub stick_to_bottom: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
        }
    }

    /// Re-enable stick-to-bottom; called when a new message arrives.
    pub fn follow(&mut self) {
        self.stick_to_bottom = true;
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper for the transcript.
pub struct MessageList<'a> {
    pub messages: &'a [Message],
    pub known_genres: &'a [String],
    /// Transcript index currently being read aloud, if any.
    pub speaking: Option<usize>,
    pub state: &'a mut MessageListState,
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Reserve one column for the scrollbar.
        let content_width = area.width.saturating_sub(1);

        let heights: Vec<u16> = self
            .messages
            .iter()
            .map(|m| MessageBubble::calculate_height(m, content_width))
            .collect();
        let total_height: u16 = heights.iter().sum();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (index, message) in self.messages.iter().enumerate() {
            let bubble = MessageBubble::new(
                message,
                self.known_genres,
                self.speaking == Some(index),
            );
            let rect = Rect::new(0, y_offset, content_width, heights[index]);
            scroll_view.render_widget(bubble, rect);
            y_offset += heights[index];
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
