//! # InputLine Component
//!
//! Single-line text entry for the chat, mirroring the original interface's
//! one-line ask box. Multi-line input is not a feature here; pasted text keeps
//! only its first line.
//!
//! The buffer is internal state; `active` is a prop synced from the event loop
//! each frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputLine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputLine {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Whether the input has focus (prop)
    pub active: bool,
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLine {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            active: true,
        }
    }

    /// Visible tail of the buffer when it exceeds the content width.
    fn visible_text(&self, content_width: usize) -> &str {
        let mut start = 0;
        while self.buffer[start..].width() > content_width {
            let mut next = start + 1;
            while !self.buffer.is_char_boundary(next) {
                next += 1;
            }
            start = next;
        }
        &self.buffer[start..]
    }
}

impl EventHandler for InputLine {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(data) => {
                let first_line = data.lines().next().unwrap_or_default();
                self.buffer.push_str(first_line);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                if text.trim().is_empty() {
                    self.buffer = text;
                    None
                } else {
                    Some(InputEvent::Submit(text))
                }
            }
            _ => None,
        }
    }
}

impl Component for InputLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let content_width = area.width.saturating_sub(2) as usize;
        let visible = self.visible_text(content_width).to_string();
        let cursor_x = area.x + 1 + visible.width() as u16;

        let input = Paragraph::new(visible)
            .block(Block::bordered().title(" Ask bookworm ").border_style(border_style));
        frame.render_widget(input, area);

        if self.active {
            frame.set_cursor_position(Position::new(
                cursor_x.min(area.x + area.width.saturating_sub(2)),
                area.y + 1,
            ));
        }
    }
}
