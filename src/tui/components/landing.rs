//! # Landing Component
//!
//! Shown while the chat panel is closed: title, tagline, and the keys that
//! matter.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct Landing;

impl Component for Landing {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text_lines = Vec::new();

        text_lines.push(Line::from(Span::styled(
            "bookworm",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        text_lines.push(Line::from(Span::styled(
            "Find your next favorite book",
            Style::default().fg(Color::Gray),
        )));
        text_lines.push(Line::default());
        text_lines.push(Line::from(Span::styled(
            "Ctrl+B open chat   Ctrl+K reading calendar   Esc quit",
            Style::default().fg(Color::DarkGray),
        )));

        let version_text = format!("v{}", env!("CARGO_PKG_VERSION"));
        text_lines.push(Line::from(Span::styled(
            version_text,
            Style::default().fg(Color::DarkGray),
        )));

        let text_height = text_lines.len() as u16;
        let [center] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(text_lines).alignment(Alignment::Center),
            center,
        );
    }
}
