//! Top status bar: app name, status text, and a spinner while a turn resolves.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

pub struct TitleBar<'a> {
    pub status: &'a str,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " bookworm ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        ];
        if self.loading {
            spans.push(Span::styled(
                format!("{} ", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            self.status.to_string(),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER_FRAMES.len()));
        assert_ne!(spinner(0), spinner(1));
    }
}
