//! Enlarged-cover overlay.
//!
//! A terminal can't decode the bitmap, so the overlay frames the cover URL
//! with an open-in-browser hint. Showing a new cover replaces the previous
//! one; there is no stacking.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct ImageViewer<'a> {
    pub url: &'a str,
}

impl<'a> Component for ImageViewer<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Cover ")
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::uniform(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [url_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.url)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            url_area,
        );
        frame.render_widget(
            Paragraph::new("Open in your browser to view the cover.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut viewer = ImageViewer {
                    url: "https://img/cover.png",
                };
                let area = f.area();
                viewer.render(f, area);
            })
            .unwrap();
    }
}
