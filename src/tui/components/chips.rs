//! Genre suggestion chips.
//!
//! Renders the favorites and random sections beneath the conversation, each
//! with its heading, as numbered chips picked with Alt+digit. Numbering runs
//! across both sections so a digit always maps to exactly one genre.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::suggest::{FAVORITES_HEADING, SuggestionState};
use crate::tui::component::Component;

/// All chips currently offered, numbered from 1: favorites first, then random.
pub fn chip_labels(suggestions: &SuggestionState) -> Vec<(usize, String)> {
    let favorites = suggestions
        .show_favorites
        .then_some(suggestions.favorite_genres.iter())
        .into_iter()
        .flatten();
    let random = suggestions
        .show_random
        .then_some(suggestions.random_genres.iter())
        .into_iter()
        .flatten();
    favorites
        .chain(random)
        .enumerate()
        .map(|(i, genre)| (i + 1, genre.clone()))
        .collect()
}

/// The genre behind Alt+`digit`, if any.
pub fn chip_for_digit(suggestions: &SuggestionState, digit: usize) -> Option<String> {
    chip_labels(suggestions)
        .into_iter()
        .find(|(n, _)| *n == digit)
        .map(|(_, genre)| genre)
}

/// Rows needed to render the chips (heading + chips per visible section).
pub fn height(suggestions: &SuggestionState) -> u16 {
    let mut rows = 0;
    if suggestions.show_favorites && !suggestions.favorite_genres.is_empty() {
        rows += 2;
    }
    if suggestions.show_random && !suggestions.random_genres.is_empty() {
        rows += 2;
    }
    rows
}

/// Transient render wrapper for the chip rows.
pub struct ChipRows<'a> {
    pub suggestions: &'a SuggestionState,
}

impl<'a> ChipRows<'a> {
    fn chip_line(genres: &[String], first_number: usize, genre_style: Style) -> Line<'static> {
        let mut spans = Vec::new();
        for (offset, genre) in genres.iter().enumerate() {
            if offset > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!("[{}] ", first_number + offset),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(genre.clone(), genre_style));
        }
        Line::from(spans)
    }
}

impl<'a> Component for ChipRows<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let heading_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC);

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut next_number = 1;

        if self.suggestions.show_favorites && !self.suggestions.favorite_genres.is_empty() {
            lines.push(Line::from(Span::styled(FAVORITES_HEADING, heading_style)));
            lines.push(Self::chip_line(
                &self.suggestions.favorite_genres,
                next_number,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            next_number += self.suggestions.favorite_genres.len();
        }

        if self.suggestions.show_random && !self.suggestions.random_genres.is_empty() {
            let heading = self
                .suggestions
                .random_reason
                .unwrap_or(crate::core::suggest::RandomReason::Threshold)
                .heading();
            lines.push(Line::from(Span::styled(heading, heading_style)));
            lines.push(Self::chip_line(
                &self.suggestions.random_genres,
                next_number,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::suggest::RandomReason;

    fn suggestions_with_both() -> SuggestionState {
        let mut state = SuggestionState::default();
        state.offer_favorites(&["Fantasy".to_string(), "Space".to_string()]);
        state.offer_random(
            vec!["Mystery".to_string(), "Sports".to_string()],
            RandomReason::Threshold,
        );
        state
    }

    #[test]
    fn test_numbering_spans_sections() {
        let labels = chip_labels(&suggestions_with_both());
        assert_eq!(
            labels,
            vec![
                (1, "Fantasy".to_string()),
                (2, "Space".to_string()),
                (3, "Mystery".to_string()),
                (4, "Sports".to_string()),
            ]
        );
    }

    #[test]
    fn test_chip_for_digit() {
        let state = suggestions_with_both();
        assert_eq!(chip_for_digit(&state, 3), Some("Mystery".to_string()));
        assert_eq!(chip_for_digit(&state, 9), None);
    }

    #[test]
    fn test_height_per_visible_section() {
        assert_eq!(height(&SuggestionState::default()), 0);
        let mut favorites_only = SuggestionState::default();
        favorites_only.offer_favorites(&["Fantasy".to_string()]);
        assert_eq!(height(&favorites_only), 2);
        assert_eq!(height(&suggestions_with_both()), 4);
    }

    #[test]
    fn test_hidden_sections_offer_no_chips() {
        let mut state = SuggestionState::default();
        state.offer_favorites(&["Fantasy".to_string()]);
        state.clear();
        assert!(chip_labels(&state).is_empty());
        assert_eq!(chip_for_digit(&state, 1), None);
    }
}
