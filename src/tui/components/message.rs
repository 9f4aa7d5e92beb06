use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::message::Message;
use crate::core::render::{MessageNode, genre_mentions, parse_markup};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with sender-based
/// styling.
///
/// `MessageBubble` is a transient component: created fresh each frame with the
/// data it needs. The message's markup is lexed into nodes and styled here —
/// emphasis becomes bold, known genre names are underlined so the child can
/// see what's pickable.
///
/// The [`calculate_height`](Self::calculate_height) method predicts rendered
/// height with `textwrap` options matching Ratatui's `Paragraph` wrapping, so
/// the parent `MessageList` can lay out scroll positions without rendering.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    /// Genres to highlight inside the content.
    pub known_genres: &'a [String],
    /// Whether this message is currently being read aloud.
    pub is_speaking: bool,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, known_genres: &'a [String], is_speaking: bool) -> Self {
        Self {
            message,
            known_genres,
            is_speaking,
        }
    }

    fn base_style(&self) -> Style {
        if self.message.from_bot {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        }
    }

    fn role(&self) -> &'static str {
        if self.message.from_bot { "bookworm" } else { "you" }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// Wrapping options must match the `Ratatui` default for `Paragraph` to
    /// ensure a 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut rows = 0u16;
        for line in logical_lines(&message.content) {
            if line.is_empty() {
                rows += 1;
            } else {
                rows += textwrap::wrap(&line, &options).len().max(1) as u16;
            }
        }
        rows.max(1) + VERTICAL_OVERHEAD
    }

    /// Build the styled text for the message body.
    fn text(&self) -> Text<'static> {
        let base = self.base_style();
        let emphasis = base.add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut current: Vec<Span<'static>> = Vec::new();
        for node in parse_markup(&self.message.content) {
            match node {
                MessageNode::LineBreak => lines.push(Line::from(std::mem::take(&mut current))),
                MessageNode::Plain(text) => {
                    current.extend(spans_with_mentions(&text, self.known_genres, base));
                }
                MessageNode::Emphasis(text) => {
                    current.extend(spans_with_mentions(&text, self.known_genres, emphasis));
                }
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(Line::from(current));
        }
        Text::from(lines)
    }
}

/// Split a fragment into spans, underlining known genre mentions.
fn spans_with_mentions(text: &str, genres: &[String], style: Style) -> Vec<Span<'static>> {
    let mentions = genre_mentions(text, genres);
    if mentions.is_empty() {
        return vec![Span::styled(text.to_string(), style)];
    }

    let mention_style = style
        .fg(Color::Magenta)
        .add_modifier(Modifier::UNDERLINED);
    let mut spans = Vec::new();
    let mut cursor = 0;
    for mention in mentions {
        if mention.range.start > cursor {
            spans.push(Span::styled(text[cursor..mention.range.start].to_string(), style));
        }
        spans.push(Span::styled(
            text[mention.range.clone()].to_string(),
            mention_style,
        ));
        cursor = mention.range.end;
    }
    if cursor < text.len() {
        spans.push(Span::styled(text[cursor..].to_string(), style));
    }
    spans
}

/// The message content as logical lines after markup lexing, markers stripped.
/// Used only for height calculation.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = vec![String::new()];
    for node in parse_markup(content) {
        match node {
            MessageNode::LineBreak => lines.push(String::new()),
            MessageNode::Plain(text) | MessageNode::Emphasis(text) => {
                lines.last_mut().expect("never empty").push_str(&text);
            }
        }
    }
    lines
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let base = self.base_style();
        let border = base.add_modifier(Modifier::DIM);

        let mut title = vec![Span::styled(self.role(), border)];
        if self.is_speaking {
            title.push(Span::styled(" (reading aloud)", border.fg(Color::Yellow)));
        }

        let paragraph = Paragraph::new(self.text())
            .block(
                Block::bordered()
                    .title(Line::from(title))
                    .border_style(border)
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}
