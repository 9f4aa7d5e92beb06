//! # TUI Components
//!
//! All UI components for the terminal interface, in two patterns:
//!
//! **Stateless (props-based)** — created fresh each frame with the data they
//! need: `TitleBar`, `MessageBubble`, `ChipRows`, `CalendarOverlay`,
//! `ImageViewer`, `Landing`.
//!
//! **Stateful (event-driven)** — hold local state and emit events:
//! `InputLine`, `MessageListState`.
//!
//! Components receive external data as props (struct fields), never by
//! reaching into global state; each file co-locates its state types, events,
//! rendering, and tests.

use ratatui::layout::{Constraint, Layout, Rect};

pub mod calendar;
pub mod chips;
pub mod image_viewer;
pub mod input_line;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use calendar::CalendarOverlay;
pub use chips::ChipRows;
pub use image_viewer::ImageViewer;
pub use input_line::{InputEvent, InputLine};
pub use landing::Landing;
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(70, 60, outer);
        assert!(inner.x > 0 && inner.y > 0);
        assert!(inner.right() <= outer.right());
        assert!(inner.bottom() <= outer.bottom());
    }
}
