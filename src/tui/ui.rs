//! Frame composition: title bar, transcript, chips, input, and overlays.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CalendarOverlay, ChipRows, ImageViewer, Landing, MessageList, TitleBar, chips,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let mut title_bar = TitleBar {
        status: &app.status_message,
        loading: app.is_loading,
        spinner_frame,
    };

    if !app.overlay.chat_open() {
        let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
        title_bar.render(frame, title_area);
        Landing.render(frame, main_area);
    } else {
        let chips_height = chips::height(&app.suggestions);
        let layout = Layout::vertical([Length(1), Min(0), Length(chips_height), Length(3)]);
        let [title_area, main_area, chips_area, input_area] = layout.areas(frame.area());

        title_bar.render(frame, title_area);

        // Highlight anything currently offered as a chip, plus the favorites.
        let mut known_genres = app.favorite_genres.clone();
        for genre in &app.suggestions.random_genres {
            if !known_genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                known_genres.push(genre.clone());
            }
        }

        let mut list = MessageList {
            messages: app.transcript.messages(),
            known_genres: &known_genres,
            speaking: app.speech.speaking(),
            state: &mut tui.message_list,
        };
        list.render(frame, main_area);

        if chips_height > 0 {
            let mut rows = ChipRows {
                suggestions: &app.suggestions,
            };
            rows.render(frame, chips_area);
        }

        tui.input.active = !app.overlay.calendar_visible() && app.overlay.enlarged_image().is_none();
        tui.input.render(frame, input_area);
    }

    // Overlays, topmost last.
    if app.overlay.calendar_visible() {
        let mut calendar = CalendarOverlay {
            phase: app.overlay.calendar_phase(),
            schedules: &app.schedules,
            today: chrono::Local::now().date_naive(),
        };
        let area = frame.area();
        calendar.render(frame, area);
    }
    if let Some(url) = app.overlay.enlarged_image() {
        let url = url.to_string();
        let mut viewer = ImageViewer { url: &url };
        let area = frame.area();
        viewer.render(frame, area);
    }
}
