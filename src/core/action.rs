//! # Actions
//!
//! Everything that can happen in bookworm becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The bot responds? That's `Action::ReplyReceived(text)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the side effect the caller must
//! run (spawn a request, schedule a timer, persist a turn). No I/O happens
//! here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive a whole conversation by feeding
//! actions and asserting on state and effects. And debuggable: log every
//! action, replay the exact session.

use log::{debug, warn};

use crate::backend::{ReadingSchedule, User};
use crate::core::detect;
use crate::core::message::REPLY_ERROR;
use crate::core::state::App;
use crate::core::suggest::{self, RandomReason};

#[derive(Debug)]
pub enum Action {
    // User events
    Submit(String),
    /// A suggestion chip (or highlighted genre) was picked. Treated as if the
    /// genre name had been typed as the next message.
    GenreChosen(String),
    ToggleChat,
    CloseChat,
    ToggleCalendar,
    ShowImage(String),
    CloseImage,
    ToggleReadAloud(usize),
    Quit,

    // Timer and background-task results
    CalendarTransitionDone,
    AuthChanged(Option<User>),
    FavoritesLoaded(Vec<String>),
    ReplyReceived(String),
    ReplyFailed(String),
    RandomGenresReady {
        genres: Vec<String>,
        reason: RandomReason,
    },
    RandomGenresFailed(String),
    SchedulesLoaded(Vec<ReadingSchedule>),
    SchedulesFailed(String),
}

/// What the caller must do after an update. At most one effect per action;
/// a turn bundles its reply request and optional chip fetch together.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Ask the bot for a reply, and optionally fetch random genre chips for
    /// the same turn.
    SpawnTurn {
        message: String,
        fetch_random: Option<(usize, RandomReason)>,
    },
    /// Cancel any outstanding calendar tick timer and schedule a fresh one.
    /// `refresh` means the overlay is opening and schedules should be refetched.
    ScheduleCalendarTick { refresh: bool },
    /// Persist the user/bot exchange that just resolved.
    SaveTurn,
    /// Load the signed-in child's favorite genres.
    FetchFavorites,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let message = text.trim();
            if message.is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("submit rejected: a turn is still resolving");
                return Effect::None;
            }
            submit_turn(app, message.to_string())
        }

        Action::GenreChosen(genre) => {
            if app.is_loading {
                return Effect::None;
            }
            // Picking a chip settles the indecision: reset, clear the chips,
            // and re-enter the conversation as free-text input.
            app.tracker.reset();
            app.suggestions.clear();
            submit_turn(app, genre)
        }

        Action::ToggleChat => {
            if app.overlay.chat_open() {
                close_chat(app);
            } else {
                app.overlay.open_chat();
            }
            Effect::None
        }

        Action::CloseChat => {
            close_chat(app);
            Effect::None
        }

        Action::ToggleCalendar => {
            let phase = app.overlay.toggle_calendar();
            debug!("calendar toggled → {phase:?}");
            Effect::ScheduleCalendarTick {
                refresh: phase == crate::core::overlay::CalendarPhase::Opening,
            }
        }

        Action::CalendarTransitionDone => {
            app.overlay.calendar_tick();
            Effect::None
        }

        Action::ShowImage(url) => {
            app.overlay.show_image(url);
            Effect::None
        }

        Action::CloseImage => {
            app.overlay.close_image();
            Effect::None
        }

        Action::ToggleReadAloud(index) => {
            if index < app.transcript.len() {
                app.speech.toggle(index);
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,

        Action::AuthChanged(user) => {
            let signed_in = user.is_some();
            app.user = user;
            if signed_in {
                Effect::FetchFavorites
            } else {
                app.favorite_genres.clear();
                app.suggestions.clear();
                Effect::None
            }
        }

        Action::FavoritesLoaded(genres) => {
            debug!("favorites loaded: {genres:?}");
            app.favorite_genres = genres;
            Effect::None
        }

        Action::ReplyReceived(text) => {
            app.transcript.push_bot(&text);
            app.is_loading = false;
            app.status_message = String::from("Ask me about books!");
            // A nudging reply ("what are you interested in?") re-surfaces the
            // favorites section even without user uncertainty.
            if detect::detects_bot_suggestion(&text) && !app.favorite_genres.is_empty() {
                app.suggestions.offer_favorites(&app.favorite_genres);
            }
            Effect::SaveTurn
        }

        Action::ReplyFailed(message) => {
            warn!("bot reply failed: {message}");
            app.transcript.push_bot(REPLY_ERROR);
            app.is_loading = false;
            app.status_message = String::from("Ask me about books!");
            Effect::None
        }

        Action::RandomGenresReady { genres, reason } => {
            if genres.is_empty() {
                app.suggestions.hide_random();
            } else {
                app.suggestions.offer_random(genres, reason);
            }
            Effect::None
        }

        Action::RandomGenresFailed(message) => {
            // Degrade to showing nothing; the turn itself is unaffected.
            warn!("random genre fetch failed: {message}");
            app.suggestions.hide_random();
            Effect::None
        }

        Action::SchedulesLoaded(schedules) => {
            app.schedules = schedules;
            Effect::None
        }

        Action::SchedulesFailed(message) => {
            warn!("schedule fetch failed: {message}");
            app.schedules.clear();
            Effect::None
        }
    }
}

/// Append the user message, run the suggestion decision table, and kick off
/// the turn's background work.
fn submit_turn(app: &mut App, message: String) -> Effect {
    app.transcript.push_user(&message);

    let decision = suggest::evaluate_turn(
        &message,
        &mut app.tracker,
        !app.favorite_genres.is_empty(),
    );

    // Suggestion display is recomputed per turn.
    app.suggestions.clear();
    if decision.topic_changed {
        debug!("topic changed, uncertainty reset");
    }
    if decision.show_favorites {
        app.suggestions.offer_favorites(&app.favorite_genres);
    }

    app.is_loading = true;
    app.status_message = String::from("Thinking...");

    Effect::SpawnTurn {
        message,
        fetch_random: decision.fetch_random,
    }
}

fn close_chat(app: &mut App) {
    let speech = &mut app.speech;
    app.overlay.close_chat(|| speech.stop_all());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::overlay::CalendarPhase;
    use crate::core::suggest::{EXPLICIT_RANDOM_COUNT, IMPLICIT_RANDOM_COUNT};
    use crate::test_support::test_app;

    #[test]
    fn test_submit_appends_and_spawns_turn() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("dinosaur books".to_string()));
        assert_eq!(
            effect,
            Effect::SpawnTurn {
                message: "dinosaur books".to_string(),
                fetch_random: None,
            }
        );
        assert!(app.is_loading);
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.last().unwrap().content, "dinosaur books");
    }

    #[test]
    fn test_submit_rejected_while_turn_resolves() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let len = app.transcript.len();
        let effect = update(&mut app, Action::Submit("second".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), len);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit("   ".to_string())), Effect::None);
        assert_eq!(app.transcript.len(), 1);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_repeated_uncertainty_requests_random_chips() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];

        let first = update(&mut app, Action::Submit("I'm not sure".to_string()));
        assert_eq!(
            first,
            Effect::SpawnTurn {
                message: "I'm not sure".to_string(),
                fetch_random: None,
            }
        );
        assert!(app.suggestions.show_favorites);
        update(&mut app, Action::ReplyReceived("Here you go".to_string()));

        let second = update(&mut app, Action::Submit("no idea really".to_string()));
        assert_eq!(
            second,
            Effect::SpawnTurn {
                message: "no idea really".to_string(),
                fetch_random: Some((IMPLICIT_RANDOM_COUNT, RandomReason::Threshold)),
            }
        );
        assert!(app.suggestions.show_favorites);
    }

    #[test]
    fn test_explicit_request_hides_favorites_and_fetches_five() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        let effect = update(&mut app, Action::Submit("show me different genres".to_string()));
        assert_eq!(
            effect,
            Effect::SpawnTurn {
                message: "show me different genres".to_string(),
                fetch_random: Some((EXPLICIT_RANDOM_COUNT, RandomReason::Explicit)),
            }
        );
        assert!(!app.suggestions.show_favorites);
    }

    #[test]
    fn test_topic_change_resets_tracker_and_chips() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        update(&mut app, Action::Submit("not sure".to_string()));
        update(&mut app, Action::ReplyReceived("hm".to_string()));
        assert_eq!(app.tracker.count(), 1);

        update(&mut app, Action::Submit("dinosaurs please".to_string()));
        assert_eq!(app.tracker.count(), 0);
        assert!(!app.suggestions.show_favorites);
        assert!(!app.suggestions.show_random);
    }

    #[test]
    fn test_genre_chosen_resets_and_resubmits() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        update(&mut app, Action::Submit("not sure".to_string()));
        update(&mut app, Action::ReplyReceived("hm".to_string()));
        assert_eq!(app.tracker.count(), 1);

        let effect = update(&mut app, Action::GenreChosen("Fantasy".to_string()));
        assert_eq!(app.tracker.count(), 0);
        assert_eq!(
            effect,
            Effect::SpawnTurn {
                message: "Fantasy".to_string(),
                fetch_random: None,
            }
        );
        assert_eq!(app.transcript.last().unwrap().content, "Fantasy");
        assert!(!app.transcript.last().unwrap().from_bot);
    }

    #[test]
    fn test_reply_received_saves_turn() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let effect = update(&mut app, Action::ReplyReceived("hello!".to_string()));
        assert_eq!(effect, Effect::SaveTurn);
        assert!(!app.is_loading);
        assert!(app.transcript.last().unwrap().from_bot);
    }

    #[test]
    fn test_suggestive_reply_resurfaces_favorites() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        update(&mut app, Action::Submit("hello".to_string()));
        assert!(!app.suggestions.show_favorites);
        update(
            &mut app,
            Action::ReplyReceived("What are you interested in?".to_string()),
        );
        assert!(app.suggestions.show_favorites);
    }

    #[test]
    fn test_reply_failure_appends_apology() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let effect = update(&mut app, Action::ReplyFailed("boom".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.transcript.last().unwrap().content, REPLY_ERROR);
    }

    #[test]
    fn test_random_chips_installed_with_dedup() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        update(&mut app, Action::Submit("not sure".to_string()));
        update(
            &mut app,
            Action::RandomGenresReady {
                genres: vec!["fantasy".to_string(), "Mystery".to_string()],
                reason: RandomReason::Threshold,
            },
        );
        assert!(app.suggestions.show_random);
        assert_eq!(app.suggestions.random_genres, vec!["Mystery".to_string()]);
    }

    #[test]
    fn test_random_fetch_failure_degrades_to_nothing() {
        let mut app = test_app();
        update(&mut app, Action::Submit("not sure".to_string()));
        update(&mut app, Action::RandomGenresFailed("store down".to_string()));
        assert!(!app.suggestions.show_random);
        assert!(app.suggestions.random_genres.is_empty());
        // The turn itself is unaffected.
        assert!(app.is_loading);
    }

    #[test]
    fn test_calendar_toggle_schedules_tick_and_refreshes_on_open() {
        let mut app = test_app();
        let opening = update(&mut app, Action::ToggleCalendar);
        assert_eq!(opening, Effect::ScheduleCalendarTick { refresh: true });
        assert_eq!(app.overlay.calendar_phase(), CalendarPhase::Opening);

        update(&mut app, Action::CalendarTransitionDone);
        let closing = update(&mut app, Action::ToggleCalendar);
        assert_eq!(closing, Effect::ScheduleCalendarTick { refresh: false });
        assert_eq!(app.overlay.calendar_phase(), CalendarPhase::Closing);
    }

    #[test]
    fn test_close_chat_stops_speech() {
        let mut app = test_app();
        app.overlay.open_chat();
        app.speech.start(0);
        update(&mut app, Action::CloseChat);
        assert!(!app.overlay.chat_open());
        assert_eq!(app.speech.speaking(), None);
    }

    #[test]
    fn test_sign_out_clears_profile_state() {
        let mut app = test_app();
        app.favorite_genres = vec!["Fantasy".to_string()];
        app.suggestions.offer_favorites(&app.favorite_genres.clone());
        let effect = update(&mut app, Action::AuthChanged(None));
        assert_eq!(effect, Effect::None);
        assert!(app.favorite_genres.is_empty());
        assert!(!app.suggestions.show_favorites);
    }

    #[test]
    fn test_sign_in_fetches_favorites() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::AuthChanged(Some(User { id: "child-7".to_string() })),
        );
        assert_eq!(effect, Effect::FetchFavorites);
        assert_eq!(app.user_id(), Some("child-7"));
    }
}
