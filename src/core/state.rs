//! # Application State
//!
//! Core business state for bookworm. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── chat: Arc<dyn ChatBackend>      // recommendation bot
//! ├── store: Arc<dyn DataStore>       // tabular data store
//! ├── transcript: Transcript          // append-only message log
//! ├── tracker: UncertaintyTracker     // per-session indecision counter
//! ├── suggestions: SuggestionState    // genre chips for the current turn
//! ├── favorite_genres: Vec<String>    // child profile favorites
//! ├── overlay: OverlayState           // chat/calendar/image/media coordinator
//! ├── speech: SpeechState             // read-aloud state
//! ├── schedules: Vec<ReadingSchedule> // calendar overlay content
//! ├── is_loading: bool                // a turn is resolving
//! ├── status_message: String          // status bar text
//! ├── user: Option<User>              // current identity
//! └── session_id: String              // history batch id
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::backend::{ChatBackend, DataStore, ReadingSchedule, User};
use crate::core::message::Transcript;
use crate::core::overlay::OverlayState;
use crate::core::speech::SpeechState;
use crate::core::suggest::SuggestionState;
use crate::core::uncertainty::UncertaintyTracker;

pub struct App {
    pub chat: Arc<dyn ChatBackend>,
    pub store: Arc<dyn DataStore>,
    pub transcript: Transcript,
    /// One tracker per conversation session, owned here and mutated only by
    /// the reducer. Never shared across sessions.
    pub tracker: UncertaintyTracker,
    pub suggestions: SuggestionState,
    pub favorite_genres: Vec<String>,
    pub overlay: OverlayState,
    pub speech: SpeechState,
    pub schedules: Vec<ReadingSchedule>,
    /// True while a turn is resolving. New input is rejected until the bot
    /// reply (or its failure) lands.
    pub is_loading: bool,
    pub status_message: String,
    pub user: Option<User>,
    /// Groups this session's persisted history rows.
    pub session_id: String,
}

impl App {
    pub fn new(chat: Arc<dyn ChatBackend>, store: Arc<dyn DataStore>) -> Self {
        Self {
            chat,
            store,
            transcript: Transcript::new(),
            tracker: UncertaintyTracker::new(),
            suggestions: SuggestionState::default(),
            favorite_genres: Vec::new(),
            overlay: OverlayState::default(),
            speech: SpeechState::default(),
            schedules: Vec::new(),
            is_loading: false,
            status_message: String::from("Ask me about books!"),
            user: None,
            session_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ask me about books!");
        assert!(!app.is_loading);
        assert_eq!(app.transcript.len(), 1); // greeting
        assert_eq!(app.tracker.count(), 0);
        assert!(!app.overlay.chat_open());
        assert!(!app.session_id.is_empty());
    }
}
