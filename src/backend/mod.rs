//! External collaborators.
//!
//! Everything the conversation core consumes but doesn't implement: the
//! recommendation bot, the tabular data store, identity lookup, and the genre
//! pool built on top of the store. Each collaborator hides behind a trait so
//! the core and the tests never depend on HTTP.

pub mod auth;
pub mod chat;
pub mod recommend;
pub mod store;
pub mod types;

pub use auth::{Identity, StaticIdentity, User};
pub use chat::{BackendError, ChatBackend, HttpChatBackend, OfflineChatBackend};
pub use store::{DataStore, HttpDataStore, OfflineStore, StoreError};
pub use types::{BlockedGenre, ChatLogRow, Genre, ReadingSchedule, ScheduleStatus};
