//! # Core Conversation Logic
//!
//! This module contains bookworm's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │    API     │
//!     │  Adapter   │      │  Adapter   │      │  (future)  │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all session state in one place
//! - [`action`]: The `Action` enum — everything that can happen, and `update()`
//! - [`message`]: The append-only transcript
//! - [`render`]: Bot markup → typed display nodes
//! - [`uncertainty`] + [`detect`] + [`suggest`]: when and which genre chips appear
//! - [`overlay`]: chat/calendar/image/media coordination
//! - [`speech`]: read-aloud state
//! - [`history`]: turn persistence through the data store
//! - [`config`]: settings with a defaults → file → env → CLI hierarchy

pub mod action;
pub mod config;
pub mod detect;
pub mod history;
pub mod message;
pub mod overlay;
pub mod render;
pub mod speech;
pub mod state;
pub mod suggest;
pub mod uncertainty;
