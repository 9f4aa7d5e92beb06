//! # Chat History Persistence
//!
//! Completed turns are written to the `chat_messages` table through the data
//! store, grouped by session id. Saves are best-effort: a failure is logged
//! and the conversation carries on.

use log::debug;
use serde_json::Value;

use crate::backend::{ChatLogRow, DataStore, StoreError};
use crate::core::message::Message;

pub const HISTORY_TABLE: &str = "chat_messages";

/// Build the two rows (user then bot) for one resolved turn.
pub fn rows_for_turn(
    session_id: &str,
    user_id: Option<&str>,
    user_message: &Message,
    bot_message: &Message,
) -> [ChatLogRow; 2] {
    let row = |message: &Message| ChatLogRow {
        session_id: session_id.to_string(),
        user_id: user_id.map(str::to_string),
        content: message.content.clone(),
        is_chatbot: message.from_bot,
        sent_at: message.sent_at,
    };
    [row(user_message), row(bot_message)]
}

/// Persist one resolved turn. This is the single entry point for history
/// writes — the TUI calls it from the `SaveTurn` effect.
pub async fn record_turn(
    store: &dyn DataStore,
    session_id: &str,
    user_id: Option<&str>,
    user_message: &Message,
    bot_message: &Message,
) -> Result<(), StoreError> {
    for row in rows_for_turn(session_id, user_id, user_message, bot_message) {
        let value = serde_json::to_value(&row)
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        store.insert(HISTORY_TABLE, value).await?;
    }
    debug!("turn recorded for session {session_id}");
    Ok(())
}

/// Load a user's persisted messages, oldest first as stored.
pub async fn recent_history(
    store: &dyn DataStore,
    user_id: &str,
) -> Result<Vec<ChatLogRow>, StoreError> {
    let rows = store.select(HISTORY_TABLE, &[("user_id", user_id)]).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row: Value| serde_json::from_value(row).ok())
        .collect())
}
