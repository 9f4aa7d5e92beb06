//! Row types for the tables the client reads and writes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A genre as stored in the `genres` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A parental block on a genre, from the `blocked_genres` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedGenre {
    pub genre_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Pending,
    Completed,
}

/// One reading goal on the calendar, from the `reading_schedules` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSchedule {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub book_title: String,
    pub pages: u32,
    pub status: ScheduleStatus,
}

/// One persisted chat message, for the `chat_messages` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLogRow {
    pub session_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub content: String,
    pub is_chatbot: bool,
    pub sent_at: DateTime<Utc>,
}
