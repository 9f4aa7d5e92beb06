//! The recommendation bot.
//!
//! The bot computes the actual recommendations; the client just sends the
//! user's message and renders whatever comes back. Replies arrive either as
//! preformatted markup text or as a structured book list, which we format into
//! the same `**…**`/`<br>` markup the renderer understands.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

/// Errors from the recommendation backend. The orchestrator turns any of
/// these into the apology message; none of them are fatal.
#[derive(Debug)]
pub enum BackendError {
    Network(String),
    Api { status: u16, message: String },
    Decode(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "chat network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "chat error (HTTP {status}): {message}")
            }
            BackendError::Decode(msg) => write!(f, "chat decode error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn name(&self) -> &str;

    /// One reply for one user message. Returns markup text ready for the
    /// message renderer.
    async fn reply(&self, message: &str) -> Result<String, BackendError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// A book hit in a structured bot reply.
#[derive(Debug, Deserialize)]
struct BookHit {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content_url: Option<String>,
}

/// The bot answers with plain markup text or a book list, never both.
#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    books: Option<Vec<BookHit>>,
}

impl ChatReply {
    fn into_markup(self) -> Result<String, BackendError> {
        if let Some(text) = self.response {
            return Ok(text);
        }
        if let Some(books) = self.books {
            return Ok(format_books(&books));
        }
        Err(BackendError::Decode(
            "reply had neither response text nor books".to_string(),
        ))
    }
}

fn format_books(books: &[BookHit]) -> String {
    let mut out = String::from("Here are some books you might enjoy:");
    for book in books {
        out.push_str("<br>**");
        out.push_str(&book.title);
        out.push_str("**");
        if let Some(description) = &book.description {
            out.push_str("<br>");
            out.push_str(description);
        }
        if let Some(url) = &book.content_url {
            out.push_str("<br>");
            out.push_str(url);
        }
    }
    out
}

/// HTTP implementation of [`ChatBackend`]: `POST {base}/chat`.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn reply(&self, message: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        reply.into_markup()
    }
}

/// Backend used by `--offline`: every reply fails, so the conversation
/// degrades to the apology path without a network in sight.
pub struct OfflineChatBackend;

#[async_trait]
impl ChatBackend for OfflineChatBackend {
    fn name(&self) -> &str {
        "offline"
    }

    async fn reply(&self, _message: &str) -> Result<String, BackendError> {
        Err(BackendError::Network("offline mode".to_string()))
    }
}
