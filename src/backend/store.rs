//! Generic tabular data store.
//!
//! The client never assumes a concrete storage engine; everything goes through
//! the [`DataStore`] trait, whose four operations mirror what the excluded
//! CRUD layers use. [`HttpDataStore`] implements it over a PostgREST-style
//! HTTP dialect: `GET /{table}?col=eq.val`, `POST /{table}`,
//! `PATCH /{table}?id=eq.{id}`, `DELETE /{table}?id=eq.{id}`.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// Errors from data-store operations. Every variant carries a message; the
/// conversation core only ever logs these and degrades.
#[derive(Debug)]
pub enum StoreError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The store returned an error response.
    Api { status: u16, message: String },
    /// The store's response wasn't the JSON shape we expected.
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "store network error: {msg}"),
            StoreError::Api { status, message } => {
                write!(f, "store error (HTTP {status}): {message}")
            }
            StoreError::Decode(msg) => write!(f, "store decode error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Async tabular CRUD. Filters are column/value equality pairs.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn select(&self, table: &str, filters: &[(&str, &str)]) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value, StoreError>;

    async fn delete(&self, table: &str, id: &str) -> Result<(), StoreError>;
}

/// HTTP implementation of [`DataStore`].
pub struct HttpDataStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDataStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}/{}", self.base_url, table));
        if let Some(key) = &self.api_key {
            req = req
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}"));
        }
        req
    }

    fn eq_filters(filters: &[(&str, &str)]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|(col, val)| (col.to_string(), format!("eq.{val}")))
            .collect()
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Mutation responses arrive as a one-element array of the affected row.
    async fn single_row(response: reqwest::Response) -> Result<Value, StoreError> {
        let rows: Vec<Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("empty row set in mutation response".to_string()))
    }
}

#[async_trait]
impl DataStore for HttpDataStore {
    async fn select(&self, table: &str, filters: &[(&str, &str)]) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&Self::eq_filters(filters))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::single_row(response).await
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<Value, StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::single_row(response).await
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Store used by `--offline`: reads come back empty, writes fail. The
/// conversation runs, suggestion fetches degrade to "show nothing", and
/// history saves warn and continue.
pub struct OfflineStore;

#[async_trait]
impl DataStore for OfflineStore {
    async fn select(&self, _table: &str, _filters: &[(&str, &str)]) -> Result<Vec<Value>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, _row: Value) -> Result<Value, StoreError> {
        Err(StoreError::Network("offline mode".to_string()))
    }

    async fn update(&self, _table: &str, _id: &str, _patch: Value) -> Result<Value, StoreError> {
        Err(StoreError::Network("offline mode".to_string()))
    }

    async fn delete(&self, _table: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Network("offline mode".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_filter_encoding() {
        let filters = HttpDataStore::eq_filters(&[("child_id", "c-1"), ("status", "pending")]);
        assert_eq!(
            filters,
            vec![
                ("child_id".to_string(), "eq.c-1".to_string()),
                ("status".to_string(), "eq.pending".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = HttpDataStore::new("http://localhost:54321/rest/v1/".to_string(), None);
        assert_eq!(store.base_url, "http://localhost:54321/rest/v1");
    }

    #[test]
    fn test_error_display_carries_message() {
        let err = StoreError::Api {
            status: 404,
            message: "relation does not exist".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("relation does not exist"));
    }
}
