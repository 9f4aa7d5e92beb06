//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::{BackendError, ChatBackend, DataStore, StoreError};

/// A canned bot for tests that don't need a real backend.
pub struct NoopChatBackend;

#[async_trait]
impl ChatBackend for NoopChatBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn reply(&self, _message: &str) -> Result<String, BackendError> {
        Ok(String::from("Okay!"))
    }
}

/// An empty store: reads succeed with nothing, writes echo their input.
pub struct NoopStore;

#[async_trait]
impl DataStore for NoopStore {
    async fn select(&self, _table: &str, _filters: &[(&str, &str)]) -> Result<Vec<Value>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, row: Value) -> Result<Value, StoreError> {
        Ok(row)
    }

    async fn update(&self, _table: &str, _id: &str, patch: Value) -> Result<Value, StoreError> {
        Ok(patch)
    }

    async fn delete(&self, _table: &str, _id: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Creates a test App wired to the noop collaborators.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopChatBackend), Arc::new(NoopStore))
}
