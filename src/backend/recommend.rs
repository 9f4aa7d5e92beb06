//! Genre pool for the suggestion chips.
//!
//! Favorites come from the child's profile; random suggestions are drawn from
//! the full genre table minus parental blocks and minus anything the caller
//! already shows. Selection is a shuffle, not a ranking — ranking belongs to
//! the recommendation bot.

use log::debug;
use rand::seq::SliceRandom;
use serde_json::Value;

use crate::backend::store::{DataStore, StoreError};
use crate::backend::types::{BlockedGenre, Genre};

/// Fetch the child's favorite genres from the `child_details` table.
///
/// The column has lived through several schema migrations, so the value may
/// be a real array, a JSON-encoded array string, or a bare string.
pub async fn favorite_genres(
    store: &dyn DataStore,
    child_id: &str,
) -> Result<Vec<String>, StoreError> {
    let rows = store
        .select("child_details", &[("child_id", child_id)])
        .await?;
    let favorites = rows
        .first()
        .and_then(|row| row.get("favorite_genres"))
        .map(parse_favorites)
        .unwrap_or_default();
    debug!("loaded {} favorite genre(s) for child {child_id}", favorites.len());
    Ok(favorites)
}

pub(crate) fn parse_favorites(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(text) => match serde_json::from_str::<Vec<String>>(text) {
            Ok(parsed) => parsed,
            Err(_) if !text.is_empty() => vec![text.clone()],
            Err(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Draw up to `count` random genres the child may actually pick: never
/// blocked, never in `excluded`, never a duplicate.
pub async fn random_genres(
    store: &dyn DataStore,
    child_id: &str,
    count: usize,
    excluded: &[String],
) -> Result<Vec<String>, StoreError> {
    let all: Vec<Genre> = rows_as(store.select("genres", &[]).await?);
    let blocked: Vec<BlockedGenre> =
        rows_as(store.select("blocked_genres", &[("child_id", child_id)]).await?);

    let blocked_ids: Vec<i64> = blocked.iter().map(|b| b.genre_id).collect();
    let mut available: Vec<String> = Vec::new();
    for genre in all {
        if blocked_ids.contains(&genre.id)
            || excluded.iter().any(|e| e.eq_ignore_ascii_case(&genre.name))
            || available.iter().any(|a| a.eq_ignore_ascii_case(&genre.name))
        {
            continue;
        }
        available.push(genre.name);
    }

    debug!(
        "{} genre(s) available for child {child_id} after filtering, picking {count}",
        available.len()
    );

    available.shuffle(&mut rand::thread_rng());
    available.truncate(count);
    Ok(available)
}

/// Decode rows leniently: a malformed row is skipped, not fatal. The genre
/// tables are parent-edited and occasionally contain drafts.
fn rows_as<T: serde::de::DeserializeOwned>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect()
}
