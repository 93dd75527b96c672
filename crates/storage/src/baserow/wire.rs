//! Shared response shapes and field conventions for the row-store API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The store's date fields are plain `YYYY-MM-DD` strings.
pub(crate) fn date_string(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Subset of a row payload we care about after a create.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRow {
    pub id: i64,
}

/// Paged listing envelope; unknown fields (`next`, `previous`, row bodies)
/// are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RowList {
    pub count: i64,
    pub results: Vec<CreatedRow>,
}
