//! Book model and related wire types.
//!
//! Wire field names follow the public API (camelCase). Optional payload
//! fields that the client leaves out stay absent on the stored record and
//! are omitted from serialized JSON rather than coerced to `0`/`false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog record: one book and its reading-progress state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned at creation and never reused
    pub id: String,
    /// Book title, always non-empty for a stored record
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,
    /// Derived: true exactly when `page_count` equals `read_page`
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    /// Set once at creation
    pub inserted_at: DateTime<Utc>,
    /// Refreshed on every successful mutation
    pub updated_at: DateTime<Utc>,
}

/// Candidate book fields as submitted by the client (create and update).
///
/// Every field is optional at the wire level; the validator decides what a
/// well-formed payload must carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Derived finished flag under Option equality: two absent counts
    /// compare equal, so a book with neither count is considered finished.
    pub fn finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// Lightweight projection returned by the list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// List filters as they arrive on the query string.
///
/// `reading` and `finished` are textual flags; see [`parse_flag`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Strict boolean-flag parsing for query parameters: `"1"` is true, `"0"` is
/// false, and any other value means the filter is ignored.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}
