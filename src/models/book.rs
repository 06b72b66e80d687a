//! Book model and creation payload.
//!
//! A book is keyed by its ISBN and carries a single piece of mutable state,
//! `isAvailable`, which only ever flips between `true` and `false` through
//! the borrow and return operations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Required fields of a creation payload, in reporting order.
pub const REQUIRED_FIELDS: [&str; 4] = ["isbn", "title", "author", "year"];

/// Full book model (DB row + API representation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

/// Creation payload for a book.
///
/// Required fields are optional at the wire level so that a request missing
/// several of them reports every absent field at once instead of failing on
/// the first.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "isAvailable")]
    pub is_available: Option<bool>,
}

impl CreateBook {
    /// Names of all required fields absent from this payload, in the order
    /// of [`REQUIRED_FIELDS`]. Empty when the payload is complete.
    pub fn missing_fields(&self) -> Vec<String> {
        let present = [
            self.isbn.is_some(),
            self.title.is_some(),
            self.author.is_some(),
            self.year.is_some(),
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Build the book to persist. Availability defaults to `true` unless the
    /// payload overrides it. Panics if a required field is absent; callers
    /// must check [`missing_fields`](Self::missing_fields) first.
    pub fn into_book(self) -> Book {
        Book {
            isbn: self.isbn.expect("isbn checked by missing_fields"),
            title: self.title.expect("title checked by missing_fields"),
            author: self.author.expect("author checked by missing_fields"),
            year: self.year.expect("year checked by missing_fields"),
            is_available: self.is_available.unwrap_or(true),
        }
    }
}
