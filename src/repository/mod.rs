//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::book::Book};

/// Persistence contract for book records.
///
/// Services depend on this trait rather than on the concrete sqlx
/// repository, so tests can substitute an in-memory mock. The availability
/// flips are expressed as conditional updates (`mark_borrowed`,
/// `mark_returned`) instead of a read-then-write sequence, which makes the
/// state transition atomic at the store and closes the race between two
/// concurrent borrows of the same ISBN.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book. ISBN uniqueness is enforced by the store; a
    /// duplicate key surfaces as a database error.
    async fn insert(&self, book: &Book) -> AppResult<Book>;

    /// Point lookup by ISBN.
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Every book record.
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Only the books currently available to borrow.
    async fn find_available(&self) -> AppResult<Vec<Book>>;

    /// Flip `is_available` from true to false, only if currently true.
    /// Returns the updated record, or `None` when no record matched (absent
    /// or already borrowed).
    async fn mark_borrowed(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Flip `is_available` from false to true, only if currently false.
    /// Returns the updated record, or `None` when no record matched (absent
    /// or already available).
    async fn mark_returned(&self, isbn: &str) -> AppResult<Option<Book>>;
}

/// Main repository struct holding database access
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool),
        }
    }
}
