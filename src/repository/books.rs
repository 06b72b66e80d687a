//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::book::Book, repository::BookStore};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: &Book) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, author, year, is_available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING isbn, title, author, year, is_available
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(book.is_available)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT isbn, title, author, year, is_available FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT isbn, title, author, year, is_available FROM books ORDER BY isbn",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn find_available(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT isbn, title, author, year, is_available
            FROM books
            WHERE is_available = TRUE
            ORDER BY isbn
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn mark_borrowed(&self, isbn: &str) -> AppResult<Option<Book>> {
        // Single conditional update; the WHERE clause is the availability
        // precondition, so two concurrent borrows cannot both succeed.
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET is_available = FALSE
            WHERE isbn = $1 AND is_available = TRUE
            RETURNING isbn, title, author, year, is_available
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn mark_returned(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET is_available = TRUE
            WHERE isbn = $1 AND is_available = FALSE
            RETURNING isbn, title, author, year, is_available
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }
}
