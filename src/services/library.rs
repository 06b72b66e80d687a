//! Library inventory service.
//!
//! Holds the availability state logic: each book is a two-state machine,
//! `Available` ⇄ `Borrowed`, driven by the borrow and return operations.
//! The service receives its store by injection rather than reaching for a
//! process-wide singleton, so tests can run against a substitute store.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn BookStore>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new book.
    ///
    /// Every absent required field is reported in one error rather than
    /// failing on the first. ISBN uniqueness is left to the store's insert;
    /// a duplicate surfaces as a generic creation failure.
    pub async fn add_book(&self, payload: CreateBook) -> AppResult<Book> {
        let missing = payload.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        self.store.insert(&payload.into_book()).await
    }

    /// Borrow a book: `Available` → `Borrowed`.
    ///
    /// A missing record and an already-borrowed record yield the same
    /// "not available" outcome. The conditional update fails to match in
    /// both cases, and the contract deliberately does not tell them apart.
    pub async fn borrow_book(&self, isbn: &str) -> AppResult<Book> {
        self.store
            .mark_borrowed(isbn)
            .await?
            .ok_or(AppError::NotAvailable)
    }

    /// Return a book: `Borrowed` → `Available`.
    ///
    /// Unlike borrow, the failure cases are distinguished: a record that is
    /// already available and a record that does not exist produce different
    /// errors. The lookup only happens after the conditional update missed.
    pub async fn return_book(&self, isbn: &str) -> AppResult<Book> {
        if let Some(book) = self.store.mark_returned(isbn).await? {
            return Ok(book);
        }

        match self.store.find_by_isbn(isbn).await? {
            Some(_) => Err(AppError::AlreadyAvailable),
            None => Err(AppError::NoSuchBook),
        }
    }

    /// Books currently available to borrow.
    pub async fn available_books(&self) -> AppResult<Vec<Book>> {
        self.store.find_available().await
    }

    /// Every book in the inventory.
    pub async fn all_books(&self) -> AppResult<Vec<Book>> {
        self.store.find_all().await
    }
}
