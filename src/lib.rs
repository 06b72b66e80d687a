//! Bookshelf - Book Inventory Service
//!
//! A small Rust REST API server for managing a library's book inventory:
//! adding books, borrowing and returning them by ISBN, and listing books
//! by availability.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
