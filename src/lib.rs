//! Bookshelf Catalog Service
//!
//! A REST JSON API for managing a bookshelf: clients submit book records and
//! the service stores, lists, filters, updates, and deletes them. The whole
//! catalog lives in process memory; there is no persistence layer.

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

impl AppState {
    /// State around a fresh empty store, using the default id provider.
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new();
        let services = services::Services::new(repository, Arc::new(services::ids::NanoId));

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
