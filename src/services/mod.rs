//! Business logic services

pub mod catalog;
pub mod ids;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services around the given repository
    pub fn new(repository: Repository, ids: Arc<dyn ids::IdProvider>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository, ids),
        }
    }
}
