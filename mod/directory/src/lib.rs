//! Directory module — User and UserProfile CRUD.
//!
//! # Resources
//!
//! - **User** — identity with unique username and email
//! - **UserProfile** — optional one-to-one bio record owned by a User
//!
//! # Usage
//!
//! ```ignore
//! use directory::DirectoryModule;
//!
//! let module = DirectoryModule::new(sql)?;
//! let router = module.routes(); // /users and /user_profile endpoints
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use userdir_core::Module;
use userdir_sql::SQLStore;

use crate::service::DirectoryService;

/// Directory module implementing the Module trait.
///
/// Holds the DirectoryService and provides HTTP routes for the user
/// and user-profile endpoints.
pub struct DirectoryModule {
    service: Arc<DirectoryService>,
}

impl DirectoryModule {
    /// Create a new DirectoryModule, initializing the database schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Self, userdir_core::ServiceError> {
        let service = DirectoryService::new(sql).map_err(userdir_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying DirectoryService.
    pub fn service(&self) -> &Arc<DirectoryService> {
        &self.service
    }
}

impl Module for DirectoryModule {
    fn name(&self) -> &str {
        "directory"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
