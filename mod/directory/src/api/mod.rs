mod profiles;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::DirectoryService;

/// Shared application state.
pub type AppState = Arc<DirectoryService>;

/// Build the complete directory API router.
///
/// Paths are absolute (`/users`, `/user_profile`) — the caller merges
/// them at the application root.
pub fn build_router(svc: Arc<DirectoryService>) -> Router {
    Router::new()
        .merge(users::routes())
        .merge(profiles::routes())
        .with_state(svc)
}
