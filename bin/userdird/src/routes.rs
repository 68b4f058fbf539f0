//! Route registration — collects module routes + system endpoints.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

/// Build the complete router with all routes.
pub fn build_router(module_routes: Vec<(&str, Router)>) -> Router {
    // System endpoints (public, no state needed).
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Merge each module's routes at the root. Module routers carry their
    // own state (they called .with_state() internally) and absolute paths.
    for (name, router) in module_routes {
        tracing::debug!(module = name, "mounting module routes");
        app = app.merge(router);
    }

    app
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "userdird",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
