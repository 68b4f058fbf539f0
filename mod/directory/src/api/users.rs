use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use userdir_core::ServiceError;

use crate::api::AppState;
use crate::model::UserInput;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let users = svc.list_users().map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "users": users })))
}

async fn create_user(
    State(svc): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.create_user(input).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "User created successfully",
    })))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.get_user(id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "user": user })))
}

async fn update_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UserInput>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.update_user(id, input).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "User updated successfully",
    })))
}

async fn delete_user(
    State(svc): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_user(id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "User deleted successfully",
    })))
}
