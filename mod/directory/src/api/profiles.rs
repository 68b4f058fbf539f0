use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use userdir_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateProfile, UpdateProfile};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user_profile", post(create_profile))
        .route(
            "/user_profile/{user_id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

async fn get_profile(
    State(svc): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let profile = svc.get_profile(user_id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "user_profile": profile })))
}

async fn create_profile(
    State(svc): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let user_id = input
        .user_id
        .ok_or_else(|| ServiceError::Validation("user_id is required".to_string()))?;
    let profile = svc
        .create_profile(user_id, input.bio)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "UserProfile created successfully",
            "user_profile_id": profile.id,
        })),
    ))
}

async fn update_profile(
    State(svc): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.update_profile(user_id, input.bio)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "UserProfile updated successfully",
    })))
}

async fn delete_profile(
    State(svc): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_profile(user_id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "UserProfile deleted successfully",
    })))
}
