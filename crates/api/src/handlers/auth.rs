use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use agenda_core::models::user::{LoginRequest, RegisterRequest};

use crate::middleware::{auth::CurrentUser, error_handling::AppError};
use crate::{services, ApiState};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let result = services::auth::login(&state.db_pool, &state.config.jwt_secret, &payload).await?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": result.token,
        "user": result.user,
    })))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let result =
        services::auth::register(&state.db_pool, &state.config.jwt_secret, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": result.user,
            "token": result.token,
        })),
    ))
}

#[axum::debug_handler]
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({
        "message": "User profile",
        "user": user,
    }))
}
