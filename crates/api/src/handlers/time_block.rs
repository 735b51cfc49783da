use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use agenda_core::models::time_block::{
    CreateTimeBlockRequest, ListTimeBlocksQuery, UpdateTimeBlockRequest,
};

use crate::middleware::{auth::CurrentUser, error_handling::AppError};
use crate::{services, ApiState};

#[axum::debug_handler]
pub async fn list_time_blocks(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<ListTimeBlocksQuery>,
) -> Result<Json<Value>, AppError> {
    let (items, page_info) = services::time_block::list(&state.db_pool, &query).await?;

    Ok(Json(json!({
        "message": "Time blocks retrieved successfully",
        "data": items,
        "pagination": page_info,
        "requestedBy": user.name,
    })))
}

#[axum::debug_handler]
pub async fn get_time_block(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let block = services::time_block::get_by_id(&state.db_pool, &id).await?;

    Ok(Json(json!({
        "message": "Time block retrieved successfully",
        "data": block,
        "requestedBy": user.name,
    })))
}

#[axum::debug_handler]
pub async fn create_time_block(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateTimeBlockRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let block = services::time_block::create(&state.db_pool, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Time block created successfully",
            "data": block,
            "createdBy": user.name,
        })),
    ))
}

#[axum::debug_handler]
pub async fn update_time_block(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTimeBlockRequest>,
) -> Result<Json<Value>, AppError> {
    let block = services::time_block::update(&state.db_pool, &id, &payload).await?;

    Ok(Json(json!({
        "message": "Time block updated successfully",
        "data": block,
        "updatedBy": user.name,
    })))
}

#[axum::debug_handler]
pub async fn delete_time_block(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let snapshot = services::time_block::delete(&state.db_pool, &id).await?;

    Ok(Json(json!({
        "message": "Time block deleted successfully",
        "deletedBlock": snapshot,
        "deletedBy": user.name,
    })))
}

#[axum::debug_handler]
pub async fn time_block_stats(
    State(state): State<Arc<ApiState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Value>, AppError> {
    let stats = services::time_block::get_stats(&state.db_pool).await?;

    Ok(Json(json!({
        "message": "Time block statistics",
        "stats": stats.general,
        "upcomingWeek": stats.upcoming_week,
        "accessedBy": user.name,
    })))
}
