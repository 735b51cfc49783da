use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use agenda_core::models::time_block::AvailableRangeQuery;

use crate::middleware::error_handling::AppError;
use crate::{services, ApiState};

#[axum::debug_handler]
pub async fn is_time_block_available(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let available = services::time_block::is_available(&state.db_pool, &id).await?;

    Ok(Json(json!({
        "timeBlockId": id,
        "available": available,
    })))
}

#[axum::debug_handler]
pub async fn available_time_blocks_in_range(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let blocks = services::time_block::list_available_in_range(&state.db_pool, &query).await?;

    Ok(Json(json!({
        "message": "Available time blocks retrieved successfully",
        "count": blocks.len(),
        "data": blocks,
    })))
}
