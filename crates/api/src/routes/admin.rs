use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_admin, ApiState};

/// Admin time-block routes; every route requires an ADMIN principal.
///
/// The literal `/stats` segment takes priority over `/:id`.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/timeblocks",
            get(handlers::time_block::list_time_blocks),
        )
        .route(
            "/api/admin/timeblocks/stats",
            get(handlers::time_block::time_block_stats),
        )
        .route(
            "/api/admin/timeblocks/:id",
            get(handlers::time_block::get_time_block),
        )
        .route(
            "/api/admin/timeblocks",
            post(handlers::time_block::create_time_block),
        )
        .route(
            "/api/admin/timeblocks/:id",
            put(handlers::time_block::update_time_block),
        )
        .route(
            "/api/admin/timeblocks/:id",
            delete(handlers::time_block::delete_time_block),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
