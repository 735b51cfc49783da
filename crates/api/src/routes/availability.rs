use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_admin, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/timeblocks/available",
            get(handlers::availability::available_time_blocks_in_range),
        )
        .route(
            "/api/admin/timeblocks/:id/available",
            get(handlers::availability::is_time_block_available),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
