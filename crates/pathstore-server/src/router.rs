use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router serving every path under `/`.
pub fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/", any(handler::missing_path))
        .route(
            "/*path",
            get(handler::get_value)
                .post(handler::post_value)
                .put(handler::put_value)
                .delete(handler::delete_value),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
