//! Axum router construction for the board API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// See [`handlers`] for the endpoint table. CORS allows any origin so
/// browser clients can call the API directly.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/boards", post(handlers::upload_board))
        .route("/boards/{id}", get(handlers::get_board))
        .route("/boards/{id}/next", post(handlers::next_state))
        .route("/boards/{id}/generations/{generations}", get(handlers::state_after))
        .route("/boards/{id}/final/{max_attempts}", post(handlers::final_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
