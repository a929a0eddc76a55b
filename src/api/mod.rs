use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::{Arc, RwLock};

pub mod handlers;
pub mod requests;
pub mod responses;

pub fn router(state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .route("/api/estimate", post(handlers::post_estimate))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/tips", get(handlers::get_tips))
        .with_state(state)
}
