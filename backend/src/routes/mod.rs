pub mod health;
pub mod rounds;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rounds", post(rounds::start_round))
        .route("/rounds/{round_id}", get(rounds::get_round))
        .route("/rounds/{round_id}/hint", get(rounds::get_hint))
        .route("/rounds/{round_id}/selection", post(rounds::submit_selection))
}
