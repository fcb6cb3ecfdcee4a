use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::backend::routes::generate::generate_model;
use crate::backend::routes::health::health_check;
use crate::backend::state::GenState;

mod generate;
mod health;

pub fn api_routes() -> Router<Arc<GenState>> {
    Router::new()
        .route("/generate", post(generate_model))
        .route("/health", get(health_check))
}
