use std::sync::Arc;
use axum::Json;
use axum::extract::State;
use crate::backend::schemas::{HealthResponse, UploadsDirStatus};
use crate::backend::state::GenState;

pub async fn health_check(State(state): State<Arc<GenState>>) -> Json<HealthResponse> {
    let generator = state.generator();
    let uploads = generator.uploads_dir();

    Json(HealthResponse {
        status: "ok".to_string(),
        service: format!("{} 3D Generator", generator.model().name()),
        model: generator.model().hub_id().to_string(),
        provider: generator.model().provider().to_string(),
        device: generator.device().to_string(),
        precision: generator.precision().to_string(),
        uploads_dir: UploadsDirStatus {
            path: uploads.to_string_lossy().into_owned(),
            exists: uploads.is_dir(),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
