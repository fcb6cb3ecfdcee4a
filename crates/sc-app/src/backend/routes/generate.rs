use std::sync::Arc;
use axum::Json;
use axum::extract::State;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;
use sc_core::{GenerationRecord, GenerationRequest};
use crate::backend::state::GenState;
use crate::error::AppError;

pub async fn generate_model(
    State(state): State<Arc<GenState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationRecord>, AppError> {
    let span = info_span!("generate", request_id = %Uuid::new_v4(), name = %request.name);

    async move {
        info!("Generating 3D model");
        match state.generator().generate(&request).await {
            Ok(record) => {
                info!(filename = %record.filename, format = %record.format, "Generated");
                Ok(Json(record))
            }
            Err(e) => {
                error!("Generation failed: {e}");
                Err(AppError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}
