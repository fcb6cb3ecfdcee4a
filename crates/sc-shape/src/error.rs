use sc_core::error::MeshError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to reach Shap-E runtime: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error from runtime: HTTP {status}: {body}")]
    Runtime { status: u16, body: String },
    #[error("Runtime returned an unreadable response: {0}")]
    Decode(String),
    #[error("Runtime returned an unusable mesh: {0}")]
    MalformedMesh(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("Failed to load {model}: {reason}")]
    Load { model: String, reason: String },
}
