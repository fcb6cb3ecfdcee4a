use std::path::Path;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use crate::export::ExportOutcome;
use crate::mesh::MeshFormat;
use crate::model_types::Model3D;
use crate::request::GenerationRequest;

pub const QUALITY_LABEL: &str = "ai_generated";
pub const DEFAULT_SCALE: f32 = 1.0;
pub const DEFAULT_ANIMATIONS: [&str; 2] = ["rotate", "glow"];

/// Response envelope for a finished generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub success: bool,
    pub model_url: String,
    pub model_path: String,
    pub filename: String,
    pub format: MeshFormat,
    pub generated_at: String,
    pub model_provider: String,
    pub quality: String,
    pub file_size: u64,
    pub concept: Option<String>,
    pub difficulty: Option<i64>,
    pub scale: f32,
    pub animations: Vec<String>,
    pub materials: Vec<String>,
    pub prompt: String,
}

impl GenerationRecord {
    pub fn new(
        model: Model3D,
        request: &GenerationRequest,
        prompt: String,
        export: ExportOutcome,
        url_prefix: &str,
    ) -> Self {
        Self {
            success: true,
            model_url: model_url(url_prefix, &export.filename),
            model_path: display_path(&export.path),
            filename: export.filename,
            format: export.format,
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            model_provider: model.provider().to_string(),
            quality: QUALITY_LABEL.to_string(),
            file_size: export.file_size,
            concept: request.concept.clone(),
            difficulty: request.difficulty,
            scale: DEFAULT_SCALE,
            animations: DEFAULT_ANIMATIONS.iter().map(|s| s.to_string()).collect(),
            materials: vec![model.material_tag().to_string()],
            prompt,
        }
    }
}

fn model_url(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), filename)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Where a failed CLI run gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    InputParsing,
    ModelGeneration,
}

/// `{success: false, error, stage}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub stage: Stage,
}

impl ErrorEnvelope {
    pub fn new(stage: Stage, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            stage,
        }
    }
}
