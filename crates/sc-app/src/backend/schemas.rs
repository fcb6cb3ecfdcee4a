use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model: String,
    pub provider: String,
    pub device: String,
    pub precision: String,
    pub uploads_dir: UploadsDirStatus,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadsDirStatus {
    pub path: String,
    pub exists: bool,
}
