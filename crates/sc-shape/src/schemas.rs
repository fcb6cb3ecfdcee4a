use glam::Vec3;
use serde::{Deserialize, Serialize};
use sc_core::MeshArtifact;
use crate::error::PipelineError;
use crate::pipeline::{Device, Precision};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceInfo {
    pub cuda_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRequest {
    pub model: String,
    pub torch_dtype: Precision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub device: Device,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadResponse {
    pub pipeline_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
    pub frame_size: u32,
    pub output_type: String,
}

/// Per-vertex color channels, one float in `[0, 1]` per vertex
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexChannels {
    #[serde(rename = "R")]
    pub r: Vec<f32>,
    #[serde(rename = "G")]
    pub g: Vec<f32>,
    #[serde(rename = "B")]
    pub b: Vec<f32>,
}

/// Mesh decoder output as the runtime serializes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshPayload {
    pub verts: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
    #[serde(default)]
    pub vertex_channels: Option<VertexChannels>,
}

impl TryFrom<MeshPayload> for MeshArtifact {
    type Error = PipelineError;

    fn try_from(payload: MeshPayload) -> Result<Self, Self::Error> {
        let vertices: Vec<Vec3> = payload.verts.into_iter().map(Vec3::from_array).collect();

        let colors = match payload.vertex_channels {
            Some(VertexChannels { r, g, b }) => {
                if r.len() != g.len() || g.len() != b.len() {
                    return Err(PipelineError::MalformedMesh(format!(
                        "color channels differ in length: R={} G={} B={}",
                        r.len(),
                        g.len(),
                        b.len()
                    )));
                }
                Some(
                    r.into_iter()
                        .zip(g)
                        .zip(b)
                        .map(|((r, g), b)| Vec3::new(r, g, b))
                        .collect(),
                )
            }
            None => None,
        };

        Ok(MeshArtifact::new(vertices, payload.faces, colors)?)
    }
}
