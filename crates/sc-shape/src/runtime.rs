use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use sc_core::{MeshArtifact, SamplingParams};
use crate::error::PipelineError;
use crate::pipeline::{Device, LoadOptions, MeshPipeline, PipelineLoader, Precision};
use crate::schemas::{DeviceInfo, GenerateRequest, LoadRequest, LoadResponse, MeshPayload};

const MESH_OUTPUT: &str = "mesh";

/// Client for a Shap-E inference runtime that keeps the diffusers pipeline
/// in accelerator memory and speaks JSON over HTTP.
#[derive(Debug, Clone)]
pub struct ShapERuntime {
    client: Client,
    base_url: String,
}

impl ShapERuntime {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PipelineLoader for ShapERuntime {
    async fn cuda_available(&self) -> Result<bool, PipelineError> {
        let response = self.client.get(self.url("/device")).send().await?;
        let info: DeviceInfo = read_json(response).await?;
        Ok(info.cuda_available)
    }

    async fn load(&self, options: &LoadOptions) -> Result<Arc<dyn MeshPipeline>, PipelineError> {
        let request = LoadRequest {
            model: options.model.clone(),
            torch_dtype: options.precision,
            variant: options.variant.clone(),
            device: options.device,
        };
        debug!(?request, "requesting pipeline");

        let response = self
            .client
            .post(self.url("/pipelines"))
            .json(&request)
            .send()
            .await?;
        let loaded: LoadResponse = read_json(response).await.map_err(|e| PipelineError::Load {
            model: options.model.clone(),
            reason: e.to_string(),
        })?;

        Ok(Arc::new(RemotePipeline {
            runtime: self.clone(),
            pipeline_id: loaded.pipeline_id,
            device: options.device,
            precision: options.precision,
        }))
    }
}

/// Handle to a pipeline resident in the runtime
#[derive(Debug)]
pub struct RemotePipeline {
    runtime: ShapERuntime,
    pipeline_id: String,
    device: Device,
    precision: Precision,
}

#[async_trait]
impl MeshPipeline for RemotePipeline {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<MeshArtifact, PipelineError> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
            guidance_scale: params.guidance_scale,
            num_inference_steps: params.num_inference_steps,
            frame_size: params.frame_size,
            output_type: MESH_OUTPUT.to_string(),
        };

        let url = self.runtime.url(&format!("/pipelines/{}/generate", self.pipeline_id));
        let response = self.runtime.client.post(url).json(&request).send().await?;
        let payload: MeshPayload = read_json(response).await.map_err(|e| match e {
            PipelineError::Decode(reason) => PipelineError::MalformedMesh(reason),
            other => other,
        })?;

        MeshArtifact::try_from(payload)
    }

    fn device(&self) -> Device {
        self.device
    }

    fn precision(&self) -> Precision {
        self.precision
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PipelineError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PipelineError::Runtime {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| PipelineError::Decode(e.to_string()))
}
