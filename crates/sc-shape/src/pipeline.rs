use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sc_core::{MeshArtifact, SamplingParams};
use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cuda,
    Cpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        })
    }
}

/// Which device to load onto; `Auto` asks the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    #[default]
    Auto,
    Fixed(Device),
}

impl FromStr for DevicePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "cuda" | "gpu" => Ok(Self::Fixed(Device::Cuda)),
            "cpu" => Ok(Self::Fixed(Device::Cpu)),
            other => Err(format!("unknown device {other:?}, expected auto, cuda or cpu")),
        }
    }
}

/// Weight dtype, named the way torch names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Float16,
    Float32,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Float16 => "float16",
            Self::Float32 => "float32",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub model: String,
    pub precision: Precision,
    /// Weight variant published next to the main checkpoint, e.g. `fp16`
    pub variant: Option<String>,
    pub device: Device,
}

/// A resident text-to-3D model
#[async_trait]
pub trait MeshPipeline: Send + Sync {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<MeshArtifact, PipelineError>;

    fn device(&self) -> Device;

    fn precision(&self) -> Precision;
}

/// Something that can bring a pipeline into memory
#[async_trait]
pub trait PipelineLoader: Send + Sync {
    async fn cuda_available(&self) -> Result<bool, PipelineError>;

    async fn load(&self, options: &LoadOptions) -> Result<Arc<dyn MeshPipeline>, PipelineError>;
}
