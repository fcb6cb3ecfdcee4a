use std::sync::Arc;
use tracing::{error, info, warn};
use crate::error::PipelineError;
use crate::pipeline::{Device, DevicePreference, LoadOptions, MeshPipeline, PipelineLoader, Precision};

const HALF_PRECISION_VARIANT: &str = "fp16";

/// Load the model once for the life of the process.
///
/// On CUDA the half-precision weight variant is tried first and plain
/// float16 loading is the single retry. CPU always loads float32.
pub async fn load_pipeline(
    loader: &dyn PipelineLoader,
    model: &str,
    preference: DevicePreference,
) -> Result<Arc<dyn MeshPipeline>, PipelineError> {
    info!(target: "progress", stage = "LOADING_MODEL", "Loading {model}...");

    let device = match preference {
        DevicePreference::Fixed(device) => device,
        DevicePreference::Auto => {
            if loader.cuda_available().await? {
                Device::Cuda
            } else {
                Device::Cpu
            }
        }
    };

    info!(target: "progress", stage = "INITIALIZING", "Initializing pipeline on {device}...");
    let pipeline = match device {
        Device::Cuda => {
            let variant = LoadOptions {
                model: model.to_string(),
                precision: Precision::Float16,
                variant: Some(HALF_PRECISION_VARIANT.to_string()),
                device,
            };
            match loader.load(&variant).await {
                Ok(pipeline) => Ok(pipeline),
                Err(e) => {
                    warn!("FP16 variant failed, trying regular loading: {e}");
                    loader.load(&LoadOptions { variant: None, ..variant }).await
                }
            }
        }
        Device::Cpu => {
            loader
                .load(&LoadOptions {
                    model: model.to_string(),
                    precision: Precision::Float32,
                    variant: None,
                    device,
                })
                .await
        }
    };

    match pipeline {
        Ok(pipeline) => {
            info!(target: "progress", stage = "MODEL_READY", "{model} loaded on {}", pipeline.device());
            Ok(pipeline)
        }
        Err(e) => {
            error!("Critical error loading {model}: {e}");
            Err(e)
        }
    }
}
