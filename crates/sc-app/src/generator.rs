use std::path::Path;
use std::sync::Arc;
use anyhow::Context;
use tracing::{error, info};
use sc_core::export::ExportChain;
use sc_core::{GenerationRecord, GenerationRequest, Model3D, SamplingParams, build_prompt};
use sc_shape::{Device, MeshPipeline, Precision, ShapERuntime, load_pipeline};
use crate::config::ServiceConfig;
use crate::error::GenerateError;

/// The resident model plus everything needed to turn its output into a file
pub struct Generator {
    pipeline: Arc<dyn MeshPipeline>,
    exports: Arc<ExportChain>,
    model: Model3D,
    sampling: SamplingParams,
    url_prefix: String,
}

impl Generator {
    /// Prepare the uploads directory and load the model. Expensive; call once.
    pub async fn connect(config: &ServiceConfig) -> anyhow::Result<Self> {
        let exports = ExportChain::new(&config.uploads_dir, config.model);
        exports
            .prepare()
            .context("Failed to create uploads directory")?;

        let runtime = ShapERuntime::new(&config.runtime_url, config.runtime_timeout)?;
        let pipeline = load_pipeline(&runtime, config.model.hub_id(), config.device)
            .await
            .with_context(|| format!("Failed to load {} from {}", config.model.name(), runtime.base_url()))?;

        Ok(Self::new(pipeline, exports, config.model, config.sampling, &config.url_prefix))
    }

    pub fn new(
        pipeline: Arc<dyn MeshPipeline>,
        exports: ExportChain,
        model: Model3D,
        sampling: SamplingParams,
        url_prefix: &str,
    ) -> Self {
        Self {
            pipeline,
            exports: Arc::new(exports),
            model,
            sampling,
            url_prefix: url_prefix.to_string(),
        }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationRecord, GenerateError> {
        info!(target: "progress", stage = "CREATING_PROMPT", "Creating mesh prompt...");
        let prompt = build_prompt(request);
        info!("{} prompt: {prompt}", self.model.name());

        info!(target: "progress", stage = "GENERATING", "Generating 3D mesh with {}...", self.model.name());
        let mesh = self.pipeline.generate(&prompt, &self.sampling).await.map_err(|e| {
            error!("Error generating 3D mesh: {e}");
            e
        })?;

        info!(target: "progress", stage = "PROCESSING", "Processing generated mesh...");
        let exports = Arc::clone(&self.exports);
        let name = request.name.clone();
        let outcome = tokio::task::spawn_blocking(move || exports.export(&mesh, &name)).await??;

        Ok(GenerationRecord::new(self.model, request, prompt, outcome, &self.url_prefix))
    }

    pub fn model(&self) -> Model3D {
        self.model
    }

    pub fn device(&self) -> Device {
        self.pipeline.device()
    }

    pub fn precision(&self) -> Precision {
        self.pipeline.precision()
    }

    pub fn uploads_dir(&self) -> &Path {
        self.exports.dir()
    }
}
