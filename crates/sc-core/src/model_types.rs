/// Text-to-3D models the service knows how to host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model3D {
    ShapE,
}

impl Model3D {
    /// Display name used in logs
    pub fn name(&self) -> &str {
        match self {
            Self::ShapE => "Shap-E",
        }
    }

    /// Short id, also the prefix of every artifact filename
    pub fn id(&self) -> &str {
        match self {
            Self::ShapE => "shap_e",
        }
    }

    /// Pretrained weights to ask the runtime for
    pub fn hub_id(&self) -> &str {
        match self {
            Self::ShapE => "openai/shap-e",
        }
    }

    /// Provider label reported in every result record
    pub fn provider(&self) -> &str {
        match self {
            Self::ShapE => "OpenAI Shap-E",
        }
    }

    /// Material tag attached to generated models
    pub fn material_tag(&self) -> &str {
        match self {
            Self::ShapE => "shap_e_generated",
        }
    }

    /// Sampling parameters the model works best with
    pub fn default_sampling(&self) -> SamplingParams {
        match self {
            Self::ShapE => SamplingParams {
                guidance_scale: 15.0,
                num_inference_steps: 64,
                frame_size: 256,
            },
        }
    }

    /// All available models
    pub fn all() -> [Model3D; 1] {
        [Self::ShapE]
    }

    /// Resolve a model from either its short id or its hub id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|m| m.id() == id || m.hub_id() == id)
    }
}

impl Default for Model3D {
    fn default() -> Self {
        Self::ShapE
    }
}

/// Knobs forwarded to the pipeline on every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
    pub frame_size: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Model3D::default().default_sampling()
    }
}
