#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use glam::Vec3;
use sc_app::Generator;
use sc_core::export::ExportChain;
use sc_core::{MeshArtifact, Model3D, SamplingParams};
use sc_shape::{Device, MeshPipeline, PipelineError, Precision};

/// Stands in for the resident model
pub enum FakePipeline {
    Tetrahedron,
    Broken,
}

#[async_trait]
impl MeshPipeline for FakePipeline {
    async fn generate(&self, _prompt: &str, _params: &SamplingParams) -> Result<MeshArtifact, PipelineError> {
        match self {
            Self::Tetrahedron => Ok(MeshArtifact::new(
                vec![
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::new(0.0, 0.0, 1.0),
                ],
                vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
                None,
            )?),
            Self::Broken => Err(PipelineError::Runtime {
                status: 500,
                body: "CUDA out of memory".to_string(),
            }),
        }
    }

    fn device(&self) -> Device {
        Device::Cpu
    }

    fn precision(&self) -> Precision {
        Precision::Float32
    }
}

pub fn generator(pipeline: FakePipeline, uploads: &Path) -> Generator {
    let exports = ExportChain::new(uploads, Model3D::ShapE);
    exports.prepare().unwrap();
    Generator::new(
        Arc::new(pipeline),
        exports,
        Model3D::ShapE,
        SamplingParams::default(),
        "/api/3d-models",
    )
}
