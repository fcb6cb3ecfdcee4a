pub mod error;
pub mod export;
mod mesh;
mod model_types;
pub mod naming;
mod prompt;
mod record;
mod request;

pub use mesh::{MeshArtifact, MeshFormat};
pub use model_types::{Model3D, SamplingParams};
pub use prompt::build_prompt;
pub use record::{ErrorEnvelope, GenerationRecord, Stage};
pub use request::GenerationRequest;
