pub mod error;
mod host;
mod pipeline;
mod runtime;
pub mod schemas;

pub use error::PipelineError;
pub use host::load_pipeline;
pub use pipeline::{Device, DevicePreference, LoadOptions, MeshPipeline, PipelineLoader, Precision};
pub use runtime::{RemotePipeline, ShapERuntime};
