use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("face {face} references vertex {index} but the mesh has {vertices} vertices")]
    FaceIndex { face: usize, index: u32, vertices: usize },
    #[error("mesh has {colors} vertex colors for {vertices} vertices")]
    ColorCount { colors: usize, vertices: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PLY encoding failed: {0}")]
    Ply(String),
    #[error("exporter did not report an output path")]
    NoOutput,
    #[error("export did not create {0}")]
    Missing(PathBuf),
    #[error("export produced an empty file at {0}")]
    Empty(PathBuf),
    #[error("unusable mesh in {path}: {reason}")]
    InvalidMesh { path: PathBuf, reason: String },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidMesh { path: path.into(), reason: reason.into() }
    }
}
