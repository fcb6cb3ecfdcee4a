mod chain;
mod convert;
mod obj;
mod ply;

pub use chain::{ExportChain, ExportOutcome};
pub use convert::PlyToObj;
pub use obj::{ObjExporter, write_obj};
pub use ply::{PlyExporter, read_ply, write_ply};

use std::path::{Path, PathBuf};
use crate::error::ExportError;
use crate::mesh::{MeshArtifact, MeshFormat};

/// Writes a mesh in one file format.
///
/// `Ok(None)` means the exporter ran but cannot say where its output went;
/// the chain treats that the same as a failure.
pub trait MeshExporter: Send + Sync {
    fn format(&self) -> MeshFormat;

    fn export(&self, mesh: &MeshArtifact, path: &Path) -> Result<Option<PathBuf>, ExportError>;
}

/// Best-effort file-to-file format conversion
pub trait MeshConverter: Send + Sync {
    fn source(&self) -> MeshFormat;

    fn target(&self) -> MeshFormat;

    fn convert(&self, source: &Path, target: &Path) -> Result<(), ExportError>;
}

/// Size in bytes of a finished artifact; missing or empty files are errors
pub fn verify_artifact(path: &Path) -> Result<u64, ExportError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExportError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(ExportError::io(path, e)),
    };

    if !metadata.is_file() {
        return Err(ExportError::Missing(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(ExportError::Empty(path.to_path_buf()));
    }

    Ok(metadata.len())
}
