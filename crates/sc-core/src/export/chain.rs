use std::path::{Path, PathBuf};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};
use crate::error::ExportError;
use crate::export::{MeshConverter, MeshExporter, ObjExporter, PlyExporter, PlyToObj, verify_artifact};
use crate::mesh::{MeshArtifact, MeshFormat};
use crate::model_types::Model3D;
use crate::naming::artifact_stem;

/// A file the chain left on disk for the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub filename: String,
    pub format: MeshFormat,
    pub file_size: u64,
    /// True when the primary exporter failed and the secondary path produced this file
    pub fell_back: bool,
}

/// Primary export with a single downgrade step.
///
/// 1. primary exporter, accepted only if it names a non-empty file
/// 2. otherwise secondary exporter, then a best-effort conversion of that
///    file back into the primary format
/// 3. if the conversion fails the secondary file is returned as is
pub struct ExportChain {
    dir: PathBuf,
    model: Model3D,
    primary: Box<dyn MeshExporter>,
    secondary: Box<dyn MeshExporter>,
    converter: Box<dyn MeshConverter>,
}

impl ExportChain {
    /// OBJ first, PLY as the fallback, ply-rs/tobj to get back to OBJ
    pub fn new(dir: impl Into<PathBuf>, model: Model3D) -> Self {
        Self::with_stages(dir, model, Box::new(ObjExporter), Box::new(PlyExporter), Box::new(PlyToObj))
    }

    pub fn with_stages(
        dir: impl Into<PathBuf>,
        model: Model3D,
        primary: Box<dyn MeshExporter>,
        secondary: Box<dyn MeshExporter>,
        converter: Box<dyn MeshConverter>,
    ) -> Self {
        Self {
            dir: dir.into(),
            model,
            primary,
            secondary,
            converter,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if needed
    pub fn prepare(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))
    }

    pub fn export(&self, mesh: &MeshArtifact, object_name: &str) -> Result<ExportOutcome, ExportError> {
        self.export_at(mesh, object_name, Local::now().naive_local())
    }

    pub fn export_at(
        &self,
        mesh: &MeshArtifact,
        object_name: &str,
        at: NaiveDateTime,
    ) -> Result<ExportOutcome, ExportError> {
        let stem = artifact_stem(self.model, object_name, at);
        let primary_path = self.path_for(&stem, self.primary.format());

        info!(target: "progress", stage = "CONVERTING", "Converting mesh to {} format", self.primary.format());
        match self.run_primary(mesh, &primary_path) {
            Ok(outcome) => {
                info!(
                    "Generated {} model: {} ({} bytes)",
                    outcome.format, outcome.filename, outcome.file_size
                );
                return Ok(outcome);
            }
            Err(e) => {
                warn!("{} export failed ({e}), switching to {} fallback", self.primary.format(), self.secondary.format());
                discard(&primary_path);
            }
        }

        info!(target: "progress", stage = "FALLBACK", "Using {} export as fallback", self.secondary.format());
        self.run_fallback(mesh, &stem, &primary_path)
    }

    fn run_primary(&self, mesh: &MeshArtifact, path: &Path) -> Result<ExportOutcome, ExportError> {
        let written = self.primary.export(mesh, path)?.ok_or(ExportError::NoOutput)?;
        info!(target: "progress", stage = "EXPORTING", "Exported mesh to {}", written.display());

        let file_size = verify_artifact(&written)?;
        Ok(outcome(written, self.primary.format(), file_size, false))
    }

    fn run_fallback(
        &self,
        mesh: &MeshArtifact,
        stem: &str,
        primary_path: &Path,
    ) -> Result<ExportOutcome, ExportError> {
        let secondary_path = self.path_for(stem, self.secondary.format());
        let (written, secondary_size) = match self.run_secondary(mesh, &secondary_path) {
            Ok(written) => written,
            Err(e) => {
                discard(&secondary_path);
                return Err(e);
            }
        };
        info!(target: "progress", stage = "PLY_SAVED", "Saved fallback file {}", file_name(&written));

        if !self.converter_fits() {
            debug!("no converter from {} to {}", self.secondary.format(), self.primary.format());
            return Ok(outcome(written, self.secondary.format(), secondary_size, true));
        }

        info!(target: "progress", stage = "CONVERTING", "Converting {} to {}", self.secondary.format(), self.primary.format());
        let converted = self
            .converter
            .convert(&written, primary_path)
            .and_then(|()| verify_artifact(primary_path));

        match converted {
            Ok(file_size) => {
                info!(target: "progress", stage = "CONVERTED", "Converted to {}", self.primary.format());
                Ok(outcome(primary_path.to_path_buf(), self.primary.format(), file_size, true))
            }
            Err(e) => {
                warn!("could not convert to {}, keeping {}: {e}", self.primary.format(), self.secondary.format());
                discard(primary_path);
                Ok(outcome(written, self.secondary.format(), secondary_size, true))
            }
        }
    }

    fn run_secondary(&self, mesh: &MeshArtifact, path: &Path) -> Result<(PathBuf, u64), ExportError> {
        let written = self.secondary.export(mesh, path)?.ok_or(ExportError::NoOutput)?;
        let file_size = verify_artifact(&written)?;
        Ok((written, file_size))
    }

    fn converter_fits(&self) -> bool {
        self.converter.source() == self.secondary.format()
            && self.converter.target() == self.primary.format()
    }

    fn path_for(&self, stem: &str, format: MeshFormat) -> PathBuf {
        self.dir.join(format!("{stem}.{}", format.extension()))
    }
}

fn outcome(path: PathBuf, format: MeshFormat, file_size: u64, fell_back: bool) -> ExportOutcome {
    ExportOutcome {
        filename: file_name(&path),
        path,
        format,
        file_size,
        fell_back,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Remove a partial artifact so it can't be mistaken for a result
fn discard(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("removed partial artifact {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove {}: {e}", path.display()),
    }
}
