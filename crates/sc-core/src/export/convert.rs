use std::path::Path;
use crate::error::ExportError;
use crate::export::MeshConverter;
use crate::export::obj::write_obj;
use crate::export::ply::read_ply;
use crate::mesh::MeshFormat;

/// Re-encodes a PLY file as OBJ.
///
/// The PLY is decoded with ply-rs and the resulting OBJ is reloaded with tobj
/// so a file that no OBJ reader accepts is never reported as converted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyToObj;

impl MeshConverter for PlyToObj {
    fn source(&self) -> MeshFormat {
        MeshFormat::Ply
    }

    fn target(&self) -> MeshFormat {
        MeshFormat::Obj
    }

    fn convert(&self, source: &Path, target: &Path) -> Result<(), ExportError> {
        let mesh = read_ply(source)?;
        if mesh.is_empty() {
            return Err(ExportError::invalid(source, "mesh has no vertices"));
        }

        write_obj(&mesh, target)?;
        validate_obj(target)
    }
}

fn validate_obj(path: &Path) -> Result<(), ExportError> {
    let (models, _materials) = tobj::load_obj(path, &tobj::LoadOptions::default())
        .map_err(|e| ExportError::invalid(path, e.to_string()))?;

    let positions: usize = models.iter().map(|m| m.mesh.positions.len() / 3).sum();
    if positions == 0 {
        return Err(ExportError::invalid(path, "converted OBJ has no vertices"));
    }

    Ok(())
}
