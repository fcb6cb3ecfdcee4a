use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::error::ExportError;
use crate::export::MeshExporter;
use crate::mesh::{MeshArtifact, MeshFormat};

/// Wavefront OBJ writer.
///
/// Vertex colors ride along on the `v` lines (`v x y z r g b`), which most
/// viewers and tobj understand. An empty mesh produces an empty file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjExporter;

impl MeshExporter for ObjExporter {
    fn format(&self) -> MeshFormat {
        MeshFormat::Obj
    }

    fn export(&self, mesh: &MeshArtifact, path: &Path) -> Result<Option<PathBuf>, ExportError> {
        write_obj(mesh, path)?;
        Ok(Some(path.to_path_buf()))
    }
}

pub fn write_obj(mesh: &MeshArtifact, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_obj_to(mesh, &mut out)
        .and_then(|()| out.flush())
        .map_err(|e| ExportError::io(path, e))
}

fn write_obj_to<W: Write>(mesh: &MeshArtifact, out: &mut W) -> std::io::Result<()> {
    match mesh.colors() {
        Some(colors) => {
            for (v, c) in mesh.vertices().iter().zip(colors) {
                writeln!(out, "v {} {} {} {} {} {}", v.x, v.y, v.z, c.x, c.y, c.z)?;
            }
        }
        None => {
            for v in mesh.vertices() {
                writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
            }
        }
    }

    // OBJ indices are 1-based
    for [a, b, c] in mesh.faces() {
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    Ok(())
}
