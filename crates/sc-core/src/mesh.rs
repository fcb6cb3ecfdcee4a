use std::fmt;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::error::MeshError;

/// Triangle mesh as produced by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct MeshArtifact {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    colors: Option<Vec<Vec3>>,
}

impl MeshArtifact {
    pub fn new(
        vertices: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
        colors: Option<Vec<Vec3>>,
    ) -> Result<Self, MeshError> {
        if let Some(colors) = &colors {
            if colors.len() != vertices.len() {
                return Err(MeshError::ColorCount {
                    colors: colors.len(),
                    vertices: vertices.len(),
                });
            }
        }

        let vertex_count = vertices.len();
        if let Some((face, index)) = faces.iter().enumerate().find_map(|(i, f)| {
            f.iter().find(|&&idx| idx as usize >= vertex_count).map(|&idx| (i, idx))
        }) {
            return Err(MeshError::FaceIndex { face, index, vertices: vertex_count });
        }

        Ok(Self { vertices, faces, colors })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Per-vertex RGB in `[0, 1]`
    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// File formats the export chain can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Obj,
    Ply,
}

impl MeshFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_face() {
        let err = MeshArtifact::new(vec![Vec3::ZERO; 3], vec![[0, 1, 3]], None).unwrap_err();
        assert!(matches!(err, MeshError::FaceIndex { face: 0, index: 3, vertices: 3 }));
    }

    #[test]
    fn rejects_color_count_mismatch() {
        let err = MeshArtifact::new(vec![Vec3::ZERO; 3], vec![], Some(vec![Vec3::ONE; 2]))
            .unwrap_err();
        assert!(matches!(err, MeshError::ColorCount { colors: 2, vertices: 3 }));
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Obj.to_string(), "obj");
        assert_eq!(serde_json::to_string(&MeshFormat::Ply).unwrap(), "\"ply\"");
    }
}
