use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use glam::Vec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use crate::error::ExportError;
use crate::export::MeshExporter;
use crate::mesh::{MeshArtifact, MeshFormat};

const VERTEX: &str = "vertex";
const FACE: &str = "face";
const POSITION: [&str; 3] = ["x", "y", "z"];
const COLOR: [&str; 3] = ["red", "green", "blue"];
const FACE_INDICES: [&str; 2] = ["vertex_indices", "vertex_index"];

/// ASCII PLY writer, the fallback format.
///
/// ply-rs miscounts list lengths in its binary writer, so faces are written as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyExporter;

impl MeshExporter for PlyExporter {
    fn format(&self) -> MeshFormat {
        MeshFormat::Ply
    }

    fn export(&self, mesh: &MeshArtifact, path: &Path) -> Result<Option<PathBuf>, ExportError> {
        write_ply(mesh, path)?;
        Ok(Some(path.to_path_buf()))
    }
}

pub fn write_ply(mesh: &MeshArtifact, path: &Path) -> Result<(), ExportError> {
    let mut ply = to_ply(mesh)?;

    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let writer = Writer::new();
    writer
        .write_ply(&mut out, &mut ply)
        .and_then(|_| out.flush())
        .map_err(|e| ExportError::io(path, e))
}

fn to_ply(mesh: &MeshArtifact) -> Result<Ply<DefaultElement>, ExportError> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;

    let mut vertex = ElementDef::new(VERTEX.to_string());
    for axis in POSITION {
        vertex.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    if mesh.colors().is_some() {
        for channel in COLOR {
            vertex.properties.add(PropertyDef::new(
                channel.to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }
    }
    ply.header.elements.add(vertex);

    let mut face = ElementDef::new(FACE.to_string());
    face.properties.add(PropertyDef::new(
        FACE_INDICES[0].to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    ply.header.elements.add(face);

    let vertices = mesh
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mut element = DefaultElement::new();
            for (axis, value) in POSITION.iter().zip(v.to_array()) {
                element.insert(axis.to_string(), Property::Float(value));
            }
            if let Some(colors) = mesh.colors() {
                for (channel, value) in COLOR.iter().zip(colors[i].to_array()) {
                    element.insert(channel.to_string(), Property::UChar(unit_to_byte(value)));
                }
            }
            element
        })
        .collect();

    let faces = mesh
        .faces()
        .iter()
        .map(|f| {
            let mut element = DefaultElement::new();
            element.insert(
                FACE_INDICES[0].to_string(),
                Property::ListInt(f.iter().map(|&i| i as i32).collect()),
            );
            element
        })
        .collect();

    ply.payload.insert(VERTEX.to_string(), vertices);
    ply.payload.insert(FACE.to_string(), faces);
    ply.make_consistent()
        .map_err(|e| ExportError::Ply(format!("{e:?}")))?;

    Ok(ply)
}

/// Load a PLY mesh back into memory, triangulating polygon faces as fans
pub fn read_ply(path: &Path) -> Result<MeshArtifact, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| ExportError::io(path, e))?;

    let vertex_elements = ply
        .payload
        .get(VERTEX)
        .ok_or_else(|| ExportError::invalid(path, "no vertex element"))?;

    let mut vertices = Vec::with_capacity(vertex_elements.len());
    let mut colors = Vec::with_capacity(vertex_elements.len());
    let mut has_colors = true;
    for (i, element) in vertex_elements.iter().enumerate() {
        let position = read_triplet(element, &POSITION, false)
            .ok_or_else(|| ExportError::invalid(path, format!("vertex {i} has no position")))?;
        vertices.push(position);

        match read_triplet(element, &COLOR, true) {
            Some(color) if has_colors => colors.push(color),
            _ => has_colors = false,
        }
    }

    let mut faces = Vec::new();
    if let Some(face_elements) = ply.payload.get(FACE) {
        for (i, element) in face_elements.iter().enumerate() {
            let polygon = FACE_INDICES
                .iter()
                .find_map(|key| element.get(*key))
                .and_then(list_indices)
                .ok_or_else(|| ExportError::invalid(path, format!("face {i} has no vertex list")))?;
            if polygon.len() < 3 {
                return Err(ExportError::invalid(path, format!("face {i} has fewer than 3 vertices")));
            }
            for k in 1..polygon.len() - 1 {
                faces.push([polygon[0], polygon[k], polygon[k + 1]]);
            }
        }
    }

    let colors = (has_colors && !vertices.is_empty()).then_some(colors);
    Ok(MeshArtifact::new(vertices, faces, colors)?)
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn read_triplet(element: &DefaultElement, keys: &[&str; 3], normalize_bytes: bool) -> Option<Vec3> {
    let mut out = [0.0f32; 3];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = match element.get(*key)? {
            Property::UChar(v) if normalize_bytes => *v as f32 / 255.0,
            other => scalar(other)?,
        };
    }
    Some(Vec3::from_array(out))
}

fn scalar(property: &Property) -> Option<f32> {
    match *property {
        Property::Char(v) => Some(v as f32),
        Property::UChar(v) => Some(v as f32),
        Property::Short(v) => Some(v as f32),
        Property::UShort(v) => Some(v as f32),
        Property::Int(v) => Some(v as f32),
        Property::UInt(v) => Some(v as f32),
        Property::Float(v) => Some(v),
        Property::Double(v) => Some(v as f32),
        _ => None,
    }
}

fn list_indices(property: &Property) -> Option<Vec<u32>> {
    fn convert<T: Copy + TryInto<u32>>(values: &[T]) -> Option<Vec<u32>> {
        values.iter().map(|&v| v.try_into().ok()).collect()
    }

    match property {
        Property::ListChar(v) => convert(v),
        Property::ListUChar(v) => convert(v),
        Property::ListShort(v) => convert(v),
        Property::ListUShort(v) => convert(v),
        Property::ListInt(v) => convert(v),
        Property::ListUInt(v) => convert(v),
        _ => None,
    }
}
