// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GLB (binary glTF 2.0) exporter

use crate::error::ExportError;
use crate::geometry::Mesh;
use serde_json::{json, Value};
use std::path::Path;

const GLB_MAGIC: u32 = 0x46546C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E4942; // "BIN\0"

const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const MODE_TRIANGLES: u32 = 4;

/// Write `mesh` to `path` as GLB
pub fn export(mesh: &Mesh, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_glb(mesh)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `mesh` as a GLB byte stream.
///
/// Positions are stored as `f32` relative to the mesh centre, converted from
/// the document's Z-up frame to glTF's Y-up frame; the centre goes into the
/// root node's translation so large geocentric coordinates keep their
/// precision.
pub fn encode_glb(mesh: &Mesh) -> Result<Vec<u8>, ExportError> {
    let (gltf, buffer_data) = create_gltf_json(mesh);

    let json_string = serde_json::to_string(&gltf)?;
    let mut json_length = json_string.len();
    align_to_multiple_of_four(&mut json_length);
    let json_padding = json_length - json_string.len();

    let mut buffer_length = buffer_data.len();
    align_to_multiple_of_four(&mut buffer_length);
    let buffer_padding = buffer_length - buffer_data.len();

    let mut total_length = 12 + 8 + json_length;
    if !buffer_data.is_empty() {
        total_length += 8 + buffer_length;
    }

    let mut out = Vec::with_capacity(total_length);

    // header
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total_length as u32).to_le_bytes());

    // JSON chunk, space padded
    out.extend_from_slice(&(json_length as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(json_string.as_bytes());
    out.extend(std::iter::repeat(b' ').take(json_padding));

    // BIN chunk, zero padded
    if !buffer_data.is_empty() {
        out.extend_from_slice(&(buffer_length as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&buffer_data);
        out.extend(std::iter::repeat(0u8).take(buffer_padding));
    }

    Ok(out)
}

fn create_gltf_json(mesh: &Mesh) -> (Value, Vec<u8>) {
    let asset = json!({
        "generator": concat!("cjmerge ", env!("CARGO_PKG_VERSION")),
        "version": "2.0"
    });

    if mesh.is_empty() {
        let gltf = json!({
            "asset": asset,
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": [{"name": "root"}]
        });
        return (gltf, Vec::new());
    }

    let center = mesh.bounding_box().center();
    let mut buffer_data = Vec::new();

    // Positions, shared by every group
    let mut min_pos = [f32::MAX; 3];
    let mut max_pos = [f32::MIN; 3];
    for position in &mesh.positions {
        let local = *position - center;
        let y_up = [local.x as f32, local.z as f32, -local.y as f32];
        for axis in 0..3 {
            min_pos[axis] = min_pos[axis].min(y_up[axis]);
            max_pos[axis] = max_pos[axis].max(y_up[axis]);
            buffer_data.extend_from_slice(&y_up[axis].to_le_bytes());
        }
    }
    let position_length = buffer_data.len();

    let mut accessors = vec![json!({
        "bufferView": 0,
        "byteOffset": 0,
        "componentType": COMPONENT_FLOAT,
        "count": mesh.positions.len(),
        "type": "VEC3",
        "min": min_pos,
        "max": max_pos
    })];
    let mut buffer_views = vec![json!({
        "buffer": 0,
        "byteOffset": 0,
        "byteLength": position_length,
        "target": TARGET_ARRAY_BUFFER
    })];
    let mut meshes = Vec::with_capacity(mesh.groups.len());
    let mut nodes = vec![json!({
        "name": "root",
        "translation": [center.x, center.z, -center.y],
        "children": (1..=mesh.groups.len()).collect::<Vec<_>>()
    })];

    // One index buffer, mesh and node per city object
    for (i, group) in mesh.groups.iter().enumerate() {
        let indices_offset = buffer_data.len();
        for triangle in &group.triangles {
            for index in triangle.indices {
                buffer_data.extend_from_slice(&index.to_le_bytes());
            }
        }
        let indices_length = buffer_data.len() - indices_offset;

        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": indices_offset,
            "byteLength": indices_length,
            "target": TARGET_ELEMENT_ARRAY_BUFFER
        }));
        accessors.push(json!({
            "bufferView": i + 1,
            "byteOffset": 0,
            "componentType": COMPONENT_UNSIGNED_INT,
            "count": group.triangles.len() * 3,
            "type": "SCALAR"
        }));
        meshes.push(json!({
            "name": group.name,
            "primitives": [{
                "attributes": {"POSITION": 0},
                "indices": i + 1,
                "mode": MODE_TRIANGLES
            }]
        }));
        nodes.push(json!({
            "name": group.name,
            "mesh": i
        }));
    }

    let gltf = json!({
        "asset": asset,
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": nodes,
        "meshes": meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{"byteLength": buffer_data.len()}]
    });

    (gltf, buffer_data)
}

fn align_to_multiple_of_four(n: &mut usize) {
    *n = (*n + 3) & !3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MeshGroup, Triangle};
    use nalgebra::Point3;
    use tempfile::NamedTempFile;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    fn triangle_mesh() -> Mesh {
        Mesh {
            positions: vec![
                Point3::new(100.0, 200.0, 0.0),
                Point3::new(102.0, 200.0, 0.0),
                Point3::new(100.0, 202.0, 4.0),
            ],
            groups: vec![MeshGroup {
                name: "b1".to_string(),
                triangles: vec![Triangle::new([0, 1, 2])],
            }],
        }
    }

    fn json_chunk(bytes: &[u8]) -> Value {
        let length = read_u32(bytes, 12) as usize;
        serde_json::from_slice(&bytes[20..20 + length]).unwrap()
    }

    #[test]
    fn test_glb_layout() {
        let bytes = encode_glb(&triangle_mesh()).unwrap();

        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(read_u32(&bytes, 4), 2);
        assert_eq!(read_u32(&bytes, 8) as usize, bytes.len());
        assert_eq!(bytes.len() % 4, 0);

        let json_length = read_u32(&bytes, 12) as usize;
        assert_eq!(json_length % 4, 0);
        assert_eq!(read_u32(&bytes, 16), CHUNK_JSON);

        let bin_header = 20 + json_length;
        // 3 positions * 12 bytes + 3 indices * 4 bytes
        assert_eq!(read_u32(&bytes, bin_header), 48);
        assert_eq!(read_u32(&bytes, bin_header + 4), CHUNK_BIN);
    }

    #[test]
    fn test_gltf_document() {
        let bytes = encode_glb(&triangle_mesh()).unwrap();
        let gltf = json_chunk(&bytes);

        assert_eq!(gltf["asset"]["version"], "2.0");
        assert_eq!(gltf["meshes"].as_array().unwrap().len(), 1);
        assert_eq!(gltf["meshes"][0]["name"], "b1");
        assert_eq!(gltf["accessors"][0]["count"], 3);
        assert_eq!(gltf["accessors"][1]["count"], 3);
        assert_eq!(gltf["nodes"][0]["children"], json!([1]));
        // centre (101, 201, 2) in Y-up order
        assert_eq!(gltf["nodes"][0]["translation"], json!([101.0, 2.0, -201.0]));
        assert_eq!(gltf["accessors"][0]["min"], json!([-1.0, -2.0, -1.0]));
        assert_eq!(gltf["accessors"][0]["max"], json!([1.0, 2.0, 1.0]));
        assert!(gltf["buffers"][0].get("uri").is_none());
    }

    #[test]
    fn test_empty_mesh_is_valid_glb() {
        let bytes = encode_glb(&Mesh::new()).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(read_u32(&bytes, 8) as usize, bytes.len());

        let gltf = json_chunk(&bytes);
        assert!(gltf.get("meshes").is_none());
        assert_eq!(bytes.len(), 20 + read_u32(&bytes, 12) as usize);
    }

    #[test]
    fn test_export_writes_file() {
        let file = NamedTempFile::with_suffix(".glb").unwrap();
        export(&triangle_mesh(), file.path()).unwrap();

        let content = std::fs::read(file.path()).unwrap();
        assert_eq!(&content[0..4], b"glTF");
    }
}
