// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle meshes built from city object geometry

use super::BoundingBox;
use crate::error::ExportError;
use crate::model::{CityJson, Geometry};
use log::{debug, warn};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// How surfaces are turned into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangulationMode {
    /// Surfaces must already be triangles; anything else is skipped
    #[default]
    None,
    /// Fan-triangulate the outer ring of every surface, ignoring holes
    Fan,
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub fn new(indices: [u32; 3]) -> Self {
        Self { indices }
    }
}

/// Triangles of one city object
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

/// Triangular mesh with shared positions and one group per city object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f64>>,
    pub groups: Vec<MeshGroup>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from every surface-carrying geometry in `doc`.
    ///
    /// Only referenced vertices are copied, so orphans left behind by a LoD
    /// filter never reach the mesh. City objects that yield no triangle get no
    /// group.
    pub fn from_city_json(doc: &CityJson, mode: TriangulationMode) -> Result<Mesh, ExportError> {
        let coordinates = doc.real_coordinates();
        let mut mesh = Mesh::new();
        let mut remap: HashMap<u64, u32> = HashMap::new();
        let mut skipped = 0usize;

        for (id, object) in &doc.city_objects {
            let mut triangles = Vec::new();
            for geometry in &object.geometry {
                for ring in outer_rings(geometry) {
                    let polygon = match triangulate_ring(&ring, mode) {
                        Some(polygon) => polygon,
                        None => {
                            skipped += 1;
                            continue;
                        }
                    };
                    for corners in polygon {
                        let mut indices = [0u32; 3];
                        for (slot, index) in indices.iter_mut().zip(corners) {
                            *slot = mesh.vertex_for(index, &coordinates, &mut remap, id)?;
                        }
                        triangles.push(Triangle::new(indices));
                    }
                }
            }
            if !triangles.is_empty() {
                mesh.groups.push(MeshGroup {
                    name: id.clone(),
                    triangles,
                });
            }
        }

        if skipped > 0 {
            warn!(
                "Skipped {} surfaces that are not triangles (triangulation: {:?})",
                skipped, mode
            );
        }
        debug!(
            "Built mesh with {} vertices, {} triangles in {} groups",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.groups.len()
        );
        Ok(mesh)
    }

    fn vertex_for(
        &mut self,
        index: u64,
        coordinates: &[Point3<f64>],
        remap: &mut HashMap<u64, u32>,
        object: &str,
    ) -> Result<u32, ExportError> {
        if let Some(&mapped) = remap.get(&index) {
            return Ok(mapped);
        }
        let position = coordinates
            .get(index as usize)
            .ok_or_else(|| ExportError::VertexIndexOutOfRange {
                object: object.to_string(),
                index,
                count: coordinates.len(),
            })?;
        let mapped = self.positions.len() as u32;
        self.positions.push(*position);
        remap.insert(index, mapped);
        Ok(mapped)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.positions)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|g| g.triangles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}

/// Outer ring of every surface in a geometry, as raw vertex indices
fn outer_rings(geometry: &Geometry) -> Vec<Vec<u64>> {
    let mut rings = Vec::new();
    if let Some(depth) = geometry.surface_depth() {
        collect_surfaces(&geometry.boundaries, depth, &mut rings);
    }
    rings
}

fn collect_surfaces(value: &Value, depth: usize, rings: &mut Vec<Vec<u64>>) {
    let Some(items) = value.as_array() else {
        return;
    };
    if depth == 0 {
        // a surface: first ring is the exterior
        if let Some(exterior) = items.first().and_then(Value::as_array) {
            rings.push(exterior.iter().filter_map(Value::as_u64).collect());
        }
        return;
    }
    for item in items {
        collect_surfaces(item, depth - 1, rings);
    }
}

fn triangulate_ring(ring: &[u64], mode: TriangulationMode) -> Option<Vec<[u64; 3]>> {
    match (mode, ring.len()) {
        (_, 3) => Some(vec![[ring[0], ring[1], ring[2]]]),
        (TriangulationMode::Fan, n) if n > 3 => Some(
            (1..n - 1)
                .map(|i| [ring[0], ring[i], ring[i + 1]])
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(boundaries: Value, kind: &str) -> CityJson {
        serde_json::from_value(json!({
            "type": "CityJSON",
            "CityObjects": {
                "b1": {"type": "Building", "geometry": [
                    {"type": kind, "lod": "2.2", "boundaries": boundaries}
                ]},
                "b2": {"type": "Building", "geometry": []}
            },
            "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0], [9, 9, 9]]
        }))
        .unwrap()
    }

    #[test]
    fn test_triangles_pass_through() {
        let doc = document(json!([[[0, 1, 2]], [[0, 2, 3]]]), "MultiSurface");
        let mesh = Mesh::from_city_json(&doc, TriangulationMode::None).unwrap();

        assert_eq!(mesh.groups.len(), 1);
        assert_eq!(mesh.groups[0].name, "b1");
        assert_eq!(mesh.triangle_count(), 2);
        // unreferenced vertex 4 is dropped
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_quads_skipped_without_triangulation() {
        let doc = document(json!([[[0, 1, 2, 3]]]), "MultiSurface");
        let mesh = Mesh::from_city_json(&doc, TriangulationMode::None).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.groups.is_empty());
    }

    #[test]
    fn test_fan_triangulation() {
        let doc = document(json!([[[[0, 1, 2, 3]], [[0, 1, 4]]]]), "Solid");
        let mesh = Mesh::from_city_json(&doc, TriangulationMode::Fan).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.groups[0].triangles[0], Triangle::new([0, 1, 2]));
        assert_eq!(mesh.groups[0].triangles[1], Triangle::new([0, 2, 3]));
    }

    #[test]
    fn test_holes_ignored() {
        let doc = document(json!([[[0, 1, 2], [3, 4, 0]]]), "MultiSurface");
        let mesh = Mesh::from_city_json(&doc, TriangulationMode::None).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_non_surface_geometry_ignored() {
        let doc = document(json!([0, 1, 2]), "MultiPoint");
        let mesh = Mesh::from_city_json(&doc, TriangulationMode::Fan).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_out_of_range_index() {
        let doc = document(json!([[[0, 1, 42]]]), "MultiSurface");
        let err = Mesh::from_city_json(&doc, TriangulationMode::None).unwrap_err();
        assert!(matches!(
            err,
            ExportError::VertexIndexOutOfRange { index: 42, count: 5, .. }
        ));
    }
}
