// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Base CityJSON document and its city objects

use super::{CityJsonFeature, Lod};
use crate::geometry::crs;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `type` of a base document
pub const CITYJSON_TYPE: &str = "CityJSON";

const METADATA: &str = "metadata";

/// Quantisation transform: `real = vertex * scale + translate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 3],
    pub translate: [f64; 3],
}

impl Transform {
    pub fn apply(&self, vertex: &[f64; 3]) -> Point3<f64> {
        Point3::new(
            vertex[0] * self.scale[0] + self.translate[0],
            vertex[1] * self.scale[1] + self.translate[1],
            vertex[2] * self.scale[2] + self.translate[2],
        )
    }
}

/// A CityJSON document.
///
/// Only the members this tool touches are typed; everything else
/// (`metadata`, `appearance`, `geometry-templates`, extensions, ...) is
/// carried through `extra` untouched, so a document read and written again
/// keeps its members as they were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityJson {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(rename = "CityObjects", default)]
    pub city_objects: BTreeMap<String, CityObject>,
    #[serde(default, with = "vertex_list")]
    pub vertices: Vec<[f64; 3]>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single city object (building, bridge, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Vec<Geometry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Geometry of a city object. `boundaries` stays untyped because its nesting
/// depth depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lod: Option<Lod>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub boundaries: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Geometry {
    /// Depth at which surfaces (lists of rings) sit inside `boundaries`,
    /// `None` for geometry types that carry no surfaces.
    pub fn surface_depth(&self) -> Option<usize> {
        match self.kind.as_str() {
            "MultiSurface" | "CompositeSurface" => Some(1),
            "Solid" => Some(2),
            "MultiSolid" | "CompositeSolid" => Some(3),
            _ => None,
        }
    }

    /// Shift every vertex index in `boundaries` by `offset`
    pub fn offset_indices(&mut self, offset: u64) {
        offset_value(&mut self.boundaries, offset);
    }
}

fn offset_value(value: &mut Value, offset: u64) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(|v| offset_value(v, offset)),
        Value::Number(n) => {
            if let Some(index) = n.as_u64() {
                *value = Value::from(index + offset);
            }
        }
        _ => {}
    }
}

impl Default for CityJson {
    fn default() -> Self {
        Self {
            kind: Some(CITYJSON_TYPE.to_string()),
            version: None,
            transform: None,
            city_objects: BTreeMap::new(),
            vertices: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl CityJson {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a feature into the document.
    ///
    /// The feature's vertex indices are shifted past the vertices already
    /// present, its city objects are inserted (replacing objects with the same
    /// id) and its vertices appended. Vertices are not deduplicated.
    pub fn add_feature(&mut self, feature: CityJsonFeature) {
        let offset = self.vertices.len() as u64;
        for (id, mut object) in feature.city_objects {
            for geometry in &mut object.geometry {
                geometry.offset_indices(offset);
            }
            self.city_objects.insert(id, object);
        }
        self.vertices.extend(feature.vertices);
    }

    /// Deep copy keeping only the geometries at `lod`.
    ///
    /// City objects without a matching geometry stay in the copy with an empty
    /// geometry list; vertices are copied as-is so indices remain valid.
    pub fn filter_lod(&self, lod: &Lod) -> CityJson {
        let mut filtered = self.clone();
        for object in filtered.city_objects.values_mut() {
            object
                .geometry
                .retain(|g| g.lod.as_ref().map(|l| l.matches(lod)).unwrap_or(false));
        }
        filtered
    }

    /// Vertices with the transform applied
    pub fn real_coordinates(&self) -> Vec<Point3<f64>> {
        match &self.transform {
            Some(transform) => self.vertices.iter().map(|v| transform.apply(v)).collect(),
            None => self
                .vertices
                .iter()
                .map(|v| Point3::new(v[0], v[1], v[2]))
                .collect(),
        }
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.extra.get(METADATA)
    }

    /// EPSG code of `metadata.referenceSystem`, if any
    pub fn reference_system(&self) -> Option<u32> {
        self.metadata()
            .and_then(|m| m.get("referenceSystem"))
            .and_then(Value::as_str)
            .and_then(crs::parse_epsg)
    }

    pub fn set_reference_system(&mut self, epsg: u32) {
        let metadata = self
            .extra
            .entry(METADATA)
            .or_insert_with(|| Value::Object(Map::new()));
        if !metadata.is_object() {
            *metadata = Value::Object(Map::new());
        }
        if let Value::Object(map) = metadata {
            map.insert(
                "referenceSystem".to_string(),
                Value::String(crs::epsg_url(epsg)),
            );
        }
    }

    /// Number of geometries across all city objects
    pub fn geometry_count(&self) -> usize {
        self.city_objects.values().map(|o| o.geometry.len()).sum()
    }
}

/// Writes integral coordinates as JSON integers so quantised vertex lists
/// keep their on-disk form.
mod vertex_list {
    use serde::ser::{SerializeSeq, SerializeTuple};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Largest magnitude an f64 holds without losing integer precision.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    struct Coordinates<'a>(&'a [f64; 3]);

    impl Serialize for Coordinates<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(3)?;
            for c in self.0 {
                if c.fract() == 0.0 && c.abs() < MAX_EXACT {
                    tuple.serialize_element(&(*c as i64))?;
                } else {
                    tuple.serialize_element(c)?;
                }
            }
            tuple.end()
        }
    }

    pub fn serialize<S: Serializer>(vertices: &[[f64; 3]], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(vertices.len()))?;
        for vertex in vertices {
            seq.serialize_element(&Coordinates(vertex))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<[f64; 3]>, D::Error> {
        Vec::<[f64; 3]>::deserialize(deserializer)
    }
}
