// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CityJSONFeature fragments

use super::CityObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Required value of a fragment's `type` member
pub const CITYJSON_FEATURE_TYPE: &str = "CityJSONFeature";

/// Extension of fragment files (`*.city.jsonl`)
pub const FRAGMENT_EXTENSION: &str = "jsonl";

/// A single-feature fragment. Its vertex indices refer to its own `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityJsonFeature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "CityObjects", default)]
    pub city_objects: BTreeMap<String, CityObject>,
    #[serde(default)]
    pub vertices: Vec<[f64; 3]>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CityJsonFeature {
    /// Whether a raw JSON value carries the fragment type tag
    pub fn has_feature_tag(value: &Value) -> bool {
        value.get("type").and_then(Value::as_str) == Some(CITYJSON_FEATURE_TYPE)
    }

    /// Whether `path` is named like a fragment file
    pub fn is_fragment_path(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == FRAGMENT_EXTENSION)
            .unwrap_or(false)
    }
}
