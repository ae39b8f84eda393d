// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Level-of-detail values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of detail of a geometry.
///
/// CityJSON 1.0 writes the LoD as a number (`2`, `1.3`), 1.1 and later as a
/// string (`"2.2"`). Both are kept in their original kind so the document
/// serializes back unchanged; comparisons go through [`Lod::matches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lod {
    Text(String),
    Number(serde_json::Number),
}

impl Lod {
    /// Canonical form used for comparisons: `2`, `"2"` and `"2.0"` all become `"2"`
    pub fn normalized(&self) -> String {
        let raw = match self {
            Lod::Text(s) => s.trim().to_string(),
            Lod::Number(n) => n.to_string(),
        };
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => format!("{}", value),
            _ => raw,
        }
    }

    /// Whether two LoD values name the same tier
    pub fn matches(&self, other: &Lod) -> bool {
        self.normalized() == other.normalized()
    }
}

impl From<&str> for Lod {
    fn from(value: &str) -> Self {
        Lod::Text(value.to_string())
    }
}

impl fmt::Display for Lod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}
