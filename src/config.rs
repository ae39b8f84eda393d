// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export configuration

use crate::error::ConfigError;
use crate::geometry::{crs, TriangulationMode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cjmerge.toml";

/// One GLB output: the LoD it keeps and the suffix appended to the file stem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LodTarget {
    pub lod: String,
    pub suffix: String,
}

impl LodTarget {
    pub fn new(lod: &str, suffix: &str) -> Self {
        Self {
            lod: lod.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Settings for the `3dtiles` export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// EPSG code every document is reprojected to before mesh export
    pub target_epsg: u32,
    /// LoD tiers exported, in order, one file each
    pub lods: Vec<LodTarget>,
    /// Extension of the mesh files
    pub mesh_extension: String,
    pub triangulation: TriangulationMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target_epsg: crs::EPSG_WGS84_GEOCENTRIC,
            lods: vec![
                LodTarget::new("1.2", "-lod12"),
                LodTarget::new("1.3", "-lod13"),
                LodTarget::new("2.2", "-lod22"),
            ],
            mesh_extension: "glb".to_string(),
            triangulation: TriangulationMode::None,
        }
    }
}

impl ExportConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, else from `cjmerge.toml` if present, else defaults;
    /// then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        debug!("{:?}", config);
        Ok(config)
    }

    /// Apply `CJMERGE_TARGET_EPSG` and `CJMERGE_MESH_EXTENSION`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("CJMERGE_TARGET_EPSG") {
            self.target_epsg = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                var: "CJMERGE_TARGET_EPSG".to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("CJMERGE_MESH_EXTENSION") {
            self.mesh_extension = value.trim().trim_start_matches('.').to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lods.is_empty() {
            return Err(ConfigError::Invalid("lods must not be empty".to_string()));
        }
        if self.mesh_extension.is_empty() {
            return Err(ConfigError::Invalid("mesh_extension must not be empty".to_string()));
        }
        let mut seen = HashSet::new();
        for target in &self.lods {
            if !seen.insert(target.suffix.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "suffix {:?} is used by more than one LoD",
                    target.suffix
                )));
            }
        }
        Ok(())
    }
}
