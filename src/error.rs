// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for merging, exporting and configuration

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the base document and folding fragments into it
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} contains no CityJSONFeature", path.display())]
    EmptyFragment { path: PathBuf },

    #[error("Line {position} is not of type 'CityJSONFeature' ({})", path.display())]
    NotAFeature { position: usize, path: PathBuf },
}

/// Failures while writing the merged document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no metadata.referenceSystem, cannot reproject to EPSG:{target}")]
    MissingReferenceSystem { target: u32 },

    #[error("cannot reproject from EPSG:{from} to EPSG:{to}: {reason}")]
    Reprojection { from: u32, to: u32, reason: String },

    #[error("city object {object} references vertex {index} but the document has {count} vertices")]
    VertexIndexOutOfRange {
        object: String,
        index: u64,
        count: usize,
    },
}

/// Failures while loading the export configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    InvalidOverride { var: String, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
