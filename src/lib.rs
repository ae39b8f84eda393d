// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cjmerge
//!
//! Merges CityJSONFeature fragments into a base CityJSON document and exports
//! the result as compact CityJSON, or reprojected as one GLB mesh per level
//! of detail.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod model;

pub use config::{ExportConfig, LodTarget};
pub use error::{ConfigError, ExportError, MergeError};
pub use io::{export, merge, FragmentSource, OutputFormat};
pub use model::{CityJson, CityJsonFeature};
