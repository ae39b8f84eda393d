// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - reading, merging, and exporting

mod export_gltf;
mod exporter;
mod fragments;
mod importer;
mod merge;

pub use export_gltf::{encode_glb, export as export_glb};
pub use exporter::{export, export_city_json, export_with, lod_output_path, OutputFormat};
pub use fragments::FragmentSource;
pub use importer::{import_city_json, import_fragment_values};
pub use merge::{merge, merge_with_stats, MergeStats};
