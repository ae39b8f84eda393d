// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Folding CityJSONFeature fragments into a base document

use super::importer::{import_city_json, import_fragment_values};
use super::FragmentSource;
use crate::error::MergeError;
use crate::model::{CityJson, CityJsonFeature};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Counters describing one merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Features folded into the document
    pub merged: usize,
    /// Paths skipped because they are not fragment files
    pub skipped: usize,
    pub city_objects: usize,
    pub vertices: usize,
}

/// Load `base_path` and fold every fragment from `source` into it
pub fn merge(base_path: &Path, source: &FragmentSource) -> Result<CityJson, MergeError> {
    merge_with_stats(base_path, source).map(|(doc, _)| doc)
}

/// Like [`merge`], also returning what was merged.
///
/// Fragments must carry `"type": "CityJSONFeature"`; the first one that does
/// not aborts the merge with its 1-based position. Paths without the fragment
/// extension are skipped. In pointer-file mode the pointer file is deleted
/// once every listed fragment has been merged, unless it listed no fragment
/// file at all.
pub fn merge_with_stats(
    base_path: &Path,
    source: &FragmentSource,
) -> Result<(CityJson, MergeStats), MergeError> {
    let mut doc = import_city_json(base_path)?;
    let paths = source.paths()?;
    debug!(
        "Merging {} fragment paths into {}",
        paths.len(),
        base_path.display()
    );

    let mut stats = MergeStats::default();
    let mut position = 0usize;
    let mut fragment_files = 0usize;
    for path in &paths {
        if !CityJsonFeature::is_fragment_path(path) {
            warn!("Not a .jsonl file {}", path.display());
            stats.skipped += 1;
            continue;
        }
        fragment_files += 1;
        for value in import_fragment_values(path)? {
            position += 1;
            if !CityJsonFeature::has_feature_tag(&value) {
                return Err(MergeError::NotAFeature {
                    position,
                    path: path.clone(),
                });
            }
            let feature: CityJsonFeature =
                serde_json::from_value(value).map_err(|source| MergeError::Json {
                    path: path.clone(),
                    source,
                })?;
            debug!("Merging feature {} from {}", feature.id, path.display());
            doc.add_feature(feature);
            stats.merged += 1;
        }
    }

    if let FragmentSource::PointerFile(pointer) = source {
        if fragment_files == 0 {
            warn!("{} lists no .jsonl files, keeping it", pointer.display());
        } else {
            std::fs::remove_file(pointer).map_err(|source| MergeError::Io {
                path: pointer.clone(),
                source,
            })?;
            debug!("Deleted {}", pointer.display());
        }
    }

    stats.city_objects = doc.city_objects.len();
    stats.vertices = doc.vertices.len();
    info!(
        "Merged {} features ({} skipped): {} city objects, {} vertices",
        stats.merged, stats.skipped, stats.city_objects, stats.vertices
    );
    Ok((doc, stats))
}
