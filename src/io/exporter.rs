// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export dispatch: verbatim CityJSON or one GLB per level of detail

use super::export_gltf;
use crate::config::{ExportConfig, LodTarget};
use crate::error::ExportError;
use crate::geometry::{Mesh, ProjReprojector, Reprojector};
use crate::model::{CityJson, Lod};
use clap::ValueEnum;
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const CITY_SUFFIX: &str = ".city";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The merged document as compact CityJSON
    #[value(name = "cityjson")]
    CityJson,
    /// Reprojected, one GLB mesh per level of detail
    #[value(name = "3dtiles")]
    Tiles3d,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::CityJson => "cityjson",
            OutputFormat::Tiles3d => "3dtiles",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export `doc` in `format`, returning the files written
pub fn export(
    doc: &CityJson,
    format: OutputFormat,
    output: &Path,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    export_with(doc, format, output, config, &ProjReprojector)
}

/// [`export`] with a caller-supplied reprojector
pub fn export_with(
    doc: &CityJson,
    format: OutputFormat,
    output: &Path,
    config: &ExportConfig,
    reprojector: &dyn Reprojector,
) -> Result<Vec<PathBuf>, ExportError> {
    match format {
        OutputFormat::CityJson => {
            export_city_json(doc, output)?;
            Ok(vec![output.to_path_buf()])
        }
        OutputFormat::Tiles3d => export_lod_meshes(doc, output, config, reprojector),
    }
}

/// Write `doc` to `path` without extraneous whitespace
pub fn export_city_json(doc: &CityJson, path: &Path) -> Result<(), ExportError> {
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer(&mut writer, doc)?;
    writer.flush().map_err(io_error)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Reproject once, then write one mesh file per configured LoD.
///
/// A failure aborts the remaining LoDs; files already written stay on disk.
fn export_lod_meshes(
    doc: &CityJson,
    output: &Path,
    config: &ExportConfig,
    reprojector: &dyn Reprojector,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut reprojected = doc.clone();
    reprojector.reproject(&mut reprojected, config.target_epsg)?;

    let mut written = Vec::with_capacity(config.lods.len());
    for target in &config.lods {
        let path = lod_output_path(output, target, &config.mesh_extension);
        let filtered = reprojected.filter_lod(&Lod::from(target.lod.as_str()));
        debug!(
            "LoD {}: {} geometries",
            target.lod,
            filtered.geometry_count()
        );
        let mesh = Mesh::from_city_json(&filtered, config.triangulation)?;
        export_gltf::export(&mesh, &path)?;
        info!(
            "Wrote {} ({} triangles)",
            path.display(),
            mesh.triangle_count()
        );
        written.push(path);
    }
    Ok(written)
}

/// `<dir>/<stem><suffix>.<extension>`, where the stem drops the last
/// extension of the output file name and a `.city` before it
/// (`tile.city.json` gives `tile`, `tile.a.glb` gives `tile.a`).
pub fn lod_output_path(output: &Path, target: &LodTarget, extension: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match stem.strip_suffix(CITY_SUFFIX) {
        Some(base) if !base.is_empty() => base,
        _ => stem.as_str(),
    };
    let file_name = format!("{}{}.{}", stem, target.suffix, extension);
    match output.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lod_output_path() {
        let target = LodTarget::new("2.2", "-lod22");
        assert_eq!(
            lod_output_path(Path::new("out/tiles/0-0-0.glb"), &target, "glb"),
            PathBuf::from("out/tiles/0-0-0-lod22.glb")
        );
        assert_eq!(
            lod_output_path(Path::new("tile.city.json"), &target, "glb"),
            PathBuf::from("tile-lod22.glb")
        );
        assert_eq!(
            lod_output_path(Path::new("tile"), &target, "b3dm"),
            PathBuf::from("tile-lod22.b3dm")
        );
        assert_eq!(
            lod_output_path(Path::new("out/.tile"), &target, "glb"),
            PathBuf::from("out/.tile-lod22.glb")
        );
    }

    #[test]
    fn test_lod_output_paths_stay_distinct() {
        let target = LodTarget::new("2.2", "-lod22");
        let a = lod_output_path(Path::new("out/tile.a.glb"), &target, "glb");
        let b = lod_output_path(Path::new("out/tile.b.glb"), &target, "glb");
        assert_eq!(a, PathBuf::from("out/tile.a-lod22.glb"));
        assert_eq!(b, PathBuf::from("out/tile.b-lod22.glb"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::CityJson.to_string(), "cityjson");
        assert_eq!(OutputFormat::from_str("3dtiles", false).unwrap(), OutputFormat::Tiles3d);
        assert!(OutputFormat::from_str("obj", false).is_err());
    }
}
