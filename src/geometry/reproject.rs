// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coordinate reprojection of whole documents

use super::crs;
use crate::error::ExportError;
use crate::model::CityJson;
use log::debug;
use proj::Proj;

/// Reprojects every vertex of a document into another CRS.
///
/// On success the document holds real coordinates in the target CRS, has no
/// transform, and its `metadata.referenceSystem` names the target.
pub trait Reprojector {
    fn reproject(&self, doc: &mut CityJson, target_epsg: u32) -> Result<(), ExportError>;
}

/// Reprojector backed by PROJ. Any pair of EPSG codes PROJ knows a
/// transformation for is supported, including compound (horizontal plus
/// height) systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjReprojector;

impl Reprojector for ProjReprojector {
    fn reproject(&self, doc: &mut CityJson, target_epsg: u32) -> Result<(), ExportError> {
        let source = doc
            .reference_system()
            .ok_or(ExportError::MissingReferenceSystem { target: target_epsg })?;
        let real = doc.real_coordinates();

        let projected: Vec<[f64; 3]> = if source == target_epsg {
            real.iter().map(|p| [p.x, p.y, p.z]).collect()
        } else {
            let failed = |reason: String| ExportError::Reprojection {
                from: source,
                to: target_epsg,
                reason,
            };

            // lon/lat axis order for geographic systems
            let transformer = Proj::new_known_crs(
                &crs::epsg_name(source),
                &crs::epsg_name(target_epsg),
                None,
            )
            .map_err(|e| failed(e.to_string()))?;

            let mut projected = Vec::with_capacity(real.len());
            for p in &real {
                let (x, y, z) = transformer
                    .convert((p.x, p.y, p.z))
                    .map_err(|e| failed(format!("({}, {}, {}): {}", p.x, p.y, p.z, e)))?;
                projected.push([x, y, z]);
            }
            projected
        };

        debug!(
            "Reprojected {} vertices from EPSG:{} to EPSG:{}",
            projected.len(),
            source,
            target_epsg
        );

        doc.vertices = projected;
        doc.transform = None;
        doc.set_reference_system(target_epsg);
        Ok(())
    }
}
