// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coordinate reference system identifiers

/// WGS 84 geocentric (ECEF), the frame 3D Tiles expects
pub const EPSG_WGS84_GEOCENTRIC: u32 = 4978;

/// Extract the EPSG code from a reference system string.
///
/// Accepts the OGC URL (`https://www.opengis.net/def/crs/EPSG/0/7415`), the
/// URN (`urn:ogc:def:crs:EPSG::7415`) and the short `EPSG:7415` form.
pub fn parse_epsg(reference: &str) -> Option<u32> {
    let start = reference.to_ascii_uppercase().find("EPSG")?;
    let tail = &reference[start + 4..];
    tail.rsplit(|c| c == ':' || c == '/')
        .next()
        .and_then(|code| code.trim().parse().ok())
}

/// OGC URL form used when writing `metadata.referenceSystem`
pub fn epsg_url(epsg: u32) -> String {
    format!("https://www.opengis.net/def/crs/EPSG/0/{}", epsg)
}

/// Authority name PROJ resolves, e.g. `EPSG:7415`
pub fn epsg_name(epsg: u32) -> String {
    format!("EPSG:{}", epsg)
}
