// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - reprojection and mesh extraction

pub mod crs;
mod bbox;
mod mesh;
mod reproject;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, MeshGroup, Triangle, TriangulationMode};
pub use reproject::{ProjReprojector, Reprojector};
