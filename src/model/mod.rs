// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Typed CityJSON document model

mod document;
mod feature;
mod lod;

pub use document::{CityJson, CityObject, Geometry, Transform, CITYJSON_TYPE};
pub use feature::{CityJsonFeature, CITYJSON_FEATURE_TYPE, FRAGMENT_EXTENSION};
pub use lod::Lod;
