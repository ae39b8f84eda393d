// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CityJSON and CityJSONFeature file readers

use crate::error::MergeError;
use crate::model::CityJson;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn open(path: &Path) -> Result<BufReader<File>, MergeError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| MergeError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a base `.city.json` document
pub fn import_city_json(path: &Path) -> Result<CityJson, MergeError> {
    serde_json::from_reader(open(path)?).map_err(|source| MergeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every JSON value in a fragment file.
///
/// A fragment file normally holds one feature, either on a single line or
/// pretty-printed; several concatenated features (one per line, as in
/// CityJSONL) are returned in file order. Values are left untyped so the
/// caller can check the type tag before converting. A file without any JSON
/// value is an error.
pub fn import_fragment_values(path: &Path) -> Result<Vec<Value>, MergeError> {
    let values = serde_json::Deserializer::from_reader(open(path)?)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| MergeError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if values.is_empty() {
        return Err(MergeError::EmptyFragment {
            path: path.to_path_buf(),
        });
    }
    Ok(values)
}
