// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Where fragment paths come from

use crate::error::MergeError;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extension marking a pointer file
pub const POINTER_EXTENSION: &str = "input";

/// Source of fragment paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentSource {
    /// Paths given directly, e.g. on the command line as `a.city.jsonl,b.city.jsonl`
    List(Vec<PathBuf>),
    /// A `.input` text file with one fragment path per line. Deleted once
    /// consumed.
    PointerFile(PathBuf),
}

impl FragmentSource {
    /// Interpret a command-line argument.
    ///
    /// A single path with the `.input` extension is a pointer file. Anything
    /// else is a comma-separated list, so a lone path of another kind is a
    /// one-element list and gets skipped by the merge. An empty value is an
    /// empty list.
    pub fn from_arg(arg: &str) -> Self {
        let arg = arg.trim();
        if !arg.contains(',') && Self::is_pointer_path(Path::new(arg)) {
            return FragmentSource::PointerFile(PathBuf::from(arg));
        }
        FragmentSource::List(
            arg.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
        )
    }

    fn is_pointer_path(path: &Path) -> bool {
        path.extension().map(|e| e == POINTER_EXTENSION).unwrap_or(false)
    }

    pub fn is_pointer_file(&self) -> bool {
        matches!(self, FragmentSource::PointerFile(_))
    }

    /// Fragment paths in merge order
    pub fn paths(&self) -> Result<Vec<PathBuf>, MergeError> {
        match self {
            FragmentSource::List(paths) => Ok(paths.clone()),
            FragmentSource::PointerFile(pointer) => {
                let content = std::fs::read_to_string(pointer).map_err(|source| MergeError::Io {
                    path: pointer.clone(),
                    source,
                })?;
                Ok(content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from)
                    .collect())
            }
        }
    }
}

impl FromStr for FragmentSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_arg(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_comma_list() {
        let source = FragmentSource::from_arg("a.city.jsonl, b.city.jsonl,,c.txt");
        assert_eq!(
            source,
            FragmentSource::List(vec![
                PathBuf::from("a.city.jsonl"),
                PathBuf::from("b.city.jsonl"),
                PathBuf::from("c.txt"),
            ])
        );
        assert!(!source.is_pointer_file());
    }

    #[test]
    fn test_single_fragment_is_list() {
        assert_eq!(
            FragmentSource::from_arg("tiles/x.city.jsonl"),
            FragmentSource::List(vec![PathBuf::from("tiles/x.city.jsonl")])
        );
    }

    #[test]
    fn test_pointer_file() {
        let source = FragmentSource::from_arg("inputs/0-0-0.input");
        assert_eq!(source, FragmentSource::PointerFile(PathBuf::from("inputs/0-0-0.input")));
        assert!(source.is_pointer_file());
    }

    #[test]
    fn test_single_non_fragment_is_list() {
        assert_eq!(
            FragmentSource::from_arg("tiles/x.city.json"),
            FragmentSource::List(vec![PathBuf::from("tiles/x.city.json")])
        );
        assert_eq!(
            FragmentSource::from_arg("paths.txt"),
            FragmentSource::List(vec![PathBuf::from("paths.txt")])
        );
    }

    #[test]
    fn test_empty_is_empty_list() {
        assert_eq!(FragmentSource::from_arg("  "), FragmentSource::List(Vec::new()));
    }

    #[test]
    fn test_pointer_file_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a.city.jsonl").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  b.city.jsonl  ").unwrap();

        let source = FragmentSource::PointerFile(file.path().to_path_buf());
        assert_eq!(
            source.paths().unwrap(),
            vec![PathBuf::from("a.city.jsonl"), PathBuf::from("b.city.jsonl")]
        );
    }

    #[test]
    fn test_missing_pointer_file() {
        let source = FragmentSource::PointerFile(PathBuf::from("/nonexistent/list.input"));
        assert!(matches!(source.paths(), Err(MergeError::Io { .. })));
    }
}
