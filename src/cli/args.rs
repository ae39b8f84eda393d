// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command-line arguments

use crate::io::{FragmentSource, OutputFormat};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "cjmerge", version)]
#[command(
    about = "Merge CityJSONFeature fragments into a CityJSON document and export it",
    long_about = None
)]
pub struct Cli {
    /// Output format
    #[arg(value_enum, value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Output file; its parent directories are created
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Base .city.json document with the transform and metadata
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Comma-separated .city.jsonl paths, or a .input file listing one path per line
    #[arg(value_name = "FEATURES")]
    pub features: FragmentSource,

    /// Export configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Create the parent directories of the output file
    pub fn prepare_output_dir(&self) -> std::io::Result<()> {
        match self.output.parent() {
            Some(parent) if parent != Path::new("") && !parent.is_dir() => {
                std::fs::create_dir_all(parent)?;
                info!("Created output directory {}", parent.display());
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
