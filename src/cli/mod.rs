// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: arguments, the merge-then-export run, and reporting

mod args;
mod reporter;

pub use args::Cli;
pub use reporter::Reporter;

use crate::config::ExportConfig;
use crate::io::{self, MergeStats, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What a run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub format: OutputFormat,
    pub merge: MergeStats,
    pub outputs: Vec<PathBuf>,
}

/// Merge the base document with the fragments, then export it
pub fn run(cli: &Cli) -> Result<RunSummary> {
    cli.prepare_output_dir()
        .with_context(|| format!("Failed to create output directory for {:?}", cli.output))?;
    let config = ExportConfig::load(cli.config.as_deref())?;

    let (doc, merge) = io::merge_with_stats(&cli.base, &cli.features)
        .with_context(|| format!("Failed to merge features into {:?}", cli.base))?;

    let outputs = io::export(&doc, cli.format, &cli.output, &config)
        .with_context(|| format!("Failed to export {} to {:?}", cli.format, cli.output))?;

    Ok(RunSummary {
        format: cli.format,
        merge,
        outputs,
    })
}
