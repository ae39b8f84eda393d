// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::RunSummary;
use colored::*;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a finished run
    pub fn report_run(summary: &RunSummary) {
        println!("{}", "━".repeat(60).bright_black());
        println!(
            "{} {} {}",
            "✅".green(),
            "Merged".bold(),
            format!("{} features", summary.merge.merged).cyan()
        );
        if summary.merge.skipped > 0 {
            println!(
                "  {} {}",
                "Skipped:".bright_black(),
                summary.merge.skipped.to_string().yellow()
            );
        }
        println!(
            "  {} {}",
            "City objects:".bright_black(),
            summary.merge.city_objects.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Vertices:".bright_black(),
            summary.merge.vertices.to_string().cyan()
        );
        println!("\n{} {}", "Output".bold(), summary.format.to_string().cyan());
        for path in &summary.outputs {
            println!("  {}", path.display().to_string().green());
        }
        println!("{}", "━".repeat(60).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("{} {}", "❌ Error:".red().bold(), message);
    }
}
