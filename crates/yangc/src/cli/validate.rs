//! Validate command implementation

use super::{load_registry, output};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use yangc_diagnostics::YangError;

/// Configuration for validate command
pub struct ValidateConfig {
    pub paths: Vec<PathBuf>,
    pub options: Option<PathBuf>,
}

/// Outcome of a validate run
#[derive(Debug)]
pub struct ValidateReport {
    pub modules: usize,
    pub errors: Vec<YangError>,
}

impl ValidateReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Load and process every module under the configured paths
pub fn check(config: &ValidateConfig) -> Result<ValidateReport> {
    let mut registry = load_registry(&config.paths, config.options.as_deref())?;
    let errors = registry.process();
    Ok(ValidateReport {
        modules: registry.modules().len(),
        errors,
    })
}

/// Validate YANG modules and print the outcome. Returns whether every
/// module processed cleanly.
pub fn validate(config: ValidateConfig) -> Result<bool> {
    let report = check(&config)?;

    for error in &report.errors {
        println!("{}", output::format_diagnostic(error));
    }

    println!();
    if report.is_success() {
        println!(
            "{}",
            output::format_success(&format!(
                "All {} module(s) validated successfully",
                report.modules
            ))
        );
    } else {
        eprintln!(
            "{} Found {}",
            "Validation failed:".red().bold(),
            format!("{} error(s)", report.errors.len()).red()
        );
    }
    Ok(report.is_success())
}
