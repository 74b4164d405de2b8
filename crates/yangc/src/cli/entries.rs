//! Entries command implementation

use super::{load_registry, output};
use anyhow::{Context, Result};
use std::path::PathBuf;
use yangc_entry::EntryBuilder;

/// Configuration for entries command
pub struct EntriesConfig {
    pub paths: Vec<PathBuf>,
    pub module: String,
    pub pretty: bool,
    pub options: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// Render the entry tree of one module as JSON.
///
/// Processing errors are logged but do not stop rendering: entries whose
/// types failed to resolve carry their errors instead.
pub fn render(config: &EntriesConfig) -> Result<String> {
    let mut registry = load_registry(&config.paths, config.options.as_deref())?;
    for error in registry.process() {
        log::warn!("{error}");
    }

    let entry = EntryBuilder::new(&registry)
        .build(&config.module)
        .with_context(|| format!("Failed to build entries for {}", config.module))?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&entry)
    } else {
        serde_json::to_string(&entry)
    };
    json.context("Failed to serialize entries")
}

/// Print the entry tree of one module
pub fn entries(config: EntriesConfig) -> Result<()> {
    let content = render(&config)?;
    output::write_output(&content, config.output_file.as_deref())
}
