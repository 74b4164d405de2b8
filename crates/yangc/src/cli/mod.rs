//! Command implementations for the `yangc` binary

pub mod entries;
pub mod output;
pub mod validate;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use yangc_model::{ModuleRegistry, RegistryOptions};

/// Build a registry from files and directories.
///
/// Directories contribute every `*.yang` file they contain. Load failures
/// stop loading; processing errors are left to the caller.
pub fn load_registry(paths: &[PathBuf], options: Option<&Path>) -> Result<ModuleRegistry> {
    if paths.is_empty() {
        anyhow::bail!("No YANG files or directories given");
    }

    let options = match options {
        Some(path) => RegistryOptions::from_json_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => RegistryOptions::default(),
    };

    let mut registry = ModuleRegistry::with_options(options);
    for path in paths {
        if path.is_dir() {
            let loaded = registry
                .load_dir(path)
                .with_context(|| format!("Failed to load directory {}", path.display()))?;
            log::info!("loaded {} files from {}", loaded.len(), path.display());
        } else {
            registry
                .load_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            log::info!("loaded {}", path.display());
        }
    }
    Ok(registry)
}
