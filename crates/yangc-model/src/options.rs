//! Registry configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use yangc_diagnostics::{ErrorBuilder, Result, YANG0402};
use yangc_types::ResolveOptions;

/// Options controlling module processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Options passed through to the type resolver
    pub resolve: ResolveOptions,
    /// Report imports of modules that were never loaded as errors rather
    /// than warnings
    pub strict_imports: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            strict_imports: true,
        }
    }
}

impl RegistryOptions {
    /// Load options from a JSON file; absent fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| {
            ErrorBuilder::new(YANG0402, e.message())
                .context(format!("while reading {}", path.display()))
                .system()
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ErrorBuilder::new(YANG0402, format!("invalid options: {e}")).system())
    }
}
