//! Resolver configuration

use crate::ExtensionRef;
use serde::{Deserialize, Serialize};

/// Options controlling type resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Extension whose arguments are collected as POSIX patterns
    pub posix_pattern: ExtensionRef,
    /// Compile POSIX patterns and reject those that do not compile
    pub compile_posix_patterns: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            posix_pattern: ExtensionRef::posix_pattern(),
            compile_posix_patterns: true,
        }
    }
}
