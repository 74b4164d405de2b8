//! YANG statement tree definitions
//!
//! Every YANG construct is a generic statement: a keyword, an optional
//! argument and an ordered list of sub-statements. This crate defines that
//! tree; typed views over it live in the crates that interpret statements.

mod statement;

pub use statement::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statement keyword, optionally qualified by an import prefix.
///
/// Extension statements keep the prefix exactly as written so the owning
/// module can be recovered later through the enclosing module's bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub prefix: Option<String>,
    pub name: String,
}

impl Keyword {
    /// Create an unprefixed (core language) keyword
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
        }
    }

    /// Create a prefixed (extension) keyword
    pub fn prefixed(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            name: name.into(),
        }
    }

    /// Split `prefix:name` text into a keyword
    pub fn parse(text: &str) -> Self {
        match text.split_once(':') {
            Some((prefix, name)) => Self::prefixed(prefix, name),
            None => Self::new(text),
        }
    }

    /// True for unprefixed keywords of the core language
    pub fn is_core(&self) -> bool {
        self.prefix.is_none()
    }

    /// True when this is the unprefixed keyword `name`
    pub fn is(&self, name: &str) -> bool {
        self.prefix.is_none() && self.name == name
    }
}

impl From<&str> for Keyword {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Split a possibly prefixed reference such as `oc-types:ipv4-address`
pub fn split_prefixed(reference: &str) -> (Option<&str>, &str) {
    match reference.split_once(':') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, reference),
    }
}
