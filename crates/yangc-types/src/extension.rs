//! Namespace-qualified extension statement matching
//!
//! An extension keyword such as `o:posix-pattern` is only meaningful once
//! its prefix is bound through the enclosing module's imports. Two keywords
//! with the same local name but prefixes bound to different modules are
//! different extensions, whichever prefixes the importing module chose.

use crate::ScopeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use yangc_ast::Keyword;

/// Canonical identity of a module: its name and namespace URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    pub name: String,
    pub namespace: String,
}

impl ModuleId {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An extension keyword resolved to the module that defines it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionId {
    pub module: ModuleId,
    pub name: String,
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module.name, self.name)
    }
}

/// Binds import prefixes, as written in one module's source, to modules
pub trait PrefixResolver {
    /// Resolve `prefix` as seen from declarations in `scope`
    fn resolve_prefix(&self, scope: ScopeId, prefix: &str) -> Option<ModuleId>;

    /// Whether `module` declares the extension `name`. Resolvers that do not
    /// track extension declarations accept every name.
    fn defines_extension(&self, _module: &ModuleId, _name: &str) -> bool {
        true
    }
}

/// Resolves extension keywords within one scope
pub struct ExtensionResolver<'a, R: ?Sized> {
    prefixes: &'a R,
    scope: ScopeId,
}

impl<'a, R: PrefixResolver + ?Sized> ExtensionResolver<'a, R> {
    pub fn new(prefixes: &'a R, scope: ScopeId) -> Self {
        Self { prefixes, scope }
    }

    /// Resolve a prefixed keyword to its owning module and local name.
    ///
    /// Core (unprefixed) keywords and prefixes not bound in the scope
    /// resolve to `None`.
    pub fn resolve(&self, keyword: &Keyword) -> Option<ExtensionId> {
        let prefix = keyword.prefix.as_deref()?;
        let module = self.prefixes.resolve_prefix(self.scope, prefix)?;
        Some(ExtensionId {
            module,
            name: keyword.name.clone(),
        })
    }

    /// Whether the owning module of `ext` actually declares it
    pub fn is_defined(&self, ext: &ExtensionId) -> bool {
        self.prefixes.defines_extension(&ext.module, &ext.name)
    }
}

/// A well-known extension named by defining module and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionRef {
    pub module: String,
    pub name: String,
}

impl ExtensionRef {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// The POSIX pattern restriction of `openconfig-extensions`
    pub fn posix_pattern() -> Self {
        Self::new("openconfig-extensions", "posix-pattern")
    }

    pub fn matches(&self, ext: &ExtensionId) -> bool {
        ext.module.name == self.module && ext.name == self.name
    }
}

impl Default for ExtensionRef {
    fn default() -> Self {
        Self::posix_pattern()
    }
}

impl FromStr for ExtensionRef {
    type Err = String;

    /// Parse `module:name`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((module, name)) if !module.is_empty() && !name.is_empty() => {
                Ok(Self::new(module, name))
            }
            _ => Err(format!("expected <module>:<extension>, got {s:?}")),
        }
    }
}

impl fmt::Display for ExtensionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}
