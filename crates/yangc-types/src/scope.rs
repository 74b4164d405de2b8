//! Lookup interface between the resolver and the module registry

use crate::{DeclId, ModuleId, PrefixResolver};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the module whose bindings apply to a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A resolved identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId {
    pub module: String,
    pub name: String,
}

impl IdentityId {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

/// Name lookups the resolver performs while resolving declarations.
///
/// Every lookup is made from a scope so that `prefix:name` references go
/// through the bindings of the module that wrote them. Implementations must
/// be read-only by the time resolution starts.
pub trait TypeScope: PrefixResolver + Sync {
    /// Find the type declaration of the typedef `name`
    fn lookup_typedef(&self, scope: ScopeId, name: &str) -> Option<DeclId>;

    /// Find the identity `name`
    fn lookup_identity(&self, scope: ScopeId, name: &str) -> Option<IdentityId>;
}

/// A scope with no typedefs, identities or prefix bindings
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScope;

impl PrefixResolver for EmptyScope {
    fn resolve_prefix(&self, _scope: ScopeId, _prefix: &str) -> Option<ModuleId> {
        None
    }
}

impl TypeScope for EmptyScope {
    fn lookup_typedef(&self, _scope: ScopeId, _name: &str) -> Option<DeclId> {
        None
    }

    fn lookup_identity(&self, _scope: ScopeId, _name: &str) -> Option<IdentityId> {
        None
    }
}
