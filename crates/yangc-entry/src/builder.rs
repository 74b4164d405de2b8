//! Builds entry trees from a processed registry

use crate::{Entry, EntryKind, ExtensionUse};
use yangc_diagnostics::{ErrorBuilder, Result, YANG0108};
use yangc_model::{Leaf, LeafKind, Module, ModuleRegistry};
use yangc_types::ExtensionResolver;

/// Turns modules of a registry into [`Entry`] trees.
///
/// Types are resolved through the registry, so run
/// [`ModuleRegistry::process`] first for imports to be bound.
pub struct EntryBuilder<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Build the directory entry of module `name`
    pub fn build(&self, name: &str) -> Result<Entry> {
        let module = self.registry.find_module(name).ok_or_else(|| {
            ErrorBuilder::new(YANG0108, format!("unknown module: {name}")).semantic()
        })?;

        let mut root = Entry::directory(&module.name);
        for leaf in &module.leaves {
            root.dir.insert(leaf.name.clone(), self.leaf_entry(module, leaf));
        }
        log::debug!("built {} entries for module {}", root.dir.len(), module.name);
        Ok(root)
    }

    fn leaf_entry(&self, module: &Module, leaf: &Leaf) -> Entry {
        let mut entry = Entry::directory(&leaf.name);
        entry.kind = match leaf.kind {
            LeafKind::Leaf => EntryKind::Leaf,
            LeafKind::LeafList => EntryKind::LeafList,
        };
        entry.description = leaf.description.clone();
        entry.type_name = Some(leaf.type_name.clone());
        match self.registry.resolve(leaf.decl) {
            Ok(ty) => entry.ty = Some(ty),
            Err(errors) => entry.errors = errors,
        }

        let extensions = ExtensionResolver::new(self.registry, module.scope);
        for stmt in &leaf.extensions {
            match extensions.resolve(&stmt.keyword) {
                Some(ext) if !extensions.is_defined(&ext) => {
                    log::warn!("{}: unknown extension {ext}", leaf.locator);
                }
                Some(ext) => entry.extensions.push(ExtensionUse {
                    module: ext.module.name,
                    name: ext.name,
                    argument: stmt.argument.clone(),
                }),
                None => log::warn!(
                    "{}: extension {} has an unbound prefix",
                    leaf.locator,
                    stmt.keyword
                ),
            }
        }
        entry
    }
}
