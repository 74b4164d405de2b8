//! Module registry
//!
//! Holds every loaded module and the arena of their type declarations, binds
//! import prefixes, and drives type resolution over all typedefs and leaves.

use crate::{Module, RegistryOptions};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use yangc_ast::split_prefixed;
use yangc_diagnostics::{
    ErrorBuilder, Locator, Result, YangError, YANG0100, YANG0101, YANG0102, YANG0103, YANG0104,
    YANG0106, YANG0107, YANG0401, YANG0404,
};
use yangc_types::{
    DeclArena, DeclId, IdentityId, ModuleId, PrefixResolver, Resolution, ScopeId, TypeError,
    TypeResolver, TypeScope,
};

/// Registry of parsed modules
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
    by_name: HashMap<String, usize>,
    arena: DeclArena,
    options: RegistryOptions,
    /// Structural errors found while building module views
    load_errors: Vec<YangError>,
    /// Import bindings are current; cleared by every `parse`
    processed: bool,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Parse `source` and register each of its modules.
    ///
    /// Syntax errors, top-level statements other than `module`, and modules
    /// already registered are returned as errors. Problems inside a module
    /// are reported by [`process`](Self::process).
    pub fn parse(&mut self, source: &str, file: &str) -> Result<()> {
        let statements = yangc_parser::parse(source, file)?;
        let file: Arc<str> = Arc::from(file);
        let mut errors = Vec::new();
        self.processed = false;

        for stmt in &statements {
            let locator = Locator::source(file.clone(), stmt.location);
            if !stmt.is("module") {
                errors.push(
                    ErrorBuilder::new(
                        YANG0100,
                        format!("expected a module, found {}", stmt.keyword),
                    )
                    .at(locator)
                    .semantic(),
                );
                continue;
            }
            if self.by_name.contains_key(stmt.arg()) {
                errors.push(
                    ErrorBuilder::new(YANG0107, format!("duplicate module {}", stmt.arg()))
                        .at(locator)
                        .semantic(),
                );
                continue;
            }

            let scope = ScopeId::new(self.modules.len() as u32);
            let mut module = Module::from_statement(
                stmt,
                scope,
                file.clone(),
                &mut self.arena,
                &mut self.load_errors,
            );
            if let Some(prefix) = module.prefix.clone() {
                module.bindings.insert(prefix, scope);
            }
            log::debug!("registered module {} from {file}", module.name);
            self.by_name.insert(module.name.clone(), self.modules.len());
            self.modules.push(module);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(YangError::from_many(errors))
        }
    }

    /// Read and parse one file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            let code = match e.kind() {
                std::io::ErrorKind::NotFound => YANG0404,
                _ => YANG0401,
            };
            ErrorBuilder::new(code, format!("{}: {e}", path.display())).system()
        })?;
        self.parse(&source, &path.display().to_string())
    }

    /// Load every `*.yang` file in `dir`, in file name order.
    ///
    /// Returns the paths that were loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<std::path::PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "yang") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in &paths {
            self.load_file(path)?;
        }
        Ok(paths)
    }

    /// Check and resolve everything that has been loaded.
    ///
    /// Runs header checks, import binding, identity base resolution and
    /// finally type resolution for every typedef and leaf. Returns all
    /// errors found, each reported once.
    ///
    /// May be run again after more modules are parsed: cached resolutions
    /// are dropped and recomputed against the new bindings.
    pub fn process(&mut self) -> Vec<YangError> {
        let mut errors = self.load_errors.clone();

        log::debug!("processing {} modules", self.modules.len());
        self.check_headers(&mut errors);
        self.bind_imports(&mut errors);
        self.arena.reset_resolutions();
        self.processed = true;
        self.check_identities(&mut errors);
        errors.extend(self.resolve_all().into_iter().map(YangError::from));

        log::debug!("processing finished with {} errors", errors.len());
        errors
    }

    fn check_headers(&self, errors: &mut Vec<YangError>) {
        for module in &self.modules {
            if module.prefix.is_none() {
                errors.push(
                    ErrorBuilder::new(YANG0101, format!("module {} has no prefix", module.name))
                        .at(module.locator.clone())
                        .semantic(),
                );
            }
            if module.namespace.is_none() {
                errors.push(
                    ErrorBuilder::new(
                        YANG0102,
                        format!("module {} has no namespace", module.name),
                    )
                    .at(module.locator.clone())
                    .semantic(),
                );
            }
        }
    }

    fn bind_imports(&mut self, errors: &mut Vec<YangError>) {
        log::trace!("binding import prefixes");
        for index in 0..self.modules.len() {
            let mut bindings = HashMap::new();
            if let Some(prefix) = self.modules[index].prefix.clone() {
                bindings.insert(prefix, ScopeId::new(index as u32));
            }

            for import in &self.modules[index].imports {
                if bindings.contains_key(&import.prefix) {
                    errors.push(
                        ErrorBuilder::new(
                            YANG0104,
                            format!("duplicate prefix {}", import.prefix),
                        )
                        .at(import.locator.clone())
                        .semantic(),
                    );
                    continue;
                }
                match self.by_name.get(&import.module) {
                    Some(&target) => {
                        bindings.insert(import.prefix.clone(), ScopeId::new(target as u32));
                    }
                    None if self.options.strict_imports => errors.push(
                        ErrorBuilder::new(YANG0103, format!("unknown module: {}", import.module))
                            .at(import.locator.clone())
                            .semantic(),
                    ),
                    None => log::warn!(
                        "{}: imported module {} is not loaded",
                        import.locator,
                        import.module
                    ),
                }
            }
            self.modules[index].bindings = bindings;
        }
    }

    fn check_identities(&self, errors: &mut Vec<YangError>) {
        for module in &self.modules {
            for identity in module.identities.values() {
                for base in &identity.bases {
                    if self.lookup_identity(module.scope, base).is_none() {
                        errors.push(
                            ErrorBuilder::new(
                                YANG0106,
                                format!("identity {}: unknown base {base}", identity.name),
                            )
                            .at(identity.locator.clone())
                            .semantic(),
                        );
                    }
                }
            }
        }
    }

    /// Resolve every typedef and then every leaf, collecting distinct errors
    /// in first-seen order
    fn resolve_all(&self) -> IndexSet<TypeError> {
        let resolver = self.resolver();
        let mut errors = IndexSet::new();
        for module in &self.modules {
            let decls = module
                .typedefs
                .values()
                .map(|t| t.decl)
                .chain(module.leaves.iter().map(|l| l.decl));
            for decl in decls {
                if let Err(errs) = resolver.resolve(decl) {
                    errors.extend(errs);
                }
            }
        }
        errors
    }

    fn resolver(&self) -> TypeResolver<'_> {
        let resolver =
            TypeResolver::new(&self.arena, self).with_options(self.options.resolve.clone());
        if self.processed {
            resolver
        } else {
            resolver.uncached()
        }
    }

    /// Whether imports are bound for everything parsed so far
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Resolve one declaration, or return its cached outcome.
    ///
    /// Until [`process`](Self::process) has bound the imports, only the
    /// module's own prefix is known and outcomes are not cached.
    pub fn resolve(&self, decl: DeclId) -> Resolution {
        self.resolver().resolve(decl)
    }

    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    /// Find a module by the prefix it declares for itself
    pub fn find_module_by_prefix(&self, prefix: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.prefix.as_deref() == Some(prefix))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, scope: ScopeId) -> Option<&Module> {
        self.modules.get(scope.index())
    }

    pub fn arena(&self) -> &DeclArena {
        &self.arena
    }

    /// The module a possibly prefixed name refers to from `scope`, and the
    /// unprefixed name
    fn target<'n>(&self, scope: ScopeId, name: &'n str) -> Option<(&Module, &'n str)> {
        let (prefix, local) = split_prefixed(name);
        let target = match prefix {
            Some(prefix) => self.module(scope)?.binding(prefix)?,
            None => scope,
        };
        Some((self.module(target)?, local))
    }
}

impl PrefixResolver for ModuleRegistry {
    fn resolve_prefix(&self, scope: ScopeId, prefix: &str) -> Option<ModuleId> {
        let target = self.module(scope)?.binding(prefix)?;
        self.module(target).map(Module::id)
    }

    fn defines_extension(&self, module: &ModuleId, name: &str) -> bool {
        self.find_module(&module.name)
            .is_some_and(|m| m.extensions.contains_key(name))
    }
}

impl TypeScope for ModuleRegistry {
    fn lookup_typedef(&self, scope: ScopeId, name: &str) -> Option<DeclId> {
        let (module, local) = self.target(scope, name)?;
        module.typedefs.get(local).map(|t| t.decl)
    }

    fn lookup_identity(&self, scope: ScopeId, name: &str) -> Option<IdentityId> {
        let (module, local) = self.target(scope, name)?;
        module
            .identities
            .get(local)
            .map(|i| IdentityId::new(module.name.clone(), i.name.clone()))
    }
}
