//! Typed views over parsed `module` statements

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use yangc_ast::Statement;
use yangc_diagnostics::{ErrorBuilder, Locator, YangError, YANG0105, YANG0109};
use yangc_types::{DeclArena, DeclId, ModuleId, ScopeId, TypeDecl};

/// An `import` statement
#[derive(Debug, Clone)]
pub struct Import {
    /// Name of the imported module
    pub module: String,
    pub prefix: String,
    pub locator: Locator,
}

/// A module-level `typedef`
#[derive(Debug, Clone)]
pub struct Typedef {
    pub name: String,
    /// Declaration of the typedef's `type` statement
    pub decl: DeclId,
    pub locator: Locator,
}

/// An `identity` and the raw names of its bases
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub bases: Vec<String>,
    pub locator: Locator,
}

/// An `extension` definition
#[derive(Debug, Clone)]
pub struct ExtensionDef {
    pub name: String,
    /// Name of the extension's argument, if it takes one
    pub argument: Option<String>,
    pub locator: Locator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Leaf,
    LeafList,
}

/// A module-level `leaf` or `leaf-list`
#[derive(Debug, Clone)]
pub struct Leaf {
    pub name: String,
    pub kind: LeafKind,
    /// Type name as written
    pub type_name: String,
    pub decl: DeclId,
    pub description: Option<String>,
    /// Prefixed extension statements attached to the leaf
    pub extensions: Vec<Statement>,
    pub locator: Locator,
}

/// One parsed module
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub file: Arc<str>,
    pub imports: Vec<Import>,
    pub typedefs: IndexMap<String, Typedef>,
    pub identities: IndexMap<String, Identity>,
    pub extensions: IndexMap<String, ExtensionDef>,
    pub leaves: Vec<Leaf>,
    pub locator: Locator,
    pub scope: ScopeId,
    /// Prefix bindings, filled in by import processing
    pub(crate) bindings: HashMap<String, ScopeId>,
}

impl Module {
    /// Build the view of a `module` statement, allocating its type
    /// declarations in `arena`.
    ///
    /// Structural problems (a typedef or leaf without a type, duplicate
    /// definitions) are pushed to `errors`; the offending definition is
    /// skipped.
    pub(crate) fn from_statement(
        stmt: &Statement,
        scope: ScopeId,
        file: Arc<str>,
        arena: &mut DeclArena,
        errors: &mut Vec<YangError>,
    ) -> Self {
        let locate = |s: &Statement| Locator::source(file.clone(), s.location);

        let mut module = Module {
            name: stmt.arg().to_string(),
            prefix: stmt.child_arg("prefix").map(str::to_string),
            namespace: stmt.child_arg("namespace").map(str::to_string),
            file: file.clone(),
            imports: Vec::new(),
            typedefs: IndexMap::new(),
            identities: IndexMap::new(),
            extensions: IndexMap::new(),
            leaves: Vec::new(),
            locator: locate(stmt),
            scope,
            bindings: HashMap::new(),
        };

        for child in &stmt.children {
            if !child.keyword.is_core() {
                continue;
            }
            match child.keyword.name.as_str() {
                "import" => module.imports.push(Import {
                    module: child.arg().to_string(),
                    prefix: child.child_arg("prefix").unwrap_or_default().to_string(),
                    locator: locate(child),
                }),
                "typedef" => {
                    let Some(ty) = child.child("type") else {
                        errors.push(missing_type("typedef", child, locate(child)));
                        continue;
                    };
                    let decl = TypeDecl::from_statement(ty, scope, Some(&file), arena);
                    let typedef = Typedef {
                        name: child.arg().to_string(),
                        decl,
                        locator: locate(child),
                    };
                    if module.typedefs.contains_key(&typedef.name) {
                        errors.push(duplicate("typedef", child, locate(child)));
                    } else {
                        module.typedefs.insert(typedef.name.clone(), typedef);
                    }
                }
                "identity" => {
                    let identity = Identity {
                        name: child.arg().to_string(),
                        bases: child
                            .children_named("base")
                            .map(|b| b.arg().to_string())
                            .collect(),
                        locator: locate(child),
                    };
                    if module.identities.contains_key(&identity.name) {
                        errors.push(duplicate("identity", child, locate(child)));
                    } else {
                        module.identities.insert(identity.name.clone(), identity);
                    }
                }
                "extension" => {
                    let ext = ExtensionDef {
                        name: child.arg().to_string(),
                        argument: child.child_arg("argument").map(str::to_string),
                        locator: locate(child),
                    };
                    module.extensions.insert(ext.name.clone(), ext);
                }
                "leaf" | "leaf-list" => {
                    let kind = if child.is("leaf") {
                        LeafKind::Leaf
                    } else {
                        LeafKind::LeafList
                    };
                    let Some(ty) = child.child("type") else {
                        errors.push(missing_type(&child.keyword.name, child, locate(child)));
                        continue;
                    };
                    if module.leaves.iter().any(|l| l.name == child.arg()) {
                        errors.push(duplicate(&child.keyword.name, child, locate(child)));
                        continue;
                    }
                    module.leaves.push(Leaf {
                        name: child.arg().to_string(),
                        kind,
                        type_name: ty.arg().to_string(),
                        decl: TypeDecl::from_statement(ty, scope, Some(&file), arena),
                        description: child.child_arg("description").map(str::to_string),
                        extensions: child.extension_children().cloned().collect(),
                        locator: locate(child),
                    });
                }
                _ => {}
            }
        }
        module
    }

    /// Canonical identity; an absent namespace is the empty string
    pub fn id(&self) -> ModuleId {
        ModuleId::new(self.name.clone(), self.namespace.clone().unwrap_or_default())
    }

    pub fn leaf(&self, name: &str) -> Option<&Leaf> {
        self.leaves.iter().find(|l| l.name == name)
    }

    /// The module a prefix is bound to in this module
    pub fn binding(&self, prefix: &str) -> Option<ScopeId> {
        self.bindings.get(prefix).copied()
    }
}

fn missing_type(what: &str, stmt: &Statement, locator: Locator) -> YangError {
    ErrorBuilder::new(YANG0109, format!("{what} {} has no type", stmt.arg()))
        .at(locator)
        .semantic()
}

fn duplicate(what: &str, stmt: &Statement, locator: Locator) -> YangError {
    ErrorBuilder::new(YANG0105, format!("duplicate {what} {}", stmt.arg()))
        .at(locator)
        .semantic()
}
