//! Raw type declarations and the arena that owns them
//!
//! A `type` statement becomes a [`TypeDecl`]: the referenced type name, its
//! restriction sub-statements and its raw children. Declarations live in a
//! [`DeclArena`] and refer to each other (union members) by [`DeclId`], so
//! a typedef referenced from many leaves is one node with one cache slot.

use crate::{ScopeId, TypeDescriptor, TypeError};
use once_cell::sync::OnceCell;
use std::ops::Index;
use std::sync::Arc;
use yangc_ast::Statement;
use yangc_diagnostics::{Locator, SourceLocation};

/// Outcome of resolving one declaration
pub type Resolution = Result<Arc<TypeDescriptor>, Vec<TypeError>>;

/// Stable handle to a declaration in a [`DeclArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The argument of a restriction sub-statement and where it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub argument: String,
    pub locator: Locator,
}

impl Restriction {
    pub fn new(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            locator: Locator::Unknown,
        }
    }
}

/// An `enum` or `bit` sub-statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    /// `value` for enums, `position` for bits
    pub value: Option<Restriction>,
    pub locator: Locator,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            locator: Locator::Unknown,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(Restriction::new(value));
        self
    }
}

/// A raw, unvalidated type declaration
#[derive(Debug)]
pub struct TypeDecl {
    /// Built-in type name or typedef reference, possibly prefixed
    pub name: String,
    pub range: Option<Restriction>,
    pub length: Option<Restriction>,
    pub fraction_digits: Option<Restriction>,
    pub base: Option<Restriction>,
    pub path: Option<Restriction>,
    pub require_instance: Option<Restriction>,
    pub enums: Vec<MemberDecl>,
    pub bits: Vec<MemberDecl>,
    /// Nested `type` statements of a union
    pub members: Vec<DeclId>,
    /// Every child statement in source order, including `pattern` and
    /// extension statements
    pub statements: Vec<Statement>,
    pub locator: Locator,
    /// Module whose bindings apply to names in this declaration
    pub scope: ScopeId,
    resolved: OnceCell<Resolution>,
}

impl TypeDecl {
    /// A declaration of `name` with no restrictions and no source position
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: None,
            length: None,
            fraction_digits: None,
            base: None,
            path: None,
            require_instance: None,
            enums: Vec::new(),
            bits: Vec::new(),
            members: Vec::new(),
            statements: Vec::new(),
            locator: Locator::Unknown,
            scope: ScopeId::default(),
            resolved: OnceCell::new(),
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(Restriction::new(range));
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(Restriction::new(length));
        self
    }

    pub fn with_fraction_digits(mut self, digits: impl Into<String>) -> Self {
        self.fraction_digits = Some(Restriction::new(digits));
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(Restriction::new(base));
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(Restriction::new(path));
        self
    }

    pub fn with_require_instance(mut self, value: impl Into<String>) -> Self {
        self.require_instance = Some(Restriction::new(value));
        self
    }

    pub fn with_enum(mut self, member: MemberDecl) -> Self {
        self.enums.push(member);
        self
    }

    pub fn with_bit(mut self, member: MemberDecl) -> Self {
        self.bits.push(member);
        self
    }

    pub fn with_member(mut self, member: DeclId) -> Self {
        self.members.push(member);
        self
    }

    /// Shorthand for a standard `pattern` child statement
    pub fn with_pattern(self, pattern: impl Into<String>) -> Self {
        self.with_statement(Statement::with_arg("pattern", pattern))
    }

    /// Append a raw child statement, such as a prefixed extension
    pub fn with_statement(mut self, stmt: Statement) -> Self {
        self.statements.push(stmt);
        self
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    /// Build a declaration from a `type` statement, allocating nested union
    /// member declarations first.
    ///
    /// With no `file`, every locator is [`Locator::Unknown`].
    pub fn from_statement(
        stmt: &Statement,
        scope: ScopeId,
        file: Option<&Arc<str>>,
        arena: &mut DeclArena,
    ) -> DeclId {
        let locate = |location: SourceLocation| match file {
            Some(file) => Locator::source(file.clone(), location),
            None => Locator::Unknown,
        };
        let restriction = |name: &str| {
            stmt.child(name).map(|c| Restriction {
                argument: c.arg().to_string(),
                locator: locate(c.location),
            })
        };
        let member_decls = |item: &str, value_keyword: &str| {
            stmt.children_named(item)
                .map(|c| MemberDecl {
                    name: c.arg().to_string(),
                    value: c.child(value_keyword).map(|v| Restriction {
                        argument: v.arg().to_string(),
                        locator: locate(v.location),
                    }),
                    locator: locate(c.location),
                })
                .collect::<Vec<_>>()
        };

        let members = stmt
            .children_named("type")
            .map(|member| Self::from_statement(member, scope, file, arena))
            .collect();

        let decl = TypeDecl {
            name: stmt.arg().to_string(),
            range: restriction("range"),
            length: restriction("length"),
            fraction_digits: restriction("fraction-digits"),
            base: restriction("base"),
            path: restriction("path"),
            require_instance: restriction("require-instance"),
            enums: member_decls("enum", "value"),
            bits: member_decls("bit", "position"),
            members,
            statements: stmt.children.clone(),
            locator: locate(stmt.location),
            scope,
            resolved: OnceCell::new(),
        };
        arena.alloc(decl)
    }

    /// Locator for a child statement of this declaration
    pub fn locate(&self, location: SourceLocation) -> Locator {
        match &self.locator {
            Locator::Source { file, .. } => Locator::source(file.clone(), location),
            Locator::Unknown => Locator::Unknown,
        }
    }

    /// The cached resolution outcome, if this declaration was resolved
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolved.get()
    }

    /// Publish a resolution outcome. When another caller got there first,
    /// its outcome is kept and returned.
    pub(crate) fn publish(&self, outcome: Resolution) -> &Resolution {
        self.resolved.get_or_init(|| outcome)
    }

    /// Drop the cached outcome so the next resolution recomputes it
    pub fn reset(&mut self) {
        self.resolved.take();
    }
}

/// Owner of all type declarations
#[derive(Debug, Default)]
pub struct DeclArena {
    decls: Vec<TypeDecl>,
}

impl DeclArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, decl: TypeDecl) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn get(&self, id: DeclId) -> Option<&TypeDecl> {
        self.decls.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Forget every cached outcome. Needed whenever the names a scope
    /// resolves to may have changed.
    pub fn reset_resolutions(&mut self) {
        for decl in &mut self.decls {
            decl.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &TypeDecl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, decl)| (DeclId(i as u32), decl))
    }
}

impl Index<DeclId> for DeclArena {
    type Output = TypeDecl;

    fn index(&self, id: DeclId) -> &TypeDecl {
        &self.decls[id.index()]
    }
}
