//! Type resolution engine
//!
//! Reduces a raw [`TypeDecl`] to a canonical [`TypeDescriptor`]:
//!
//! 1. The type name is classified as a built-in kind or resolved as a
//!    typedef, whose descriptor becomes the starting point. Failure here is
//!    fatal for the declaration.
//! 2. fraction-digits is checked; on decimal64 it gates the range check.
//! 3. The remaining restrictions (range, length, patterns, identity base,
//!    enums and bits, leafref path, union members) are checked
//!    independently and all of their errors are reported.
//!
//! A derived type may only narrow what it inherits. Outcomes are cached on
//! the declaration, so each declaration is resolved once no matter how many
//! leaves reach it.

use crate::{
    Bit, BuiltinKind, DeclArena, DeclId, DecimalType, EnumValue, ExtensionResolver, IdentityId,
    IntegerType, MemberDecl, NumericRange, Resolution, ResolveOptions, Restriction, StringType,
    TypeDecl, TypeDescriptor, TypeError, TypeErrorKind, TypeScope,
};
use regex::Regex;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use yangc_diagnostics::Locator;

/// Resolves declarations of one arena against a scope
pub struct TypeResolver<'a> {
    arena: &'a DeclArena,
    scope: &'a dyn TypeScope,
    options: ResolveOptions,
    cache: bool,
}

impl<'a> TypeResolver<'a> {
    pub fn new(arena: &'a DeclArena, scope: &'a dyn TypeScope) -> Self {
        Self {
            arena,
            scope,
            options: ResolveOptions::default(),
            cache: true,
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Neither read nor publish cached outcomes. For scopes whose bindings
    /// are not final yet.
    pub fn uncached(mut self) -> Self {
        self.cache = false;
        self
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a declaration, or return its cached outcome.
    ///
    /// Safe to call from several threads at once: concurrent callers of the
    /// same declaration all observe the first published outcome.
    pub fn resolve(&self, id: DeclId) -> Resolution {
        self.resolve_in(id, &mut vec![id])
    }

    /// `chain` holds the typedef declarations currently being resolved on
    /// this call path
    fn resolve_in(&self, id: DeclId, chain: &mut Vec<DeclId>) -> Resolution {
        let decl = &self.arena[id];
        if let Some(done) = decl.resolution().filter(|_| self.cache) {
            log::trace!("type {} already resolved", decl.name);
            return done.clone();
        }

        log::trace!("resolving type {}", decl.name);
        let outcome = self.compute(decl, chain);
        if let Err(errors) = &outcome {
            log::debug!("type {} failed with {} error(s)", decl.name, errors.len());
        }
        if !self.cache {
            return outcome;
        }
        decl.publish(outcome).clone()
    }

    fn compute(&self, decl: &TypeDecl, chain: &mut Vec<DeclId>) -> Resolution {
        let (kind, inherited) = match BuiltinKind::from_name(&decl.name) {
            Some(kind) => (kind, None),
            None => {
                let base = self.resolve_typedef(decl, chain)?;
                (base.kind(), Some(base))
            }
        };

        let mut errors = Vec::new();
        let inherited = inherited.as_deref();
        self.check_applicable(decl, kind, inherited.is_some(), &mut errors);
        let descriptor = self.describe(decl, kind, inherited, chain, &mut errors);

        match descriptor {
            Some(descriptor) if errors.is_empty() => Ok(Arc::new(descriptor)),
            _ => Err(errors),
        }
    }

    fn resolve_typedef(&self, decl: &TypeDecl, chain: &mut Vec<DeclId>) -> Resolution {
        let Some(target) = self.scope.lookup_typedef(decl.scope, &decl.name) else {
            return Err(vec![
                TypeErrorKind::UnresolvedTypedef {
                    name: decl.name.clone(),
                }
                .at(decl.locator.clone()),
            ]);
        };
        if chain.contains(&target) {
            return Err(vec![
                TypeErrorKind::CyclicTypedef {
                    name: decl.name.clone(),
                }
                .at(decl.locator.clone()),
            ]);
        }

        chain.push(target);
        let outcome = self.resolve_in(target, chain);
        chain.pop();
        outcome
    }

    /// Report restrictions given on kinds they do not apply to
    fn check_applicable(
        &self,
        decl: &TypeDecl,
        kind: BuiltinKind,
        derived: bool,
        errors: &mut Vec<TypeError>,
    ) {
        let mut reject = |restriction: &'static str, locator: &Locator| {
            errors.push(
                TypeErrorKind::RestrictionNotAllowed { restriction, kind }.at(locator.clone()),
            );
        };

        let restrictions = [
            (&decl.range, "range", kind.is_numeric()),
            (&decl.length, "length", kind.has_length()),
            (&decl.base, "base", kind == BuiltinKind::IdentityRef && !derived),
            (&decl.path, "path", kind == BuiltinKind::LeafRef && !derived),
            (
                &decl.require_instance,
                "require-instance",
                matches!(kind, BuiltinKind::LeafRef | BuiltinKind::InstanceIdentifier),
            ),
        ];
        for (restriction, name, allowed) in restrictions {
            if let (Some(r), false) = (restriction, allowed) {
                reject(name, &r.locator);
            }
        }

        let members = [
            (decl.enums.first(), "enum", kind == BuiltinKind::Enumeration),
            (decl.bits.first(), "bit", kind == BuiltinKind::Bits),
        ];
        for (member, name, allowed) in members {
            if let (Some(m), false) = (member, allowed) {
                reject(name, &m.locator);
            }
        }

        if !decl.members.is_empty() && (kind != BuiltinKind::Union || derived) {
            reject("type", &decl.locator);
        }
        if kind != BuiltinKind::String {
            for stmt in decl.statements.iter().filter(|s| s.is("pattern")) {
                reject("pattern", &decl.locate(stmt.location));
            }
        }
    }

    /// Build the descriptor for `kind`, pushing every problem found.
    ///
    /// Returns `None` only after pushing at least one error.
    fn describe(
        &self,
        decl: &TypeDecl,
        kind: BuiltinKind,
        inherited: Option<&TypeDescriptor>,
        chain: &mut Vec<DeclId>,
        errors: &mut Vec<TypeError>,
    ) -> Option<TypeDescriptor> {
        let fraction_digits = self.fraction_digits(decl, kind, inherited, errors);
        let (patterns, posix_patterns) = self.patterns(decl, kind, errors);

        let descriptor = match kind {
            BuiltinKind::Decimal64 => {
                let fraction_digits = fraction_digits?;
                let base = inherited
                    .and_then(TypeDescriptor::numeric_range)
                    .copied()
                    .unwrap_or_else(|| NumericRange::decimal64(fraction_digits));
                TypeDescriptor::Decimal64(DecimalType {
                    fraction_digits,
                    range: narrow(decl.range.as_ref(), base, Some(fraction_digits), errors),
                })
            }
            k if k.is_integer() => {
                let base = inherited
                    .and_then(TypeDescriptor::numeric_range)
                    .copied()
                    .or_else(|| k.base_range())?;
                TypeDescriptor::Integer(IntegerType {
                    kind: k,
                    range: narrow(decl.range.as_ref(), base, None, errors),
                })
            }
            BuiltinKind::String => {
                let mut string = match inherited {
                    Some(TypeDescriptor::String(s)) => s.clone(),
                    _ => StringType::default(),
                };
                string.length = narrow(decl.length.as_ref(), string.length, None, errors);
                string.patterns.extend(patterns);
                string.posix_patterns.extend(posix_patterns);
                TypeDescriptor::String(string)
            }
            BuiltinKind::Binary => {
                let base = inherited
                    .and_then(TypeDescriptor::length)
                    .copied()
                    .unwrap_or_else(NumericRange::length);
                TypeDescriptor::Binary {
                    length: narrow(decl.length.as_ref(), base, None, errors),
                }
            }
            BuiltinKind::Boolean => TypeDescriptor::Boolean,
            BuiltinKind::Empty => TypeDescriptor::Empty,
            BuiltinKind::Enumeration => {
                let inherited = inherited.map(|d| {
                    d.enum_values()
                        .iter()
                        .map(|e| (e.name.clone(), e.value))
                        .collect()
                });
                let values = assign_members(
                    decl,
                    kind,
                    ("enum", "value"),
                    &decl.enums,
                    inherited,
                    i64::from(i32::MIN)..=i64::from(i32::MAX),
                    errors,
                );
                TypeDescriptor::Enumeration {
                    values: values
                        .into_iter()
                        .map(|(name, value)| EnumValue { name, value })
                        .collect(),
                }
            }
            BuiltinKind::Bits => {
                let inherited = inherited.map(|d| {
                    d.bits()
                        .iter()
                        .map(|b| (b.name.clone(), i64::from(b.position)))
                        .collect()
                });
                let bits = assign_members(
                    decl,
                    kind,
                    ("bit", "position"),
                    &decl.bits,
                    inherited,
                    0..=i64::from(u32::MAX),
                    errors,
                );
                TypeDescriptor::Bits {
                    bits: bits
                        .into_iter()
                        .filter_map(|(name, position)| {
                            u32::try_from(position).ok().map(|position| Bit { name, position })
                        })
                        .collect(),
                }
            }
            BuiltinKind::IdentityRef => TypeDescriptor::IdentityRef {
                base: self.identity_base(decl, inherited, errors)?,
            },
            BuiltinKind::LeafRef => {
                let path = match inherited {
                    Some(TypeDescriptor::LeafRef { path, .. }) => path.clone(),
                    _ => match &decl.path {
                        Some(path) => path.argument.clone(),
                        None => {
                            errors.push(TypeErrorKind::PathRequired.at(decl.locator.clone()));
                            return None;
                        }
                    },
                };
                TypeDescriptor::LeafRef {
                    path,
                    require_instance: require_instance(decl, inherited, errors),
                }
            }
            BuiltinKind::InstanceIdentifier => TypeDescriptor::InstanceIdentifier {
                require_instance: require_instance(decl, inherited, errors),
            },
            BuiltinKind::Union => TypeDescriptor::Union {
                members: self.union_members(decl, inherited, chain, errors)?,
            },
            _ => return None,
        };
        Some(descriptor)
    }

    fn fraction_digits(
        &self,
        decl: &TypeDecl,
        kind: BuiltinKind,
        inherited: Option<&TypeDescriptor>,
        errors: &mut Vec<TypeError>,
    ) -> Option<u8> {
        if kind != BuiltinKind::Decimal64 {
            if let Some(r) = &decl.fraction_digits {
                errors.push(TypeErrorKind::FractionDigitsNotAllowed.at(r.locator.clone()));
            }
            return None;
        }

        let given = decl.fraction_digits.as_ref();
        match (inherited.and_then(TypeDescriptor::fraction_digits), given) {
            (Some(inherited), None) => Some(inherited),
            (Some(inherited), Some(r)) => {
                if parse_digits(&r.argument) == Some(inherited) {
                    Some(inherited)
                } else {
                    errors.push(
                        TypeErrorKind::FractionDigitsRedefined {
                            inherited,
                            requested: r.argument.clone(),
                        }
                        .at(r.locator.clone()),
                    );
                    None
                }
            }
            (None, None) => {
                errors.push(TypeErrorKind::FractionDigitsRequired.at(decl.locator.clone()));
                None
            }
            (None, Some(r)) => match parse_digits(&r.argument) {
                Some(digits @ 1..=18) => Some(digits),
                _ => {
                    errors.push(
                        TypeErrorKind::FractionDigitsOutOfRange {
                            value: r.argument.clone(),
                        }
                        .at(r.locator.clone()),
                    );
                    None
                }
            },
        }
    }

    /// Collect standard and POSIX patterns in source order.
    ///
    /// A prefixed child counts as a POSIX pattern only when its prefix binds
    /// to the module named by the configured extension reference. Other
    /// extension statements are left alone.
    fn patterns(
        &self,
        decl: &TypeDecl,
        kind: BuiltinKind,
        errors: &mut Vec<TypeError>,
    ) -> (Vec<String>, Vec<String>) {
        let extensions = ExtensionResolver::new(self.scope, decl.scope);
        let mut patterns = Vec::new();
        let mut posix_patterns = Vec::new();

        for stmt in &decl.statements {
            if stmt.is("pattern") {
                patterns.push(stmt.arg().to_string());
                continue;
            }
            let Some(prefix) = stmt.keyword.prefix.as_deref() else {
                continue;
            };
            let locator = decl.locate(stmt.location);
            let Some(ext) = extensions.resolve(&stmt.keyword) else {
                errors.push(
                    TypeErrorKind::UnresolvedPrefix {
                        prefix: prefix.to_string(),
                    }
                    .at(locator),
                );
                continue;
            };
            if !self.options.posix_pattern.matches(&ext) {
                continue;
            }
            if !extensions.is_defined(&ext) {
                errors.push(
                    TypeErrorKind::UnknownExtension {
                        extension: ext.to_string(),
                    }
                    .at(locator),
                );
                continue;
            }
            if kind != BuiltinKind::String {
                errors.push(
                    TypeErrorKind::RestrictionNotAllowed {
                        restriction: "posix-pattern",
                        kind,
                    }
                    .at(locator),
                );
                continue;
            }
            if self.options.compile_posix_patterns {
                if let Err(err) = Regex::new(stmt.arg()) {
                    errors.push(
                        TypeErrorKind::BadPattern {
                            pattern: stmt.arg().to_string(),
                            reason: regex_reason(&err),
                        }
                        .at(locator),
                    );
                    continue;
                }
            }
            posix_patterns.push(stmt.arg().to_string());
        }
        (patterns, posix_patterns)
    }

    fn identity_base(
        &self,
        decl: &TypeDecl,
        inherited: Option<&TypeDescriptor>,
        errors: &mut Vec<TypeError>,
    ) -> Option<IdentityId> {
        if let Some(base) = inherited.and_then(TypeDescriptor::base) {
            return Some(base.clone());
        }
        let Some(base) = &decl.base else {
            errors.push(TypeErrorKind::IdentityBaseRequired.at(decl.locator.clone()));
            return None;
        };
        let name = base.argument.trim();
        let found = self.scope.lookup_identity(decl.scope, name);
        if found.is_none() {
            errors.push(
                TypeErrorKind::UnresolvedIdentity {
                    name: name.to_string(),
                }
                .at(base.locator.clone()),
            );
        }
        found
    }

    /// Resolve each member independently, reporting the errors of all
    fn union_members(
        &self,
        decl: &TypeDecl,
        inherited: Option<&TypeDescriptor>,
        chain: &mut Vec<DeclId>,
        errors: &mut Vec<TypeError>,
    ) -> Option<Vec<Arc<TypeDescriptor>>> {
        if let Some(inherited) = inherited {
            return Some(inherited.union_members().to_vec());
        }
        if decl.members.is_empty() {
            errors.push(TypeErrorKind::EmptyUnion.at(decl.locator.clone()));
            return None;
        }

        let mut members = Vec::with_capacity(decl.members.len());
        let mut failed = false;
        for &member in &decl.members {
            match self.resolve_in(member, chain) {
                Ok(descriptor) => members.push(descriptor),
                Err(member_errors) => {
                    failed = true;
                    errors.extend(member_errors);
                }
            }
        }
        (!failed).then_some(members)
    }
}

/// A fraction-digits argument: unsigned decimal digits only
fn parse_digits(text: &str) -> Option<u8> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Validate an optional `range`/`length` restriction against `base`,
/// falling back to `base` when absent or invalid
fn narrow(
    restriction: Option<&Restriction>,
    base: NumericRange,
    fraction_digits: Option<u8>,
    errors: &mut Vec<TypeError>,
) -> NumericRange {
    let Some(r) = restriction else {
        return base;
    };
    match NumericRange::parse_within(&r.argument, &base, fraction_digits) {
        Ok(range) => range,
        Err(kind) => {
            errors.push(kind.at(r.locator.clone()));
            base
        }
    }
}

fn require_instance(
    decl: &TypeDecl,
    inherited: Option<&TypeDescriptor>,
    errors: &mut Vec<TypeError>,
) -> bool {
    let default = inherited
        .and_then(TypeDescriptor::require_instance)
        .unwrap_or(true);
    match decl.require_instance.as_ref() {
        None => default,
        Some(r) => match r.argument.trim() {
            "true" => true,
            "false" => false,
            other => {
                errors.push(
                    TypeErrorKind::InvalidRequireInstance {
                        value: other.to_string(),
                    }
                    .at(r.locator.clone()),
                );
                default
            }
        },
    }
}

/// Assign enum values or bit positions.
///
/// Without a base, unnumbered members get one more than the highest value
/// assigned so far, starting at zero. With a base, the declared members
/// must be a subset of the base's and keep their values; no members means
/// all of the base's.
fn assign_members(
    decl: &TypeDecl,
    kind: BuiltinKind,
    (item, value_keyword): (&'static str, &'static str),
    members: &[MemberDecl],
    inherited: Option<Vec<(String, i64)>>,
    bounds: RangeInclusive<i64>,
    errors: &mut Vec<TypeError>,
) -> Vec<(String, i64)> {
    let invalid = |member: &MemberDecl, reason: String| {
        TypeErrorKind::InvalidMember {
            item,
            name: member.name.clone(),
            reason,
        }
        .at(member.locator.clone())
    };

    let mut names = HashSet::new();
    let mut values = HashSet::new();
    let mut assigned = Vec::with_capacity(members.len());

    if let Some(base) = inherited {
        if members.is_empty() {
            return base;
        }
        for member in members {
            if !names.insert(member.name.as_str()) {
                errors.push(invalid(member, "defined more than once".to_string()));
                continue;
            }
            let Some((_, value)) = base.iter().find(|(name, _)| *name == member.name) else {
                errors.push(invalid(member, "not defined in the base type".to_string()));
                continue;
            };
            let matches_base = member
                .value
                .as_ref()
                .is_none_or(|given| given.argument.trim().parse::<i64>() == Ok(*value));
            if !matches_base {
                errors.push(invalid(
                    member,
                    format!("{value_keyword} differs from the base type's {value}"),
                ));
                continue;
            }
            assigned.push((member.name.clone(), *value));
        }
        return assigned;
    }

    if members.is_empty() {
        errors.push(TypeErrorKind::EmptyEnumeration { kind, item }.at(decl.locator.clone()));
        return assigned;
    }

    let mut highest: Option<i64> = None;
    for member in members {
        if !names.insert(member.name.as_str()) {
            errors.push(invalid(member, "defined more than once".to_string()));
            continue;
        }
        let value = match &member.value {
            Some(given) => match given.argument.trim().parse::<i64>() {
                Ok(v) if bounds.contains(&v) => v,
                _ => {
                    errors.push(invalid(
                        member,
                        format!("invalid {value_keyword} {}", given.argument),
                    ));
                    continue;
                }
            },
            None => {
                let next = highest.map_or(0, |h| h + 1);
                if !bounds.contains(&next) {
                    errors.push(invalid(member, format!("no {value_keyword} left to assign")));
                    continue;
                }
                next
            }
        };
        if !values.insert(value) {
            errors.push(invalid(member, format!("{value_keyword} {value} already used")));
            continue;
        }
        highest = Some(highest.map_or(value, |h| h.max(value)));
        assigned.push((member.name.clone(), value));
    }
    assigned
}

/// Last line of a regex error, without the `error: ` prefix
fn regex_reason(err: &regex::Error) -> String {
    let text = err.to_string();
    match text.lines().last() {
        Some(line) => line.trim().trim_start_matches("error: ").to_string(),
        None => text.clone(),
    }
}
