//! Tests for the type resolution engine
//!
//! Covers:
//! - Built-in ranges and range narrowing
//! - decimal64 fraction-digits handling
//! - identityref bases
//! - Namespace-correct POSIX pattern collection
//! - Typedef transparency, cycles and caching
//! - Union composition and error accumulation

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;
use yangc_ast::Statement;
use yangc_types::{
    BuiltinKind, DeclArena, DeclId, EmptyScope, IdentityId, MemberDecl, ModuleId, NumericRange,
    PrefixResolver, Resolution, ResolveOptions, ScopeId, TypeDecl, TypeDescriptor, TypeErrorKind,
    TypeResolver, TypeScope,
};

#[derive(Default)]
struct TestScope {
    typedefs: HashMap<String, DeclId>,
    identities: HashMap<String, IdentityId>,
    prefixes: HashMap<String, ModuleId>,
}

impl TestScope {
    /// Prefixes as bound by the pattern test modules
    fn with_extension_prefixes() -> Self {
        let mut scope = Self::default();
        scope.prefixes.insert(
            "o".into(),
            ModuleId::new("openconfig-extensions", "urn:openconfig-extensions"),
        );
        scope.prefixes.insert(
            "n".into(),
            ModuleId::new("non-openconfig-extensions", "urn:non-openconfig-extensions"),
        );
        scope
    }
}

impl PrefixResolver for TestScope {
    fn resolve_prefix(&self, _scope: ScopeId, prefix: &str) -> Option<ModuleId> {
        self.prefixes.get(prefix).cloned()
    }
}

impl TypeScope for TestScope {
    fn lookup_typedef(&self, _scope: ScopeId, name: &str) -> Option<DeclId> {
        self.typedefs.get(name).copied()
    }

    fn lookup_identity(&self, _scope: ScopeId, name: &str) -> Option<IdentityId> {
        self.identities.get(name).cloned()
    }
}

fn resolve_one(decl: TypeDecl) -> Resolution {
    let mut arena = DeclArena::new();
    let id = arena.alloc(decl);
    TypeResolver::new(&arena, &EmptyScope).resolve(id)
}

fn resolve_ok(decl: TypeDecl) -> Arc<TypeDescriptor> {
    resolve_one(decl).unwrap_or_else(|e| panic!("unexpected errors: {e:?}"))
}

fn error_messages(result: Resolution) -> Vec<String> {
    match result {
        Ok(desc) => panic!("expected errors, got {desc:?}"),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    }
}

fn posix(pattern: &str) -> Statement {
    Statement::with_arg("o:posix-pattern", pattern)
}

// === Ranges ===

#[rstest]
#[case("int8", "-128..127")]
#[case("int16", "-32768..32767")]
#[case("int32", "-2147483648..2147483647")]
#[case("int64", "-9223372036854775808..9223372036854775807")]
#[case("uint8", "0..255")]
#[case("uint16", "0..65535")]
#[case("uint32", "0..4294967295")]
#[case("uint64", "0..18446744073709551615")]
fn test_integer_base_ranges(#[case] name: &str, #[case] expected: &str) {
    let desc = resolve_ok(TypeDecl::new(name));
    assert_eq!(desc.numeric_range().map(ToString::to_string).as_deref(), Some(expected));
    assert_eq!(desc.fraction_digits(), None);
    assert!(desc.patterns().is_empty());
}

#[test]
fn test_int8_bad_range() {
    let errors = error_messages(resolve_one(TypeDecl::new("int8").with_range("-10 .. 128")));
    assert_eq!(errors, ["unknown: bad range: -10..128 not within -128..127"]);
}

#[test]
fn test_int8_narrowed_range() {
    let desc = resolve_ok(TypeDecl::new("int8").with_range("-10..100"));
    assert_eq!(desc.numeric_range(), Some(&NumericRange::integer(-10, 100)));
}

#[test]
fn test_range_on_string_not_allowed() {
    let result = resolve_one(TypeDecl::new("string").with_range("1..5"));
    let errors = result.unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].kind,
        TypeErrorKind::RestrictionNotAllowed { restriction: "range", kind: BuiltinKind::String }
    ));
}

#[test]
fn test_string_length() {
    let desc = resolve_ok(TypeDecl::new("string").with_length("1..64"));
    assert_eq!(desc.length(), Some(&NumericRange::integer(1, 64)));

    let errors = error_messages(resolve_one(TypeDecl::new("binary").with_length("-1..64")));
    assert_eq!(errors, ["unknown: bad range: -1..64 not within 0..18446744073709551615"]);
}

// === decimal64 ===

#[test]
fn test_fraction_digits_not_allowed() {
    let errors = error_messages(resolve_one(TypeDecl::new("int8").with_fraction_digits("2")));
    assert_eq!(errors, ["unknown: fraction-digits only allowed for decimal64 values"]);
}

#[test]
fn test_fraction_digits_required() {
    let errors = error_messages(resolve_one(TypeDecl::new("decimal64")));
    assert_eq!(errors, ["unknown: value is required in the range of [1..18]"]);
}

#[rstest]
#[case(None)]
#[case(Some("1..2"))]
#[case(Some("-1000000000000000000000..1"))]
fn test_fraction_digits_out_of_range(#[case] range: Option<&str>) {
    let mut decl = TypeDecl::new("decimal64").with_fraction_digits("42");
    if let Some(range) = range {
        decl = decl.with_range(range);
    }
    let errors = error_messages(resolve_one(decl));
    assert_eq!(errors, ["unknown: value 42 out of range [1..18]"]);
}

#[rstest]
#[case("+7")]
#[case("-7")]
#[case("7.0")]
#[case("seven")]
fn test_fraction_digits_must_be_unsigned_digits(#[case] digits: &str) {
    let errors = error_messages(resolve_one(
        TypeDecl::new("decimal64").with_fraction_digits(digits),
    ));
    assert_eq!(errors, [format!("unknown: value {digits} out of range [1..18]")]);
}

#[test]
fn test_decimal64_canonical_range() {
    let desc = resolve_ok(TypeDecl::new("decimal64").with_fraction_digits("7"));
    assert_eq!(desc.kind(), BuiltinKind::Decimal64);
    assert_eq!(desc.fraction_digits(), Some(7));
    assert_eq!(desc.numeric_range(), Some(&NumericRange::decimal64(7)));
    assert_eq!(
        desc.numeric_range().map(ToString::to_string).as_deref(),
        Some("-922337203685.4775808..922337203685.4775807")
    );
}

#[test]
fn test_decimal64_range_checked_against_computed_range() {
    let desc = resolve_ok(
        TypeDecl::new("decimal64")
            .with_fraction_digits("2")
            .with_range("-1.5 .. 99.99"),
    );
    assert_eq!(desc.numeric_range().map(ToString::to_string).as_deref(), Some("-1.5..99.99"));

    let errors = error_messages(resolve_one(
        TypeDecl::new("decimal64")
            .with_fraction_digits("18")
            .with_range("0..10"),
    ));
    assert_eq!(
        errors,
        ["unknown: bad range: 0..10 not within -9.223372036854775808..9.223372036854775807"]
    );
}

// === identityref ===

#[test]
fn test_identityref_requires_base() {
    let errors = error_messages(resolve_one(TypeDecl::new("identityref")));
    assert_eq!(errors, ["unknown: an identityref must specify a base"]);
}

#[test]
fn test_independent_errors_on_one_declaration() {
    let errors = error_messages(resolve_one(
        TypeDecl::new("identityref").with_fraction_digits("2"),
    ));
    assert_eq!(
        errors,
        [
            "unknown: fraction-digits only allowed for decimal64 values",
            "unknown: an identityref must specify a base",
        ]
    );
}

#[test]
fn test_identityref_base_lookup() {
    let mut arena = DeclArena::new();
    let good = arena.alloc(TypeDecl::new("identityref").with_base("t:interface-type"));
    let bad = arena.alloc(TypeDecl::new("identityref").with_base("t:missing"));

    let mut scope = TestScope::default();
    scope
        .identities
        .insert("t:interface-type".into(), IdentityId::new("test", "interface-type"));
    let resolver = TypeResolver::new(&arena, &scope);

    let desc = resolver.resolve(good).unwrap();
    assert_eq!(desc.base(), Some(&IdentityId::new("test", "interface-type")));
    assert_eq!(
        error_messages(resolver.resolve(bad)),
        ["unknown: unknown identity: t:missing"]
    );
}

// === Patterns ===

#[test]
fn test_patterns_are_namespace_qualified() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(
        TypeDecl::new("string")
            .with_pattern("alpha")
            .with_statement(posix("delta"))
            .with_statement(Statement::with_arg("n:posix-pattern", "golf")),
    );
    let scope = TestScope::with_extension_prefixes();
    let desc = TypeResolver::new(&arena, &scope).resolve(id).unwrap();

    assert_eq!(desc.patterns(), ["alpha".to_string()]);
    assert_eq!(desc.posix_patterns(), ["delta".to_string()]);
}

#[test]
fn test_pattern_order_with_pretenders() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(
        TypeDecl::new("string")
            .with_pattern("alpha")
            .with_statement(Statement::with_arg("o:bar", "coo"))
            .with_statement(posix("delta"))
            .with_statement(Statement::with_arg("n:posix-pattern", "golf"))
            .with_pattern("bravo")
            .with_statement(posix("echo"))
            .with_statement(Statement::with_arg("n:pattern", "hotel"))
            .with_pattern("charlie")
            .with_statement(posix("foxtrot")),
    );
    let scope = TestScope::with_extension_prefixes();
    let desc = TypeResolver::new(&arena, &scope).resolve(id).unwrap();

    assert_eq!(desc.patterns(), ["alpha", "bravo", "charlie"].map(String::from));
    assert_eq!(desc.posix_patterns(), ["delta", "echo", "foxtrot"].map(String::from));
}

#[test]
fn test_bad_posix_pattern() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(TypeDecl::new("string").with_statement(posix("?")));
    let scope = TestScope::with_extension_prefixes();
    let errors = TypeResolver::new(&arena, &scope).resolve(id).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, TypeErrorKind::BadPattern { .. }));
    assert!(errors[0].to_string().contains("bad pattern"), "{}", errors[0]);
}

#[test]
fn test_uncompiled_posix_patterns() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(TypeDecl::new("string").with_statement(posix("?")));
    let scope = TestScope::with_extension_prefixes();
    let options = ResolveOptions {
        compile_posix_patterns: false,
        ..ResolveOptions::default()
    };
    let desc = TypeResolver::new(&arena, &scope)
        .with_options(options)
        .resolve(id)
        .unwrap();
    assert_eq!(desc.posix_patterns(), ["?".to_string()]);
}

#[test]
fn test_unbound_extension_prefix() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(
        TypeDecl::new("string").with_statement(Statement::with_arg("x:posix-pattern", "a")),
    );
    let scope = TestScope::with_extension_prefixes();
    let errors = error_messages(TypeResolver::new(&arena, &scope).resolve(id));
    assert_eq!(errors, ["unknown: unknown prefix: x"]);
}

#[test]
fn test_pattern_on_integer_not_allowed() {
    let errors = error_messages(resolve_one(TypeDecl::new("uint8").with_pattern("[0-9]+")));
    assert_eq!(errors, ["unknown: pattern restriction not allowed for type uint8"]);
}

// === Typedefs ===

fn leaf_type_scope(arena: &mut DeclArena) -> TestScope {
    let typedef = arena.alloc(
        TypeDecl::new("string")
            .with_pattern("alpha")
            .with_statement(posix("delta"))
            .with_pattern("bravo")
            .with_statement(posix("echo"))
            .with_pattern("charlie")
            .with_statement(posix("foxtrot")),
    );
    let mut scope = TestScope::with_extension_prefixes();
    scope.typedefs.insert("leaf-type".into(), typedef);
    scope.typedefs.insert("t:leaf-type".into(), typedef);
    scope
}

#[test]
fn test_typedef_is_transparent() {
    let mut arena = DeclArena::new();
    let via_typedef = arena.alloc(TypeDecl::new("t:leaf-type"));
    let inline = arena.alloc(
        TypeDecl::new("string")
            .with_pattern("alpha")
            .with_pattern("bravo")
            .with_pattern("charlie")
            .with_statement(posix("delta"))
            .with_statement(posix("echo"))
            .with_statement(posix("foxtrot")),
    );
    let scope = leaf_type_scope(&mut arena);
    let resolver = TypeResolver::new(&arena, &scope);

    let a = resolver.resolve(via_typedef).unwrap();
    let b = resolver.resolve(inline).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.patterns(), ["alpha", "bravo", "charlie"].map(String::from));
    assert_eq!(a.posix_patterns(), ["delta", "echo", "foxtrot"].map(String::from));
}

#[test]
fn test_derived_type_appends_patterns() {
    let mut arena = DeclArena::new();
    let derived = arena.alloc(
        TypeDecl::new("leaf-type")
            .with_pattern("delta-prime")
            .with_length("1..10"),
    );
    let scope = leaf_type_scope(&mut arena);
    let desc = TypeResolver::new(&arena, &scope).resolve(derived).unwrap();
    assert_eq!(desc.patterns(), ["alpha", "bravo", "charlie", "delta-prime"].map(String::from));
    assert_eq!(desc.length(), Some(&NumericRange::integer(1, 10)));
}

#[test]
fn test_derived_type_cannot_widen() {
    let mut arena = DeclArena::new();
    let percent = arena.alloc(TypeDecl::new("uint8").with_range("0..100"));
    let narrower = arena.alloc(TypeDecl::new("percent").with_range("10 .. 20"));
    let wider = arena.alloc(TypeDecl::new("percent").with_range("0..120"));
    let mut scope = TestScope::default();
    scope.typedefs.insert("percent".into(), percent);
    let resolver = TypeResolver::new(&arena, &scope);

    let desc = resolver.resolve(narrower).unwrap();
    assert_eq!(desc.numeric_range(), Some(&NumericRange::integer(10, 20)));
    assert_eq!(
        error_messages(resolver.resolve(wider)),
        ["unknown: bad range: 0..120 not within 0..100"]
    );
}

#[test]
fn test_derived_decimal_keeps_fraction_digits() {
    let mut arena = DeclArena::new();
    let money = arena.alloc(TypeDecl::new("decimal64").with_fraction_digits("2"));
    let same = arena.alloc(TypeDecl::new("money").with_fraction_digits("2").with_range("0..10"));
    let changed = arena.alloc(TypeDecl::new("money").with_fraction_digits("3"));
    let mut scope = TestScope::default();
    scope.typedefs.insert("money".into(), money);
    let resolver = TypeResolver::new(&arena, &scope);

    assert_eq!(resolver.resolve(same).unwrap().fraction_digits(), Some(2));
    let errors = resolver.resolve(changed).unwrap_err();
    assert!(matches!(
        errors[0].kind,
        TypeErrorKind::FractionDigitsRedefined { inherited: 2, .. }
    ));
}

#[test]
fn test_unresolved_typedef() {
    let errors = error_messages(resolve_one(TypeDecl::new("t:no-such-type").with_range("1..2")));
    assert_eq!(errors, ["unknown: unknown type: t:no-such-type"]);
}

#[test]
fn test_typedef_cycle_is_reported() {
    let mut arena = DeclArena::new();
    let a = arena.alloc(TypeDecl::new("b"));
    let b = arena.alloc(TypeDecl::new("a"));
    let leaf = arena.alloc(TypeDecl::new("a"));
    let mut scope = TestScope::default();
    scope.typedefs.insert("a".into(), a);
    scope.typedefs.insert("b".into(), b);
    let resolver = TypeResolver::new(&arena, &scope);

    let errors = resolver.resolve(leaf).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, TypeErrorKind::CyclicTypedef { .. }));

    // Resolving the typedef directly reports the same cycle
    let errors = resolver.resolve(a).unwrap_err();
    assert!(matches!(errors[0].kind, TypeErrorKind::CyclicTypedef { .. }));
}

#[test]
fn test_self_referencing_typedef() {
    let mut arena = DeclArena::new();
    let a = arena.alloc(TypeDecl::new("a"));
    let mut scope = TestScope::default();
    scope.typedefs.insert("a".into(), a);
    let errors = TypeResolver::new(&arena, &scope).resolve(a).unwrap_err();
    assert_eq!(errors[0].to_string(), "unknown: typedef cycle through a");
}

// === Unions ===

#[test]
fn test_union_members_in_order() {
    let mut arena = DeclArena::new();
    let string = arena.alloc(
        TypeDecl::new("string")
            .with_pattern("alpha")
            .with_statement(posix("delta")),
    );
    let uint = arena.alloc(TypeDecl::new("uint64"));
    let union = arena.alloc(TypeDecl::new("union").with_member(string).with_member(uint));
    let scope = TestScope::with_extension_prefixes();
    let desc = TypeResolver::new(&arena, &scope).resolve(union).unwrap();

    let members = desc.union_members();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].patterns(), ["alpha".to_string()]);
    assert_eq!(members[0].posix_patterns(), ["delta".to_string()]);
    assert_eq!(members[1].kind(), BuiltinKind::Uint64);
    assert_eq!(members[1].numeric_range(), BuiltinKind::Uint64.base_range().as_ref());
    assert!(members[1].patterns().is_empty());
    assert!(desc.patterns().is_empty());
}

#[test]
fn test_union_reports_every_member_error() {
    let mut arena = DeclArena::new();
    let bad_range = arena.alloc(TypeDecl::new("int8").with_range("-10..128"));
    let no_base = arena.alloc(TypeDecl::new("identityref"));
    let ok = arena.alloc(TypeDecl::new("boolean"));
    let union = arena.alloc(
        TypeDecl::new("union")
            .with_member(bad_range)
            .with_member(ok)
            .with_member(no_base),
    );
    let errors = error_messages(TypeResolver::new(&arena, &EmptyScope).resolve(union));
    assert_eq!(
        errors,
        [
            "unknown: bad range: -10..128 not within -128..127",
            "unknown: an identityref must specify a base",
        ]
    );
}

#[test]
fn test_empty_union() {
    let errors = error_messages(resolve_one(TypeDecl::new("union")));
    assert_eq!(errors, ["unknown: a union must specify at least one member type"]);
}

// === Enumerations, bits, references ===

#[test]
fn test_enum_value_assignment() {
    let desc = resolve_ok(
        TypeDecl::new("enumeration")
            .with_enum(MemberDecl::new("zero"))
            .with_enum(MemberDecl::new("ten").with_value("10"))
            .with_enum(MemberDecl::new("eleven"))
            .with_enum(MemberDecl::new("minus").with_value("-1"))
            .with_enum(MemberDecl::new("twelve")),
    );
    let values: Vec<_> = desc
        .enum_values()
        .iter()
        .map(|e| (e.name.as_str(), e.value))
        .collect();
    assert_eq!(
        values,
        [("zero", 0), ("ten", 10), ("eleven", 11), ("minus", -1), ("twelve", 12)]
    );
}

#[test]
fn test_enum_duplicates() {
    let errors = error_messages(resolve_one(
        TypeDecl::new("enumeration")
            .with_enum(MemberDecl::new("a").with_value("1"))
            .with_enum(MemberDecl::new("b").with_value("1"))
            .with_enum(MemberDecl::new("a")),
    ));
    assert_eq!(
        errors,
        [
            "unknown: enum \"b\": value 1 already used",
            "unknown: enum \"a\": defined more than once",
        ]
    );
}

#[test]
fn test_empty_enumeration() {
    let errors = error_messages(resolve_one(TypeDecl::new("enumeration")));
    assert_eq!(errors, ["unknown: enumeration type must define at least one enum"]);
}

#[test]
fn test_bits_positions() {
    let desc = resolve_ok(
        TypeDecl::new("bits")
            .with_bit(MemberDecl::new("up"))
            .with_bit(MemberDecl::new("running").with_value("4"))
            .with_bit(MemberDecl::new("dormant")),
    );
    let positions: Vec<_> = desc.bits().iter().map(|b| b.position).collect();
    assert_eq!(positions, [0, 4, 5]);
}

#[test]
fn test_derived_enumeration_subset() {
    let mut arena = DeclArena::new();
    let status = arena.alloc(
        TypeDecl::new("enumeration")
            .with_enum(MemberDecl::new("up"))
            .with_enum(MemberDecl::new("down"))
            .with_enum(MemberDecl::new("testing")),
    );
    let subset = arena.alloc(TypeDecl::new("status").with_enum(MemberDecl::new("down")));
    let unknown = arena.alloc(TypeDecl::new("status").with_enum(MemberDecl::new("gone")));
    let mut scope = TestScope::default();
    scope.typedefs.insert("status".into(), status);
    let resolver = TypeResolver::new(&arena, &scope);

    let desc = resolver.resolve(subset).unwrap();
    assert_eq!(desc.enum_values().len(), 1);
    assert_eq!(desc.enum_values()[0].value, 1);
    assert_eq!(
        error_messages(resolver.resolve(unknown)),
        ["unknown: enum \"gone\": not defined in the base type"]
    );
}

#[test]
fn test_leafref() {
    let desc = resolve_ok(
        TypeDecl::new("leafref")
            .with_path("../config/name")
            .with_require_instance("false"),
    );
    assert_eq!(
        *desc,
        TypeDescriptor::LeafRef {
            path: "../config/name".into(),
            require_instance: false,
        }
    );

    let errors = error_messages(resolve_one(TypeDecl::new("leafref")));
    assert_eq!(errors, ["unknown: a leafref must specify a path"]);

    let errors = error_messages(resolve_one(
        TypeDecl::new("instance-identifier").with_require_instance("maybe"),
    ));
    assert_eq!(
        errors,
        ["unknown: invalid require-instance value \"maybe\", expected true or false"]
    );
}

// === Caching and concurrency ===

#[test]
fn test_resolution_is_idempotent() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(TypeDecl::new("decimal64").with_fraction_digits("3"));
    let resolver = TypeResolver::new(&arena, &EmptyScope);

    let first = resolver.resolve(id).unwrap();
    let second = resolver.resolve(id).unwrap();
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(arena[id].resolution().is_some());
}

#[test]
fn test_uncached_resolution_leaves_no_trace() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(TypeDecl::new("leaf-type"));
    let resolver = TypeResolver::new(&arena, &EmptyScope).uncached();
    assert_eq!(
        error_messages(resolver.resolve(id)),
        ["unknown: unknown type: leaf-type"]
    );
    assert!(arena[id].resolution().is_none());

    let scope = leaf_type_scope(&mut arena);
    let resolved = TypeResolver::new(&arena, &scope).resolve(id).unwrap();
    assert_eq!(resolved.kind(), BuiltinKind::String);
}

#[test]
fn test_reset_resolutions_recomputes() {
    let mut arena = DeclArena::new();
    let id = arena.alloc(TypeDecl::new("leaf-type"));
    assert!(TypeResolver::new(&arena, &EmptyScope).resolve(id).is_err());

    let scope = leaf_type_scope(&mut arena);
    assert!(TypeResolver::new(&arena, &scope).resolve(id).is_err());
    arena.reset_resolutions();
    assert!(TypeResolver::new(&arena, &scope).resolve(id).is_ok());
}

#[test]
fn test_shared_typedef_resolved_once() {
    let mut arena = DeclArena::new();
    let leaves: Vec<_> = (0..4)
        .map(|_| arena.alloc(TypeDecl::new("leaf-type")))
        .collect();
    let scope = leaf_type_scope(&mut arena);
    let typedef = scope.typedefs["leaf-type"];
    let resolver = TypeResolver::new(&arena, &scope);

    for leaf in &leaves {
        resolver.resolve(*leaf).unwrap();
    }
    let cached = arena[typedef].resolution().cloned().unwrap().unwrap();
    assert!(Arc::ptr_eq(&cached, &resolver.resolve(typedef).unwrap()));
}

#[test]
fn test_concurrent_resolution_converges() {
    let mut arena = DeclArena::new();
    let string = arena.alloc(TypeDecl::new("leaf-type").with_pattern("extra"));
    let uint = arena.alloc(TypeDecl::new("uint32").with_range("1..10"));
    let union = arena.alloc(TypeDecl::new("union").with_member(string).with_member(uint));
    let scope = leaf_type_scope(&mut arena);
    let resolver = TypeResolver::new(&arena, &scope);

    let results: Vec<Arc<TypeDescriptor>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| resolver.resolve(union).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = resolver.resolve(union).unwrap();
    for result in &results {
        assert_eq!(**result, *first);
    }
    assert_eq!(first.union_members()[0].patterns().len(), 4);
}
