//! End-to-end pattern collection across real modules
//!
//! A module `test` imports two extension modules that both define
//! `posix-pattern`. Only the one from `openconfig-extensions` contributes
//! POSIX patterns, whichever prefix the importing module bound it to.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use yangc_model::ModuleRegistry;
use yangc_types::TypeDescriptor;

const OPENCONFIG_EXTENSIONS: &str = r#"
module openconfig-extensions {
  prefix "o";
  namespace "urn:o";

  extension bar {
    argument "baz";
  }

  extension posix-pattern {
    argument "pattern";
  }
}
"#;

const NON_OPENCONFIG_EXTENSIONS: &str = r#"
module non-openconfig-extensions {
  prefix "n";
  namespace "urn:n";

  extension bar {
    argument "baz";
  }

  extension posix-pattern {
    argument "pattern";
  }
}
"#;

const TEST_HEADER: &str = r#"
module test {
  prefix "t";
  namespace "urn:t";

  import non-openconfig-extensions {
    prefix "n";
    description "non-openconfig-extensions module";
  }
  import openconfig-extensions {
    prefix "o";
    description "openconfig-extensions module";
  }
"#;

/// Load the three modules, with `body` closing the `test` module
fn load(body: &str) -> (ModuleRegistry, Vec<String>) {
    let mut registry = ModuleRegistry::new();
    let test = format!("{TEST_HEADER}{body}");
    for (source, file) in [
        (test.as_str(), "test.yang"),
        (OPENCONFIG_EXTENSIONS, "openconfig-extensions.yang"),
        (NON_OPENCONFIG_EXTENSIONS, "non-openconfig-extensions.yang"),
    ] {
        if let Err(e) = registry.parse(source, file) {
            panic!("{file}: {e}");
        }
    }
    let errors = registry.process().iter().map(ToString::to_string).collect();
    (registry, errors)
}

fn leaf_type(registry: &ModuleRegistry, leaf: &str) -> Arc<TypeDescriptor> {
    let module = registry.find_module("test").unwrap();
    let decl = module.leaf(leaf).unwrap().decl;
    registry
        .resolve(decl)
        .unwrap_or_else(|e| panic!("{leaf}: unexpected errors {e:?}"))
}

fn strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn assert_patterns(desc: &TypeDescriptor, patterns: &[&str], posix: &[&str]) {
    assert_eq!(strs(desc.patterns()), patterns, "patterns");
    assert_eq!(strs(desc.posix_patterns()), posix, "posix patterns");
}

#[test]
fn test_only_normal_patterns() {
    let (registry, errors) = load(
        r#"
  leaf test-leaf {
    type string {
      o:bar 'coo';
      o:bar 'foo';
      pattern 'charlie';
    }
  }
} // end module
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(&leaf_type(&registry, "test-leaf"), &["charlie"], &[]);
}

#[test]
fn test_only_posix_patterns() {
    let (registry, errors) = load(
        r#"
  leaf test-leaf {
    type string {
      o:bar 'coo';
      o:posix-pattern 'bravo';
      o:bar 'foo';
      o:posix-pattern 'charlie';
    }
  }
} // end module
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(&leaf_type(&registry, "test-leaf"), &[], &["bravo", "charlie"]);
}

#[test]
fn test_no_patterns() {
    let (registry, errors) = load(
        r#"
  leaf test-leaf {
    type string;
  }
}
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(&leaf_type(&registry, "test-leaf"), &[], &[]);
}

#[test]
fn test_both_patterns() {
    let (registry, errors) = load(
        r#"
  leaf test-leaf {
    type string {
      pattern 'alpha';
      o:bar 'coo';
      o:posix-pattern 'bravo';
      o:posix-pattern 'charlie';
      o:bar 'foo';
      o:posix-pattern 'delta';
    }
  }
} // end module
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(
        &leaf_type(&registry, "test-leaf"),
        &["alpha"],
        &["bravo", "charlie", "delta"],
    );
}

const PRETENDERS: &str = r#"
      pattern 'alpha';
      o:bar 'coo';
      n:posix-pattern 'golf';
      o:posix-pattern 'delta';
      pattern 'bravo';
      o:posix-pattern 'echo';
      n:posix-pattern 'hotel';
      o:bar 'foo';
      pattern 'charlie';
      o:posix-pattern 'foxtrot';
"#;

#[test]
fn test_pretender_extensions_are_ignored() {
    let (registry, errors) = load(&format!(
        r#"
  leaf test-leaf {{
    type string {{
{PRETENDERS}
    }}
  }}
}} // end module
"#
    ));
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(
        &leaf_type(&registry, "test-leaf"),
        &["alpha", "bravo", "charlie"],
        &["delta", "echo", "foxtrot"],
    );
}

#[test]
fn test_union_member_patterns() {
    let (registry, errors) = load(&format!(
        r#"
  leaf test-leaf {{
    type union {{
      type string {{
{PRETENDERS}
      }}
      type string {{
        o:posix-pattern 'echo2';
      }}
    }}
  }}
}} // end module
"#
    ));
    assert_eq!(errors, Vec::<String>::new());

    let desc = leaf_type(&registry, "test-leaf");
    assert_patterns(&desc, &[], &[]);
    let members = desc.union_members();
    assert_eq!(members.len(), 2);
    assert_patterns(
        &members[0],
        &["alpha", "bravo", "charlie"],
        &["delta", "echo", "foxtrot"],
    );
    assert_patterns(&members[1], &[], &["echo2"]);
}

#[test]
fn test_typedef_patterns_reach_the_leaf() {
    let (registry, errors) = load(&format!(
        r#"
  typedef string-type {{
    type string {{
{PRETENDERS}
    }}
  }}

  leaf test-leaf {{
    type string-type;
  }}
}} // end module
"#
    ));
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(
        &leaf_type(&registry, "test-leaf"),
        &["alpha", "bravo", "charlie"],
        &["delta", "echo", "foxtrot"],
    );
}

#[test]
fn test_own_prefix_typedef_reference() {
    let (registry, errors) = load(
        r#"
  typedef string-type {
    type string { o:posix-pattern 'delta'; }
  }
  leaf test-leaf { type t:string-type; }
}
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(&leaf_type(&registry, "test-leaf"), &[], &["delta"]);
}

#[test]
fn test_invalid_posix_pattern_in_typedef_reported_once() {
    let (_, errors) = load(
        r#"
  typedef string-type {
    type string {
      o:posix-pattern '?';
    }
  }

  leaf test-leaf {
    type string-type;
  }

  leaf other-leaf {
    type string-type;
  }
} // end module
"#,
    );
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("bad pattern"), "{}", errors[0]);
    assert!(errors[0].starts_with("test.yang:"), "{}", errors[0]);
}

#[test]
fn test_invalid_pretender_pattern_is_not_compiled() {
    let (registry, errors) = load(
        r#"
  leaf test-leaf {
    type string {
      n:posix-pattern '?';
    }
  }
}
"#,
    );
    assert_eq!(errors, Vec::<String>::new());
    assert_patterns(&leaf_type(&registry, "test-leaf"), &[], &[]);
}
