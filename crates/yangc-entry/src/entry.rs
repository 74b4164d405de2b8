//! Entry tree types

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use yangc_types::{TypeDescriptor, TypeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    Directory,
    Leaf,
    LeafList,
}

/// An extension statement attached to a node, resolved to the module that
/// defines the extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionUse {
    pub module: String,
    pub name: String,
    pub argument: Option<String>,
}

impl ExtensionUse {
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        argument: Option<&str>,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            argument: argument.map(str::to_string),
        }
    }
}

/// A node of the entry tree
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type name as written on the leaf
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// The resolved type, shared with the registry's cache
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<Arc<TypeDescriptor>>,
    /// Errors that prevented the type from resolving
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_errors"
    )]
    pub errors: Vec<TypeError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionUse>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dir: IndexMap<String, Entry>,
}

impl Entry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            description: None,
            type_name: None,
            ty: None,
            errors: Vec::new(),
            extensions: Vec::new(),
            dir: IndexMap::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Walk a `/`-separated path of child names. Empty segments are
    /// skipped, so `""` and `"/"` find `self`.
    pub fn find(&self, path: &str) -> Option<&Entry> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |entry, segment| entry.dir.get(segment))
    }

    /// Every extension use on this entry whose defining module and name
    /// match
    pub fn extension_args<'a>(
        &'a self,
        module: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.extensions
            .iter()
            .filter(move |e| e.module == module && e.name == name)
            .filter_map(|e| e.argument.as_deref())
    }
}

fn serialize_errors<S: Serializer>(errors: &[TypeError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Entry {
        let mut leaf = Entry::directory("leaf");
        leaf.kind = EntryKind::Leaf;
        let mut inner = Entry::directory("inner");
        inner.dir.insert("leaf".into(), leaf);
        let mut root = Entry::directory("root");
        root.dir.insert("inner".into(), inner);
        root
    }

    #[test]
    fn test_find() {
        let root = tree();
        assert_eq!(root.find("inner/leaf").map(|e| e.kind), Some(EntryKind::Leaf));
        assert_eq!(root.find("/inner/").map(|e| e.name.as_str()), Some("inner"));
        assert_eq!(root.find("").map(|e| e.name.as_str()), Some("root"));
        assert!(root.find("inner/missing").is_none());
        assert!(root.find("inner/leaf/deeper").is_none());
    }

    #[test]
    fn test_extension_args() {
        let mut entry = Entry::directory("x");
        entry.extensions = vec![
            ExtensionUse::new("openconfig-extensions", "bar", Some("coo")),
            ExtensionUse::new("non-openconfig-extensions", "bar", Some("zap")),
            ExtensionUse::new("openconfig-extensions", "bar", Some("foo")),
        ];
        let args: Vec<_> = entry.extension_args("openconfig-extensions", "bar").collect();
        assert_eq!(args, ["coo", "foo"]);
    }
}
