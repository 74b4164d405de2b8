//! Generic statement nodes

use crate::Keyword;
use serde::{Deserialize, Serialize};
use yangc_diagnostics::SourceLocation;

/// A single statement and its sub-statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub keyword: Keyword,
    /// Argument text after quote removal and concatenation
    pub argument: Option<String>,
    pub location: SourceLocation,
    /// Sub-statements in source order
    pub children: Vec<Statement>,
}

impl Statement {
    /// Create a statement without sub-statements at the default location
    pub fn new(keyword: impl Into<Keyword>, argument: impl Into<Option<String>>) -> Self {
        Self {
            keyword: keyword.into(),
            argument: argument.into(),
            location: SourceLocation::default(),
            children: Vec::new(),
        }
    }

    /// Shorthand for a statement with an argument
    pub fn with_arg(keyword: impl Into<Keyword>, argument: impl Into<String>) -> Self {
        Self::new(keyword, Some(argument.into()))
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_child(mut self, child: Statement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Statement>) -> Self {
        self.children.extend(children);
        self
    }

    /// The argument, or the empty string for argument-less statements
    pub fn arg(&self) -> &str {
        self.argument.as_deref().unwrap_or("")
    }

    /// True when this is the unprefixed statement `name`
    pub fn is(&self, name: &str) -> bool {
        self.keyword.is(name)
    }

    /// First unprefixed sub-statement named `name`
    pub fn child(&self, name: &str) -> Option<&Statement> {
        self.children.iter().find(|c| c.is(name))
    }

    /// Argument of the first unprefixed sub-statement named `name`
    pub fn child_arg(&self, name: &str) -> Option<&str> {
        self.child(name).map(Statement::arg)
    }

    /// All unprefixed sub-statements named `name`, in order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Statement> + 'a {
        self.children.iter().filter(move |c| c.is(name))
    }

    /// Sub-statements with a prefixed (extension) keyword
    pub fn extension_children(&self) -> impl Iterator<Item = &Statement> {
        self.children.iter().filter(|c| !c.keyword.is_core())
    }

    /// Depth-first walk over this statement and all descendants
    pub fn walk(&self, visit: &mut impl FnMut(&Statement)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
