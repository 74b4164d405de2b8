//! Type resolution errors

use crate::BuiltinKind;
use thiserror::Error;
use yangc_diagnostics::{
    ErrorCode, Locator, YangError, YANG0200, YANG0201, YANG0202, YANG0203, YANG0204, YANG0205,
    YANG0206, YANG0207, YANG0208, YANG0209, YANG0210, YANG0211, YANG0212, YANG0213, YANG0214,
    YANG0215, YANG0216, YANG0217, YANG0218,
};

/// What went wrong while resolving a type declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum TypeErrorKind {
    /// Requested sub-range outside the kind's base or computed range
    #[error("bad range: {requested} not within {allowed}")]
    BadRange { requested: String, allowed: String },

    /// Range or length expression that cannot be parsed
    #[error("invalid range {expression:?}: {reason}")]
    InvalidRange { expression: String, reason: String },

    #[error("fraction-digits only allowed for decimal64 values")]
    FractionDigitsNotAllowed,

    #[error("value is required in the range of [1..18]")]
    FractionDigitsRequired,

    #[error("value {value} out of range [1..18]")]
    FractionDigitsOutOfRange { value: String },

    /// A derived decimal64 type tried to change the inherited fraction-digits
    #[error("fraction-digits {requested} conflicts with inherited value {inherited}")]
    FractionDigitsRedefined { inherited: u8, requested: String },

    #[error("an identityref must specify a base")]
    IdentityBaseRequired,

    #[error("unknown type: {name}")]
    UnresolvedTypedef { name: String },

    #[error("unknown identity: {name}")]
    UnresolvedIdentity { name: String },

    /// A posix-pattern argument that does not compile
    #[error("bad pattern {pattern:?}: {reason}")]
    BadPattern { pattern: String, reason: String },

    /// Typedef chain that leads back to a typedef still being resolved
    #[error("typedef cycle through {name}")]
    CyclicTypedef { name: String },

    #[error("{restriction} restriction not allowed for type {kind}")]
    RestrictionNotAllowed {
        restriction: &'static str,
        kind: BuiltinKind,
    },

    /// Bad enum or bit: duplicate name or value, or mismatch with the base type
    #[error("{item} {name:?}: {reason}")]
    InvalidMember {
        item: &'static str,
        name: String,
        reason: String,
    },

    #[error("{kind} type must define at least one {item}")]
    EmptyEnumeration {
        kind: BuiltinKind,
        item: &'static str,
    },

    #[error("a union must specify at least one member type")]
    EmptyUnion,

    #[error("a leafref must specify a path")]
    PathRequired,

    #[error("unknown prefix: {prefix}")]
    UnresolvedPrefix { prefix: String },

    #[error("invalid require-instance value {value:?}, expected true or false")]
    InvalidRequireInstance { value: String },

    /// An extension statement whose owning module does not declare it
    #[error("unknown extension: {extension}")]
    UnknownExtension { extension: String },
}

impl TypeErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRange { .. } => YANG0200,
            Self::InvalidRange { .. } => YANG0201,
            Self::FractionDigitsNotAllowed => YANG0202,
            Self::FractionDigitsRequired => YANG0203,
            Self::FractionDigitsOutOfRange { .. } => YANG0204,
            Self::FractionDigitsRedefined { .. } => YANG0205,
            Self::IdentityBaseRequired => YANG0206,
            Self::UnresolvedTypedef { .. } => YANG0207,
            Self::UnresolvedIdentity { .. } => YANG0208,
            Self::BadPattern { .. } => YANG0209,
            Self::CyclicTypedef { .. } => YANG0210,
            Self::RestrictionNotAllowed { .. } => YANG0211,
            Self::InvalidMember { .. } => YANG0212,
            Self::EmptyEnumeration { .. } => YANG0213,
            Self::EmptyUnion => YANG0214,
            Self::PathRequired => YANG0215,
            Self::UnresolvedPrefix { .. } => YANG0216,
            Self::InvalidRequireInstance { .. } => YANG0217,
            Self::UnknownExtension { .. } => YANG0218,
        }
    }

    /// Attach a locator
    pub fn at(self, locator: Locator) -> TypeError {
        TypeError {
            kind: self,
            locator,
        }
    }
}

/// A located type resolution error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{locator}: {kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub locator: Locator,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, locator: Locator) -> Self {
        Self { kind, locator }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl From<TypeError> for YangError {
    fn from(err: TypeError) -> Self {
        YangError::semantic(err.kind.code(), err.kind.to_string(), err.locator)
    }
}
