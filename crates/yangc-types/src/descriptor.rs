//! Canonical type descriptors
//!
//! A descriptor is the fully validated form of a type declaration. Each
//! variant carries exactly the facets that apply to its kind, so a string
//! never has a numeric range and an integer never has patterns. Descriptors
//! do not record the typedef they came through: a typedef'd type and an
//! inline declaration of the same effective type compare equal.

use crate::{BuiltinKind, IdentityId, NumericRange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Integer type facets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerType {
    pub kind: BuiltinKind,
    pub range: NumericRange,
}

/// Decimal64 type facets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalType {
    /// Number of fraction digits, 1..=18
    pub fraction_digits: u8,
    pub range: NumericRange,
}

/// String type facets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringType {
    pub length: NumericRange,
    /// Standard `pattern` restrictions in source order, inherited first
    pub patterns: Vec<String>,
    /// POSIX pattern extension restrictions in source order, inherited first
    pub posix_patterns: Vec<String>,
}

impl Default for StringType {
    fn default() -> Self {
        Self {
            length: NumericRange::length(),
            patterns: Vec::new(),
            posix_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bit {
    pub name: String,
    pub position: u32,
}

/// A fully resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TypeDescriptor {
    Integer(IntegerType),
    Decimal64(DecimalType),
    Boolean,
    Empty,
    String(StringType),
    Binary {
        length: NumericRange,
    },
    Enumeration {
        values: Vec<EnumValue>,
    },
    Bits {
        bits: Vec<Bit>,
    },
    #[serde(rename = "identityref")]
    IdentityRef {
        base: IdentityId,
    },
    #[serde(rename = "leafref")]
    LeafRef {
        path: String,
        require_instance: bool,
    },
    InstanceIdentifier {
        require_instance: bool,
    },
    Union {
        members: Vec<Arc<TypeDescriptor>>,
    },
}

impl TypeDescriptor {
    pub fn kind(&self) -> BuiltinKind {
        match self {
            Self::Integer(int) => int.kind,
            Self::Decimal64(_) => BuiltinKind::Decimal64,
            Self::Boolean => BuiltinKind::Boolean,
            Self::Empty => BuiltinKind::Empty,
            Self::String(_) => BuiltinKind::String,
            Self::Binary { .. } => BuiltinKind::Binary,
            Self::Enumeration { .. } => BuiltinKind::Enumeration,
            Self::Bits { .. } => BuiltinKind::Bits,
            Self::IdentityRef { .. } => BuiltinKind::IdentityRef,
            Self::LeafRef { .. } => BuiltinKind::LeafRef,
            Self::InstanceIdentifier { .. } => BuiltinKind::InstanceIdentifier,
            Self::Union { .. } => BuiltinKind::Union,
        }
    }

    /// Value range of integer and decimal64 types
    pub fn numeric_range(&self) -> Option<&NumericRange> {
        match self {
            Self::Integer(int) => Some(&int.range),
            Self::Decimal64(dec) => Some(&dec.range),
            _ => None,
        }
    }

    /// Length range of string and binary types
    pub fn length(&self) -> Option<&NumericRange> {
        match self {
            Self::String(s) => Some(&s.length),
            Self::Binary { length } => Some(length),
            _ => None,
        }
    }

    pub fn fraction_digits(&self) -> Option<u8> {
        match self {
            Self::Decimal64(dec) => Some(dec.fraction_digits),
            _ => None,
        }
    }

    pub fn patterns(&self) -> &[String] {
        match self {
            Self::String(s) => &s.patterns,
            _ => &[],
        }
    }

    pub fn posix_patterns(&self) -> &[String] {
        match self {
            Self::String(s) => &s.posix_patterns,
            _ => &[],
        }
    }

    pub fn union_members(&self) -> &[Arc<TypeDescriptor>] {
        match self {
            Self::Union { members } => members,
            _ => &[],
        }
    }

    /// Base identity of an identityref
    pub fn base(&self) -> Option<&IdentityId> {
        match self {
            Self::IdentityRef { base } => Some(base),
            _ => None,
        }
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        match self {
            Self::Enumeration { values } => values,
            _ => &[],
        }
    }

    pub fn bits(&self) -> &[Bit] {
        match self {
            Self::Bits { bits } => bits,
            _ => &[],
        }
    }

    pub fn require_instance(&self) -> Option<bool> {
        match self {
            Self::LeafRef {
                require_instance, ..
            }
            | Self::InstanceIdentifier { require_instance } => Some(*require_instance),
            _ => None,
        }
    }
}
