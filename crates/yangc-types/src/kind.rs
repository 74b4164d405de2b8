//! YANG built-in type kinds

use crate::NumericRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in YANG types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinKind {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
    /// Fixed-point decimal with 1..18 fraction digits
    Decimal64,
    String,
    Boolean,
    Enumeration,
    Bits,
    Binary,
    Empty,
    /// Reference to an identity derived from a base
    #[serde(rename = "identityref")]
    IdentityRef,
    /// Reference to another leaf's value
    #[serde(rename = "leafref")]
    LeafRef,
    InstanceIdentifier,
    Union,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 19] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Decimal64,
        Self::String,
        Self::Boolean,
        Self::Enumeration,
        Self::Bits,
        Self::Binary,
        Self::Empty,
        Self::IdentityRef,
        Self::LeafRef,
        Self::InstanceIdentifier,
        Self::Union,
    ];

    /// Look up a built-in type by its YANG name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The YANG keyword naming this type
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Decimal64 => "decimal64",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Enumeration => "enumeration",
            Self::Bits => "bits",
            Self::Binary => "binary",
            Self::Empty => "empty",
            Self::IdentityRef => "identityref",
            Self::LeafRef => "leafref",
            Self::InstanceIdentifier => "instance-identifier",
            Self::Union => "union",
        }
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    /// Integer and decimal64 types accept a `range` restriction
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Decimal64)
    }

    /// String and binary types accept a `length` restriction
    pub const fn has_length(&self) -> bool {
        matches!(self, Self::String | Self::Binary)
    }

    /// Fixed range of an integer kind.
    ///
    /// Decimal64 has no fixed range; it depends on fraction-digits and is
    /// computed by [`NumericRange::decimal64`].
    pub fn base_range(&self) -> Option<NumericRange> {
        let range = match self {
            Self::Int8 => NumericRange::integer(i8::MIN.into(), i8::MAX.into()),
            Self::Int16 => NumericRange::integer(i16::MIN.into(), i16::MAX.into()),
            Self::Int32 => NumericRange::integer(i32::MIN.into(), i32::MAX.into()),
            Self::Int64 => NumericRange::integer(i64::MIN.into(), i64::MAX.into()),
            Self::Uint8 => NumericRange::integer(0, u8::MAX.into()),
            Self::Uint16 => NumericRange::integer(0, u16::MAX.into()),
            Self::Uint32 => NumericRange::integer(0, u32::MAX.into()),
            Self::Uint64 => NumericRange::integer(0, u64::MAX.into()),
            _ => return None,
        };
        Some(range)
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
