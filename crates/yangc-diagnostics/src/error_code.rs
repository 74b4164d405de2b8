//! YANG error codes following a structured numbering system
//!
//! Error code ranges:
//! - YANG0001-YANG0099: Parse errors (statement syntax)
//! - YANG0100-YANG0199: Module errors (headers, imports, definitions)
//! - YANG0200-YANG0299: Type resolution errors
//! - YANG0400-YANG0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    pub const fn is_module_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    pub const fn is_type_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YANG{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Parse errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unexpected token"));
    map.insert(2, ErrorInfo::new("Unexpected end of input"));
    map.insert(4, ErrorInfo::new("Unterminated string literal"));
    map.insert(5, ErrorInfo::new("Unterminated comment"));
    map.insert(6, ErrorInfo::new("Expected ';' or '{'"));

    // Module errors (0100-0199)
    map.insert(100, ErrorInfo::new("Unsupported top-level statement")
        .with_help("Only `module` statements are accepted at the top level"));
    map.insert(101, ErrorInfo::new("Missing module prefix"));
    map.insert(102, ErrorInfo::new("Missing module namespace"));
    map.insert(103, ErrorInfo::new("Unknown imported module")
        .with_help("Load the imported module before processing"));
    map.insert(104, ErrorInfo::new("Duplicate prefix"));
    map.insert(105, ErrorInfo::new("Duplicate definition"));
    map.insert(106, ErrorInfo::new("Unknown identity base"));
    map.insert(107, ErrorInfo::new("Duplicate module"));
    map.insert(108, ErrorInfo::new("Unknown module"));
    map.insert(109, ErrorInfo::new("Missing type statement"));

    // Type resolution errors (0200-0299)
    map.insert(200, ErrorInfo::new("Range outside base range"));
    map.insert(201, ErrorInfo::new("Invalid range expression"));
    map.insert(202, ErrorInfo::new("fraction-digits not allowed"));
    map.insert(203, ErrorInfo::new("fraction-digits required")
        .with_help("decimal64 requires fraction-digits in the range 1..18"));
    map.insert(204, ErrorInfo::new("fraction-digits out of range"));
    map.insert(205, ErrorInfo::new("fraction-digits redefined"));
    map.insert(206, ErrorInfo::new("identityref base required"));
    map.insert(207, ErrorInfo::new("Unresolved typedef"));
    map.insert(208, ErrorInfo::new("Unresolved identity"));
    map.insert(209, ErrorInfo::new("Bad pattern"));
    map.insert(210, ErrorInfo::new("Cyclic typedef"));
    map.insert(211, ErrorInfo::new("Restriction not allowed for type"));
    map.insert(212, ErrorInfo::new("Invalid enum or bit"));
    map.insert(213, ErrorInfo::new("Empty enumeration or bits"));
    map.insert(214, ErrorInfo::new("Empty union"));
    map.insert(215, ErrorInfo::new("leafref path required"));
    map.insert(216, ErrorInfo::new("Unresolved prefix"));
    map.insert(217, ErrorInfo::new("Invalid require-instance"));
    map.insert(218, ErrorInfo::new("Unknown extension")
        .with_help("The imported module must declare the extension"));

    // System errors (0400-0499)
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(404, ErrorInfo::new("File not found"));

    map
});

// Parse errors
pub const YANG0001: ErrorCode = ErrorCode::new(1);
pub const YANG0002: ErrorCode = ErrorCode::new(2);
pub const YANG0004: ErrorCode = ErrorCode::new(4);
pub const YANG0005: ErrorCode = ErrorCode::new(5);
pub const YANG0006: ErrorCode = ErrorCode::new(6);

// Module errors
pub const YANG0100: ErrorCode = ErrorCode::new(100);
pub const YANG0101: ErrorCode = ErrorCode::new(101);
pub const YANG0102: ErrorCode = ErrorCode::new(102);
pub const YANG0103: ErrorCode = ErrorCode::new(103);
pub const YANG0104: ErrorCode = ErrorCode::new(104);
pub const YANG0105: ErrorCode = ErrorCode::new(105);
pub const YANG0106: ErrorCode = ErrorCode::new(106);
pub const YANG0107: ErrorCode = ErrorCode::new(107);
pub const YANG0108: ErrorCode = ErrorCode::new(108);
pub const YANG0109: ErrorCode = ErrorCode::new(109);

// Type resolution errors
pub const YANG0200: ErrorCode = ErrorCode::new(200);
pub const YANG0201: ErrorCode = ErrorCode::new(201);
pub const YANG0202: ErrorCode = ErrorCode::new(202);
pub const YANG0203: ErrorCode = ErrorCode::new(203);
pub const YANG0204: ErrorCode = ErrorCode::new(204);
pub const YANG0205: ErrorCode = ErrorCode::new(205);
pub const YANG0206: ErrorCode = ErrorCode::new(206);
pub const YANG0207: ErrorCode = ErrorCode::new(207);
pub const YANG0208: ErrorCode = ErrorCode::new(208);
pub const YANG0209: ErrorCode = ErrorCode::new(209);
pub const YANG0210: ErrorCode = ErrorCode::new(210);
pub const YANG0211: ErrorCode = ErrorCode::new(211);
pub const YANG0212: ErrorCode = ErrorCode::new(212);
pub const YANG0213: ErrorCode = ErrorCode::new(213);
pub const YANG0214: ErrorCode = ErrorCode::new(214);
pub const YANG0215: ErrorCode = ErrorCode::new(215);
pub const YANG0216: ErrorCode = ErrorCode::new(216);
pub const YANG0217: ErrorCode = ErrorCode::new(217);
pub const YANG0218: ErrorCode = ErrorCode::new(218);

// System errors
pub const YANG0401: ErrorCode = ErrorCode::new(401);
pub const YANG0402: ErrorCode = ErrorCode::new(402);
pub const YANG0404: ErrorCode = ErrorCode::new(404);
