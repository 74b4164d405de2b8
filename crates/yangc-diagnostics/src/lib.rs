//! YANG diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the parser,
//! the type resolver and the module registry: error codes, source locations,
//! locators and diagnostic reporting.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for YANG compiler operations
pub type Result<T> = std::result::Result<T, YangError>;
