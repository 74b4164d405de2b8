//! YANG type system
//!
//! This crate turns raw `type` declarations into canonical type descriptors:
//! - Built-in kinds and their fixed ranges
//! - Range and length restriction parsing
//! - Namespace-qualified extension matching (POSIX patterns)
//! - The type resolution engine with typedef and union recursion

mod decl;
mod descriptor;
mod error;
mod extension;
mod kind;
mod options;
mod range;
mod resolver;
mod scope;

pub use decl::*;
pub use descriptor::*;
pub use error::*;
pub use extension::*;
pub use kind::*;
pub use options::*;
pub use range::*;
pub use resolver::*;
pub use scope::*;
