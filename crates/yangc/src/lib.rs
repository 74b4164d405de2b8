//! YANG compiler front-end
//!
//! This crate ties the workspace together:
//! - Parsing YANG sources into statement trees
//! - Loading modules and binding their import prefixes
//! - Resolving every `type` statement to a canonical type descriptor,
//!   including POSIX pattern extensions matched by defining module
//! - Flattening modules into entry trees
//!
//! # Example
//!
//! ```no_run
//! use yangc::{EntryBuilder, ModuleRegistry};
//!
//! let mut registry = ModuleRegistry::new();
//! registry.load_dir("models/")?;
//! let errors = registry.process();
//! assert!(errors.is_empty());
//!
//! let entry = EntryBuilder::new(&registry).build("openconfig-interfaces")?;
//! if let Some(leaf) = entry.find("name") {
//!     println!("{:?}", leaf.ty);
//! }
//! # Ok::<(), yangc::YangError>(())
//! ```

// Re-export all public APIs from internal crates
pub use yangc_ast as ast;
pub use yangc_diagnostics as diagnostics;
pub use yangc_entry as entry;
pub use yangc_model as model;
pub use yangc_parser as parser;
pub use yangc_types as types;

// Convenience re-exports
pub use yangc_diagnostics::{Result, YangError};
pub use yangc_entry::{Entry, EntryBuilder};
pub use yangc_model::{ModuleRegistry, RegistryOptions};
pub use yangc_parser::parse;
pub use yangc_types::{TypeDescriptor, TypeResolver};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
