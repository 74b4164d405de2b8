//! YANG module registry
//!
//! Loads modules into typed views, binds import prefixes, and resolves every
//! typedef and leaf type through the engine in `yangc-types`.
//!
//! ```no_run
//! use yangc_model::ModuleRegistry;
//!
//! let mut registry = ModuleRegistry::new();
//! registry.load_dir("models/").unwrap();
//! for error in registry.process() {
//!     eprintln!("{error}");
//! }
//! ```

mod module;
mod options;
mod registry;

pub use module::{ExtensionDef, Identity, Import, Leaf, LeafKind, Module, Typedef};
pub use options::RegistryOptions;
pub use registry::ModuleRegistry;
