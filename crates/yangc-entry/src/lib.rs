//! YANG entry trees
//!
//! An [`Entry`] is a flattened view of a module's data nodes. Each leaf entry
//! carries its resolved [`TypeDescriptor`](yangc_types::TypeDescriptor) as
//! produced by the type resolver, and its extension statements resolved to
//! the modules that define them.

mod builder;
mod entry;

pub use builder::EntryBuilder;
pub use entry::{Entry, EntryKind, ExtensionUse};
