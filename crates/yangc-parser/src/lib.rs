//! YANG statement parser using winnow
//!
//! Turns source text into the generic statement tree defined by `yangc-ast`.
//! Only the statement grammar is checked here; which keywords may appear
//! where is left to the module registry and the type resolver.

mod combinators;
mod statement;

pub use statement::parse;
