//! Semantic analysis passes.
//!
//! - `graph`: module graph gate (duplicate modules, undefined imports, cycles)
//! - `interface`: program-wide table of imports, exports and declarations
//! - `exports`: per-module entry validations
//! - `resolve`: scope-aware name resolution

mod exports;
mod graph;
mod interface;
pub(crate) mod invariants;
mod resolve;
mod scope;

#[cfg(test)]
mod exports_tests;
#[cfg(test)]
mod scope_tests;

pub use exports::validate_entries;
pub use graph::check_graph;
pub use interface::{InterfaceTable, ModuleInterface};
pub use resolve::{PRIMITIVE_TYPES, resolve_module};
