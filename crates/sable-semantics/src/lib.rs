//! Sable semantic resolution: module graph validation and scope-aware name
//! resolution.
//!
//! # Example
//!
//! ```
//! use sable_core::{Decl, Expr, Literal, Module, Namespace, NodeIdGen, Program};
//!
//! let mut ids = NodeIdGen::new();
//! let module = Module {
//!     id: ids.fresh(),
//!     namespace: Namespace::from("Main"),
//!     imports: vec![],
//!     exports: vec![],
//!     decls: vec![Decl::Let {
//!         id: ids.fresh(),
//!         ident: "main".into(),
//!         annotation: None,
//!         body: Expr::Lit { id: ids.fresh(), lit: Literal::Unit },
//!     }],
//! };
//!
//! let resolved = sable_semantics::analyze(&Program::new(vec![module])).expect("valid program");
//! assert_eq!(resolved.modules.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod errors;
mod pipeline;
pub mod printer;

#[cfg(test)]
mod test_utils;

use sable_core::{NodeId, Program};

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use errors::{AnalysisError, NameKind, UndefinedReason};
pub use pipeline::{AnalyzeConfig, Analyzer, GraphChecked};
pub use printer::ModulePrinter;

/// Errors that can occur during semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Expression or type nested deeper than `AnalyzeConfig::recursion_limit`.
    #[error("recursion limit exceeded at node {node}")]
    RecursionLimitExceeded { node: NodeId },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check the module graph, then resolve every module with the default
/// configuration.
pub fn analyze(program: &Program) -> Result<Program> {
    Analyzer::new(program).check_graph()?.resolve()
}
