//! Core data structures shared by the Sable parser and semantic analysis.
//!
//! Three layers:
//! - **Names**: `NodeId` handles, `Namespace` paths and fully qualified `Name`s
//! - **AST**: the closed module/declaration/expression/pattern/type tree
//! - **Sources**: the `SourceMap` registry and the `PositionIndex` that maps
//!   node ids back to spans for diagnostics

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod name;
pub mod source;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod name_tests;
#[cfg(test)]
mod source_tests;

pub use ast::{
    Arm, Constructor, Decl, Export, Expr, Import, Literal, Module, Pattern, Program, Type,
};
pub use name::{Name, Namespace, NodeId, NodeIdGen};
pub use source::{PositionIndex, SourceId, SourceKind, SourceMap, Span};
