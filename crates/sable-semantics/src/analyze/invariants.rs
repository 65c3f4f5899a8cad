//! Invariant checks excluded from coverage reports.
//!
//! Each helper guards a precondition an earlier stage establishes. A failure
//! is a bug in the pipeline, never a user diagnostic.

#![cfg_attr(coverage_nightly, coverage(off))]

use sable_core::{Namespace, NodeId, Span};

#[inline]
pub fn ensure_module_known<T>(module: Option<T>, namespace: &Namespace) -> T {
    match module {
        Some(m) => m,
        None => panic!(
            "graph: module `{namespace}` missing from the module table \
             (undefined imports are rejected before cycle detection)"
        ),
    }
}

#[inline]
pub fn ensure_interface<T>(interface: Option<T>, namespace: &Namespace) -> T {
    match interface {
        Some(i) => i,
        None => panic!(
            "resolve: no interface for module `{namespace}` \
             (the graph gate guarantees every import target exists)"
        ),
    }
}

#[inline]
pub fn ensure_reexport_imported<T>(import: Option<T>, module: &Namespace, target: &Namespace) -> T {
    match import {
        Some(i) => i,
        None => panic!(
            "resolve: module `{module}` re-exports `{target}` without importing it \
             (export validation runs for every module before resolution)"
        ),
    }
}

#[inline]
pub fn assert_scope_in_module(lexical: &Namespace, module: &Namespace) {
    assert!(
        lexical.starts_with(module),
        "resolve: lexical scope `{lexical}` escaped module `{module}`"
    );
}

#[inline]
pub fn ensure_span(span: Option<Span>, node: NodeId) -> Span {
    match span {
        Some(s) => s,
        None => panic!(
            "diagnostics: node {node} has no position \
             (the parser records a span for every node)"
        ),
    }
}
