//! Per-module entry validations.
//!
//! Run for every module before any expression resolves. Each check batches
//! all of its offenders; the first failing check (in the order below) wins.

use indexmap::IndexMap;
use sable_core::{Export, Module, NodeId};
use tracing::debug;

use crate::errors::AnalysisError;

#[tracing::instrument(skip_all, fields(module = %module.namespace))]
pub fn validate_entries(module: &Module) -> Result<(), AnalysisError> {
    check_reexports_imported(module)?;
    check_exports_defined(module)?;
    check_unique_declarations(module)?;
    debug!("entry validations passed");
    Ok(())
}

/// `export module X` requires `import X` in the same module.
fn check_reexports_imported(module: &Module) -> Result<(), AnalysisError> {
    let exports: Vec<_> = module
        .exports
        .iter()
        .filter_map(|e| match e {
            Export::Module { id, namespace } if !module.imports_namespace(namespace) => {
                Some((*id, namespace.clone()))
            }
            _ => None,
        })
        .collect();

    if exports.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::ExportedModulesNotImported {
        module: module.namespace.clone(),
        exports,
    })
}

fn check_exports_defined(module: &Module) -> Result<(), AnalysisError> {
    let exports: Vec<_> = module
        .exports
        .iter()
        .filter_map(|e| match e {
            Export::Decl { id, ident } if !declares(module, ident) => Some((*id, ident.clone())),
            _ => None,
        })
        .collect();

    if exports.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::ExportedDeclsNotDefined {
        module: module.namespace.clone(),
        exports,
    })
}

fn declares(module: &Module, ident: &str) -> bool {
    module.declared_idents().any(|d| d == ident)
}

/// Reports the first identifier (in declaration order) declared twice.
fn check_unique_declarations(module: &Module) -> Result<(), AnalysisError> {
    let mut by_ident: IndexMap<&str, Vec<NodeId>> = IndexMap::new();
    for decl in &module.decls {
        by_ident.entry(decl.ident()).or_default().push(decl.id());
    }

    let Some((ident, decls)) = by_ident.into_iter().find(|(_, ids)| ids.len() > 1) else {
        return Ok(());
    };
    Err(AnalysisError::MultipleDeclarations {
        module: module.namespace.clone(),
        ident: ident.to_owned(),
        decls,
    })
}
