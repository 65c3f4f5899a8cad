//! Lowering of structured errors into diagnostics.

use sable_core::{Import, Namespace, NodeId, PositionIndex, Span};

use super::{DiagnosticKind, Diagnostics};
use crate::Error;
use crate::analyze::invariants;
use crate::errors::{AnalysisError, NameKind, UndefinedReason, display_path};

impl Error {
    /// Positions are looked up in `positions`; a node without one is a
    /// parser contract violation and panics.
    pub fn to_diagnostics(&self, positions: &PositionIndex) -> Diagnostics {
        match self {
            Error::Analysis(err) => err.to_diagnostics(positions),
            Error::RecursionLimitExceeded { node } => {
                let mut diagnostics = Diagnostics::new();
                diagnostics
                    .report(DiagnosticKind::RecursionLimitExceeded, span(positions, *node))
                    .message("expression nesting exceeds the configured limit")
                    .label("nested too deeply")
                    .emit();
                diagnostics
            }
        }
    }
}

impl AnalysisError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            AnalysisError::DuplicateModule { .. } => DiagnosticKind::DuplicateModule,
            AnalysisError::UndefinedModuleReference { .. } => {
                DiagnosticKind::UndefinedModuleReference
            }
            AnalysisError::CyclicDependency { .. } => DiagnosticKind::CyclicDependency,
            AnalysisError::UndefinedVariable { .. } => DiagnosticKind::UndefinedVariable,
            AnalysisError::MultipleDefinitions { .. } => DiagnosticKind::MultipleDefinitions,
            AnalysisError::ExportedModulesNotImported { .. } => {
                DiagnosticKind::ExportedModulesNotImported
            }
            AnalysisError::ExportedDeclsNotDefined { .. } => {
                DiagnosticKind::ExportedDeclsNotDefined
            }
            AnalysisError::MultipleDeclarations { .. } => DiagnosticKind::MultipleDeclarations,
        }
    }

    pub fn to_diagnostics(&self, positions: &PositionIndex) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let kind = self.kind();
        let at = |id: NodeId| span(positions, id);

        match self {
            AnalysisError::DuplicateModule { namespace, modules } => {
                let Some((&first, rest)) = modules.split_first() else {
                    return diagnostics;
                };
                let mut builder = match rest.split_first() {
                    Some((&second, others)) => {
                        let mut builder = diagnostics
                            .report(kind, at(second))
                            .label("declared again here");
                        for &other in others {
                            builder = builder.primary(at(other), "declared again here");
                        }
                        builder.related_to("first declared here", at(first))
                    }
                    None => diagnostics.report(kind, at(first)),
                };
                builder = builder
                    .message(namespace.to_string())
                    .hint("merge the modules or rename one of them");
                builder.emit();
            }

            AnalysisError::UndefinedModuleReference { imports } => {
                for import in imports {
                    let namespace = &import.namespace;
                    diagnostics
                        .report(kind, at(import.id))
                        .message(namespace.to_string())
                        .label("no module with this name")
                        .hint(format!("add a module named `{namespace}` or fix the import"))
                        .emit();
                }
            }

            AnalysisError::CyclicDependency { path, imports } => {
                let Some((first, rest)) = imports.split_first() else {
                    return diagnostics;
                };
                let mut builder = diagnostics
                    .report(kind, at(first.id))
                    .message(display_path(path))
                    .label(edge_label(path, 0, first));
                for (k, import) in rest.iter().enumerate() {
                    builder = builder.related_to(edge_label(path, k + 1, import), at(import.id));
                }
                builder.emit();
            }

            AnalysisError::UndefinedVariable {
                node,
                name,
                kind: name_kind,
                module,
                reason,
            } => {
                let what = match name_kind {
                    NameKind::Value => format!("`{name}` is not defined"),
                    NameKind::Type => format!("type `{name}` is not defined"),
                };
                let ident = &name.ident;
                let namespace = &name.namespace;
                let (label, hint) = match reason {
                    UndefinedReason::Unbound => (
                        "not found in this scope".to_owned(),
                        format!("define `{ident}` or import a module that exports it"),
                    ),
                    UndefinedReason::NotDeclared => (
                        format!("`{module}` has no declaration `{ident}`"),
                        format!("define `{ident}` in module `{namespace}`"),
                    ),
                    UndefinedReason::NotExported => (
                        format!("`{namespace}` does not export `{ident}`"),
                        format!("export `{ident}` from module `{namespace}`"),
                    ),
                    UndefinedReason::ModuleNotImported => (
                        format!("`{namespace}` is not imported"),
                        format!("add an import for module `{namespace}`"),
                    ),
                };
                diagnostics
                    .report(kind, at(*node))
                    .message(what)
                    .label(label)
                    .hint(hint)
                    .emit();
            }

            AnalysisError::MultipleDefinitions {
                node,
                ident,
                imports,
            } => {
                let mut builder = diagnostics
                    .report(kind, at(*node))
                    .message(ident.as_str())
                    .label("ambiguous reference");
                for import in imports {
                    let defined = format!(
                        "`{ident}` is defined in `{}`, imported here",
                        import.namespace
                    );
                    builder = builder.related_to(defined, at(import.id));
                }
                if let Some(import) = imports.first() {
                    builder = builder.hint(format!(
                        "qualify the reference, e.g. `{}`",
                        import.namespace.name(ident.as_str())
                    ));
                }
                builder.emit();
            }

            AnalysisError::ExportedModulesNotImported { exports, .. } => {
                let Some(((first, _), rest)) = exports.split_first() else {
                    return diagnostics;
                };
                let names: Vec<&Namespace> = exports.iter().map(|(_, ns)| ns).collect();
                let mut builder = diagnostics
                    .report(kind, at(*first))
                    .message(not_imported_message(&names))
                    .label("not imported");
                for (id, _) in rest {
                    builder = builder.primary(at(*id), "not imported");
                }
                for namespace in names {
                    builder = builder.hint(format!("add an import for module `{namespace}`"));
                }
                builder.emit();
            }

            AnalysisError::ExportedDeclsNotDefined { module, exports } => {
                for (id, ident) in exports {
                    diagnostics
                        .report(kind, at(*id))
                        .message(ident.as_str())
                        .label("not declared in this module")
                        .hint(format!("define `{ident}` in module `{module}`"))
                        .emit();
                }
            }

            AnalysisError::MultipleDeclarations { ident, decls, .. } => {
                let Some((&first, rest)) = decls.split_first() else {
                    return diagnostics;
                };
                let primary = rest.first().copied().unwrap_or(first);
                let mut builder = diagnostics
                    .report(kind, at(primary))
                    .message(format!("`{ident}` is declared {} times", decls.len()))
                    .label("declared again here");
                for &other in rest.iter().skip(1) {
                    builder = builder.primary(at(other), "declared again here");
                }
                if !rest.is_empty() {
                    builder = builder.related_to("first declared here", at(first));
                }
                builder
                    .hint("rename or remove all but one declaration")
                    .emit();
            }
        }

        diagnostics
    }
}

fn span(positions: &PositionIndex, node: NodeId) -> Span {
    invariants::ensure_span(positions.get(node), node)
}

/// `` `A` imports `B` `` for the edge leaving `path[k]`.
fn edge_label(path: &[Namespace], k: usize, import: &Import) -> String {
    match path.get(k) {
        Some(from) => format!("`{from}` imports `{}`", import.namespace),
        None => format!("imports `{}`", import.namespace),
    }
}

fn not_imported_message(names: &[&Namespace]) -> String {
    let list = names
        .iter()
        .map(|ns| format!("`{ns}`"))
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() == 1 {
        format!("module {list} is exported but not imported")
    } else {
        format!("modules {list} are exported but not imported")
    }
}
