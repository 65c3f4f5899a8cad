//! Structured analysis failures.
//!
//! Every variant is terminal for the program being analyzed. Values carry
//! `NodeId`s only; positions are attached when the error is lowered into
//! [`Diagnostics`](crate::Diagnostics).

use std::fmt;

use sable_core::{Import, Name, Namespace, NodeId};

/// Which lookup table an unresolved occurrence was checked against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NameKind {
    Value,
    Type,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Value => write!(f, "name"),
            NameKind::Type => write!(f, "type"),
        }
    }
}

/// Why a reference failed to resolve. Drives the remediation hint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UndefinedReason {
    /// Unqualified and found nowhere: not declared, not bound, not imported.
    Unbound,
    /// Qualified with the module's own namespace, but not declared there.
    NotDeclared,
    /// Qualified with an imported module that does not export it.
    NotExported,
    /// Qualified with a namespace outside the import closure.
    ModuleNotImported,
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Two or more module headers declare the same namespace.
    #[error("module `{namespace}` is declared {} times", .modules.len())]
    DuplicateModule {
        namespace: Namespace,
        modules: Vec<NodeId>,
    },

    /// Every import in the program whose target module does not exist.
    #[error("{} import(s) refer to undefined modules", .imports.len())]
    UndefinedModuleReference { imports: Vec<Import> },

    /// `path` is closed: its first namespace is repeated at the end.
    /// `imports[k]` is the edge from `path[k]` to `path[k + 1]`.
    #[error("cyclic dependency: {}", display_path(.path))]
    CyclicDependency {
        path: Vec<Namespace>,
        imports: Vec<Import>,
    },

    #[error("undefined {kind} `{name}` in module `{module}`")]
    UndefinedVariable {
        node: NodeId,
        name: Name,
        kind: NameKind,
        module: Namespace,
        reason: UndefinedReason,
    },

    /// An unqualified reference exported by several imported modules.
    #[error("`{ident}` is defined in {} imported modules", .imports.len())]
    MultipleDefinitions {
        node: NodeId,
        ident: String,
        imports: Vec<Import>,
    },

    #[error("module `{module}` re-exports {} module(s) it does not import", .exports.len())]
    ExportedModulesNotImported {
        module: Namespace,
        /// `(export occurrence, re-exported namespace)`
        exports: Vec<(NodeId, Namespace)>,
    },

    #[error("module `{module}` exports {} undefined declaration(s)", .exports.len())]
    ExportedDeclsNotDefined {
        module: Namespace,
        /// `(export occurrence, exported identifier)`
        exports: Vec<(NodeId, String)>,
    },

    #[error("`{ident}` is declared {} times in module `{module}`", .decls.len())]
    MultipleDeclarations {
        module: Namespace,
        ident: String,
        /// Every declaration sharing `ident`, in declaration order.
        decls: Vec<NodeId>,
    },
}

/// `A -> B -> A`
pub(crate) fn display_path(path: &[Namespace]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
