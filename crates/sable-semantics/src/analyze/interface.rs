//! Program-wide interface table.
//!
//! Built once after the graph gate passes. Maps each module namespace to its
//! imports, exports and declared identifiers, and is read-only while modules
//! resolve.

use std::collections::HashSet;
use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use sable_core::{Export, Import, Module, Namespace, Program};

use super::invariants;

#[derive(Debug)]
pub struct ModuleInterface<'p> {
    pub namespace: &'p Namespace,
    pub imports: &'p [Import],
    pub exports: &'p [Export],
    declared: IndexSet<&'p str>,
}

impl<'p> ModuleInterface<'p> {
    fn new(module: &'p Module) -> Self {
        Self {
            namespace: &module.namespace,
            imports: &module.imports,
            exports: &module.exports,
            declared: module.declared_idents().collect(),
        }
    }

    pub fn declares(&self, ident: &str) -> bool {
        self.declared.contains(ident)
    }

    pub fn exports_decl(&self, ident: &str) -> bool {
        self.exports.iter().any(|e| e.exports_decl(ident))
    }

    /// Namespaces re-exported with `export module`.
    pub fn reexports(&self) -> impl Iterator<Item = &'p Namespace> + '_ {
        self.exports.iter().filter_map(|e| match e {
            Export::Module { namespace, .. } => Some(namespace),
            Export::Decl { .. } => None,
        })
    }

    fn import_of(&self, namespace: &Namespace) -> Option<&'p Import> {
        self.imports.iter().find(|i| &i.namespace == namespace)
    }
}

#[derive(Debug, Default)]
pub struct InterfaceTable<'p> {
    modules: IndexMap<&'p Namespace, ModuleInterface<'p>>,
}

impl<'p> InterfaceTable<'p> {
    #[tracing::instrument(skip_all, fields(modules = program.modules.len()))]
    pub fn build(program: &'p Program) -> Self {
        let modules = program
            .modules
            .iter()
            .map(|m| (&m.namespace, ModuleInterface::new(m)))
            .collect();
        Self { modules }
    }

    pub fn get(&self, namespace: &Namespace) -> Option<&ModuleInterface<'p>> {
        self.modules.get(namespace)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn interface(&self, namespace: &Namespace) -> &ModuleInterface<'p> {
        invariants::ensure_interface(self.get(namespace), namespace)
    }

    pub fn declares(&self, namespace: &Namespace, ident: &str) -> bool {
        self.interface(namespace).declares(ident)
    }

    pub fn exports_decl(&self, namespace: &Namespace, ident: &str) -> bool {
        self.interface(namespace).exports_decl(ident)
    }

    /// Direct imports of `module` followed by every passed-through import.
    ///
    /// A module that re-exports `X` contributes its own `Import` of `X`.
    /// Entries are unique by target namespace and the first occurrence wins,
    /// so direct imports always shadow passed-through ones.
    pub fn import_closure(&self, module: &Namespace) -> Vec<&'p Import> {
        let mut seen: HashSet<&Namespace> = HashSet::new();
        let mut closure = Vec::new();
        let mut queue = VecDeque::new();

        for import in self.interface(module).imports {
            if seen.insert(&import.namespace) {
                closure.push(import);
                queue.push_back(&import.namespace);
            }
        }

        while let Some(namespace) = queue.pop_front() {
            let interface = self.interface(namespace);
            for target in interface.reexports() {
                let import = invariants::ensure_reexport_imported(
                    interface.import_of(target),
                    interface.namespace,
                    target,
                );
                if seen.insert(&import.namespace) {
                    closure.push(import);
                    queue.push_back(&import.namespace);
                }
            }
        }

        closure
    }
}
