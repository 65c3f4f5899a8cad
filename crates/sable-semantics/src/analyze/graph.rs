//! Module dependency graph checks.
//!
//! A pass/fail gate over the import graph, run before any name resolution:
//! module namespaces are unique, every import target exists, and the graph
//! is acyclic.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use sable_core::{Import, Module, Namespace, NodeId};
use tracing::debug;

use super::invariants;
use crate::errors::AnalysisError;

/// Validate the import graph of `modules`.
///
/// Traversal follows input order for roots and declaration order for
/// imports, so the reported cycle is deterministic for a given input.
#[tracing::instrument(skip_all, fields(modules = modules.len()))]
pub fn check_graph(modules: &[Module]) -> Result<(), AnalysisError> {
    let table = module_table(modules)?;
    check_imports_defined(modules, &table)?;

    let mut finder = CycleFinder::new(&table);
    for module in modules {
        finder.visit(&module.namespace)?;
    }

    debug!("module graph is acyclic");
    Ok(())
}

type ModuleTable<'a> = IndexMap<&'a Namespace, &'a Module>;

fn module_table(modules: &[Module]) -> Result<ModuleTable<'_>, AnalysisError> {
    let mut headers: IndexMap<&Namespace, Vec<NodeId>> = IndexMap::new();
    for module in modules {
        headers.entry(&module.namespace).or_default().push(module.id);
    }

    if let Some((namespace, ids)) = headers.iter().find(|(_, ids)| ids.len() > 1) {
        return Err(AnalysisError::DuplicateModule {
            namespace: (*namespace).clone(),
            modules: ids.clone(),
        });
    }

    Ok(modules.iter().map(|m| (&m.namespace, m)).collect())
}

fn check_imports_defined(modules: &[Module], table: &ModuleTable<'_>) -> Result<(), AnalysisError> {
    let undefined: Vec<Import> = modules
        .iter()
        .flat_map(|m| &m.imports)
        .filter(|import| !table.contains_key(&import.namespace))
        .cloned()
        .collect();

    if undefined.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::UndefinedModuleReference { imports: undefined })
}

/// Depth-first search with an explicit stack, so long import chains do not
/// grow the call stack. `stack[k]` is an ancestor with its remaining
/// imports; `edges[k]` is the import leading from `stack[k]` to
/// `stack[k + 1]`.
struct CycleFinder<'a> {
    table: &'a ModuleTable<'a>,
    done: HashSet<&'a Namespace>,
    /// Position of each ancestor in `stack`.
    on_path: HashMap<&'a Namespace, usize>,
    stack: Vec<(&'a Namespace, std::slice::Iter<'a, Import>)>,
    edges: Vec<&'a Import>,
}

impl<'a> CycleFinder<'a> {
    fn new(table: &'a ModuleTable<'a>) -> Self {
        Self {
            table,
            done: HashSet::new(),
            on_path: HashMap::new(),
            stack: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn visit(&mut self, root: &'a Namespace) -> Result<(), AnalysisError> {
        if self.done.contains(root) {
            return Ok(());
        }
        self.enter(root);

        while let Some((namespace, imports)) = self.stack.last_mut() {
            let namespace: &'a Namespace = *namespace;
            let Some(import) = imports.next() else {
                self.stack.pop();
                self.on_path.remove(namespace);
                self.edges.pop();
                self.done.insert(namespace);
                continue;
            };

            let target = &import.namespace;
            if self.done.contains(target) {
                continue;
            }
            self.edges.push(import);
            if let Some(&start) = self.on_path.get(target) {
                return Err(self.cycle(start, target));
            }
            self.enter(target);
        }

        Ok(())
    }

    fn enter(&mut self, namespace: &'a Namespace) {
        let module = invariants::ensure_module_known(self.table.get(namespace).copied(), namespace);
        self.on_path.insert(namespace, self.stack.len());
        self.stack.push((namespace, module.imports.iter()));
    }

    /// The cycle closed by the last pushed edge, which leads back to
    /// `stack[start]`.
    fn cycle(&self, start: usize, target: &Namespace) -> AnalysisError {
        let mut path: Vec<Namespace> = self.stack[start..]
            .iter()
            .map(|(p, _)| (*p).clone())
            .collect();
        path.push(target.clone());
        let imports = self.edges[start..].iter().map(|&i| i.clone()).collect();
        AnalysisError::CyclicDependency { path, imports }
    }
}
