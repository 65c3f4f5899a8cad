//! Local binder bookkeeping for one module resolution.
//!
//! Every binder opens a synthetic scope `lexical ++ ["#k"]`. The counter
//! starts at zero per module and advances in traversal order, so resolving
//! the same module twice reproduces the same scopes.

use std::collections::HashSet;

use sable_core::{Name, Namespace};

#[derive(Debug, Default)]
pub struct Bindings {
    /// Grows monotonically: a binder stays registered after its scope is
    /// left, and visibility is decided by the lexical prefix instead.
    locals: HashSet<Name>,
    next_scope: u32,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh scope nested in `lexical` and bind `ident` in it.
    pub fn bind(&mut self, lexical: &Namespace, ident: &str) -> Name {
        let scope = lexical.child(format!("#{}", self.next_scope));
        self.next_scope += 1;
        let name = scope.name(ident);
        self.locals.insert(name.clone());
        name
    }

    /// Innermost binder of `ident` visible from `lexical`, walking outward
    /// and stopping before the module scope itself.
    pub fn lookup(&self, lexical: &Namespace, module: &Namespace, ident: &str) -> Option<Name> {
        let mut level = lexical.clone();
        while level != *module {
            let candidate = level.name(ident);
            if self.locals.contains(&candidate) {
                return Some(candidate);
            }
            level = level.parent()?;
        }
        None
    }

    /// True if `name` was bound in a scope enclosing `lexical`.
    pub fn is_visible(&self, name: &Name, lexical: &Namespace) -> bool {
        self.locals.contains(name) && lexical.starts_with(&name.namespace)
    }

    /// Scopes allocated so far.
    pub fn scopes(&self) -> u32 {
        self.next_scope
    }
}
