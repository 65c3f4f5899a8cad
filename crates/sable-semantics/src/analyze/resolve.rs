//! Scope-aware name resolution for one module.
//!
//! Produces a new module in which every variable, type and pattern name is
//! fully qualified. Fails fast on the first unresolvable occurrence.
//!
//! Unqualified value lookup, in order:
//! 1. a top-level declaration of the module itself
//! 2. the innermost local binder, walking outward from the occurrence
//! 3. the single import in the import closure that exports the identifier
//!
//! Types skip step 2 (there are no type-level binders) and never look up the
//! built-in primitives.

use sable_core::{
    Arm, Constructor, Decl, Expr, Import, Module, Name, Namespace, NodeId, Pattern, Type,
};
use tracing::{debug, trace};

use super::interface::InterfaceTable;
use super::invariants;
use super::scope::Bindings;
use crate::errors::{AnalysisError, NameKind, UndefinedReason};
use crate::{Error, Result};

/// Built-in type names. Never looked up, never qualified.
pub const PRIMITIVE_TYPES: &[&str] = &["Int", "Float", "Bool", "Char", "String", "Unit"];

type Lookup = std::result::Result<Name, AnalysisError>;

#[tracing::instrument(skip_all, fields(module = %module.namespace))]
pub fn resolve_module(
    table: &InterfaceTable<'_>,
    module: &Module,
    recursion_limit: u32,
) -> Result<Module> {
    let mut resolver = ModuleResolver::new(table, &module.namespace, recursion_limit);

    let decls = module
        .decls
        .iter()
        .map(|decl| resolver.decl(decl))
        .collect::<Result<Vec<_>>>()?;

    debug!(scopes = resolver.bindings.scopes(), "module resolved");
    Ok(Module {
        id: module.id,
        namespace: module.namespace.clone(),
        imports: module.imports.clone(),
        exports: module.exports.clone(),
        decls,
    })
}

struct ModuleResolver<'a> {
    table: &'a InterfaceTable<'a>,
    module: &'a Namespace,
    /// Computed once; every import-based lookup in the module reads it.
    closure: Vec<&'a Import>,
    bindings: Bindings,
    depth: u32,
    recursion_limit: u32,
}

impl<'a> ModuleResolver<'a> {
    fn new(table: &'a InterfaceTable<'a>, module: &'a Namespace, recursion_limit: u32) -> Self {
        let closure = table.import_closure(module);
        debug!(closure = closure.len(), "import closure computed");
        Self {
            table,
            module,
            closure,
            bindings: Bindings::new(),
            depth: 0,
            recursion_limit,
        }
    }

    fn decl(&mut self, decl: &Decl) -> Result<Decl> {
        let module = self.module;
        match decl {
            Decl::Let {
                id,
                ident,
                annotation,
                body,
            } => {
                let annotation = annotation.as_ref().map(|ty| self.ty(ty)).transpose()?;
                let body = self.expr(body, module)?;
                Ok(Decl::Let {
                    id: *id,
                    ident: ident.clone(),
                    annotation,
                    body,
                })
            }
            Decl::Data {
                id,
                ident,
                params,
                constructors,
            } => {
                let constructors = constructors
                    .iter()
                    .map(|ctor| self.constructor(ctor))
                    .collect::<Result<_>>()?;
                Ok(Decl::Data {
                    id: *id,
                    ident: ident.clone(),
                    params: params.clone(),
                    constructors,
                })
            }
        }
    }

    fn constructor(&mut self, ctor: &Constructor) -> Result<Constructor> {
        let fields = ctor.fields.iter().map(|ty| self.ty(ty)).collect::<Result<_>>()?;
        Ok(Constructor {
            id: ctor.id,
            label: ctor.label.clone(),
            fields,
        })
    }

    fn descend(&mut self, node: NodeId) -> Result<()> {
        if self.depth >= self.recursion_limit {
            return Err(Error::RecursionLimitExceeded { node });
        }
        self.depth += 1;
        Ok(())
    }

    fn expr(&mut self, expr: &Expr, lexical: &Namespace) -> Result<Expr> {
        self.descend(expr.id())?;
        let resolved = self.expr_inner(expr, lexical);
        self.depth -= 1;
        resolved
    }

    // Dispatch only; per-variant helpers keep this frame small.
    fn expr_inner(&mut self, expr: &Expr, lexical: &Namespace) -> Result<Expr> {
        match expr {
            Expr::Lit { .. } => Ok(expr.clone()),
            Expr::Var { id, name } => Ok(Expr::Var {
                id: *id,
                name: self.value(*id, name, lexical)?,
            }),
            Expr::App { id, func, arg } => self.app(*id, func, arg, lexical),
            Expr::Lambda { id, param, body } => self.lambda(*id, param, body, lexical),
            Expr::Annot { id, expr, ty } => self.annot(*id, expr, ty, lexical),
            Expr::Let {
                id,
                binder,
                bound,
                body,
            } => self.let_in(*id, binder, bound, body, lexical),
            Expr::If {
                id,
                cond,
                then_branch,
                else_branch,
            } => self.if_else(*id, cond, then_branch, else_branch, lexical),
            Expr::Match {
                id,
                scrutinee,
                arms,
            } => self.match_arms(*id, scrutinee, arms, lexical),
        }
    }

    fn app(&mut self, id: NodeId, func: &Expr, arg: &Expr, lexical: &Namespace) -> Result<Expr> {
        let func = self.expr(func, lexical)?;
        let arg = self.expr(arg, lexical)?;
        Ok(Expr::App {
            id,
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    fn lambda(
        &mut self,
        id: NodeId,
        param: &Name,
        body: &Expr,
        lexical: &Namespace,
    ) -> Result<Expr> {
        let param = self.bindings.bind(lexical, &param.ident);
        let body = self.expr(body, &param.namespace)?;
        Ok(Expr::Lambda {
            id,
            param,
            body: Box::new(body),
        })
    }

    fn annot(&mut self, id: NodeId, expr: &Expr, ty: &Type, lexical: &Namespace) -> Result<Expr> {
        let expr = self.expr(expr, lexical)?;
        let ty = self.ty(ty)?;
        Ok(Expr::Annot {
            id,
            expr: Box::new(expr),
            ty,
        })
    }

    /// Non-recursive: `bound` cannot see `binder`.
    fn let_in(
        &mut self,
        id: NodeId,
        binder: &Name,
        bound: &Expr,
        body: &Expr,
        lexical: &Namespace,
    ) -> Result<Expr> {
        let bound = self.expr(bound, lexical)?;
        let binder = self.bindings.bind(lexical, &binder.ident);
        let body = self.expr(body, &binder.namespace)?;
        Ok(Expr::Let {
            id,
            binder,
            bound: Box::new(bound),
            body: Box::new(body),
        })
    }

    fn if_else(
        &mut self,
        id: NodeId,
        cond: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
        lexical: &Namespace,
    ) -> Result<Expr> {
        let cond = self.expr(cond, lexical)?;
        let then_branch = self.expr(then_branch, lexical)?;
        let else_branch = self.expr(else_branch, lexical)?;
        Ok(Expr::If {
            id,
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn match_arms(
        &mut self,
        id: NodeId,
        scrutinee: &Expr,
        arms: &[Arm],
        lexical: &Namespace,
    ) -> Result<Expr> {
        let scrutinee = self.expr(scrutinee, lexical)?;
        let arms = arms
            .iter()
            .map(|arm| self.arm(arm, lexical))
            .collect::<Result<_>>()?;
        Ok(Expr::Match {
            id,
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    fn arm(&mut self, arm: &Arm, lexical: &Namespace) -> Result<Arm> {
        let (pattern, scope) = self.pattern(&arm.pattern, lexical)?;
        let body = self.expr(&arm.body, &scope)?;
        Ok(Arm { pattern, body })
    }

    /// Returns the resolved pattern and the scope its arm body resolves in.
    fn pattern(&mut self, pattern: &Pattern, lexical: &Namespace) -> Result<(Pattern, Namespace)> {
        match pattern {
            Pattern::Lit { .. } | Pattern::Wildcard { .. } => {
                Ok((pattern.clone(), lexical.clone()))
            }
            Pattern::Bind { id, name } => {
                let name = self.bindings.bind(lexical, &name.ident);
                let scope = name.namespace.clone();
                Ok((Pattern::Bind { id: *id, name }, scope))
            }
            Pattern::Variant {
                id,
                ty,
                ctor,
                fields,
            } => {
                let ty = self.type_name(*id, ty)?;
                // Each field nests inside the previous one, left to right.
                let mut scope = lexical.clone();
                let mut bound = Vec::with_capacity(fields.len());
                for field in fields {
                    let name = self.bindings.bind(&scope, &field.ident);
                    scope = name.namespace.clone();
                    bound.push(name);
                }
                let pattern = Pattern::Variant {
                    id: *id,
                    ty,
                    ctor: ctor.clone(),
                    fields: bound,
                };
                Ok((pattern, scope))
            }
        }
    }

    fn ty(&mut self, ty: &Type) -> Result<Type> {
        self.descend(ty.id())?;
        let resolved = self.ty_inner(ty);
        self.depth -= 1;
        resolved
    }

    fn ty_inner(&mut self, ty: &Type) -> Result<Type> {
        let resolved = match ty {
            Type::Var { .. } => ty.clone(),
            Type::Con { id, name, args } => Type::Con {
                id: *id,
                name: self.type_name(*id, name)?,
                args: args.iter().map(|arg| self.ty(arg)).collect::<Result<_>>()?,
            },
            Type::Arrow { id, param, result } => Type::Arrow {
                id: *id,
                param: Box::new(self.ty(param)?),
                result: Box::new(self.ty(result)?),
            },
        };
        Ok(resolved)
    }

    fn value(&self, node: NodeId, name: &Name, lexical: &Namespace) -> Lookup {
        invariants::assert_scope_in_module(lexical, self.module);

        let resolved = if name.is_qualified() {
            if self.bindings.is_visible(name, lexical) {
                name.clone()
            } else {
                self.qualified(node, name, NameKind::Value)?
            }
        } else if self.table.declares(self.module, &name.ident) {
            self.module.name(&name.ident)
        } else if let Some(local) = self.bindings.lookup(lexical, self.module, &name.ident) {
            local
        } else {
            self.imported(node, &name.ident, NameKind::Value)?
        };

        trace!(%node, %resolved, "value resolved");
        Ok(resolved)
    }

    fn type_name(&self, node: NodeId, name: &Name) -> Lookup {
        let resolved = if name.is_qualified() {
            self.qualified(node, name, NameKind::Type)?
        } else if PRIMITIVE_TYPES.contains(&name.ident.as_str()) {
            name.clone()
        } else if self.table.declares(self.module, &name.ident) {
            self.module.name(&name.ident)
        } else {
            self.imported(node, &name.ident, NameKind::Type)?
        };

        trace!(%node, %resolved, "type resolved");
        Ok(resolved)
    }

    fn qualified(&self, node: NodeId, name: &Name, kind: NameKind) -> Lookup {
        let namespace = &name.namespace;
        let reason = if namespace == self.module {
            if self.table.declares(namespace, &name.ident) {
                return Ok(name.clone());
            }
            UndefinedReason::NotDeclared
        } else if self.closure.iter().any(|import| &import.namespace == namespace) {
            if self.table.exports_decl(namespace, &name.ident) {
                return Ok(name.clone());
            }
            UndefinedReason::NotExported
        } else {
            UndefinedReason::ModuleNotImported
        };
        Err(self.undefined(node, name.clone(), kind, reason))
    }

    fn imported(&self, node: NodeId, ident: &str, kind: NameKind) -> Lookup {
        let matches: Vec<&Import> = self
            .closure
            .iter()
            .copied()
            .filter(|import| self.table.exports_decl(&import.namespace, ident))
            .collect();

        match matches.as_slice() {
            [] => {
                let name = Name::unqualified(ident);
                Err(self.undefined(node, name, kind, UndefinedReason::Unbound))
            }
            [import] => Ok(import.namespace.name(ident)),
            _ => Err(AnalysisError::MultipleDefinitions {
                node,
                ident: ident.to_owned(),
                imports: matches.into_iter().cloned().collect(),
            }),
        }
    }

    fn undefined(
        &self,
        node: NodeId,
        name: Name,
        kind: NameKind,
        reason: UndefinedReason,
    ) -> AnalysisError {
        AnalysisError::UndefinedVariable {
            node,
            name,
            kind,
            module: self.module.clone(),
            reason,
        }
    }
}
