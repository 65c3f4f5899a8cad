//! Test utilities: AST fixture builders and analysis expectations.
//!
//! Fixtures get unique `NodeId`s from one shared generator and real sources
//! through [`ModulePrinter`], so diagnostics render with true positions.

use std::cell::RefCell;

use sable_core::{
    Arm, Constructor, Decl, Export, Expr, Import, Literal, Module, Name, Namespace, NodeId,
    NodeIdGen, Pattern, Program, Type,
};

use crate::{Error, ModulePrinter};

/// `"A::B::f"` → `A::B` + `f`; `"x"` → unqualified `x`.
pub fn name(path: &str) -> Name {
    match path.rsplit_once("::") {
        Some((namespace, ident)) => Name::new(Namespace::parse(namespace), ident),
        None => Name::unqualified(path),
    }
}

#[derive(Default)]
pub struct Fx {
    ids: RefCell<NodeIdGen>,
}

impl Fx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> NodeId {
        self.ids.borrow_mut().fresh()
    }

    pub fn module(&self, namespace: &str) -> ModuleFx<'_> {
        ModuleFx {
            fx: self,
            module: Module {
                id: self.id(),
                namespace: Namespace::parse(namespace),
                imports: Vec::new(),
                exports: Vec::new(),
                decls: Vec::new(),
            },
        }
    }

    pub fn var(&self, path: &str) -> Expr {
        Expr::Var {
            id: self.id(),
            name: name(path),
        }
    }

    pub fn int(&self, n: i64) -> Expr {
        Expr::Lit {
            id: self.id(),
            lit: Literal::Int(n),
        }
    }

    pub fn bool(&self, b: bool) -> Expr {
        Expr::Lit {
            id: self.id(),
            lit: Literal::Bool(b),
        }
    }

    pub fn app(&self, func: Expr, arg: Expr) -> Expr {
        Expr::App {
            id: self.id(),
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    pub fn lam(&self, param: &str, body: Expr) -> Expr {
        Expr::Lambda {
            id: self.id(),
            param: Name::unqualified(param),
            body: Box::new(body),
        }
    }

    pub fn let_in(&self, binder: &str, bound: Expr, body: Expr) -> Expr {
        Expr::Let {
            id: self.id(),
            binder: Name::unqualified(binder),
            bound: Box::new(bound),
            body: Box::new(body),
        }
    }

    pub fn if_(&self, cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::If {
            id: self.id(),
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn annot(&self, expr: Expr, ty: Type) -> Expr {
        Expr::Annot {
            id: self.id(),
            expr: Box::new(expr),
            ty,
        }
    }

    pub fn match_(&self, scrutinee: Expr, arms: Vec<(Pattern, Expr)>) -> Expr {
        Expr::Match {
            id: self.id(),
            scrutinee: Box::new(scrutinee),
            arms: arms
                .into_iter()
                .map(|(pattern, body)| Arm { pattern, body })
                .collect(),
        }
    }

    pub fn pbind(&self, ident: &str) -> Pattern {
        Pattern::Bind {
            id: self.id(),
            name: Name::unqualified(ident),
        }
    }

    pub fn pwild(&self) -> Pattern {
        Pattern::Wildcard { id: self.id() }
    }

    pub fn pint(&self, n: i64) -> Pattern {
        Pattern::Lit {
            id: self.id(),
            lit: Literal::Int(n),
        }
    }

    pub fn pvariant(&self, ty: &str, ctor: &str, fields: &[&str]) -> Pattern {
        Pattern::Variant {
            id: self.id(),
            ty: name(ty),
            ctor: ctor.to_owned(),
            fields: fields.iter().map(|f| Name::unqualified(*f)).collect(),
        }
    }

    pub fn tcon(&self, path: &str, args: Vec<Type>) -> Type {
        Type::Con {
            id: self.id(),
            name: name(path),
            args,
        }
    }

    pub fn tvar(&self, ident: &str) -> Type {
        Type::Var {
            id: self.id(),
            ident: ident.to_owned(),
        }
    }

    pub fn tarrow(&self, param: Type, result: Type) -> Type {
        Type::Arrow {
            id: self.id(),
            param: Box::new(param),
            result: Box::new(result),
        }
    }
}

pub struct ModuleFx<'f> {
    fx: &'f Fx,
    module: Module,
}

impl ModuleFx<'_> {
    pub fn import(mut self, namespace: &str) -> Self {
        self.module.imports.push(Import {
            id: self.fx.id(),
            namespace: Namespace::parse(namespace),
        });
        self
    }

    pub fn export(mut self, ident: &str) -> Self {
        self.module.exports.push(Export::Decl {
            id: self.fx.id(),
            ident: ident.to_owned(),
        });
        self
    }

    pub fn export_module(mut self, namespace: &str) -> Self {
        self.module.exports.push(Export::Module {
            id: self.fx.id(),
            namespace: Namespace::parse(namespace),
        });
        self
    }

    pub fn let_(self, ident: &str, body: Expr) -> Self {
        self.let_decl(ident, None, body)
    }

    pub fn let_annot(self, ident: &str, ty: Type, body: Expr) -> Self {
        self.let_decl(ident, Some(ty), body)
    }

    fn let_decl(mut self, ident: &str, annotation: Option<Type>, body: Expr) -> Self {
        self.module.decls.push(Decl::Let {
            id: self.fx.id(),
            ident: ident.to_owned(),
            annotation,
            body,
        });
        self
    }

    pub fn data(mut self, ident: &str, params: &[&str], ctors: Vec<(&str, Vec<Type>)>) -> Self {
        let constructors = ctors
            .into_iter()
            .map(|(label, fields)| Constructor {
                id: self.fx.id(),
                label: label.to_owned(),
                fields,
            })
            .collect();
        self.module.decls.push(Decl::Data {
            id: self.fx.id(),
            ident: ident.to_owned(),
            params: params.iter().map(|p| (*p).to_owned()).collect(),
            constructors,
        });
        self
    }

    pub fn build(self) -> Module {
        self.module
    }
}

pub fn program(modules: Vec<Module>) -> Program {
    Program::new(modules)
}

/// Resolve `program` and dump the result in surface syntax.
pub fn expect_resolved(program: &Program) -> String {
    match crate::analyze(program) {
        Ok(resolved) => ModulePrinter::dump(&resolved),
        Err(err) => panic!("expected resolution to succeed:\n{}", plain(program, &err)),
    }
}

pub fn expect_error(program: &Program) -> Error {
    match crate::analyze(program) {
        Ok(resolved) => panic!(
            "expected an analysis error, got:\n{}",
            ModulePrinter::dump(&resolved)
        ),
        Err(err) => err,
    }
}

/// Diagnostics of the failing `program` as a `path:line:col` listing.
pub fn expect_plain_diagnostics(program: &Program) -> String {
    let err = expect_error(program);
    plain(program, &err)
}

/// Diagnostics of the failing `program` with source excerpts.
pub fn expect_rendered_diagnostics(program: &Program) -> String {
    let err = expect_error(program);
    let (sources, positions) = ModulePrinter::index(program);
    err.to_diagnostics(&positions).render(&sources)
}

fn plain(program: &Program, err: &Error) -> String {
    let (sources, positions) = ModulePrinter::index(program);
    err.to_diagnostics(&positions).render_plain(&sources)
}
