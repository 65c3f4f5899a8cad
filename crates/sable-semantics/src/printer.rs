//! Surface-syntax printer for modules.
//!
//! Renders one declaration per line with compound expressions fully
//! parenthesized, and records the byte span of every node it prints. The
//! output is used to dump resolved programs and to give synthesized modules
//! real sources for diagnostics.

use sable_core::{
    Decl, Export, Expr, Literal, Module, Name, Namespace, NodeId, Pattern, PositionIndex,
    Program, SourceId, SourceMap, Span, Type,
};

/// Printed text of a module plus the span of each node within it.
#[derive(Debug, Clone)]
pub struct PrintedModule {
    pub text: String,
    spans: Vec<(NodeId, u32, u32)>,
}

impl PrintedModule {
    /// Register the text as a file source and record every node position.
    pub fn register(
        &self,
        path: &str,
        sources: &mut SourceMap,
        positions: &mut PositionIndex,
    ) -> SourceId {
        let source = sources.add_file(path, &self.text);
        for &(id, start, end) in &self.spans {
            positions.insert(id, Span::new(source, start, end));
        }
        source
    }
}

#[derive(Debug, Default)]
pub struct ModulePrinter {
    out: String,
    spans: Vec<(NodeId, u32, u32)>,
}

impl ModulePrinter {
    pub fn print(module: &Module) -> PrintedModule {
        let mut printer = Self::default();
        printer.module(module);
        PrintedModule {
            text: printer.out,
            spans: printer.spans,
        }
    }

    /// All modules, separated by blank lines.
    pub fn dump(program: &Program) -> String {
        program
            .modules
            .iter()
            .map(|m| Self::print(m).text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print every module into its own file source.
    pub fn index(program: &Program) -> (SourceMap, PositionIndex) {
        let mut sources = SourceMap::new();
        let mut positions = PositionIndex::new();
        for module in &program.modules {
            let path = source_path(&module.namespace);
            Self::print(module).register(&path, &mut sources, &mut positions);
        }
        (sources, positions)
    }

    fn pos(&self) -> u32 {
        self.out.len() as u32
    }

    fn str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn node(&mut self, id: NodeId, f: impl FnOnce(&mut Self)) {
        let start = self.pos();
        f(self);
        self.spans.push((id, start, self.pos()));
    }

    fn module(&mut self, module: &Module) {
        self.str("module ");
        self.node(module.id, |p| p.str(&module.namespace.to_string()));
        self.str("\n");

        for import in &module.imports {
            self.str("import ");
            self.node(import.id, |p| p.namespace(&import.namespace));
            self.str("\n");
        }

        for export in &module.exports {
            self.str("export ");
            match export {
                Export::Decl { id, ident } => self.node(*id, |p| p.str(ident)),
                Export::Module { id, namespace } => {
                    self.str("module ");
                    self.node(*id, |p| p.namespace(namespace));
                }
            }
            self.str("\n");
        }

        for decl in &module.decls {
            self.decl(decl);
            self.str("\n");
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Let {
                id,
                ident,
                annotation,
                body,
            } => {
                self.str("let ");
                self.node(*id, |p| p.str(ident));
                if let Some(ty) = annotation {
                    self.str(" : ");
                    self.ty(ty);
                }
                self.str(" = ");
                self.expr(body);
            }
            Decl::Data {
                id,
                ident,
                params,
                constructors,
            } => {
                self.str("data ");
                self.node(*id, |p| p.str(ident));
                for param in params {
                    self.str(" ");
                    self.str(param);
                }
                for (i, ctor) in constructors.iter().enumerate() {
                    self.str(if i == 0 { " = " } else { " | " });
                    self.node(ctor.id, |p| {
                        p.str(&ctor.label);
                        for field in &ctor.fields {
                            p.str(" ");
                            p.ty(field);
                        }
                    });
                }
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        self.node(expr.id(), |p| match expr {
            Expr::Lit { lit, .. } => p.literal(lit),
            Expr::Var { name, .. } => p.name(name),
            Expr::App { func, arg, .. } => {
                p.str("(");
                p.expr(func);
                p.str(" ");
                p.expr(arg);
                p.str(")");
            }
            Expr::Lambda { param, body, .. } => {
                p.str("(\\");
                p.name(param);
                p.str(" -> ");
                p.expr(body);
                p.str(")");
            }
            Expr::Annot { expr, ty, .. } => {
                p.str("(");
                p.expr(expr);
                p.str(" : ");
                p.ty(ty);
                p.str(")");
            }
            Expr::Let {
                binder,
                bound,
                body,
                ..
            } => {
                p.str("(let ");
                p.name(binder);
                p.str(" = ");
                p.expr(bound);
                p.str(" in ");
                p.expr(body);
                p.str(")");
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                p.str("(if ");
                p.expr(cond);
                p.str(" then ");
                p.expr(then_branch);
                p.str(" else ");
                p.expr(else_branch);
                p.str(")");
            }
            Expr::Match {
                scrutinee, arms, ..
            } => {
                p.str("(match ");
                p.expr(scrutinee);
                p.str(" with");
                for arm in arms {
                    p.str(" | ");
                    p.pattern(&arm.pattern);
                    p.str(" -> ");
                    p.expr(&arm.body);
                }
                p.str(")");
            }
        });
    }

    fn pattern(&mut self, pattern: &Pattern) {
        self.node(pattern.id(), |p| match pattern {
            Pattern::Lit { lit, .. } => p.literal(lit),
            Pattern::Bind { name, .. } => p.name(name),
            Pattern::Wildcard { .. } => p.str("_"),
            Pattern::Variant {
                ty, ctor, fields, ..
            } => {
                p.name(ty);
                p.str(".");
                p.str(ctor);
                if !fields.is_empty() {
                    p.str("(");
                    for (i, field) in fields.iter().enumerate() {
                        if i > 0 {
                            p.str(", ");
                        }
                        p.name(field);
                    }
                    p.str(")");
                }
            }
        });
    }

    fn ty(&mut self, ty: &Type) {
        self.node(ty.id(), |p| match ty {
            Type::Var { ident, .. } => p.str(ident),
            Type::Con { name, args, .. } if args.is_empty() => p.name(name),
            Type::Con { name, args, .. } => {
                p.str("(");
                p.name(name);
                for arg in args {
                    p.str(" ");
                    p.ty(arg);
                }
                p.str(")");
            }
            Type::Arrow { param, result, .. } => {
                p.str("(");
                p.ty(param);
                p.str(" -> ");
                p.ty(result);
                p.str(")");
            }
        });
    }

    fn literal(&mut self, lit: &Literal) {
        let text = match lit {
            Literal::Int(n) => n.to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Str(s) => format!("{s:?}"),
            Literal::Unit => "()".to_owned(),
        };
        self.str(&text);
    }

    fn name(&mut self, name: &Name) {
        self.str(&name.to_string());
    }

    fn namespace(&mut self, namespace: &Namespace) {
        self.str(&namespace.to_string());
    }
}

/// `Data::List` → `Data/List.sb`
pub fn source_path(namespace: &Namespace) -> String {
    format!("{}.sb", namespace.segments().join("/"))
}
