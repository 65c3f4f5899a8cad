//! Abstract syntax tree produced by the parser.
//!
//! Every node carries its [`NodeId`] as data. The tree is an immutable input
//! to semantic analysis: resolution builds a new tree rather than mutating
//! this one in place.

use serde::{Deserialize, Serialize};

use crate::name::{Name, Namespace, NodeId};

/// All modules of a compilation, in the order the driver supplied them.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Program {
    pub modules: Vec<Module>,
}

impl Program {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Module {
    /// The module header occurrence.
    pub id: NodeId,
    pub namespace: Namespace,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub exports: Vec<Export>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl Module {
    /// Top-level identifiers in declaration order (duplicates included).
    pub fn declared_idents(&self) -> impl Iterator<Item = &str> {
        self.decls.iter().map(Decl::ident)
    }

    pub fn imports_namespace(&self, namespace: &Namespace) -> bool {
        self.imports.iter().any(|i| &i.namespace == namespace)
    }
}

/// One `import` occurrence. Several may target the same namespace.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Import {
    pub id: NodeId,
    pub namespace: Namespace,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Export {
    /// Exposes a local top-level declaration.
    Decl { id: NodeId, ident: String },
    /// Re-exports every declaration export of an imported module.
    Module { id: NodeId, namespace: Namespace },
}

impl Export {
    pub fn id(&self) -> NodeId {
        match self {
            Export::Decl { id, .. } | Export::Module { id, .. } => *id,
        }
    }

    pub fn exports_decl(&self, name: &str) -> bool {
        matches!(self, Export::Decl { ident, .. } if ident == name)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Let {
        id: NodeId,
        ident: String,
        #[serde(default)]
        annotation: Option<Type>,
        body: Expr,
    },
    Data {
        id: NodeId,
        ident: String,
        #[serde(default)]
        params: Vec<String>,
        #[serde(default)]
        constructors: Vec<Constructor>,
    },
}

impl Decl {
    pub fn id(&self) -> NodeId {
        match self {
            Decl::Let { id, .. } | Decl::Data { id, .. } => *id,
        }
    }

    pub fn ident(&self) -> &str {
        match self {
            Decl::Let { ident, .. } | Decl::Data { ident, .. } => ident,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Constructor {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub fields: Vec<Type>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
    Unit,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Lit {
        id: NodeId,
        lit: Literal,
    },
    Var {
        id: NodeId,
        name: Name,
    },
    App {
        id: NodeId,
        func: Box<Expr>,
        arg: Box<Expr>,
    },
    Lambda {
        id: NodeId,
        param: Name,
        body: Box<Expr>,
    },
    Annot {
        id: NodeId,
        expr: Box<Expr>,
        ty: Type,
    },
    Let {
        id: NodeId,
        binder: Name,
        bound: Box<Expr>,
        body: Box<Expr>,
    },
    If {
        id: NodeId,
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Match {
        id: NodeId,
        scrutinee: Box<Expr>,
        arms: Vec<Arm>,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Lit { id, .. }
            | Expr::Var { id, .. }
            | Expr::App { id, .. }
            | Expr::Lambda { id, .. }
            | Expr::Annot { id, .. }
            | Expr::Let { id, .. }
            | Expr::If { id, .. }
            | Expr::Match { id, .. } => *id,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Arm {
    pub pattern: Pattern,
    pub body: Expr,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    Lit {
        id: NodeId,
        lit: Literal,
    },
    Bind {
        id: NodeId,
        name: Name,
    },
    Wildcard {
        id: NodeId,
    },
    /// `Type.Ctor(a, b)`: `ty` is resolved as a type, `ctor` is a plain label.
    Variant {
        id: NodeId,
        ty: Name,
        ctor: String,
        #[serde(default)]
        fields: Vec<Name>,
    },
}

impl Pattern {
    pub fn id(&self) -> NodeId {
        match self {
            Pattern::Lit { id, .. }
            | Pattern::Bind { id, .. }
            | Pattern::Wildcard { id }
            | Pattern::Variant { id, .. } => *id,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Var {
        id: NodeId,
        ident: String,
    },
    Con {
        id: NodeId,
        name: Name,
        #[serde(default)]
        args: Vec<Type>,
    },
    Arrow {
        id: NodeId,
        param: Box<Type>,
        result: Box<Type>,
    },
}

impl Type {
    pub fn id(&self) -> NodeId {
        match self {
            Type::Var { id, .. } | Type::Con { id, .. } | Type::Arrow { id, .. } => *id,
        }
    }
}
