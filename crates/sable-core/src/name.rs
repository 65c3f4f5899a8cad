//! Identifiers: node handles, namespaces and fully qualified names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique handle attached to every AST node by the parser.
///
/// Ids are allocated monotonically and never reused. They are the only key
/// for recovering a node's source position.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic `NodeId` allocator.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume allocation after the ids of an already parsed batch.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

/// Ordered path segments naming a module or a synthetic lexical scope.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// The empty namespace, carried by unqualified occurrences.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a `::`-separated path. An empty string yields the empty namespace.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::empty();
        }
        Self::new(path.split("::"))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A nested namespace with one extra trailing segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// The enclosing namespace, or `None` for the empty namespace.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// True if `self` equals `prefix` or is nested inside it.
    pub fn starts_with(&self, prefix: &Namespace) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The fully qualified name of `ident` in this namespace.
    pub fn name(&self, ident: impl Into<String>) -> Name {
        Name::new(self.clone(), ident)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("::"))
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// A namespace plus an identifier; the fully qualified form of a symbol.
///
/// Unqualified occurrences carry an empty namespace until resolved.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Name {
    pub namespace: Namespace,
    pub ident: String,
}

impl Name {
    pub fn new(namespace: Namespace, ident: impl Into<String>) -> Self {
        Self {
            namespace,
            ident: ident.into(),
        }
    }

    pub fn unqualified(ident: impl Into<String>) -> Self {
        Self::new(Namespace::empty(), ident)
    }

    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.ident)
        } else {
            write!(f, "{}::{}", self.namespace, self.ident)
        }
    }
}
