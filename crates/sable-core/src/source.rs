//! Source storage and the node position index.
//!
//! The parser registers every file it reads in a [`SourceMap`] and records a
//! [`Span`] for every node it builds in a [`PositionIndex`]. Analysis only
//! ever handles `NodeId`s; positions are looked up when diagnostics render.

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::name::NodeId;

/// Lightweight handle to a source in a compilation session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(u32);

impl SourceId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Describes the origin of a source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// A file with its path.
    File(String),
    /// In-memory source with a display name (REPL input, test fixtures).
    Virtual(String),
}

impl SourceKind {
    /// Returns the display name for diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::File(path) | SourceKind::Virtual(path) => path,
        }
    }
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

/// Registry of all sources.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file source with its path.
    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::File(path.to_owned()), content)
    }

    /// Add an in-memory source under a display name.
    pub fn add_virtual(&mut self, name: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::Virtual(name.to_owned()), content)
    }

    /// Read a file from disk and register it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> io::Result<SourceId> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(self.push_entry(
            SourceKind::File(path.display().to_string()),
            &content,
        ))
    }

    /// Get the content of a source by ID.
    pub fn content(&self, id: SourceId) -> &str {
        self.entry(id).content.as_str()
    }

    /// Get the kind of a source by ID.
    pub fn kind(&self, id: SourceId) -> &SourceKind {
        &self.entry(id).kind
    }

    pub fn display_name(&self, id: SourceId) -> &str {
        self.entry(id).kind.display_name()
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to
    /// the end of the source; offsets inside a character clamp to its start.
    pub fn line_col(&self, id: SourceId, offset: u32) -> (u32, u32) {
        let content = self.content(id);
        let mut offset = (offset as usize).min(content.len());
        while !content.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &content[..offset];
        let line = before.matches('\n').count() as u32 + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = before[line_start..].chars().count() as u32 + 1;
        (line, col)
    }

    /// Number of sources in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: SourceId) -> &SourceEntry {
        self.entries.get(id.0 as usize).expect("invalid SourceId")
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: content.to_owned(),
        });
        id
    }
}

/// A byte range within one source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    pub source: SourceId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(source: SourceId, start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start after end");
        Self { source, start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Maps every node to the span it was parsed from.
#[derive(Clone, Debug, Default)]
pub struct PositionIndex {
    spans: IndexMap<NodeId, Span>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the span of a node. Returns the previous span if the id was
    /// already present.
    pub fn insert(&mut self, id: NodeId, span: Span) -> Option<Span> {
        self.spans.insert(id, span)
    }

    pub fn get(&self, id: NodeId) -> Option<Span> {
        self.spans.get(&id).copied()
    }

    /// The source a node came from.
    pub fn source(&self, id: NodeId) -> Option<SourceId> {
        self.get(id).map(|span| span.source)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.spans.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
