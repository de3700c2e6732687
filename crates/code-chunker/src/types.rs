use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Kind of a sub-file unit found by the splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Class,
    Function,
}

impl UnitKind {
    /// Get human-readable name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
        }
    }
}

/// A candidate sub-chunk inside one file
///
/// Lines are 0-indexed and inclusive; bytes are a `[start, end)` span into
/// the file content. Units emitted for one file are ascending by start line
/// and never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_byte: usize,
    pub end_byte: usize,

    /// Populated only when caller-side analysis provides them; empty by
    /// default, no cross-unit call graph is computed here
    #[serde(default)]
    pub calls: Vec<String>,
    #[serde(default)]
    pub called_by: Vec<String>,
}

impl Unit {
    /// Number of lines covered by this unit
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Byte length of the unit span
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }
}

/// Closed two-variant chunk tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Whole small file
    File,
    /// Sub-unit of a large file
    Unit,
}

impl ChunkKind {
    /// Get human-readable name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Unit => "unit",
        }
    }
}

/// Filtered leading context attached to a chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prelude {
    pub content: String,
    /// `[first, last)` line numbers the prelude was taken from
    pub line_span: [usize; 2],
}

/// Kind tag inside `UnitInfo`; whole-file chunks carry `File`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitInfoKind {
    File,
    Class,
    Function,
}

impl From<UnitKind> for UnitInfoKind {
    fn from(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Class => Self::Class,
            UnitKind::Function => Self::Function,
        }
    }
}

/// Payload describing what a chunk contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub kind: UnitInfoKind,
    pub name: String,
    pub span_lines: [usize; 2],
    pub content: String,
}

/// Names of the adjacent units in the same file, absent at file boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Call edges carried on a chunk; empty unless caller-side analysis fills them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    #[serde(default)]
    pub calls: Vec<String>,
    #[serde(default)]
    pub called_by: Vec<String>,
}

/// A bounded, independently consumable slice of repository content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// `"{content_hash}:{byte_start}:{byte_end}"`, stable for identical
    /// content and span across runs
    pub chunk_id: String,

    pub kind: ChunkKind,
    pub path: String,
    pub language: Language,

    /// Hash of the owning file; set for unit chunks only
    pub parent_content_hash: Option<String>,

    pub byte_start: usize,
    pub byte_end: usize,

    pub prelude: Prelude,
    pub unit_info: UnitInfo,

    #[serde(default)]
    pub neighbors: Neighbors,

    /// One-line description derived from kind + name + path
    pub summary: String,

    #[serde(default)]
    pub edges: Edges,
}

impl Chunk {
    /// Number of lines covered by the chunk payload
    #[must_use]
    pub fn line_count(&self) -> usize {
        let [start, end] = self.unit_info.span_lines;
        end.saturating_sub(start) + 1
    }
}
