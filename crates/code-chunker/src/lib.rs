//! # Repochunk Code Chunker
//!
//! Heuristic, budget-aware code chunking for size-limited downstream
//! consumers.
//!
//! ## Philosophy
//!
//! The chunker slices repository content into bounded fragments that:
//! - Respect declaration boundaries (classes, functions) where they can be
//!   found cheaply
//! - Carry a filtered prelude (imports, constants, comments) so a fragment
//!   stays intelligible on its own
//! - Never exceed a caller-supplied token budget per processing group
//!
//! Boundary detection is deliberately regex/line based, not a real parser.
//! False negatives are tolerated: a file whose language has no rule set, or
//! where no unit is found, becomes a single whole-file chunk.
//!
//! ## Architecture
//!
//! ```text
//! File content
//!     │
//!     ├──> Language table (extension only)
//!     │
//!     ├──> Unit Splitter (indent tracking / brace tracking)
//!     │      └─> Unit[] (ascending, non-overlapping)
//!     │
//!     ├──> Chunk Builder
//!     │      ├─> prelude extraction
//!     │      ├─> neighbor links
//!     │      └─> Chunk[] with stable ids
//!     │
//!     └──> Group Packer (greedy, first-fit, streaming)
//!            └─> ChunkGroup[] within hard token/count ceilings
//! ```
//!
//! ## Example
//!
//! ```rust
//! use repochunk_code_chunker::{detect_units, Language};
//!
//! let source = "def helper():\n    return 1\n\ndef other():\n    return 2\n";
//! let units = detect_units(source, Language::Python);
//!
//! assert_eq!(units.len(), 2);
//! assert_eq!(units[0].name, "helper");
//! assert_eq!(&source[units[0].start_byte..units[0].end_byte], "def helper():\n    return 1\n\n");
//! ```

mod builder;
mod config;
mod error;
mod language;
mod packer;
mod splitter;
mod types;

pub use builder::ChunkBuilder;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use language::{Language, SplitFamily};
pub use packer::{
    estimate_chunk_tokens, group_chunks, ChunkGroup, OversizedChunk, PackingOutcome,
};
pub use splitter::detect_units;
pub use types::{
    Chunk, ChunkKind, Edges, Neighbors, Prelude, Unit, UnitInfo, UnitInfoKind, UnitKind,
};
