//! # Repochunk Indexer
//!
//! Repository indexing and chunking pipeline for size-limited downstream
//! analysis.
//!
//! ## Pipeline
//!
//! ```text
//! Repository root
//!     │
//!     ├──> File Scanner (gitignore aware, noise-dir filtered)
//!     │      └─> candidate paths, sorted
//!     │
//!     ├──> File Analyzer
//!     │      └─> FileRecord (hash, language, imports/exports/symbols,
//!     │          entry-point flag) per file; binary/degraded, never dropped
//!     │
//!     ├──> Centrality Scorer ──> path -> score map (joined back once)
//!     │
//!     ├──> Traversal Planner ──> priority order
//!     │
//!     └──> Chunk Builder (per file, unit split above threshold)
//!            └─> ChunkingResult { chunks, records, order, stats }
//! ```
//!
//! The pipeline is single-threaded and synchronous; every per-file failure is
//! recoverable and recorded, only bad config or an unusable root is fatal.
//!
//! ## Example
//!
//! ```no_run
//! use repochunk_indexer::{chunk_repository, group_chunks, ChunkerConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ChunkerConfig::default();
//!     let result = chunk_repository("/path/to/project", &config)?;
//!
//!     println!(
//!         "Indexed {} files into {} chunks",
//!         result.stats.total_files, result.stats.total_chunks
//!     );
//!
//!     let packed = group_chunks(&result.chunks, &config)?;
//!     println!("{} analysis groups", packed.groups.len());
//!     Ok(())
//! }
//! ```

mod analyzer;
mod centrality;
mod error;
mod pipeline;
mod scanner;
mod stats;
mod traversal;

pub use analyzer::{analyze_file, AnalyzedFile, FileOutcome, FileRecord};
pub use centrality::{centrality_scores, ENTRY_POINT_BONUS};
pub use error::{IndexerError, Result};
pub use pipeline::{chunk_repository, repo_id, ChunkingResult};
pub use scanner::FileScanner;
pub use stats::{ChunkingStats, SkippedFile};
pub use traversal::traversal_order;

// Re-export the per-file engine so pipeline consumers need only one crate.
pub use repochunk_code_chunker::{
    detect_units, estimate_chunk_tokens, group_chunks, Chunk, ChunkBuilder, ChunkGroup, ChunkKind,
    ChunkerConfig, Language, OversizedChunk, PackingOutcome, Unit, UnitKind,
};
