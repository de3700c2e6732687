use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for chunking and grouping behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Files larger than this are split into units; smaller files become one
    /// whole-file chunk
    pub size_threshold_bytes: usize,

    /// How many leading lines are considered when building a chunk prelude
    pub prelude_lines: usize,

    /// Hard token ceiling per emitted group
    pub max_tokens_per_group: usize,

    /// Hard chunk-count ceiling per emitted group
    pub max_chunks_per_group: usize,

    /// Chunks estimated above this are excluded from every group and
    /// reported, never truncated
    pub max_tokens_per_chunk: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            size_threshold_bytes: 400_000,
            prelude_lines: 200,
            max_tokens_per_group: 15_000,
            max_chunks_per_group: 3,
            max_tokens_per_chunk: 8_000,
        }
    }
}

impl ChunkerConfig {
    /// Create config for very small downstream context windows (splits
    /// earlier, packs tighter)
    pub fn conservative() -> Self {
        Self {
            size_threshold_bytes: 50_000,
            prelude_lines: 50,
            max_tokens_per_group: 10_000,
            max_chunks_per_group: 3,
            max_tokens_per_chunk: 4_000,
        }
    }

    /// Validate configuration; called by every entry point before any file IO
    pub fn validate(&self) -> Result<()> {
        if self.size_threshold_bytes == 0 {
            return Err(ChunkerError::invalid_config(
                "size_threshold_bytes must be > 0",
            ));
        }

        if self.prelude_lines == 0 {
            return Err(ChunkerError::invalid_config("prelude_lines must be > 0"));
        }

        if self.max_tokens_per_group == 0 {
            return Err(ChunkerError::invalid_config(
                "max_tokens_per_group must be > 0",
            ));
        }

        if self.max_chunks_per_group == 0 {
            return Err(ChunkerError::invalid_config(
                "max_chunks_per_group must be >= 1",
            ));
        }

        if self.max_tokens_per_chunk == 0 {
            return Err(ChunkerError::invalid_config(
                "max_tokens_per_chunk must be > 0",
            ));
        }

        // A chunk admitted by the per-chunk cap must fit a group on its own.
        if self.max_tokens_per_chunk > self.max_tokens_per_group {
            return Err(ChunkerError::invalid_config(format!(
                "max_tokens_per_chunk ({}) cannot exceed max_tokens_per_group ({})",
                self.max_tokens_per_chunk, self.max_tokens_per_group
            )));
        }

        Ok(())
    }
}
