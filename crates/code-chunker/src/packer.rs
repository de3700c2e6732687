use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::types::Chunk;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Rough tokens-per-word ratio for LLM tokenizers.
const TOKENS_PER_WORD: f64 = 1.3;

/// Flat allowance for the serialization and prompt scaffolding wrapped
/// around each chunk downstream.
const TOKEN_OVERHEAD: usize = 500;

/// Estimate the downstream token cost of one chunk.
///
/// Word count over prelude + unit content, scaled by ~1.3 tokens per word,
/// plus a fixed overhead. A documented heuristic, not a tokenizer: callers
/// should rely on monotonicity (more content, more tokens), never exact
/// values.
#[must_use]
pub fn estimate_chunk_tokens(chunk: &Chunk) -> usize {
    let words = chunk.prelude.content.unicode_words().count()
        + chunk.unit_info.content.unicode_words().count();
    (words as f64 * TOKENS_PER_WORD) as usize + TOKEN_OVERHEAD
}

/// A budget-respecting batch of chunks for one downstream call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkGroup {
    pub chunks: Vec<Chunk>,
    pub estimated_tokens: usize,
}

impl ChunkGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// A chunk excluded from every group because its estimate exceeds the
/// per-chunk cap. Reported, never silently truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OversizedChunk {
    pub chunk_id: String,
    pub path: String,
    pub estimated_tokens: usize,
}

/// Result of packing: emitted groups plus the oversized skip list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingOutcome {
    pub groups: Vec<ChunkGroup>,
    pub oversized: Vec<OversizedChunk>,
}

/// Partition an ordered chunk sequence into budget-respecting groups.
///
/// Greedy single-pass, first-fit streaming packing over the input order:
/// a group closes when the next chunk would push it past
/// `max_tokens_per_group` or `max_chunks_per_group`. Deterministic; not
/// optimal bin packing, and optimality is not a goal.
pub fn group_chunks(chunks: &[Chunk], config: &ChunkerConfig) -> Result<PackingOutcome> {
    config.validate()?;

    let mut outcome = PackingOutcome::default();
    let mut current = ChunkGroup::default();

    for chunk in chunks {
        let tokens = estimate_chunk_tokens(chunk);

        if tokens > config.max_tokens_per_chunk {
            log::warn!(
                "Chunk {} ({} tokens) exceeds per-chunk cap of {}; excluded from grouping",
                chunk.chunk_id,
                tokens,
                config.max_tokens_per_chunk
            );
            outcome.oversized.push(OversizedChunk {
                chunk_id: chunk.chunk_id.clone(),
                path: chunk.path.clone(),
                estimated_tokens: tokens,
            });
            continue;
        }

        let over_budget = current.estimated_tokens + tokens > config.max_tokens_per_group;
        let over_count = current.len() >= config.max_chunks_per_group;
        if (over_budget || over_count) && !current.is_empty() {
            outcome.groups.push(std::mem::take(&mut current));
        }

        current.chunks.push(chunk.clone());
        current.estimated_tokens += tokens;
    }

    if !current.is_empty() {
        outcome.groups.push(current);
    }

    Ok(outcome)
}
