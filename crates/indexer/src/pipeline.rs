use crate::analyzer::{analyze_file, AnalyzedFile, FileOutcome, FileRecord};
use crate::centrality::centrality_scores;
use crate::error::{IndexerError, Result};
use crate::scanner::FileScanner;
use crate::stats::{ChunkingStats, SkippedFile};
use crate::traversal::traversal_order;
use repochunk_code_chunker::{detect_units, Chunk, ChunkBuilder, ChunkerConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Stand-in chunk content for files that failed UTF-8 decoding
const BINARY_PLACEHOLDER: &str = "[binary file]";

const REPO_ID_LEN: usize = 16;

/// Everything one chunking run produces; plain JSON-representable data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingResult {
    pub repo_id: String,
    /// Chunks in traversal order; chunks of the same file are consecutive
    /// and in unit order
    pub chunks: Vec<Chunk>,
    pub file_records: Vec<FileRecord>,
    pub traversal_order: Vec<String>,
    pub stats: ChunkingStats,
}

/// Short deterministic id for a repository root.
///
/// Derived from the root path string, not from repository content: stable
/// per path across runs, unchanged when files change. Accepted limitation.
pub fn repo_id(root: &Path) -> String {
    let digest = format!("{:x}", Sha256::digest(root.to_string_lossy().as_bytes()));
    digest[..REPO_ID_LEN].to_string()
}

/// Index, score, order and chunk a repository.
///
/// Fatal only on invalid config or an unusable root, both checked before any
/// file IO. Every per-file failure degrades that one file (binary record or
/// typed skip entry) and the run still returns a complete best-effort
/// result.
pub fn chunk_repository(root: impl AsRef<Path>, config: &ChunkerConfig) -> Result<ChunkingResult> {
    config.validate()?;

    let root = root.as_ref();
    if !root.is_dir() {
        return Err(IndexerError::InvalidRoot(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let files = FileScanner::new(root).scan();

    let mut records: Vec<FileRecord> = Vec::with_capacity(files.len());
    let mut contents: HashMap<String, String> = HashMap::new();
    let mut skipped: Vec<SkippedFile> = Vec::new();

    for abs_path in &files {
        let rel_path = abs_path
            .strip_prefix(root)
            .unwrap_or(abs_path)
            .to_string_lossy()
            .replace('\\', "/");

        match analyze_file(abs_path, &rel_path) {
            FileOutcome::Indexed(AnalyzedFile { record, content }) => {
                if let Some(content) = content {
                    contents.insert(record.path.clone(), content);
                }
                records.push(record);
            }
            FileOutcome::Skipped { path, reason } => {
                log::warn!("Skipping {path}: {reason}");
                skipped.push(SkippedFile { path, reason });
            }
        }
    }

    // Records are immutable from here on except for this single join of the
    // computed centrality scores.
    let scores = centrality_scores(&records);
    for record in &mut records {
        record.centrality_score = scores.get(&record.path).copied().unwrap_or(0.0);
    }

    let order = traversal_order(&records);

    let by_path: HashMap<&str, &FileRecord> =
        records.iter().map(|r| (r.path.as_str(), r)).collect();
    let builder = ChunkBuilder::new(config.clone());

    let mut chunks: Vec<Chunk> = Vec::new();
    for path in &order {
        let Some(record) = by_path.get(path.as_str()) else {
            continue;
        };
        chunks.extend(chunk_file(&builder, config, record, contents.get(path)));
    }

    let stats = ChunkingStats::collect(&records, &chunks, skipped);

    Ok(ChunkingResult {
        repo_id: repo_id(root),
        chunks,
        file_records: records,
        traversal_order: order,
        stats,
    })
}

/// Chunk one file: whole-file below the threshold, unit split above it,
/// whole-file fallback when splitting finds nothing.
fn chunk_file(
    builder: &ChunkBuilder,
    config: &ChunkerConfig,
    record: &FileRecord,
    content: Option<&String>,
) -> Vec<Chunk> {
    let name = Path::new(&record.path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| record.path.clone());

    let Some(content) = content else {
        // Binary files stay in the index and the chunk stream, just without
        // analyzable content.
        return vec![builder.file_chunk(
            &record.path,
            &name,
            record.language,
            &record.content_hash,
            BINARY_PLACEHOLDER,
            &record.imports,
        )];
    };

    if record.size_bytes > config.size_threshold_bytes {
        let units = detect_units(content, record.language);
        if units.is_empty() {
            log::debug!(
                "No units found in {}; falling back to a whole-file chunk",
                record.path
            );
        } else {
            return builder.unit_chunks(
                &record.path,
                record.language,
                &record.content_hash,
                content,
                &units,
            );
        }
    }

    vec![builder.file_chunk(
        &record.path,
        &name,
        record.language,
        &record.content_hash,
        content,
        &record.imports,
    )]
}
