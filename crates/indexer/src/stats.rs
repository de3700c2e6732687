use crate::analyzer::FileRecord;
use repochunk_code_chunker::Chunk;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A file the pipeline could not analyze, with the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Summary statistics for one chunking run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingStats {
    pub total_files: usize,
    pub total_chunks: usize,
    pub chunks_by_kind: BTreeMap<String, usize>,
    /// Sorted, deduplicated language tags seen across the index
    pub languages_detected: Vec<String>,
    /// Files that could not be analyzed; never dropped without a trace
    pub skipped_files: Vec<SkippedFile>,
}

impl ChunkingStats {
    /// Derive stats from the finished pipeline outputs
    pub fn collect(
        records: &[FileRecord],
        chunks: &[Chunk],
        skipped_files: Vec<SkippedFile>,
    ) -> Self {
        let mut chunks_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for chunk in chunks {
            *chunks_by_kind
                .entry(chunk.kind.as_str().to_string())
                .or_insert(0) += 1;
        }

        let languages: BTreeSet<&str> = records.iter().map(|r| r.language.as_str()).collect();

        Self {
            total_files: records.len(),
            total_chunks: chunks.len(),
            chunks_by_kind,
            languages_detected: languages.into_iter().map(str::to_string).collect(),
            skipped_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repochunk_code_chunker::{ChunkBuilder, ChunkerConfig, Language};

    fn record(path: &str, language: Language) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size_bytes: 10,
            content_hash: "hash".to_string(),
            language,
            imports: Vec::new(),
            exports: Vec::new(),
            symbols: Vec::new(),
            is_entry_point: false,
            centrality_score: 0.0,
        }
    }

    #[test]
    fn collects_counts_kinds_and_languages() {
        let records = vec![
            record("a.py", Language::Python),
            record("b.py", Language::Python),
            record("c.md", Language::Markdown),
        ];
        let builder = ChunkBuilder::new(ChunkerConfig::default());
        let chunks = vec![
            builder.file_chunk("a.py", "a", Language::Python, "h1", "x = 1\n", &[]),
            builder.file_chunk("c.md", "c", Language::Markdown, "h2", "# c\n", &[]),
        ];

        let stats = ChunkingStats::collect(
            &records,
            &chunks,
            vec![SkippedFile {
                path: "locked.py".to_string(),
                reason: "read failed".to_string(),
            }],
        );

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_chunks, 2);
        assert_eq!(stats.chunks_by_kind["file"], 2);
        assert_eq!(
            stats.languages_detected,
            vec!["markdown".to_string(), "python".to_string()]
        );
        assert_eq!(stats.skipped_files.len(), 1);
    }
}
