use crate::config::ChunkerConfig;
use crate::language::Language;
use crate::types::{
    Chunk, ChunkKind, Edges, Neighbors, Prelude, Unit, UnitInfo, UnitInfoKind,
};

/// Character cap per prelude line for whole-file chunks: bounds the prelude
/// even when the file is a handful of pathologically long lines.
const PRELUDE_CHARS_PER_LINE: usize = 50;

/// Line prefixes that survive prelude filtering. Unit preludes keep only
/// declarative context (imports, constants, comments, blanks) so a chunk does
/// not repeat unrelated sibling-unit bodies.
const DECLARATIVE_PREFIXES: &[&str] = &[
    "import ", "from ", "const ", "let ", "var ", "//", "#", "/*", "package ", "use ",
];

/// Builds immutable `Chunk`s from file content plus the splitter's units.
///
/// The builder does no IO and never fails: identity, spans, preludes,
/// neighbor links and summaries are all derived deterministically from its
/// inputs.
pub struct ChunkBuilder {
    config: ChunkerConfig,
}

impl ChunkBuilder {
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// One `kind=file` chunk covering the entire content. Used for files at
    /// or below the size threshold, and as the fallback when splitting finds
    /// no units.
    pub fn file_chunk(
        &self,
        path: &str,
        name: &str,
        language: Language,
        content_hash: &str,
        content: &str,
        imports: &[String],
    ) -> Chunk {
        let line_count = content.split('\n').count();
        let prelude_cap = self.config.prelude_lines * PRELUDE_CHARS_PER_LINE;
        let prelude_content: String = content.chars().take(prelude_cap).collect();

        Chunk {
            chunk_id: format!("{content_hash}:0:{}", content.len()),
            kind: ChunkKind::File,
            path: path.to_string(),
            language,
            parent_content_hash: None,
            byte_start: 0,
            byte_end: content.len(),
            prelude: Prelude {
                line_span: [0, line_count.min(self.config.prelude_lines)],
                content: prelude_content,
            },
            unit_info: UnitInfo {
                kind: UnitInfoKind::File,
                name: name.to_string(),
                span_lines: [0, line_count],
                content: content.to_string(),
            },
            neighbors: Neighbors::default(),
            summary: format!("Complete {} file: {}", language.as_str(), path),
            edges: Edges {
                calls: imports.to_vec(),
                called_by: Vec::new(),
            },
        }
    }

    /// One `kind=unit` chunk per unit, with neighbor links taken purely from
    /// list order. `units` must come from `detect_units` on the same content.
    pub fn unit_chunks(
        &self,
        path: &str,
        language: Language,
        content_hash: &str,
        content: &str,
        units: &[Unit],
    ) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(units.len());

        for (i, unit) in units.iter().enumerate() {
            let previous = i.checked_sub(1).map(|p| units[p].name.clone());
            let next = units.get(i + 1).map(|n| n.name.clone());

            chunks.push(Chunk {
                chunk_id: format!("{content_hash}:{}:{}", unit.start_byte, unit.end_byte),
                kind: ChunkKind::Unit,
                path: path.to_string(),
                language,
                parent_content_hash: Some(content_hash.to_string()),
                byte_start: unit.start_byte,
                byte_end: unit.end_byte,
                prelude: self.unit_prelude(content, unit.start_byte),
                unit_info: UnitInfo {
                    kind: UnitInfoKind::from(unit.kind),
                    name: unit.name.clone(),
                    span_lines: [unit.start_line, unit.end_line],
                    content: content[unit.start_byte..unit.end_byte].to_string(),
                },
                neighbors: Neighbors { previous, next },
                summary: format!("{} {}", unit.kind.as_str(), unit.name),
                edges: Edges {
                    calls: unit.calls.clone(),
                    called_by: unit.called_by.clone(),
                },
            });
        }

        chunks
    }

    /// Leading declarative lines preceding `unit_start`, capped at
    /// `prelude_lines` and filtered to imports/constants/comments/blanks.
    fn unit_prelude(&self, content: &str, unit_start: usize) -> Prelude {
        let head = &content[..unit_start.min(content.len())];

        let filtered: Vec<&str> = head
            .split('\n')
            .take(self.config.prelude_lines)
            .filter(|line| is_declarative_line(line))
            .collect();

        let content = filtered.join("\n");
        let line_count = if content.is_empty() {
            0
        } else {
            content.split('\n').count()
        };

        Prelude {
            content,
            line_span: [0, line_count],
        }
    }
}

fn is_declarative_line(line: &str) -> bool {
    let stripped = line.trim();
    stripped.is_empty()
        || DECLARATIVE_PREFIXES
            .iter()
            .any(|prefix| stripped.starts_with(prefix))
}
