use once_cell::sync::Lazy;
use regex::Regex;
use repochunk_code_chunker::Language;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Filename stems that mark likely entry points (substring match,
/// case-insensitive)
const ENTRY_POINT_STEMS: &[&str] = &[
    "main",
    "server",
    "app",
    "index",
    "routes",
    "entry",
    "start",
    "bootstrap",
    "init",
    "run",
];

/// Content idioms that mark an entry point regardless of filename
const ENTRY_POINT_IDIOMS: &[&str] = &[
    "if __name__ == \"__main__\"",
    "func main()",
    "public static void main",
    "app.listen",
    "server.listen",
];

/// Static facts about one indexed file
///
/// Immutable once created, except `centrality_score`, which the pipeline
/// writes exactly once after scoring. A file that fails UTF-8 decoding still
/// gets a record (`language = binary`, empty metadata) rather than vanishing
/// from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Repository-relative path (unique key)
    pub path: String,
    pub size_bytes: usize,
    /// SHA-256 hex digest of the raw bytes
    pub content_hash: String,
    pub language: Language,
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub symbols: Vec<String>,
    pub is_entry_point: bool,
    /// Normalized to [0, 1] by the centrality scorer
    pub centrality_score: f64,
}

/// A record plus the decoded content it was derived from (`None` for binary)
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub record: FileRecord,
    pub content: Option<String>,
}

/// Per-file analysis outcome; skips carry an inspectable reason instead of
/// being swallowed
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Indexed(AnalyzedFile),
    Skipped { path: String, reason: String },
}

/// Analyze a single file: hash, language, shallow static facts.
///
/// IO failure skips the file with a reason; decode failure degrades to a
/// binary record. Neither aborts the surrounding run.
pub fn analyze_file(abs_path: &Path, rel_path: &str) -> FileOutcome {
    let bytes = match std::fs::read(abs_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return FileOutcome::Skipped {
                path: rel_path.to_string(),
                reason: format!("read failed: {e}"),
            }
        }
    };

    let size_bytes = bytes.len();
    let content_hash = format!("{:x}", Sha256::digest(&bytes));

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            return FileOutcome::Indexed(AnalyzedFile {
                record: FileRecord {
                    path: rel_path.to_string(),
                    size_bytes,
                    content_hash,
                    language: Language::Binary,
                    imports: Vec::new(),
                    exports: Vec::new(),
                    symbols: Vec::new(),
                    is_entry_point: false,
                    centrality_score: 0.0,
                },
                content: None,
            })
        }
    };

    let language = Language::from_path(rel_path);
    let record = FileRecord {
        path: rel_path.to_string(),
        size_bytes,
        content_hash,
        language,
        imports: extract_imports(&content, language),
        exports: extract_exports(&content, language),
        symbols: extract_symbols(&content, language),
        is_entry_point: is_entry_point(abs_path, &content),
        centrality_score: 0.0,
    };

    FileOutcome::Indexed(AnalyzedFile {
        record,
        content: Some(content),
    })
}

static PY_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:from\s+(\S+)\s+)?import\s+([^\r\n]+)").unwrap());
static JS_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)\s+from\s+['"]([^'"]+)['"]"#).unwrap()
});
static GO_IMPORT_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^import\s+"([^"]+)""#).unwrap());
static GO_IMPORT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)import\s*\(([^)]*)\)").unwrap());
static GO_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static PY_ALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"__all__\s*=\s*\[([^\]]+)\]").unwrap());
static JS_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:function\s+(\w+)|const\s+(\w+)|class\s+(\w+)|interface\s+(\w+))",
    )
    .unwrap()
});

static PY_CLASS_SYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^class\s+(\w+)").unwrap());
static PY_DEF_SYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^def\s+(\w+)").unwrap());
static JS_CLASS_SYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:export\s+)?class\s+(\w+)").unwrap());
static JS_FUNC_SYM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:export\s+)?(?:function\s+(\w+)|const\s+(\w+)\s*=\s*(?:async\s+)?\()")
        .unwrap()
});
static GO_FUNC_SYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^func\s+(\w+)").unwrap());
static GO_TYPE_SYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^type\s+(\w+)").unwrap());

/// Raw import-target strings, language-specific syntax, best effort.
/// Languages without a rule set yield an empty list by design.
pub(crate) fn extract_imports(content: &str, language: Language) -> Vec<String> {
    let mut imports = Vec::new();

    match language {
        Language::Python => {
            for caps in PY_IMPORT.captures_iter(content) {
                let target = caps[2].trim();
                match caps.get(1) {
                    Some(module) => imports.push(format!("{}.{}", module.as_str(), target)),
                    None => imports.push(target.to_string()),
                }
            }
        }
        Language::JavaScript | Language::TypeScript => {
            for caps in JS_IMPORT.captures_iter(content) {
                imports.push(caps[1].to_string());
            }
        }
        Language::Go => {
            for caps in GO_IMPORT_SINGLE.captures_iter(content) {
                imports.push(caps[1].to_string());
            }
            for block in GO_IMPORT_BLOCK.captures_iter(content) {
                for caps in GO_QUOTED.captures_iter(&block[1]) {
                    imports.push(caps[1].to_string());
                }
            }
        }
        _ => {}
    }

    imports
}

/// Exported symbol names, best effort; empty when the language has no
/// explicit export syntax.
pub(crate) fn extract_exports(content: &str, language: Language) -> Vec<String> {
    let mut exports = Vec::new();

    match language {
        Language::Python => {
            if let Some(caps) = PY_ALL.captures(content) {
                for entry in caps[1].split(',') {
                    let name = entry.trim().trim_matches(|c| c == '\'' || c == '"');
                    if !name.is_empty() {
                        exports.push(name.to_string());
                    }
                }
            }
        }
        Language::JavaScript | Language::TypeScript => {
            for caps in JS_EXPORT.captures_iter(content) {
                if let Some(name) = caps.iter().skip(1).flatten().next() {
                    exports.push(name.as_str().to_string());
                }
            }
        }
        _ => {}
    }

    exports
}

/// Top-level declared class/function names, best effort.
pub(crate) fn extract_symbols(content: &str, language: Language) -> Vec<String> {
    let mut symbols = Vec::new();

    match language {
        Language::Python => {
            for caps in PY_CLASS_SYM.captures_iter(content) {
                symbols.push(caps[1].to_string());
            }
            for caps in PY_DEF_SYM.captures_iter(content) {
                symbols.push(caps[1].to_string());
            }
        }
        Language::JavaScript | Language::TypeScript => {
            for caps in JS_CLASS_SYM.captures_iter(content) {
                symbols.push(caps[1].to_string());
            }
            for caps in JS_FUNC_SYM.captures_iter(content) {
                if let Some(name) = caps.iter().skip(1).flatten().next() {
                    symbols.push(name.as_str().to_string());
                }
            }
        }
        Language::Go => {
            for caps in GO_FUNC_SYM.captures_iter(content) {
                symbols.push(caps[1].to_string());
            }
            for caps in GO_TYPE_SYM.captures_iter(content) {
                symbols.push(caps[1].to_string());
            }
        }
        _ => {}
    }

    symbols
}

/// Entry-point check: filename stem vocabulary OR'd with content idioms.
/// Substring stem matching is deliberate and over-approximates (e.g.
/// "domain" contains "main").
fn is_entry_point(path: &Path, content: &str) -> bool {
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        let stem = stem.to_lowercase();
        if ENTRY_POINT_STEMS.iter().any(|p| stem.contains(p)) {
            return true;
        }
    }

    ENTRY_POINT_IDIOMS.iter().any(|i| content.contains(i))
}
