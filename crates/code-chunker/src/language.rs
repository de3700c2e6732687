use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language tag for an indexed file
///
/// Detection is extension-only by design; `Binary` is assigned by the caller
/// when content fails UTF-8 decoding, never by the table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    CSharp,
    Rust,
    Php,
    Ruby,
    Cpp,
    C,
    Header,
    Json,
    Yaml,
    Toml,
    Markdown,
    Sql,
    Binary,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "cs" => Language::CSharp,
            "rs" => Language::Rust,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "cpp" | "cc" | "cxx" => Language::Cpp,
            "c" => Language::C,
            "h" | "hpp" | "hh" | "hxx" => Language::Header,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            "md" => Language::Markdown,
            "sql" => Language::Sql,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Header => "header",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::Sql => "sql",
            Language::Binary => "binary",
            Language::Unknown => "unknown",
        }
    }

    /// Which unit-splitting strategy applies to this language
    pub fn split_family(self) -> SplitFamily {
        match self {
            Language::Python | Language::Ruby => SplitFamily::Indent,
            Language::JavaScript
            | Language::TypeScript
            | Language::Go
            | Language::Java
            | Language::CSharp
            | Language::Rust
            | Language::Php
            | Language::Cpp
            | Language::C
            | Language::Header => SplitFamily::Brace,
            _ => SplitFamily::None,
        }
    }
}

/// Unit-boundary detection strategy for a language family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFamily {
    /// Unit ends before the next non-blank line at indent <= start indent
    Indent,
    /// Unit ends when brace depth returns to zero after opening
    Brace,
    /// No rule set: the whole file stays one chunk
    None,
}
