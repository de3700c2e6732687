//! End-to-end pipeline tests over small on-disk repositories.

use anyhow::Result;
use pretty_assertions::assert_eq;
use repochunk_indexer::{
    chunk_repository, group_chunks, ChunkKind, ChunkerConfig, ChunkingResult, Language,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIN_PY: &str = "import utils\n\nif __name__ == \"__main__\":\n    print(utils.helper())\n";

const UTILS_PY: &str = "__all__ = [\"helper\", \"other\"]\n\n\ndef helper():\n    return \"helper\"\n\n\ndef other():\n    return \"other\"\n";

const README_MD: &str = "# Demo\n\nSmall demo repository used in tests.\n";

/// Three-file fixture: an entry point, a shared utility module large enough
/// to be split into units, and a leaf document.
fn write_demo_repo(root: &Path) -> Result<()> {
    fs::write(root.join("main.py"), MAIN_PY)?;
    fs::write(root.join("utils.py"), UTILS_PY)?;
    fs::write(root.join("README.md"), README_MD)?;
    Ok(())
}

/// Low threshold so `utils.py` (101 bytes) is unit-split while the other two
/// files stay whole.
fn demo_config() -> ChunkerConfig {
    ChunkerConfig {
        size_threshold_bytes: 80,
        ..Default::default()
    }
}

#[test]
fn chunks_demo_repo_in_priority_order() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let result = chunk_repository(temp.path(), &demo_config())?;

    // Entry point first, then by centrality, then by size.
    assert_eq!(
        result.traversal_order,
        vec![
            "main.py".to_string(),
            "utils.py".to_string(),
            "README.md".to_string()
        ]
    );

    assert_eq!(result.repo_id.len(), 16);
    assert_eq!(result.stats.total_files, 3);
    assert_eq!(result.stats.total_chunks, 4);
    assert_eq!(result.stats.chunks_by_kind.get("file"), Some(&2));
    assert_eq!(result.stats.chunks_by_kind.get("unit"), Some(&2));
    assert_eq!(
        result.stats.languages_detected,
        vec!["markdown".to_string(), "python".to_string()]
    );
    assert!(result.stats.skipped_files.is_empty());

    Ok(())
}

#[test]
fn entry_point_and_centrality_flow_into_records() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let result = chunk_repository(temp.path(), &demo_config())?;

    let record = |path: &str| {
        result
            .file_records
            .iter()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no record for {path}"))
    };

    let main = record("main.py");
    assert!(main.is_entry_point);
    assert_eq!(main.centrality_score, 1.0);
    assert_eq!(main.imports, vec!["utils".to_string()]);

    // Two exported names, each provided by one file, against a max raw
    // score of 10 from the entry bonus.
    let utils = record("utils.py");
    assert!(!utils.is_entry_point);
    assert!((utils.centrality_score - 0.2).abs() < 1e-9);
    assert_eq!(utils.exports, vec!["helper".to_string(), "other".to_string()]);

    assert_eq!(record("README.md").centrality_score, 0.0);

    Ok(())
}

#[test]
fn large_file_splits_into_linked_unit_chunks() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let result = chunk_repository(temp.path(), &demo_config())?;

    let units: Vec<_> = result
        .chunks
        .iter()
        .filter(|c| c.path == "utils.py")
        .collect();
    assert_eq!(units.len(), 2);

    let helper = units[0];
    let other = units[1];

    assert_eq!(helper.kind, ChunkKind::Unit);
    assert_eq!(helper.unit_info.name, "helper");
    assert!(helper.unit_info.content.contains("return \"helper\""));
    assert_eq!(helper.neighbors.previous, None);
    assert_eq!(helper.neighbors.next, Some("other".to_string()));

    assert_eq!(other.unit_info.name, "other");
    assert_eq!(other.neighbors.previous, Some("helper".to_string()));
    assert_eq!(other.neighbors.next, None);

    // Units cover disjoint, ascending byte ranges of the parent file.
    assert!(helper.byte_end <= other.byte_start);

    let hash = helper.parent_content_hash.as_deref().unwrap();
    assert_eq!(
        helper.chunk_id,
        format!("{hash}:{}:{}", helper.byte_start, helper.byte_end)
    );

    // Assignments are not declarative context, so the unit prelude drops
    // the `__all__` line instead of repeating it in every chunk.
    assert!(!helper.prelude.content.contains("__all__"));

    Ok(())
}

#[test]
fn small_files_become_whole_file_chunks() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let result = chunk_repository(temp.path(), &demo_config())?;

    let main = result
        .chunks
        .iter()
        .find(|c| c.path == "main.py")
        .expect("main.py chunk");
    assert_eq!(main.kind, ChunkKind::File);
    assert_eq!(main.language, Language::Python);
    assert_eq!(main.byte_start, 0);
    assert_eq!(main.byte_end, MAIN_PY.len());
    assert_eq!(main.edges.calls, vec!["utils".to_string()]);
    assert!(main.chunk_id.ends_with(&format!(":0:{}", MAIN_PY.len())));

    let readme = result
        .chunks
        .iter()
        .find(|c| c.path == "README.md")
        .expect("README.md chunk");
    assert_eq!(readme.kind, ChunkKind::File);
    assert_eq!(readme.language, Language::Markdown);

    Ok(())
}

#[test]
fn large_ruleless_file_falls_back_to_one_file_chunk() -> Result<()> {
    let temp = TempDir::new()?;
    let notes = format!("# Notes\n\n{}", "A line of prose.\n".repeat(60));
    fs::write(temp.path().join("NOTES.md"), &notes)?;

    let config = demo_config();
    assert!(notes.len() > config.size_threshold_bytes);

    let result = chunk_repository(temp.path(), &config)?;

    // Markdown has no splitting rules, so even an oversized file stays one
    // whole-file chunk.
    assert_eq!(result.chunks.len(), 1);
    let chunk = &result.chunks[0];
    assert_eq!(chunk.kind, ChunkKind::File);
    assert_eq!(chunk.language, Language::Markdown);
    assert_eq!(chunk.byte_start, 0);
    assert_eq!(chunk.byte_end, notes.len());
    assert_eq!(chunk.unit_info.content, notes);

    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let config = demo_config();
    let first = serde_json::to_string(&chunk_repository(temp.path(), &config)?)?;
    let second = serde_json::to_string(&chunk_repository(temp.path(), &config)?)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn binary_files_are_indexed_not_dropped() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("blob.dat"), [0u8, 159, 146, 150])?;

    let result = chunk_repository(temp.path(), &ChunkerConfig::default())?;

    assert_eq!(result.file_records.len(), 1);
    let record = &result.file_records[0];
    assert_eq!(record.language, Language::Binary);
    assert_eq!(record.size_bytes, 4);
    assert!(record.symbols.is_empty());

    // Still represented in the chunk stream, with placeholder content.
    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].kind, ChunkKind::File);
    assert_eq!(result.chunks[0].unit_info.content, "[binary file]");

    Ok(())
}

#[test]
fn ignored_scopes_are_excluded_end_to_end() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;
    fs::create_dir_all(temp.path().join("node_modules/pkg"))?;
    fs::write(temp.path().join("node_modules/pkg/index.js"), "module.exports = 1;\n")?;
    fs::write(temp.path().join("debug.log"), "noise\n")?;

    let result = chunk_repository(temp.path(), &demo_config())?;

    assert_eq!(result.stats.total_files, 3);
    assert!(result
        .file_records
        .iter()
        .all(|r| !r.path.starts_with("node_modules") && r.path != "debug.log"));

    Ok(())
}

#[test]
fn result_round_trips_through_json() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let result = chunk_repository(temp.path(), &demo_config())?;
    let json = serde_json::to_string(&result)?;
    let restored: ChunkingResult = serde_json::from_str(&json)?;

    assert_eq!(restored.repo_id, result.repo_id);
    assert_eq!(restored.chunks, result.chunks);
    assert_eq!(restored.traversal_order, result.traversal_order);

    Ok(())
}

#[test]
fn pipeline_output_packs_within_limits() -> Result<()> {
    let temp = TempDir::new()?;
    write_demo_repo(temp.path())?;

    let config = demo_config();
    let result = chunk_repository(temp.path(), &config)?;
    let packed = group_chunks(&result.chunks, &config)?;

    assert!(packed.oversized.is_empty());
    let grouped: usize = packed.groups.iter().map(|g| g.len()).sum();
    assert_eq!(grouped, result.chunks.len());

    for group in &packed.groups {
        assert!(group.len() <= config.max_chunks_per_group);
        assert!(group.estimated_tokens <= config.max_tokens_per_group);
    }

    Ok(())
}
