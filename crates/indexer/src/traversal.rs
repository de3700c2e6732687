use crate::analyzer::FileRecord;

/// Compute the priority order in which files should be visited downstream.
///
/// Stable sort by `(is_entry_point desc, centrality desc, size asc)`: entry
/// points always come first regardless of centrality, higher centrality wins
/// within a class, and smaller files break ties to surface cheap, complete
/// context early. Records with fully identical keys keep their indexer
/// order, which keeps fixtures reproducible.
pub fn traversal_order(records: &[FileRecord]) -> Vec<String> {
    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.is_entry_point
            .cmp(&a.is_entry_point)
            .then_with(|| b.centrality_score.total_cmp(&a.centrality_score))
            .then_with(|| a.size_bytes.cmp(&b.size_bytes))
    });
    sorted.into_iter().map(|r| r.path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repochunk_code_chunker::Language;

    fn record(path: &str, is_entry_point: bool, centrality: f64, size: usize) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size_bytes: size,
            content_hash: "hash".to_string(),
            language: Language::Python,
            imports: Vec::new(),
            exports: Vec::new(),
            symbols: Vec::new(),
            is_entry_point,
            centrality_score: centrality,
        }
    }

    #[test]
    fn entry_points_precede_higher_centrality_files() {
        let records = vec![
            record("central.py", false, 0.9, 10),
            record("main.py", true, 0.1, 1_000),
        ];
        assert_eq!(traversal_order(&records), vec!["main.py", "central.py"]);
    }

    #[test]
    fn centrality_orders_within_a_class() {
        let records = vec![
            record("low.py", false, 0.2, 10),
            record("high.py", false, 0.8, 10),
        ];
        assert_eq!(traversal_order(&records), vec!["high.py", "low.py"]);
    }

    #[test]
    fn smaller_files_break_centrality_ties() {
        let records = vec![
            record("big.py", false, 0.5, 9_000),
            record("small.py", false, 0.5, 90),
        ];
        assert_eq!(traversal_order(&records), vec!["small.py", "big.py"]);
    }

    #[test]
    fn identical_keys_keep_indexer_order() {
        let records = vec![
            record("first.py", false, 0.0, 100),
            record("second.py", false, 0.0, 100),
            record("third.py", false, 0.0, 100),
        ];
        assert_eq!(
            traversal_order(&records),
            vec!["first.py", "second.py", "third.py"]
        );
    }
}
