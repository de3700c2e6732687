use crate::analyzer::FileRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Fixed additive bonus applied to entry-point files before normalization
pub const ENTRY_POINT_BONUS: f64 = 10.0;

/// Compute a normalized centrality score per file path.
///
/// Deliberately crude proxy for "how many other files might import from this
/// file": each of a file's exports counts the number of files exporting that
/// same symbol name. Import targets are never resolved to concrete files:
/// cross-language resolution (relative paths, package aliases) is too
/// unreliable to do generically, so common export names can over-rank.
///
/// Scores are divided by the maximum raw score so results land in [0, 1];
/// when every raw score is zero they all stay zero.
pub fn centrality_scores(records: &[FileRecord]) -> BTreeMap<String, f64> {
    let mut export_map: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        for export in &record.exports {
            export_map
                .entry(export.as_str())
                .or_default()
                .insert(record.path.as_str());
        }
    }

    let mut raw: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let mut score = 0.0;
        for export in &record.exports {
            score += export_map
                .get(export.as_str())
                .map_or(0, BTreeSet::len) as f64;
        }
        if record.is_entry_point {
            score += ENTRY_POINT_BONUS;
        }
        raw.insert(record.path.clone(), score);
    }

    let max_score = raw.values().copied().fold(0.0_f64, f64::max);
    if max_score > 0.0 {
        for score in raw.values_mut() {
            *score /= max_score;
        }
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use repochunk_code_chunker::Language;

    fn record(path: &str, exports: &[&str], is_entry_point: bool) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size_bytes: 100,
            content_hash: "hash".to_string(),
            language: Language::Python,
            imports: Vec::new(),
            exports: exports.iter().map(|s| s.to_string()).collect(),
            symbols: Vec::new(),
            is_entry_point,
            centrality_score: 0.0,
        }
    }

    #[test]
    fn entry_points_get_the_fixed_bonus() {
        let records = vec![record("main.py", &[], true), record("lib.py", &[], false)];
        let scores = centrality_scores(&records);

        assert_eq!(scores["main.py"], 1.0);
        assert_eq!(scores["lib.py"], 0.0);
    }

    #[test]
    fn shared_export_names_raise_both_files() {
        let records = vec![
            record("a.py", &["parse"], false),
            record("b.py", &["parse"], false),
            record("c.py", &["unique"], false),
        ];
        let scores = centrality_scores(&records);

        // "parse" is exported by two files, so each counts 2; "unique" counts 1.
        assert_eq!(scores["a.py"], 1.0);
        assert_eq!(scores["b.py"], 1.0);
        assert_eq!(scores["c.py"], 0.5);
    }

    #[test]
    fn all_zero_scores_stay_zero() {
        let records = vec![record("a.py", &[], false), record("b.py", &[], false)];
        let scores = centrality_scores(&records);

        assert!(scores.values().all(|s| *s == 0.0));
    }

    #[test]
    fn empty_input_is_a_noop() {
        assert!(centrality_scores(&[]).is_empty());
    }

    #[test]
    fn scores_are_normalized_into_unit_range() {
        let records = vec![
            record("hub.py", &["a", "b", "c"], true),
            record("leaf.py", &["d"], false),
        ];
        let scores = centrality_scores(&records);

        for score in scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
        assert_eq!(scores["hub.py"], 1.0);
    }
}
