//! Key-based duplicate detection.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame};

use rowguard_ingest::any_to_string;
use rowguard_model::{CheckKind, CheckMetrics, CheckResult, DuplicatesConfig, Issue, Status};

use crate::util::format_pct;
use crate::{Check, missing_columns};

pub struct DuplicatesCheck {
    config: DuplicatesConfig,
}

impl DuplicatesCheck {
    pub fn new(config: DuplicatesConfig) -> Self {
        Self { config }
    }
}

impl Check for DuplicatesCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Duplicates
    }

    fn evaluate(&self, df: &DataFrame) -> CheckResult {
        run_duplicates(df, &self.config)
    }
}

/// Flag every row whose key-field tuple is shared with at least one other
/// row. Key values are compared as exact text; the standardization pre-pass
/// is expected to have normalized them already.
pub fn run_duplicates(df: &DataFrame, config: &DuplicatesConfig) -> CheckResult {
    let keys = &config.keys;
    let total_rows = df.height() as u64;

    let missing = missing_columns(df, keys);
    if !missing.is_empty() {
        let listed = missing.join(", ");
        return CheckResult {
            check: CheckKind::Duplicates,
            status: Status::Fail,
            metrics: CheckMetrics::Duplicates {
                duplicate_rows: 0,
                total_rows,
                duplicate_rate: 0.0,
            },
            notes: format!("Key columns missing: {listed}"),
            issues: vec![Issue::config(
                CheckKind::Duplicates,
                format!("Missing key columns in dataset: {listed}"),
                "Update keys or add/match these columns in input/mapping.",
            )],
        };
    }

    if total_rows == 0 {
        return CheckResult {
            check: CheckKind::Duplicates,
            status: Status::Pass,
            metrics: CheckMetrics::Duplicates {
                duplicate_rows: 0,
                total_rows: 0,
                duplicate_rate: 0.0,
            },
            notes: "No rows to evaluate".to_string(),
            issues: Vec::new(),
        };
    }

    let mut columns = Vec::with_capacity(keys.len());
    for key in keys {
        if let Ok(column) = df.column(key) {
            columns.push(column);
        }
    }

    let key_tuple = |row: usize| -> Vec<String> {
        columns
            .iter()
            .map(|column| any_to_string(column.get(row).unwrap_or(AnyValue::Null)))
            .collect()
    };

    let mut occurrences: BTreeMap<Vec<String>, u64> = BTreeMap::new();
    for row in 0..df.height() {
        *occurrences.entry(key_tuple(row)).or_insert(0) += 1;
    }

    let joined_keys = keys.join(",");
    let mut duplicate_rows = 0u64;
    let mut issues = Vec::new();
    for row in 0..df.height() {
        if occurrences.get(&key_tuple(row)).copied().unwrap_or(0) > 1 {
            duplicate_rows += 1;
            issues.push(Issue::record(
                CheckKind::Duplicates,
                row,
                joined_keys.as_str(),
                "Duplicate record detected for key combination",
                "De-duplicate upstream, or adjust keys if the duplication is expected.",
            ));
        }
    }

    let duplicate_rate = duplicate_rows as f64 / total_rows as f64;
    let status = if duplicate_rate <= config.pass_threshold {
        Status::Pass
    } else if duplicate_rate <= config.warn_threshold {
        Status::Warn
    } else {
        Status::Fail
    };

    CheckResult {
        check: CheckKind::Duplicates,
        status,
        metrics: CheckMetrics::Duplicates {
            duplicate_rows,
            total_rows,
            duplicate_rate,
        },
        notes: format!(
            "{} duplicate rows on keys {} ({duplicate_rows}/{total_rows})",
            format_pct(duplicate_rate),
            keys.join(", ")
        ),
        issues,
    }
}
