//! Required-field presence check.

use polars::prelude::{AnyValue, DataFrame};

use rowguard_ingest::is_missing_value;
use rowguard_model::{CheckKind, CheckMetrics, CheckResult, CompletenessConfig, Issue, Status};

use crate::util::format_pct;
use crate::{Check, missing_columns};

pub struct CompletenessCheck {
    config: CompletenessConfig,
}

impl CompletenessCheck {
    pub fn new(config: CompletenessConfig) -> Self {
        Self { config }
    }
}

impl Check for CompletenessCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Completeness
    }

    fn evaluate(&self, df: &DataFrame) -> CheckResult {
        run_completeness(df, &self.config)
    }
}

/// Measure the presence rate over the rows x required-fields rectangle.
///
/// A cell is missing iff it is null or its trimmed text equals a canonical
/// missing token (`""`, `NA`, `UNKNOWN`); `NO` is a present value. One
/// record-level issue is emitted per missing cell, in row order then
/// `required_fields` order.
pub fn run_completeness(df: &DataFrame, config: &CompletenessConfig) -> CheckResult {
    let required = &config.required_fields;

    let missing = missing_columns(df, required);
    if !missing.is_empty() {
        let listed = missing.join(", ");
        let total_required_cells = (required.len() as u64 * df.height().max(1) as u64).max(1);
        return CheckResult {
            check: CheckKind::Completeness,
            status: Status::Fail,
            metrics: CheckMetrics::Completeness {
                completeness_rate: 0.0,
                missing_cells: 0,
                total_required_cells,
            },
            notes: format!("Required columns missing: {listed}"),
            issues: vec![Issue::config(
                CheckKind::Completeness,
                format!("Missing required columns in dataset: {listed}"),
                "Update field mapping or provide these columns in the input.",
            )],
        };
    }

    let mut columns = Vec::with_capacity(required.len());
    for field in required {
        if let Ok(column) = df.column(field) {
            columns.push((field, column));
        }
    }

    let total_required_cells = (required.len() * df.height()) as u64;
    let mut missing_cells = 0u64;
    let mut issues = Vec::new();
    for row in 0..df.height() {
        for (field, column) in &columns {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            if is_missing_value(&value) {
                missing_cells += 1;
                issues.push(Issue::record(
                    CheckKind::Completeness,
                    row,
                    field.as_str(),
                    format!("Missing required value for '{field}'"),
                    format!("Populate '{field}' or mark explicitly (NA/UNKNOWN) where appropriate."),
                ));
            }
        }
    }

    let completeness_rate = if total_required_cells == 0 {
        0.0
    } else {
        (total_required_cells - missing_cells) as f64 / total_required_cells as f64
    };
    let status = if completeness_rate >= config.pass_threshold {
        Status::Pass
    } else if completeness_rate >= config.warn_threshold {
        Status::Warn
    } else {
        Status::Fail
    };

    CheckResult {
        check: CheckKind::Completeness,
        status,
        metrics: CheckMetrics::Completeness {
            completeness_rate,
            missing_cells,
            total_required_cells,
        },
        notes: format!(
            "{} required cells present ({missing_cells} missing of {total_required_cells})",
            format_pct(completeness_rate)
        ),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::string_frame;

    use super::*;

    fn config(fields: &[&str]) -> CompletenessConfig {
        CompletenessConfig {
            required_fields: fields.iter().map(|f| (*f).to_string()).collect(),
            ..CompletenessConfig::default()
        }
    }

    #[test]
    fn all_present_passes() {
        let df = string_frame(&[("age", vec![Some("34"), Some("51")])]);
        let result = run_completeness(&df, &config(&["age"]));
        assert_eq!(result.status, Status::Pass);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.metrics,
            CheckMetrics::Completeness {
                completeness_rate: 1.0,
                missing_cells: 0,
                total_required_cells: 2,
            }
        );
    }

    #[test]
    fn unknown_counts_as_missing() {
        let values: Vec<Option<&str>> = (0..10)
            .map(|i| if i < 2 { Some("UNKNOWN") } else { Some("34") })
            .collect();
        let df = string_frame(&[("age", values)]);
        let result = run_completeness(&df, &config(&["age"]));
        assert_eq!(result.issues.len(), 2);
        assert_eq!(
            result.metrics,
            CheckMetrics::Completeness {
                completeness_rate: 0.8,
                missing_cells: 2,
                total_required_cells: 10,
            }
        );
        // 0.8 sits below the default warn threshold of 0.85.
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn warn_band_between_thresholds() {
        let values: Vec<Option<&str>> = (0..10)
            .map(|i| if i < 1 { None } else { Some("34") })
            .collect();
        let df = string_frame(&[("age", values)]);
        let result = run_completeness(&df, &config(&["age"]));
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn no_is_a_present_value() {
        let df = string_frame(&[("consent", vec![Some("NO"), Some("NA"), None])]);
        let result = run_completeness(&df, &config(&["consent"]));
        assert_eq!(result.metrics, CheckMetrics::Completeness {
            completeness_rate: 1.0 / 3.0,
            missing_cells: 2,
            total_required_cells: 3,
        });
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn missing_column_fails_with_config_issue() {
        let df = string_frame(&[("age", vec![Some("34")])]);
        let result = run_completeness(&df, &config(&["age", "region"]));
        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.issues.len(), 1);
        assert!(!result.issues[0].is_record_level());
        assert!(result.issues[0].message.contains("region"));
        assert_eq!(
            result.metrics,
            CheckMetrics::Completeness {
                completeness_rate: 0.0,
                missing_cells: 0,
                total_required_cells: 2,
            }
        );
    }

    #[test]
    fn empty_required_fields_rate_is_zero() {
        let df = string_frame(&[("age", vec![Some("34")])]);
        let result = run_completeness(&df, &config(&[]));
        assert_eq!(
            result.metrics,
            CheckMetrics::Completeness {
                completeness_rate: 0.0,
                missing_cells: 0,
                total_required_cells: 0,
            }
        );
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn issues_preserve_row_then_field_order() {
        let df = string_frame(&[
            ("a", vec![None, Some("x")]),
            ("b", vec![None, None]),
        ]);
        let result = run_completeness(&df, &config(&["a", "b"]));
        let order: Vec<(Option<usize>, Option<&str>)> = result
            .issues
            .iter()
            .map(|i| (i.record_index, i.field.as_deref()))
            .collect();
        assert_eq!(
            order,
            [
                (Some(0), Some("a")),
                (Some(0), Some("b")),
                (Some(1), Some("b")),
            ]
        );
    }
}
