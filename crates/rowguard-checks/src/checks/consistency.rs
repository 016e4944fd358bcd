//! Conditional field-presence and field-equality rule engine.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};

use rowguard_ingest::{any_to_string, is_missing_value};
use rowguard_model::{CheckKind, CheckMetrics, CheckResult, ConsistencyConfig, Issue, Rule, Status};

use crate::Check;

pub struct ConsistencyCheck {
    config: ConsistencyConfig,
}

impl ConsistencyCheck {
    pub fn new(config: ConsistencyConfig) -> Self {
        Self { config }
    }
}

impl Check for ConsistencyCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Consistency
    }

    fn evaluate(&self, df: &DataFrame) -> CheckResult {
        run_consistency(df, &self.config)
    }
}

const CONFIG_FIX: &str = "Fix field mapping or adjust rule configuration.";

/// Evaluate every configured rule independently.
///
/// Rules are evaluated in configuration order but do not affect one another;
/// a rule referencing an absent column degrades to a configuration-level
/// issue instead of stopping the run. Any record-level issue makes the check
/// FAIL; configuration-level issues alone make it WARN.
pub fn run_consistency(df: &DataFrame, config: &ConsistencyConfig) -> CheckResult {
    if config.rules.is_empty() {
        return CheckResult {
            check: CheckKind::Consistency,
            status: Status::Pass,
            metrics: CheckMetrics::Consistency {
                failed_rules: 0,
                issue_count: 0,
            },
            notes: "No rules configured".to_string(),
            issues: Vec::new(),
        };
    }

    let mut issues: Vec<Issue> = Vec::new();
    let mut failed_rules: BTreeSet<&str> = BTreeSet::new();
    for rule in &config.rules {
        evaluate_rule(df, rule, &mut issues, &mut failed_rules);
    }

    let record_issues = issues.iter().filter(|i| i.is_record_level()).count();
    let config_issues = issues.len() - record_issues;
    let status = if record_issues > 0 {
        Status::Fail
    } else if config_issues > 0 {
        Status::Warn
    } else {
        Status::Pass
    };

    CheckResult {
        check: CheckKind::Consistency,
        status,
        metrics: CheckMetrics::Consistency {
            failed_rules: failed_rules.len() as u64,
            issue_count: issues.len() as u64,
        },
        notes: format!(
            "{} rule(s) triggered; {} issue(s)",
            failed_rules.len(),
            issues.len()
        ),
        issues,
    }
}

fn evaluate_rule<'a>(
    df: &DataFrame,
    rule: &'a Rule,
    issues: &mut Vec<Issue>,
    failed_rules: &mut BTreeSet<&'a str>,
) {
    let name = rule.name.as_str();
    let when_field = rule.when.field.as_str();
    let when_equals = rule.when.equals.as_str();

    let Ok(when_column) = df.column(when_field) else {
        issues.push(Issue::config(
            CheckKind::Consistency,
            format!("Rule '{name}' skipped: missing when.field '{when_field}' in dataset"),
            CONFIG_FIX,
        ));
        failed_rules.insert(name);
        return;
    };

    // Rows where the condition applies.
    let expected = when_equals.trim();
    let scope: Vec<usize> = (0..df.height())
        .filter(|&row| {
            let value = any_to_string(when_column.get(row).unwrap_or(AnyValue::Null));
            value.trim() == expected
        })
        .collect();

    for required in &rule.then_required {
        let Ok(column) = df.column(required) else {
            issues.push(Issue::config(
                CheckKind::Consistency,
                format!("Rule '{name}' failed: required field '{required}' not in dataset"),
                CONFIG_FIX,
            ));
            failed_rules.insert(name);
            continue;
        };
        for &row in &scope {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            if is_missing_value(&value) {
                issues.push(Issue::record(
                    CheckKind::Consistency,
                    row,
                    required.as_str(),
                    format!(
                        "Rule '{name}': '{when_field}' is '{when_equals}' so '{required}' is required"
                    ),
                    format!(
                        "Populate '{required}' for this record, or correct '{when_field}' if misclassified."
                    ),
                ));
                failed_rules.insert(name);
            }
        }
    }

    for (field, expected_value) in &rule.then_equals {
        let Ok(column) = df.column(field) else {
            issues.push(Issue::config(
                CheckKind::Consistency,
                format!("Rule '{name}' failed: field '{field}' not in dataset"),
                CONFIG_FIX,
            ));
            failed_rules.insert(name);
            continue;
        };
        let expected = expected_value.trim();
        for &row in &scope {
            let actual_raw = any_to_string(column.get(row).unwrap_or(AnyValue::Null));
            let actual = actual_raw.trim();
            if actual != expected {
                issues.push(Issue::record(
                    CheckKind::Consistency,
                    row,
                    field.as_str(),
                    format!(
                        "Rule '{name}': expected '{field}' == '{expected}' when '{when_field}' == '{when_equals}' (got '{actual}')"
                    ),
                    format!("Set '{field}' to '{expected}' or correct '{when_field}'."),
                ));
                failed_rules.insert(name);
            }
        }
    }
}
