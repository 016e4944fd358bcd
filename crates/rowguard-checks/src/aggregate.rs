//! Merges per-check results into the run-level artifacts.

use std::collections::HashMap;

use rowguard_model::{
    AuditSummary, CheckKind, CheckResult, FixListEntry, Issue, OVERALL_CHECK, OVERALL_NOTE,
    ScorecardRow, Status,
};

/// Worst-of status across all checks; PASS for an empty slice.
pub fn overall_status(results: &[CheckResult]) -> Status {
    results
        .iter()
        .map(|result| result.status)
        .max()
        .unwrap_or(Status::Pass)
}

/// One scorecard row per check, in result order, plus the synthetic
/// `overall` row.
pub fn build_scorecard(results: &[CheckResult]) -> Vec<ScorecardRow> {
    let mut rows: Vec<ScorecardRow> = results
        .iter()
        .map(|result| ScorecardRow {
            check: result.check.to_string(),
            status: result.status,
            notes: result.notes.clone(),
        })
        .collect();
    rows.push(ScorecardRow {
        check: OVERALL_CHECK.to_string(),
        status: overall_status(results),
        notes: OVERALL_NOTE.to_string(),
    });
    rows
}

/// Concatenate every check's issues, preserving each check's internal order
/// and the order the checks ran in.
pub fn collect_issues(results: &[CheckResult]) -> Vec<Issue> {
    results
        .iter()
        .flat_map(|result| result.issues.iter().cloned())
        .collect()
}

/// Group issues by their `(check, field, message)` signature and rank the
/// groups by count descending, then check name and field ascending.
///
/// `field` defaults to the empty string so grouping is total. The sort is
/// stable, so groups tying on all three sort keys keep the order their first
/// member appeared in.
pub fn build_fix_list(issues: &[Issue]) -> Vec<FixListEntry> {
    let mut positions: HashMap<(CheckKind, String, String), usize> = HashMap::new();
    let mut entries: Vec<FixListEntry> = Vec::new();
    for issue in issues {
        let field = issue.field.clone().unwrap_or_default();
        let signature = (issue.check, field.clone(), issue.message.clone());
        match positions.get(&signature) {
            Some(&position) => entries[position].count += 1,
            None => {
                positions.insert(signature, entries.len());
                entries.push(FixListEntry {
                    check: issue.check,
                    field,
                    message: issue.message.clone(),
                    count: 1,
                });
            }
        }
    }
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.check.as_str().cmp(b.check.as_str()))
            .then_with(|| a.field.cmp(&b.field))
    });
    entries
}

/// Build the full run summary from the per-check results.
pub fn aggregate(results: &[CheckResult]) -> AuditSummary {
    let issues = collect_issues(results);
    let fix_list = build_fix_list(&issues);
    AuditSummary {
        overall: overall_status(results),
        scorecard: build_scorecard(results),
        issues,
        fix_list,
    }
}

#[cfg(test)]
mod tests {
    use rowguard_model::CheckMetrics;

    use super::*;

    fn result(check: CheckKind, status: Status, issues: Vec<Issue>) -> CheckResult {
        CheckResult {
            check,
            status,
            metrics: CheckMetrics::Consistency {
                failed_rules: 0,
                issue_count: issues.len() as u64,
            },
            notes: format!("{check} notes"),
            issues,
        }
    }

    #[test]
    fn overall_is_worst_of() {
        let results = vec![
            result(CheckKind::Completeness, Status::Pass, Vec::new()),
            result(CheckKind::Duplicates, Status::Warn, Vec::new()),
            result(CheckKind::Consistency, Status::Pass, Vec::new()),
        ];
        assert_eq!(overall_status(&results), Status::Warn);
        assert_eq!(overall_status(&[]), Status::Pass);
    }

    #[test]
    fn scorecard_ends_with_overall_row() {
        let results = vec![
            result(CheckKind::Completeness, Status::Pass, Vec::new()),
            result(CheckKind::Drift, Status::Fail, Vec::new()),
        ];
        let scorecard = build_scorecard(&results);
        assert_eq!(scorecard.len(), 3);
        assert_eq!(scorecard[0].check, "completeness");
        assert_eq!(scorecard[2].check, OVERALL_CHECK);
        assert_eq!(scorecard[2].status, Status::Fail);
        assert_eq!(scorecard[2].notes, OVERALL_NOTE);
    }

    #[test]
    fn issues_keep_check_and_row_order() {
        let results = vec![
            result(
                CheckKind::Completeness,
                Status::Fail,
                vec![
                    Issue::record(CheckKind::Completeness, 2, "age", "missing", "fill"),
                    Issue::record(CheckKind::Completeness, 5, "age", "missing", "fill"),
                ],
            ),
            result(
                CheckKind::Duplicates,
                Status::Warn,
                vec![Issue::record(CheckKind::Duplicates, 0, "id", "dup", "dedupe")],
            ),
        ];
        let issues = collect_issues(&results);
        let order: Vec<(CheckKind, Option<usize>)> =
            issues.iter().map(|i| (i.check, i.record_index)).collect();
        assert_eq!(
            order,
            [
                (CheckKind::Completeness, Some(2)),
                (CheckKind::Completeness, Some(5)),
                (CheckKind::Duplicates, Some(0)),
            ]
        );
    }

    #[test]
    fn fix_list_groups_and_ranks_by_count() {
        let issues = vec![
            Issue::record(CheckKind::Completeness, 0, "age", "missing age", "fill"),
            Issue::record(CheckKind::Completeness, 1, "age", "missing age", "fill"),
            Issue::record(CheckKind::Duplicates, 0, "id", "dup", "dedupe"),
            Issue::record(CheckKind::Completeness, 2, "region", "missing region", "fill"),
            Issue::record(CheckKind::Completeness, 3, "age", "missing age", "fill"),
        ];
        let fix_list = build_fix_list(&issues);
        assert_eq!(fix_list.len(), 3);
        assert_eq!(fix_list[0].field, "age");
        assert_eq!(fix_list[0].count, 3);
        // Ties on count order by check name then field.
        assert_eq!(fix_list[1].check, CheckKind::Completeness);
        assert_eq!(fix_list[1].field, "region");
        assert_eq!(fix_list[2].check, CheckKind::Duplicates);
        let total: u64 = fix_list.iter().map(|entry| entry.count).sum();
        assert_eq!(total, issues.len() as u64);
    }

    #[test]
    fn fix_list_defaults_missing_field_to_empty() {
        let issues = vec![Issue::config(CheckKind::Drift, "volume drift", "investigate")];
        let fix_list = build_fix_list(&issues);
        assert_eq!(fix_list[0].field, "");
        assert_eq!(fix_list[0].count, 1);
    }

    #[test]
    fn check_name_ordering_is_alphabetical() {
        // "drift" sorts before "duplicates" even though duplicates runs first.
        let issues = vec![
            Issue::record(CheckKind::Duplicates, 0, "id", "dup", "dedupe"),
            Issue::config(CheckKind::Drift, "volume drift", "investigate"),
        ];
        let fix_list = build_fix_list(&issues);
        assert_eq!(fix_list[0].check, CheckKind::Drift);
        assert_eq!(fix_list[1].check, CheckKind::Duplicates);
    }

    #[test]
    fn aggregate_bundles_everything() {
        let results = vec![result(
            CheckKind::Consistency,
            Status::Fail,
            vec![Issue::record(CheckKind::Consistency, 0, "approver_id", "required", "fill")],
        )];
        let summary = aggregate(&results);
        assert_eq!(summary.overall, Status::Fail);
        assert_eq!(summary.scorecard.len(), 2);
        assert_eq!(summary.issues.len(), 1);
        assert_eq!(summary.fix_list.len(), 1);
    }
}
