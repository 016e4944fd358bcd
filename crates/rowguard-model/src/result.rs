use serde::{Deserialize, Serialize};

use crate::issue::{FixListEntry, Issue};
use crate::status::{CheckKind, Status};

/// Check name used for the synthetic overall scorecard row.
pub const OVERALL_CHECK: &str = "overall";

/// Note attached to the overall scorecard row.
pub const OVERALL_NOTE: &str = "Worst-of check statuses";

/// Numeric measurements reported by a check, one variant per check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMetrics {
    Completeness {
        completeness_rate: f64,
        missing_cells: u64,
        total_required_cells: u64,
    },
    Duplicates {
        duplicate_rows: u64,
        total_rows: u64,
        duplicate_rate: f64,
    },
    Consistency {
        failed_rules: u64,
        issue_count: u64,
    },
    Drift {
        latest_period: String,
        baseline_avg: f64,
        latest_count: u64,
        pct_change: f64,
    },
}

/// Uniform result produced by every check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub status: Status,
    pub metrics: CheckMetrics,
    pub notes: String,
    pub issues: Vec<Issue>,
}

impl CheckResult {
    pub fn record_issue_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_record_level()).count()
    }

    pub fn config_issue_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.is_record_level()).count()
    }
}

/// One row of the scorecard artifact.
///
/// `check` is a plain string rather than a [`CheckKind`] because the
/// scorecard also carries the synthetic [`OVERALL_CHECK`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardRow {
    pub check: String,
    pub status: Status,
    pub notes: String,
}

/// Aggregated output of a full audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub overall: Status,
    pub scorecard: Vec<ScorecardRow>,
    pub issues: Vec<Issue>,
    pub fix_list: Vec<FixListEntry>,
}
