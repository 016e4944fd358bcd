//! Data-quality check engine.
//!
//! Four independent analyzers consume the same immutable normalized frame
//! and a typed configuration fragment, each returning a uniform
//! [`CheckResult`]. Nothing in a check is fatal: configuration problems
//! degrade to config-level issues and record defects to record-level issues,
//! so a run always completes with a well-formed result for every check.

pub mod aggregate;
pub mod checks;
#[cfg(test)]
mod testutil;
mod util;

pub use aggregate::{aggregate, build_fix_list, build_scorecard, collect_issues, overall_status};
pub use checks::completeness::{CompletenessCheck, run_completeness};
pub use checks::consistency::{ConsistencyCheck, run_consistency};
pub use checks::drift::{DriftCheck, run_drift};
pub use checks::duplicates::{DuplicatesCheck, run_duplicates};

use polars::prelude::DataFrame;
use tracing::debug;

use rowguard_model::{AuditSummary, CheckKind, CheckResult, ChecksConfig};

/// The capability every analyzer implements.
///
/// Checks share no state and no base behavior beyond this contract, which
/// keeps them uniformly iterable and leaves room for pluggable checks.
pub trait Check {
    fn kind(&self) -> CheckKind;
    fn evaluate(&self, df: &DataFrame) -> CheckResult;
}

/// Instantiate the four built-in checks in reporting order.
pub fn built_in_checks(config: &ChecksConfig) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(CompletenessCheck::new(config.completeness.clone())),
        Box::new(DuplicatesCheck::new(config.duplicates.clone())),
        Box::new(ConsistencyCheck::new(config.consistency.clone())),
        Box::new(DriftCheck::new(config.drift.clone())),
    ]
}

/// Run every built-in check against the normalized frame.
pub fn run_checks(df: &DataFrame, config: &ChecksConfig) -> Vec<CheckResult> {
    built_in_checks(config)
        .iter()
        .map(|check| {
            let result = check.evaluate(df);
            debug!(
                check = %result.check,
                status = %result.status,
                issues = result.issues.len(),
                "check evaluated"
            );
            result
        })
        .collect()
}

/// Run all checks and aggregate the results into a run summary.
pub fn audit_frame(df: &DataFrame, config: &ChecksConfig) -> AuditSummary {
    aggregate(&run_checks(df, config))
}

/// Fields absent from the frame's columns, in the order given.
pub(crate) fn missing_columns(df: &DataFrame, fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| df.column(field).is_err())
        .cloned()
        .collect()
}
