//! Report artifact generation.
//!
//! Serializes an audit run into the tabular artifacts downstream reviewers
//! consume: the scorecard, the flat issue table, the ranked fix list, and a
//! versioned JSON report for machine consumers.

mod csv_out;
mod json_out;

pub use csv_out::{write_fix_list_csv, write_issues_csv, write_scorecard_csv};
pub use json_out::{AuditReportPayload, CheckReportJson, write_audit_report_json};
