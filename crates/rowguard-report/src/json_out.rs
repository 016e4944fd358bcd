//! Versioned JSON audit report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use rowguard_model::{CheckMetrics, CheckResult, Status};

const REPORT_SCHEMA: &str = "rowguard.audit-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct AuditReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub input: String,
    pub overall: Status,
    pub checks: Vec<CheckReportJson>,
}

#[derive(Debug, Serialize)]
pub struct CheckReportJson {
    pub check: String,
    pub status: Status,
    pub notes: String,
    pub metrics: CheckMetrics,
    pub issue_count: usize,
}

/// Write `audit_report.json` summarizing the run for machine consumers.
pub fn write_audit_report_json(
    output_dir: &Path,
    input: &str,
    overall: Status,
    results: &[CheckResult],
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;
    let output_path = output_dir.join("audit_report.json");
    let payload = AuditReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        input: input.to_string(),
        overall,
        checks: results
            .iter()
            .map(|result| CheckReportJson {
                check: result.check.to_string(),
                status: result.status,
                notes: result.notes.clone(),
                metrics: result.metrics.clone(),
                issue_count: result.issues.len(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("write report: {}", output_path.display()))?;
    Ok(output_path)
}
