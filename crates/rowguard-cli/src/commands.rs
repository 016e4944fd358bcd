//! Audit run orchestration shared by the binary and its tests.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use rowguard_checks::{aggregate, run_checks};
use rowguard_ingest::{apply_missing_labels, load_frame};
use rowguard_model::{AuditConfig, AuditSummary, CheckResult};
use rowguard_report::{
    write_audit_report_json, write_fix_list_csv, write_issues_csv, write_scorecard_csv,
};

/// Inputs for an audit run, already decoupled from the argument parser.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the YAML audit configuration.
    pub config: PathBuf,
    /// Input CSV; overrides the config file's `input` when set.
    pub input: Option<PathBuf>,
    /// Output directory; overrides the config file's `output.path` when set.
    pub output_dir: Option<PathBuf>,
    /// Evaluate and summarize without writing artifacts.
    pub dry_run: bool,
}

/// Everything a front end needs to render the outcome of a run.
#[derive(Debug)]
pub struct RunOutcome {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub results: Vec<CheckResult>,
    pub summary: AuditSummary,
    pub artifacts: Vec<PathBuf>,
}

/// Load, standardize, check, aggregate, and (unless dry-run) write artifacts.
pub fn run_audit(options: &RunOptions) -> Result<RunOutcome> {
    let config = AuditConfig::load(&options.config)
        .with_context(|| format!("load config: {}", options.config.display()))?;
    let input = options
        .input
        .clone()
        .or_else(|| config.input.clone())
        .ok_or_else(|| anyhow!("no input file: pass --input or set `input` in the config"))?;
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.path.clone());

    let span = info_span!("audit", input = %input.display());
    let _guard = span.enter();

    let frame =
        load_frame(&input).with_context(|| format!("load input: {}", input.display()))?;
    info!(
        rows = frame.height(),
        columns = frame.width(),
        "loaded input table"
    );
    let standardized = apply_missing_labels(&frame, &config.standardization.missing_labels)
        .context("standardize missing-value labels")?;

    let results = run_checks(&standardized, &config.checks);
    let summary = aggregate(&results);
    info!(
        overall = %summary.overall,
        issues = summary.issues.len(),
        "audit complete"
    );

    let mut artifacts = Vec::new();
    if !options.dry_run {
        artifacts.push(write_scorecard_csv(&output_dir, &summary.scorecard)?);
        artifacts.push(write_issues_csv(&output_dir, &summary.issues)?);
        artifacts.push(write_fix_list_csv(&output_dir, &summary.fix_list)?);
        artifacts.push(write_audit_report_json(
            &output_dir,
            &input.display().to_string(),
            summary.overall,
            &results,
        )?);
    }

    Ok(RunOutcome {
        input,
        output_dir,
        results,
        summary,
        artifacts,
    })
}

/// Built-in checks with one-line descriptions, in reporting order.
pub fn check_descriptions() -> [(&'static str, &'static str); 4] {
    [
        ("completeness", "Required-field presence rate"),
        ("duplicates", "Key-based duplicate detection"),
        (
            "consistency",
            "Conditional field-presence and equality rules",
        ),
        ("drift", "Period-over-period volume-change detection"),
    ]
}
