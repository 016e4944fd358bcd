//! CSV artifact writers.
//!
//! The column layouts here are the wire contract downstream consumers read;
//! an issue-free run still produces a correctly-headered empty issue table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Writer;
use tracing::info;

use rowguard_model::{FixListEntry, Issue, ScorecardRow};

fn open_writer(output_dir: &Path, file_name: &str) -> Result<(Writer<std::fs::File>, PathBuf)> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    let writer =
        Writer::from_path(&path).with_context(|| format!("write csv: {}", path.display()))?;
    Ok((writer, path))
}

/// Write `quality_scorecard.csv`: one row per check plus the overall row.
pub fn write_scorecard_csv(output_dir: &Path, scorecard: &[ScorecardRow]) -> Result<PathBuf> {
    let (mut writer, path) = open_writer(output_dir, "quality_scorecard.csv")?;
    writer.write_record(["check", "status", "notes"])?;
    for row in scorecard {
        writer.write_record([row.check.as_str(), row.status.as_str(), row.notes.as_str()])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = scorecard.len(), "wrote scorecard");
    Ok(path)
}

/// Write `issues_all.csv`: the flat record-level issue table.
pub fn write_issues_csv(output_dir: &Path, issues: &[Issue]) -> Result<PathBuf> {
    let (mut writer, path) = open_writer(output_dir, "issues_all.csv")?;
    writer.write_record(["check", "record_index", "field", "message", "suggested_fix"])?;
    for issue in issues {
        let record_index = issue
            .record_index
            .map_or_else(String::new, |idx| idx.to_string());
        writer.write_record([
            issue.check.as_str(),
            record_index.as_str(),
            issue.field.as_deref().unwrap_or(""),
            issue.message.as_str(),
            issue.suggested_fix.as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = issues.len(), "wrote issue table");
    Ok(path)
}

/// Write `fix_list.csv`: the ranked issue signatures.
pub fn write_fix_list_csv(output_dir: &Path, fix_list: &[FixListEntry]) -> Result<PathBuf> {
    let (mut writer, path) = open_writer(output_dir, "fix_list.csv")?;
    writer.write_record(["check", "field", "message", "count"])?;
    for entry in fix_list {
        writer.write_record([
            entry.check.as_str(),
            entry.field.as_str(),
            entry.message.as_str(),
            entry.count.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = fix_list.len(), "wrote fix list");
    Ok(path)
}
