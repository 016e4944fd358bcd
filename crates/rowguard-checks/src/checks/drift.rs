//! Period-over-period volume-change detection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, DataFrame};

use rowguard_ingest::any_to_string;
use rowguard_model::{CheckKind, CheckMetrics, CheckResult, DriftConfig, Issue, Period, Status};

use crate::Check;
use crate::util::format_pct;

pub struct DriftCheck {
    config: DriftConfig,
}

impl DriftCheck {
    pub fn new(config: DriftConfig) -> Self {
        Self { config }
    }
}

impl Check for DriftCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Drift
    }

    fn evaluate(&self, df: &DataFrame) -> CheckResult {
        run_drift(df, &self.config)
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a date cell, accepting plain dates and datetime forms.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Calendar bucket a record falls into; ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PeriodKey {
    Month { year: i32, month: u32 },
    Week { year: i32, week: u32 },
}

impl PeriodKey {
    fn from_date(date: NaiveDate, period: Period) -> Self {
        match period {
            Period::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            Period::Weekly => {
                let iso = date.iso_week();
                Self::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Week { year, week } => write!(f, "{year:04}-W{week:02}"),
        }
    }
}

fn skipped(notes: String) -> CheckResult {
    CheckResult {
        check: CheckKind::Drift,
        status: Status::Warn,
        metrics: CheckMetrics::Drift {
            latest_period: "N/A".to_string(),
            baseline_avg: 0.0,
            latest_count: 0,
            pct_change: 0.0,
        },
        notes,
        issues: Vec::new(),
    }
}

/// Compare the latest period's record count against the average of the
/// periods immediately preceding it.
///
/// Rows whose date fails to parse are dropped from the analysis; flagging
/// them is the completeness/consistency checks' job. An unset or absent
/// date field is a soft failure: the check WARNs that it could not evaluate
/// rather than declaring the dataset bad.
pub fn run_drift(df: &DataFrame, config: &DriftConfig) -> CheckResult {
    let Some(date_field) = config.date_field.as_deref() else {
        return skipped("No date field configured; drift skipped".to_string());
    };
    let Ok(column) = df.column(date_field) else {
        return skipped(format!("Date field '{date_field}' missing; drift skipped"));
    };

    let mut counts: BTreeMap<PeriodKey, u64> = BTreeMap::new();
    for row in 0..df.height() {
        let text = any_to_string(column.get(row).unwrap_or(AnyValue::Null));
        let Some(date) = parse_date(&text) else {
            continue;
        };
        *counts
            .entry(PeriodKey::from_date(date, config.period))
            .or_insert(0) += 1;
    }

    if counts.len() <= config.baseline_periods {
        let latest_period = counts
            .keys()
            .next_back()
            .map_or_else(|| "N/A".to_string(), |key| key.to_string());
        let latest_count = counts.values().next_back().copied().unwrap_or(0);
        let baseline_avg = if counts.is_empty() {
            0.0
        } else {
            counts.values().sum::<u64>() as f64 / counts.len() as f64
        };
        return CheckResult {
            check: CheckKind::Drift,
            status: Status::Pass,
            metrics: CheckMetrics::Drift {
                latest_period,
                baseline_avg,
                latest_count,
                pct_change: 0.0,
            },
            notes: "Not enough historical periods to evaluate drift".to_string(),
            issues: Vec::new(),
        };
    }

    let series: Vec<(PeriodKey, u64)> = counts.into_iter().collect();
    let (latest_key, latest_count) = series[series.len() - 1];
    let baseline = &series[series.len() - 1 - config.baseline_periods..series.len() - 1];
    let baseline_avg =
        baseline.iter().map(|(_, count)| *count as f64).sum::<f64>() / baseline.len() as f64;

    let pct_change = if baseline_avg == 0.0 {
        1.0
    } else {
        (latest_count as f64 - baseline_avg) / baseline_avg
    };

    let abs_change = pct_change.abs();
    let status = if abs_change >= config.fail_pct_change {
        Status::Fail
    } else if abs_change >= config.warn_pct_change {
        Status::Warn
    } else {
        Status::Pass
    };

    let latest_period = latest_key.to_string();
    let issues = if status == Status::Pass {
        Vec::new()
    } else {
        vec![Issue {
            check: CheckKind::Drift,
            record_index: None,
            field: Some(date_field.to_string()),
            message: format!(
                "Volume drift detected for {latest_period}: {} change vs baseline avg ({baseline_avg:.1})",
                format_pct(pct_change)
            ),
            suggested_fix:
                "Verify reporting completeness, backlogs, or duplicate submissions for this period."
                    .to_string(),
        }]
    };

    CheckResult {
        check: CheckKind::Drift,
        status,
        metrics: CheckMetrics::Drift {
            latest_period: latest_period.clone(),
            baseline_avg,
            latest_count,
            pct_change,
        },
        notes: format!(
            "{latest_period}: {latest_count} records vs baseline avg {baseline_avg:.1} ({})",
            format_pct(pct_change)
        ),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::string_frame;

    use super::*;

    fn config(date_field: &str) -> DriftConfig {
        DriftConfig {
            date_field: Some(date_field.to_string()),
            ..DriftConfig::default()
        }
    }

    fn frame_with_monthly_counts(counts: &[(&str, usize)]) -> DataFrame {
        let mut values = Vec::new();
        for (month, count) in counts {
            for _ in 0..*count {
                values.push(Some(format!("{month}-15")));
            }
        }
        let refs: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
        string_frame(&[("submitted_at", refs)])
    }

    #[test]
    fn volume_drop_beyond_fail_threshold_fails() {
        let df =
            frame_with_monthly_counts(&[("2024-01", 100), ("2024-02", 100), ("2024-03", 10)]);
        let result = run_drift(&df, &config("submitted_at"));
        assert_eq!(result.status, Status::Fail);
        assert_eq!(
            result.metrics,
            CheckMetrics::Drift {
                latest_period: "2024-03".to_string(),
                baseline_avg: 100.0,
                latest_count: 10,
                pct_change: -0.9,
            }
        );
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].record_index, None);
        assert_eq!(result.issues[0].field.as_deref(), Some("submitted_at"));
        assert!(result.issues[0].message.contains("2024-03"));
    }

    #[test]
    fn equal_counts_pass_with_zero_change() {
        let df = frame_with_monthly_counts(&[("2024-01", 50), ("2024-02", 50), ("2024-03", 50)]);
        let result = run_drift(&df, &config("submitted_at"));
        assert_eq!(result.status, Status::Pass);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.metrics,
            CheckMetrics::Drift {
                latest_period: "2024-03".to_string(),
                baseline_avg: 50.0,
                latest_count: 50,
                pct_change: 0.0,
            }
        );
    }

    #[test]
    fn moderate_growth_warns() {
        // 40% above the baseline average sits between 0.30 and 0.50.
        let df = frame_with_monthly_counts(&[("2024-01", 50), ("2024-02", 50), ("2024-03", 70)]);
        let result = run_drift(&df, &config("submitted_at"));
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn not_enough_periods_passes() {
        let df = frame_with_monthly_counts(&[("2024-01", 10), ("2024-02", 90)]);
        let result = run_drift(&df, &config("submitted_at"));
        assert_eq!(result.status, Status::Pass);
        assert_eq!(result.notes, "Not enough historical periods to evaluate drift");
        assert_eq!(
            result.metrics,
            CheckMetrics::Drift {
                latest_period: "2024-02".to_string(),
                baseline_avg: 50.0,
                latest_count: 90,
                pct_change: 0.0,
            }
        );
    }

    #[test]
    fn missing_date_field_warns_without_issues() {
        let df = string_frame(&[("other", vec![Some("x")])]);
        let result = run_drift(&df, &config("submitted_at"));
        assert_eq!(result.status, Status::Warn);
        assert!(result.issues.is_empty());
        assert!(result.notes.contains("submitted_at"));

        let unconfigured = DriftConfig::default();
        let result = run_drift(&df, &unconfigured);
        assert_eq!(result.status, Status::Warn);
    }

    #[test]
    fn unparseable_dates_are_dropped() {
        let df = string_frame(&[(
            "submitted_at",
            vec![Some("2024-01-01"), Some("not a date"), None, Some("2024-02-01")],
        )]);
        let result = run_drift(&df, &config("submitted_at"));
        // Two parseable rows in two periods; baseline default is 2.
        assert_eq!(result.notes, "Not enough historical periods to evaluate drift");
    }

    #[test]
    fn change_at_fail_threshold_boundary_fails() {
        let mut cfg = config("submitted_at");
        cfg.baseline_periods = 1;
        let df = frame_with_monthly_counts(&[("2024-01", 1), ("2024-02", 2), ("2024-03", 3)]);
        let result = run_drift(&df, &cfg);
        assert_eq!(result.status, Status::Fail);
        // latest 3 vs baseline avg 2.0 -> +50% change, exactly the fail cap.
        assert_eq!(
            result.metrics,
            CheckMetrics::Drift {
                latest_period: "2024-03".to_string(),
                baseline_avg: 2.0,
                latest_count: 3,
                pct_change: 0.5,
            }
        );
    }

    #[test]
    fn weekly_buckets_use_iso_weeks() {
        let mut cfg = config("submitted_at");
        cfg.period = Period::Weekly;
        cfg.baseline_periods = 1;
        let df = string_frame(&[(
            "submitted_at",
            vec![
                Some("2024-01-01"), // ISO 2024-W01
                Some("2024-01-03"),
                Some("2024-01-08"), // ISO 2024-W02
            ],
        )]);
        let result = run_drift(&df, &cfg);
        assert_eq!(
            result.metrics,
            CheckMetrics::Drift {
                latest_period: "2024-W02".to_string(),
                baseline_avg: 2.0,
                latest_count: 1,
                pct_change: -0.5,
            }
        );
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn parses_common_date_formats() {
        assert_eq!(
            parse_date("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_date("2024/03/05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_date("03/05/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_date("2024-03-05T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }
}
