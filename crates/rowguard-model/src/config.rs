//! Typed configuration for an audit run.
//!
//! Each check consumes its own fragment; unknown options in the source file
//! are ignored and missing options fall back to the documented defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the completeness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessConfig {
    /// Fields every record is expected to populate.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Minimum presence rate for PASS.
    #[serde(default = "default_completeness_pass")]
    pub pass_threshold: f64,
    /// Minimum presence rate for WARN; below this is FAIL.
    #[serde(default = "default_completeness_warn")]
    pub warn_threshold: f64,
}

fn default_completeness_pass() -> f64 {
    0.95
}

fn default_completeness_warn() -> f64 {
    0.85
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            required_fields: Vec::new(),
            pass_threshold: default_completeness_pass(),
            warn_threshold: default_completeness_warn(),
        }
    }
}

/// Configuration for the duplicates check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatesConfig {
    /// Key fields whose combined value identifies a record.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Maximum duplicate rate for PASS.
    #[serde(default)]
    pub pass_threshold: f64,
    /// Maximum duplicate rate for WARN; above this is FAIL.
    #[serde(default = "default_duplicates_warn")]
    pub warn_threshold: f64,
}

fn default_duplicates_warn() -> f64 {
    0.02
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            pass_threshold: 0.0,
            warn_threshold: default_duplicates_warn(),
        }
    }
}

/// Condition selecting the rows a consistency rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhenClause {
    pub field: String,
    pub equals: String,
}

/// A conditional field-presence / field-equality rule.
///
/// The `then_required` and `then_equals` clauses are both optional, but a
/// rule without a `when` condition is rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default = "default_rule_name")]
    pub name: String,
    pub when: WhenClause,
    /// Fields that must be present on every row in scope.
    #[serde(default)]
    pub then_required: Vec<String>,
    /// Fields that must equal the given value on every row in scope.
    #[serde(default)]
    pub then_equals: BTreeMap<String, String>,
}

fn default_rule_name() -> String {
    "UnnamedRule".to_string()
}

/// Configuration for the consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Calendar bucketing granularity for the drift check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Weekly,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.write_str("monthly"),
            Self::Weekly => f.write_str("weekly"),
        }
    }
}

/// Configuration for the drift check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Field holding the record date; drift is skipped when unset.
    #[serde(default)]
    pub date_field: Option<String>,
    #[serde(default)]
    pub period: Period,
    /// Number of periods preceding the latest one to average as the baseline.
    #[serde(default = "default_baseline_periods")]
    pub baseline_periods: usize,
    #[serde(default = "default_drift_warn")]
    pub warn_pct_change: f64,
    #[serde(default = "default_drift_fail")]
    pub fail_pct_change: f64,
}

fn default_baseline_periods() -> usize {
    2
}

fn default_drift_warn() -> f64 {
    0.30
}

fn default_drift_fail() -> f64 {
    0.50
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            date_field: None,
            period: Period::default(),
            baseline_periods: default_baseline_periods(),
            warn_pct_change: default_drift_warn(),
            fail_pct_change: default_drift_fail(),
        }
    }
}

/// Raw tokens to canonicalize during the standardization pre-pass.
///
/// A `null` entry (`~` in YAML) is the sentinel matching null/blank cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissingLabelsConfig {
    #[serde(default)]
    pub na_values: Vec<Option<String>>,
    #[serde(default)]
    pub no_values: Vec<Option<String>>,
    #[serde(default)]
    pub unknown_values: Vec<Option<String>>,
}

impl MissingLabelsConfig {
    /// Token sets covering the spellings commonly seen in field-collected
    /// submissions. Blank and null cells map to NA.
    pub fn standard() -> Self {
        let owned = |values: &[&str]| -> Vec<Option<String>> {
            values.iter().map(|v| Some((*v).to_string())).collect()
        };
        let mut na_values = owned(&["", "N/A", "NA", "na", "n/a"]);
        na_values.push(None);
        Self {
            na_values,
            no_values: owned(&["NO", "No", "no", "FALSE", "False", "false", "0"]),
            unknown_values: owned(&["UNKNOWN", "Unknown", "unknown", "Not sure", "NOT_SURE"]),
        }
    }
}

/// Pre-pass configuration applied before any check runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StandardizeConfig {
    #[serde(default)]
    pub missing_labels: MissingLabelsConfig,
}

/// Per-check configuration fragments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
    #[serde(default)]
    pub completeness: CompletenessConfig,
    #[serde(default)]
    pub duplicates: DuplicatesConfig,
    #[serde(default)]
    pub consistency: ConsistencyConfig,
    #[serde(default)]
    pub drift: DriftConfig,
}

/// Where report artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("outputs/")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Top-level audit configuration, normally loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Input CSV; may be overridden on the command line.
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub standardization: StandardizeConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AuditConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
