use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome severity for a check, ordered from best to worst.
///
/// The ordering is load-bearing: the overall status of a run is the maximum
/// of the per-check statuses under `Pass < Warn < Fail`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Pass,
    Warn,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one of the built-in checks.
///
/// Declaration order is the fixed reporting order used when scorecard rows
/// and issue tables are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Completeness,
    Duplicates,
    Consistency,
    Drift,
}

impl CheckKind {
    /// All checks in reporting order.
    pub const ALL: [CheckKind; 4] = [
        Self::Completeness,
        Self::Duplicates,
        Self::Consistency,
        Self::Drift,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completeness => "completeness",
            Self::Duplicates => "duplicates",
            Self::Consistency => "consistency",
            Self::Drift => "drift",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
