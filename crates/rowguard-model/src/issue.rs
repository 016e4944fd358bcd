use serde::{Deserialize, Serialize};

use crate::status::CheckKind;

/// A single finding produced by a check.
///
/// `record_index == None` marks a configuration-level problem (for example a
/// required column that is absent from the table) rather than a defect in a
/// particular record. Record indices are the zero-based positions assigned at
/// load time and are never renumbered, so issues from different checks can be
/// correlated on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub check: CheckKind,
    pub record_index: Option<usize>,
    pub field: Option<String>,
    pub message: String,
    pub suggested_fix: String,
}

impl Issue {
    /// Configuration-level issue, not tied to any record.
    pub fn config(check: CheckKind, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            check,
            record_index: None,
            field: None,
            message: message.into(),
            suggested_fix: fix.into(),
        }
    }

    /// Record-level issue for one row and (optionally) one field.
    pub fn record(
        check: CheckKind,
        record_index: usize,
        field: impl Into<String>,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            check,
            record_index: Some(record_index),
            field: Some(field.into()),
            message: message.into(),
            suggested_fix: fix.into(),
        }
    }

    pub fn is_record_level(&self) -> bool {
        self.record_index.is_some()
    }
}

/// One actionable line item: all issues sharing a `(check, field, message)`
/// signature, with the number of affected rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixListEntry {
    pub check: CheckKind,
    pub field: String,
    pub message: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_issue_has_no_record_index() {
        let issue = Issue::config(CheckKind::Completeness, "missing column", "add it");
        assert!(!issue.is_record_level());
        assert_eq!(issue.field, None);
    }

    #[test]
    fn record_issue_round_trips() {
        let issue = Issue::record(CheckKind::Consistency, 3, "approver_id", "required", "fill it");
        let json = serde_json::to_string(&issue).unwrap();
        let round: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(round, issue);
        assert_eq!(round.record_index, Some(3));
    }
}
