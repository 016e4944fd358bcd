pub mod config;
pub mod error;
pub mod issue;
pub mod result;
pub mod status;

pub use config::{
    AuditConfig, ChecksConfig, CompletenessConfig, ConsistencyConfig, DriftConfig,
    DuplicatesConfig, MissingLabelsConfig, OutputConfig, Period, Rule, StandardizeConfig,
    WhenClause,
};
pub use error::{Result, RowguardError};
pub use issue::{FixListEntry, Issue};
pub use result::{
    AuditSummary, CheckMetrics, CheckResult, OVERALL_CHECK, OVERALL_NOTE, ScorecardRow,
};
pub use status::{CheckKind, Status};
