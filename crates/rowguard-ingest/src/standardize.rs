//! Missing-value standardization pre-pass.
//!
//! Canonicalizes missing-like raw tokens into the explicit labels `NA`, `NO`,
//! and `UNKNOWN` before any check runs. Only string columns are touched;
//! numeric columns pass through unchanged.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use rowguard_model::MissingLabelsConfig;

/// A configured token set. `match_null` is set when the configuration lists
/// the null/blank sentinel; string tokens are compared after trimming.
struct TokenSet {
    match_null: bool,
    tokens: BTreeSet<String>,
}

impl TokenSet {
    fn from_config(values: &[Option<String>]) -> Self {
        let mut match_null = false;
        let mut tokens = BTreeSet::new();
        for value in values {
            match value {
                None => match_null = true,
                Some(token) => {
                    tokens.insert(token.trim().to_string());
                }
            }
        }
        Self { match_null, tokens }
    }

    fn matches(&self, cell: Option<&str>) -> bool {
        match cell {
            None => self.match_null,
            Some(text) => self.tokens.contains(text),
        }
    }
}

/// Apply the missing-label mapping to every string column of the frame.
///
/// Each stage tests the trimmed ORIGINAL cell value, so when a token is
/// listed in more than one set the later stage overwrites the earlier one:
/// UNKNOWN, then NO, then NA, last write wins. Unmatched string cells are
/// still whitespace-trimmed. The returned frame has the same shape and
/// column order as the input and is the normalized table the checks consume.
pub fn apply_missing_labels(df: &DataFrame, config: &MissingLabelsConfig) -> Result<DataFrame> {
    let unknown = TokenSet::from_config(&config.unknown_values);
    let no = TokenSet::from_config(&config.no_values);
    let na = TokenSet::from_config(&config.na_values);

    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    let mut rewritten = 0usize;
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }
        let values = column
            .str()
            .with_context(|| format!("string column {}", column.name()))?;
        let mapped: Vec<Option<String>> = values
            .into_iter()
            .map(|cell| {
                let trimmed = cell.map(str::trim);
                let mut out = trimmed.map(ToString::to_string);
                if unknown.matches(trimmed) {
                    out = Some("UNKNOWN".to_string());
                }
                if no.matches(trimmed) {
                    out = Some("NO".to_string());
                }
                if na.matches(trimmed) {
                    out = Some("NA".to_string());
                }
                if out.as_deref() != trimmed {
                    rewritten += 1;
                }
                out
            })
            .collect();
        columns.push(Series::new(column.name().clone(), mapped).into_column());
    }
    let standardized = DataFrame::new(columns).context("rebuild standardized frame")?;
    debug!(rewritten, "standardized missing-value labels");
    Ok(standardized)
}
