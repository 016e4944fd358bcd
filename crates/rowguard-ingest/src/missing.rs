//! Canonical missing-token predicates.
//!
//! After standardization a cell is missing iff it is null or its trimmed
//! text equals one of the canonical tokens. The comparison is case-sensitive
//! on the canonical spellings; `"NO"` is a real answer, never missing.

use polars::prelude::AnyValue;

use crate::polars_utils::any_to_string;

/// Trimmed text values that denote absence of information.
pub const MISSING_TOKENS: [&str; 3] = ["", "NA", "UNKNOWN"];

/// True iff the trimmed text is a canonical missing token.
pub fn is_missing_text(value: &str) -> bool {
    matches!(value.trim(), "" | "NA" | "UNKNOWN")
}

/// True iff the cell is null or its text form is a canonical missing token.
pub fn is_missing_value(value: &AnyValue) -> bool {
    if matches!(value, AnyValue::Null) {
        return true;
    }
    is_missing_text(&any_to_string(value.clone()))
}
