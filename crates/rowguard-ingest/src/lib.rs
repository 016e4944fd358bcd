pub mod csv_table;
pub mod frame;
pub mod missing;
pub mod polars_utils;
pub mod standardize;

pub use csv_table::{CsvTable, read_csv_table};
pub use frame::{load_frame, to_frame};
pub use missing::{MISSING_TOKENS, is_missing_text, is_missing_value};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use standardize::apply_missing_labels;
