use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

/// Build a frame of string columns for tests; `None` cells become null.
pub(crate) fn string_frame(columns: &[(&str, Vec<Option<&str>>)]) -> DataFrame {
    let cols = columns
        .iter()
        .map(|(name, values)| {
            let owned: Vec<Option<String>> = values.iter().map(|v| v.map(String::from)).collect();
            Series::new((*name).into(), owned).into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}
