use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// Raw CSV contents: one header row plus data rows of equal width.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`CsvTable`].
///
/// The first non-blank row is the header. Blank rows are skipped; short
/// records are padded with empty cells so every row has the header width.
/// Row positions after this step are the record indices reported by checks.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(record.iter().map(normalize_header).collect());
            }
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    let value = record.get(idx).unwrap_or("");
                    row.push(normalize_cell(value));
                }
                rows.push(row);
            }
        }
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_headers_and_rows() {
        let file = write_temp("id,name\n1,alpha\n2,beta\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.headers, ["id", "name"]);
        assert_eq!(table.rows, [["1", "alpha"], ["2", "beta"]]);
    }

    #[test]
    fn skips_blank_rows_and_pads_short_records() {
        let file = write_temp("id,name\n\n1\n,\n2,beta\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.rows, [vec!["1", ""], vec!["2", "beta"]]);
    }

    #[test]
    fn strips_bom_and_whitespace_from_headers() {
        let file = write_temp("\u{feff} id , full  name\n1,alpha\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.headers, ["id", "full name"]);
    }

    #[test]
    fn empty_file_yields_empty_table() {
        let file = write_temp("");
        let table = read_csv_table(file.path()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
