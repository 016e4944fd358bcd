/// Formats a rate as a percentage with one decimal, e.g. `0.8` -> `"80.0%"`.
pub(crate) fn format_pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_signed_percentages() {
        assert_eq!(format_pct(0.8), "80.0%");
        assert_eq!(format_pct(-0.9), "-90.0%");
        assert_eq!(format_pct(0.0), "0.0%");
        assert_eq!(format_pct(1.0), "100.0%");
    }
}
