//! Terminal rendering of an audit run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rowguard_cli::commands::RunOutcome;
use rowguard_model::Status;

const FIX_LIST_DISPLAY_LIMIT: usize = 10;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn status_cell(status: Status) -> Cell {
    let color = match status {
        Status::Pass => Color::Green,
        Status::Warn => Color::Yellow,
        Status::Fail => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

pub fn print_summary(outcome: &RunOutcome) {
    println!("Input: {}", outcome.input.display());
    if !outcome.artifacts.is_empty() {
        println!("Output: {}", outcome.output_dir.display());
    }

    let mut scorecard = Table::new();
    scorecard.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut scorecard);
    for row in &outcome.summary.scorecard {
        let check_cell = if row.check == "overall" {
            Cell::new(&row.check).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&row.check)
        };
        scorecard.add_row(vec![check_cell, status_cell(row.status), Cell::new(&row.notes)]);
    }
    println!("{scorecard}");

    if !outcome.summary.fix_list.is_empty() {
        let mut fixes = Table::new();
        fixes.set_header(vec![
            header_cell("Check"),
            header_cell("Field"),
            header_cell("Message"),
            header_cell("Count"),
        ]);
        apply_table_style(&mut fixes);
        if let Some(column) = fixes.column_mut(3) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        for entry in outcome.summary.fix_list.iter().take(FIX_LIST_DISPLAY_LIMIT) {
            fixes.add_row(vec![
                Cell::new(entry.check.as_str()),
                Cell::new(&entry.field),
                Cell::new(&entry.message),
                Cell::new(entry.count),
            ]);
        }
        println!("Fix list (ranked):");
        println!("{fixes}");
        let remaining = outcome.summary.fix_list.len().saturating_sub(FIX_LIST_DISPLAY_LIMIT);
        if remaining > 0 {
            println!("(+{remaining} more signatures in fix_list.csv)");
        }
    }

    println!(
        "{} issue(s) across {} check(s)",
        outcome.summary.issues.len(),
        outcome.results.len()
    );
    for path in &outcome.artifacts {
        println!("Wrote: {}", path.display());
    }
}
