use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tally_cli::pipeline::{CountOutcome, WrittenReport};
use tally_report::format_percentage;

pub fn print_summary(outcome: &CountOutcome) {
    println!("Input files: {}", outcome.input_files.len());
    for path in &outcome.input_files {
        println!("- {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Report"),
        header_cell("Entries"),
        header_cell("Counted"),
        header_cell("Top value"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for report in &outcome.reports {
        table.add_row(report_row(report));
    }
    println!("{table}");
}

fn report_row(report: &WrittenReport) -> Vec<Cell> {
    let (leader, share) = match &report.leader {
        Some(entry) => (
            Cell::new(&entry.value),
            Cell::new(format!("{}%", format_percentage(entry.percentage))),
        ),
        None => (dim_cell("-"), dim_cell("-")),
    };
    vec![
        Cell::new(&report.column)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Cell::new(report.path.display()),
        Cell::new(report.entries),
        count_cell(report.total),
        leader,
        share,
    ]
}

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
