use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fusion_cli::run::RunOutcome;
use fusion_cli::text::Messages;
use fusion_store::SourceOption;

pub fn print_sources(sources: &[SourceOption], messages: &Messages) {
    println!("{}", messages.sources_heading);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Table"),
        header_cell("Table ID"),
        header_cell("View"),
        header_cell("View ID"),
    ]);
    apply_table_style(&mut table);
    for source in sources {
        table.add_row(vec![
            Cell::new(source.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&source.table_name),
            dim_cell(&source.table_id),
            Cell::new(&source.view_name),
            dim_cell(&source.view_id),
        ]);
    }
    println!("{table}");
}

pub fn print_summary(outcome: &RunOutcome, messages: &Messages) {
    let summary = &outcome.summary;
    println!("{}: {} ({})", messages.success, outcome.output_name, summary.output);
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Field")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, name) in summary.field_names.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(name)]);
    }
    println!("{table}");

    let mut totals = Table::new();
    apply_summary_table_style(&mut totals);
    totals.add_row(vec![Cell::new("Sources"), Cell::new(summary.source_count)]);
    totals.add_row(vec![
        Cell::new("Records written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.record_count).add_attribute(Attribute::Bold),
    ]);
    totals.add_row(vec![
        Cell::new("Fields cleared"),
        count_cell(summary.fields_deleted),
    ]);
    totals.add_row(vec![
        Cell::new("Records cleared"),
        count_cell(summary.records_deleted),
    ]);
    totals.add_row(vec![
        Cell::new("Duration"),
        dim_cell(format!("{} ms", summary.duration_ms)),
    ]);
    totals.add_row(vec![
        Cell::new("Saved"),
        if outcome.saved {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("dry run")
        },
    ]);
    align_column(&mut totals, 1, CellAlignment::Right);
    println!("{totals}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
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
