use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use drugdex_cli::types::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("Output: {}", summary.output.display());
    println!("{}", summary_table(summary));
}

fn summary_table(summary: &RunSummary) -> Table {
    let stats = &summary.stats;
    let wiki_origin = if summary.from_cache { "cache" } else { "api" };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(format!("PsychonautWiki records ({wiki_origin})")),
        Cell::new(summary.wiki_records),
    ]);
    table.add_row(vec![
        Cell::new("TripSit factsheets"),
        Cell::new(summary.factsheet_records),
    ]);
    table.add_row(vec![Cell::new("Names visited"), Cell::new(stats.names_visited)]);
    table.add_row(vec![
        dim_cell("Already claimed"),
        dim_cell(stats.unmatched),
    ]);
    table.add_row(vec![
        Cell::new("Dropped without routes"),
        count_cell(stats.dropped_without_routes, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate names suppressed"),
        count_cell(stats.duplicate_names, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Substances written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.emitted)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
