//! Table rendering for run summaries, lookups and row previews.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use hx_core::LookupIndex;
use hx_core::frame::{column_names, string_values};
use hx_model::{Category, ColumnNames, HeaderIndex, RunSummary};

/// Prints the stage, category and worker tables for a run.
pub fn print_run_summary(summary: &RunSummary) {
    println!("{}", stage_table(summary));
    println!("{}", category_table(summary));
    println!("{}", load_table(summary));
    if summary.unknown_visit_types > 0 {
        eprintln!(
            "warning: {} rows had visit types missing from the reference sheet",
            summary.unknown_visit_types
        );
    }
    if summary.unparsable_dates > 0 {
        eprintln!(
            "warning: {} rows had unparsable appointment dates and were sorted last",
            summary.unparsable_dates
        );
    }
}

/// Row counts through every stage, with a final total row.
pub fn stage_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Removed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for audit in &summary.stages {
        table.add_row(vec![
            Cell::new(audit.stage.label()),
            Cell::new(audit.input_count),
            Cell::new(audit.output_count),
            count_cell(audit.removed(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.input_rows).add_attribute(Attribute::Bold),
        Cell::new(summary.final_rows).add_attribute(Attribute::Bold),
        count_cell(summary.removed_rows(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn category_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in Category::ALL {
        table.add_row(vec![
            Cell::new(category.code()),
            Cell::new(summary.category_rows(category)),
        ]);
    }
    table
}

pub fn load_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Agent"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for load in &summary.worker_loads {
        table.add_row(vec![Cell::new(&load.worker), Cell::new(load.rows)]);
    }
    table
}

/// Valid states and the visit-type workability table of a reference sheet.
pub fn lookup_tables(lookup: &LookupIndex) -> (Table, Table) {
    let mut states = Table::new();
    states.set_header(vec![header_cell("Valid state")]);
    apply_table_style(&mut states);
    for state in lookup.valid_states() {
        states.add_row(vec![Cell::new(state)]);
    }

    let mut visit_types = Table::new();
    visit_types.set_header(vec![header_cell("Visit type"), header_cell("Workable")]);
    apply_table_style(&mut visit_types);
    align_column(&mut visit_types, 1, CellAlignment::Center);
    for (visit_type, workable) in lookup.visit_types() {
        let flag = if workable {
            Cell::new("Y").fg(Color::Green)
        } else {
            dim_cell("N")
        };
        visit_types.add_row(vec![Cell::new(visit_type), flag]);
    }
    (states, visit_types)
}

/// First `limit` rows of an allocated frame, showing the engine's columns.
pub fn preview_table(frame: &DataFrame, columns: &ColumnNames, limit: usize) -> Table {
    let headers = HeaderIndex::new(column_names(frame));
    let shown: Vec<&str> = [
        &columns.priority_label,
        &columns.assigned_worker,
        &columns.provider,
        &columns.appointment_date,
        &columns.visit_type,
        &columns.appointment_state,
        &columns.primary_insurance,
    ]
    .into_iter()
    .filter_map(|wanted| headers.resolve(wanted))
    .collect();

    let mut table = Table::new();
    table.set_header(shown.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    let values: Vec<Vec<String>> = shown
        .iter()
        .map(|name| string_values(frame, name).unwrap_or_default())
        .collect();
    for row in 0..frame.height().min(limit) {
        table.add_row(
            values
                .iter()
                .map(|column| Cell::new(column.get(row).map_or("", String::as_str)))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
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
