use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fitgrid_model::Source;

use fitgrid_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None if result.dry_run => println!("Output: (dry run, nothing written)"),
        None => {}
    }
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }

    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("No subject"),
        header_cell("Bad time"),
        header_cell("Bad value"),
        header_cell("Minutes"),
        header_cell("Unjoined"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for source in Source::ALL {
        let counts = report.source(source);
        let file = result
            .sources
            .get(source)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(source).add_attribute(Attribute::Bold),
            Cell::new(file),
            Cell::new(counts.rows_read),
            count_cell(counts.missing_subject, Color::Yellow),
            count_cell(counts.unparsable_timestamp, Color::Yellow),
            count_cell(counts.unparsable_value, Color::Yellow),
            Cell::new(counts.deduped_rows),
            dim_cell(counts.join_dropped),
        ]);
    }
    println!("{table}");

    let mut totals = Table::new();
    totals.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_table_style(&mut totals);
    align_column(&mut totals, 1, CellAlignment::Right);
    let stats = report.resample;
    totals.add_row(vec![Cell::new("Merged minutes"), Cell::new(report.merged_rows)]);
    totals.add_row(vec![Cell::new("Subjects"), Cell::new(report.subjects)]);
    totals.add_row(vec![Cell::new("Grid minutes"), Cell::new(stats.grid_rows)]);
    totals.add_row(vec![
        Cell::new("Synthesized minutes"),
        Cell::new(stats.synthesized_rows),
    ]);
    totals.add_row(vec![
        Cell::new("Filled heart rate"),
        Cell::new(stats.filled_heart_rate),
    ]);
    totals.add_row(vec![
        Cell::new("Row defects"),
        count_cell(report.total_defects(), Color::Yellow),
    ]);
    totals.add_row(vec![
        Cell::new("Dropped (no fill value)"),
        count_cell(report.undefined_fill, Color::Red),
    ]);
    totals.add_row(vec![
        Cell::new("Final rows")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.final_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{totals}");

    if !report.subjects_without_heart_rate.is_empty() {
        eprintln!(
            "warning: {} subject(s) had no heart-rate data and were dropped",
            report.subjects_without_heart_rate.len()
        );
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
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
        .set_width(140);
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
