use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use ev_common::{any_to_string, format_numeric};
use ev_model::{DataIssue, IssueSeverity, WheelerCategory};
use ev_output::preview_frame;
use ev_transform::ImputationSummary;

use crate::types::BuildResult;

pub fn print_summary(result: &BuildResult) {
    let run = &result.run;
    match &result.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: not written (dry run)"),
    }
    if let Some(path) = &result.issues_json {
        println!("Issues: {}", path.display());
    }
    println!("States: {}", run.frame.height());
    if !run.excluded.is_empty() {
        println!("Excluded: {}", run.excluded.join(", "));
    }

    print_imputation_table(&run.imputation);
    print_preview_table(&run.frame, result.preview_rows);
    print_issue_table(&run.report.issues);
}

fn print_imputation_table(summary: &ImputationSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("National"),
        header_cell("Known"),
        header_cell("Remaining"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for category in WheelerCategory::ALL {
        let remaining = *summary.remaining.get(category);
        let remaining_cell = if remaining < 0.0 {
            Cell::new(format_numeric(remaining))
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(format_numeric(remaining))
        };
        table.add_row(vec![
            Cell::new(category.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format_numeric(*summary.national_totals.get(category))),
            Cell::new(format_numeric(*summary.known_totals.get(category))),
            remaining_cell,
        ]);
    }
    println!();
    println!(
        "Imputation: {} state(s) in base ({} regional, {} proportional, {} unallocated)",
        summary.allocations.len(),
        summary.regional_count(),
        summary.proportional_count(),
        summary.unallocated_count()
    );
    println!("{table}");
}

fn print_preview_table(frame: &DataFrame, rows: usize) {
    if rows == 0 || frame.height() == 0 {
        return;
    }
    let preview = preview_frame(frame, rows);
    let mut table = Table::new();
    table.set_header(
        preview
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = preview.get_columns();
    for row_idx in 0..preview.height() {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let value = any_to_string(column.get(row_idx).unwrap_or(AnyValue::Null));
                if value.is_empty() {
                    dim_cell("-")
                } else {
                    Cell::new(value)
                }
            })
            .collect();
        table.add_row(row);
    }
    println!();
    println!("Preview ({} of {} rows):", preview.height(), frame.height());
    println!("{table}");
}

fn print_issue_table(issues: &[DataIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&DataIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| (severity_rank(issue.severity), issue.code()));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Stage"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.code()),
            Cell::new(issue.stage),
            optional_cell(issue.column.as_deref().or(issue.state.as_deref())),
            issue
                .count
                .map_or_else(|| dim_cell("-"), |count| {
                    Cell::new(count).fg(severity_color(issue.severity))
                }),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
