use std::collections::BTreeMap;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use qartod_model::{FileType, Issue, Severity, TreeReport, ValidationReport};

use crate::types::RunSettings;

/// Diagnostic lines for one file, as printed to stdout.
pub fn file_lines(report: &ValidationReport, settings: &RunSettings) -> Vec<String> {
    let mut lines = Vec::new();
    if report.is_valid() {
        if settings.is_verbose() {
            lines.push(format!("{}: ok ({} rows)", report.path.display(), report.rows_checked));
        }
        return lines;
    }
    lines.push(format!(
        "{}: {} issue(s) in {} file",
        report.path.display(),
        report.issues.len(),
        report.file_type
    ));
    lines.extend(report.issues.iter().map(|issue| format!("  {issue}")));
    lines
}

/// Walk-level line for an entry outside the known layout.
pub fn walk_issue_line(issue: &Issue) -> String {
    let label = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    format!("{label}: {issue}")
}

pub fn print_file_report(report: &ValidationReport, settings: &RunSettings) -> Result<()> {
    if settings.json {
        return print_json(report);
    }
    for line in file_lines(report, settings) {
        println!("{line}");
    }
    if report.is_valid() && !settings.is_verbose() {
        println!("{}: valid", report.path.display());
    }
    Ok(())
}

pub fn print_tree_report(report: &TreeReport, settings: &RunSettings) -> Result<()> {
    if settings.json {
        return print_json(report);
    }
    for issue in &report.issues {
        println!("{}", walk_issue_line(issue));
    }
    for file in &report.files {
        for line in file_lines(file, settings) {
            println!("{line}");
        }
    }
    println!();
    println!("{}", summary_table(report));
    let invalid = report.invalid_files().count();
    if invalid == 0 {
        println!("All {} files valid.", report.files.len());
    } else {
        println!("{invalid} of {} files invalid.", report.files.len());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

#[derive(Default)]
struct TypeTotals {
    files: usize,
    invalid: usize,
    rows: usize,
    errors: usize,
    warnings: usize,
}

/// Per-file-type totals, with a closing TOTAL row.
pub fn summary_table(report: &TreeReport) -> Table {
    let mut totals: BTreeMap<FileType, TypeTotals> = BTreeMap::new();
    for file in &report.files {
        let entry = totals.entry(file.file_type).or_default();
        entry.files += 1;
        entry.invalid += usize::from(!file.is_valid());
        entry.rows += file.rows_checked;
        entry.errors += file.error_count();
        entry.warnings += file.warning_count();
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Files"),
        header_cell("Invalid"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut grand = TypeTotals::default();
    for (file_type, counts) in &totals {
        grand.files += counts.files;
        grand.invalid += counts.invalid;
        grand.rows += counts.rows;
        grand.errors += counts.errors;
        grand.warnings += counts.warnings;
        table.add_row(vec![
            Cell::new(file_type.id())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(counts.files),
            count_cell(counts.invalid, Color::Red),
            Cell::new(counts.rows),
            count_cell(counts.errors, Color::Red),
            count_cell(counts.warnings, Color::Yellow),
        ]);
    }
    let walk_warnings = report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .count();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(grand.files).add_attribute(Attribute::Bold),
        count_cell(grand.invalid, Color::Red).add_attribute(Attribute::Bold),
        Cell::new(grand.rows).add_attribute(Attribute::Bold),
        count_cell(grand.errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(grand.warnings + walk_warnings, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
