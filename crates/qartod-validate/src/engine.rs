//! Schema-driven file validation.
//!
//! One engine serves every file type: the catalog supplies the row schema,
//! the dialect decides how lines are split, and each column's validator is
//! applied to every well-formed data row.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info_span, warn};

use qartod_model::{Dialect, FileType, Issue, IssueKind, ValidationReport};
use qartod_standards::RowSchema;

use crate::checks::{self, Row};
use crate::context::ValidationContext;
use crate::error::{Result, ValidateError};
use crate::reader::split_table;

/// Read `path` and validate it as `file_type`. The dialect follows the extension.
///
/// Bytes that are not UTF-8 become U+FFFD, so they surface as field issues
/// in the columns that hold them instead of failing the whole file.
pub fn validate_file(
    path: &Path,
    file_type: FileType,
    ctx: &ValidationContext<'_>,
) -> Result<ValidationReport> {
    ctx.notify(path, file_type);
    let bytes = fs::read(path).map_err(|source| ValidateError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!(path = %path.display(), "file is not valid UTF-8; invalid bytes replaced");
    }
    Ok(validate_content(path, &text, file_type, Dialect::from_path(path), ctx))
}

/// Validate in-memory text. `path` only labels the report.
///
/// Every problem in the text is an issue in the returned report; nothing here is fatal.
pub fn validate_content(
    path: &Path,
    text: &str,
    file_type: FileType,
    dialect: Dialect,
    ctx: &ValidationContext<'_>,
) -> ValidationReport {
    let span = info_span!("validate", file_type = %file_type, path = %path.display());
    let _guard = span.enter();

    let schema = ctx.catalog.schema(file_type);
    let mut report = ValidationReport::new(path, file_type);
    let table = split_table(text, dialect);

    let Some(header_line) = table.header_line.as_deref() else {
        report.push(Issue::new(
            IssueKind::SchemaMismatch,
            format!(
                "file has no header line; expected '{}'",
                schema.expected_header(dialect)
            ),
        ));
        return report;
    };

    if header_line != schema.expected_header(dialect) {
        let (missing, unexpected) = header_difference(schema, &table.header);
        report.push(Issue::schema_mismatch(&missing, &unexpected));
    }

    let data_rows = table.rows.len();
    let expected_columns = schema.column_count();
    let separator = dialect.delimiter().to_string();

    for (idx, fields) in table.rows.iter().enumerate() {
        let row_number = idx + 1;
        if fields.len() != expected_columns {
            report.push(Issue::column_count(
                row_number,
                expected_columns,
                fields.len(),
                fields.join(&separator),
            ));
            continue;
        }

        let row = Row::new(schema, fields);
        for (column, value) in schema.columns.iter().zip(fields) {
            let validator = column.validator_for(data_rows);
            if let Err(reason) = checks::check(validator, value, &row, ctx.vocabularies) {
                report.push(Issue::field(row_number, &column.name, value, reason));
            }
        }
    }
    report.rows_checked = data_rows;

    debug!(
        rows = data_rows,
        issues = report.issues.len(),
        "validated file"
    );
    report
}

/// Expected names absent from the header, then header names the schema does not know.
fn header_difference(schema: &RowSchema, header: &[String]) -> (Vec<String>, Vec<String>) {
    let found: BTreeSet<&str> = header.iter().map(String::as_str).collect();
    let expected: BTreeSet<&str> = schema.column_names().collect();

    let missing = schema
        .column_names()
        .filter(|name| !found.contains(name))
        .map(str::to_string)
        .collect();
    let unexpected = header
        .iter()
        .filter(|name| !expected.contains(name.as_str()))
        .map(String::clone)
        .collect();
    (missing, unexpected)
}
