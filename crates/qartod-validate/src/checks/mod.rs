//! Field validators.
//!
//! Each check is a pure function of the value, the row it sits in and the
//! loaded vocabularies. A failure carries the reason shown in the report.

mod membership;
mod numeric;
mod pattern;
mod substring;

pub use membership::check_member;
pub use numeric::{check_numeric_or_empty, is_lenient_number, is_strict_number};
pub use pattern::check_pattern;
pub use substring::{char_slice, check_substring};

use qartod_model::Vocabularies;
use qartod_standards::{RowSchema, Validator};

/// Outcome of one field check. `Err` holds the reason.
pub type CheckResult = std::result::Result<(), String>;

/// A data row with field lookup by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    schema: &'a RowSchema,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(schema: &'a RowSchema, fields: &'a [String]) -> Self {
        Self { schema, fields }
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.schema
            .position(column)
            .and_then(|idx| self.fields.get(idx))
            .map(String::as_str)
    }
}

/// Apply `validator` to `value`.
pub fn check(
    validator: &Validator,
    value: &str,
    row: &Row<'_>,
    vocabularies: &Vocabularies,
) -> CheckResult {
    match validator {
        Validator::Pattern { source, regex } => check_pattern(regex, source, value),
        Validator::MemberOf(vocabulary) => check_member(vocabularies, *vocabulary, value),
        Validator::NumericOrEmpty(mode) => check_numeric_or_empty(*mode, value),
        Validator::SubstringOf { column, start, end } => {
            check_substring(row, column, *start, *end, value)
        }
        Validator::Literal(expected) => {
            if value == expected {
                Ok(())
            } else {
                Err(format!("expected exactly '{expected}'"))
            }
        }
        Validator::AnyOf(alternatives) => {
            let mut reasons = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                match check(alternative, value, row, vocabularies) {
                    Ok(()) => return Ok(()),
                    Err(reason) => reasons.push(reason),
                }
            }
            Err(reasons.join("; or "))
        }
        Validator::Always => Ok(()),
    }
}
