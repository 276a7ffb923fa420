//! Declarative row schemas: ordered columns, each with one validator.

use regex::Regex;

use qartod_model::{Dialect, FileType, Vocabulary};

use crate::error::{Result, StandardsError};

/// How pattern validators anchor their regex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The whole value must match.
    #[default]
    Full,
    /// Only a prefix of the value must match. Trailing content is ignored.
    Prefix,
}

/// How numeric-or-empty fields are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericMode {
    /// Optional leading `-`, at most one `.`, otherwise ASCII digits only.
    #[default]
    Strict,
    /// Anything `f64` parsing accepts once surrounding whitespace is trimmed.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    pub match_mode: MatchMode,
    pub numeric_mode: NumericMode,
}

/// A column check.
#[derive(Debug, Clone)]
pub enum Validator {
    Pattern { source: String, regex: Regex },
    MemberOf(Vocabulary),
    NumericOrEmpty(NumericMode),
    /// Value must equal characters `start..end` of an earlier column.
    SubstringOf {
        column: String,
        start: usize,
        end: usize,
    },
    Literal(String),
    AnyOf(Vec<Validator>),
    Always,
}

impl Validator {
    pub fn pattern(source: &str, mode: MatchMode) -> Result<Self> {
        let anchored = match mode {
            MatchMode::Full => format!("^(?:{source})$"),
            MatchMode::Prefix => format!("^(?:{source})"),
        };
        let regex = Regex::new(&anchored).map_err(|err| StandardsError::Pattern {
            pattern: source.to_string(),
            source: err,
        })?;
        Ok(Self::Pattern {
            source: source.to_string(),
            regex,
        })
    }

    pub fn substring_of(column: &str, start: usize, end: usize) -> Self {
        Self::SubstringOf {
            column: column.to_string(),
            start,
            end,
        }
    }

    /// Short human description, used by the catalog listing.
    pub fn describe(&self) -> String {
        match self {
            Self::Pattern { source, .. } => format!("matches {source}"),
            Self::MemberOf(vocabulary) => format!("one of the {vocabulary}"),
            Self::NumericOrEmpty(_) => "numeric or empty".to_string(),
            Self::SubstringOf { column, start, end } => {
                format!("{column}[{start}..{end}]")
            }
            Self::Literal(text) => format!("exactly {text}"),
            Self::AnyOf(alternatives) => alternatives
                .iter()
                .map(Self::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Self::Always => "any value".to_string(),
        }
    }

    fn referenced_columns(&self) -> Vec<&str> {
        match self {
            Self::SubstringOf { column, .. } => vec![column.as_str()],
            Self::AnyOf(alternatives) => alternatives
                .iter()
                .flat_map(Self::referenced_columns)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub validator: Validator,
    /// Replaces `validator` when the file has exactly one data row.
    pub sole_row: Option<Validator>,
}

impl Column {
    pub fn new(name: &str, validator: Validator) -> Self {
        Self {
            name: name.to_string(),
            validator,
            sole_row: None,
        }
    }

    #[must_use]
    pub fn with_sole_row(mut self, validator: Validator) -> Self {
        self.sole_row = Some(validator);
        self
    }

    pub fn validator_for(&self, data_rows: usize) -> &Validator {
        match (&self.sole_row, data_rows) {
            (Some(validator), 1) => validator,
            _ => &self.validator,
        }
    }
}

/// Ordered column layout for one file type.
#[derive(Debug, Clone)]
pub struct RowSchema {
    pub file_type: FileType,
    pub columns: Vec<Column>,
}

impl RowSchema {
    /// Build a schema, rejecting references to columns that are missing or come later.
    pub fn new(file_type: FileType, columns: Vec<Column>) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            let validators = std::iter::once(&column.validator).chain(column.sole_row.as_ref());
            for referenced in validators.flat_map(Validator::referenced_columns) {
                let position = columns.iter().position(|c| c.name == referenced);
                match position {
                    Some(pos) if pos < idx => {}
                    _ => {
                        return Err(StandardsError::InvalidSchema {
                            file_type: file_type.id().to_string(),
                            message: format!(
                                "column '{}' references '{referenced}', which is not an earlier column",
                                column.name
                            ),
                        });
                    }
                }
            }
        }
        Ok(Self { file_type, columns })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// The exact header line expected for this dialect.
    pub fn expected_header(&self, dialect: Dialect) -> String {
        let delimiter = dialect.delimiter();
        self.column_names()
            .map(|name| match dialect {
                Dialect::Csv => quote_csv_field(name),
                Dialect::Psv => name.to_string(),
            })
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

fn quote_csv_field(name: &str) -> String {
    if name.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_rejects_trailing_content() {
        let Validator::Pattern { regex, .. } =
            Validator::pattern("[0-9A-Za-z]{5}", MatchMode::Full).unwrap()
        else {
            panic!("expected pattern");
        };
        assert!(regex.is_match("SBD17"));
        assert!(!regex.is_match("SBD17X"));
    }

    #[test]
    fn prefix_match_accepts_trailing_content() {
        let Validator::Pattern { regex, .. } =
            Validator::pattern("[0-9A-Za-z]{5}", MatchMode::Prefix).unwrap()
        else {
            panic!("expected pattern");
        };
        assert!(regex.is_match("SBD17X"));
        assert!(!regex.is_match("SB-17"));
    }

    #[test]
    fn substring_must_reference_earlier_column() {
        let result = RowSchema::new(
            FileType::Spike,
            vec![
                Column::new("_Array ID", Validator::substring_of("ReferenceDesignator", 0, 8)),
                Column::new("ReferenceDesignator", Validator::Always),
            ],
        );
        assert!(matches!(result, Err(StandardsError::InvalidSchema { .. })));
    }

    #[test]
    fn csv_header_quotes_fields_with_commas() {
        let schema = RowSchema::new(
            FileType::ClimatologyTable,
            vec![
                Column::new("", Validator::Always),
                Column::new("[1, 1]", Validator::Always),
            ],
        )
        .unwrap();
        assert_eq!(schema.expected_header(Dialect::Csv), ",\"[1, 1]\"");
        assert_eq!(schema.expected_header(Dialect::Psv), "|[1, 1]");
    }
}
