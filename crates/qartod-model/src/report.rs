use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::file_type::FileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Category of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Header line differs from the expected schema.
    SchemaMismatch,
    /// A data row has the wrong number of fields.
    ColumnCountMismatch,
    /// A field failed its column validator.
    FieldFormatInvalid,
    /// The directory walk met a name outside the fixed layout.
    UnknownFileOrDirectory,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::UnknownFileOrDirectory => Severity::Warning,
            Self::SchemaMismatch | Self::ColumnCountMismatch | Self::FieldFormatInvalid => {
                Severity::Error
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SchemaMismatch => "schema mismatch",
            Self::ColumnCountMismatch => "column count mismatch",
            Self::FieldFormatInvalid => "field format invalid",
            Self::UnknownFileOrDirectory => "unknown file or directory",
        }
    }
}

/// A single diagnostic produced while validating a file or walking a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// 1-based data row number (the header is row 0 and is never numbered).
    pub row: Option<usize>,
    pub column: Option<String>,
    /// Offending raw value, exactly as read.
    pub value: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            row: None,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    /// Header diagnostic carrying the order-insensitive set difference.
    pub fn schema_mismatch(missing: &[String], unexpected: &[String]) -> Self {
        let mut message = String::from("file header does not match the expected header");
        if !missing.is_empty() {
            message.push_str(&format!("; missing columns: {}", quote_list(missing)));
        }
        if !unexpected.is_empty() {
            message.push_str(&format!("; unexpected columns: {}", quote_list(unexpected)));
        }
        if missing.is_empty() && unexpected.is_empty() {
            message.push_str("; columns are present but out of order or differently quoted");
        }
        Self::new(IssueKind::SchemaMismatch, message)
    }

    pub fn column_count(row: usize, expected: usize, found: usize, raw: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            value: Some(raw.into()),
            ..Self::new(
                IssueKind::ColumnCountMismatch,
                format!("incorrect number of columns: expected {expected}, found {found}"),
            )
        }
    }

    pub fn field(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row: Some(row),
            column: Some(column.into()),
            value: Some(value.into()),
            ..Self::new(IssueKind::FieldFormatInvalid, reason)
        }
    }

    pub fn unknown_entry(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            value: Some(path.display().to_string()),
            ..Self::new(IssueKind::UnknownFileOrDirectory, reason)
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.row, self.column.as_deref()) {
            (Some(row), Some(column)) => write!(f, "row {row}, column {column}: ")?,
            (Some(row), None) => write!(f, "row {row}: ")?,
            _ => {}
        }
        write!(f, "{}", self.message)?;
        if let Some(value) = &self.value {
            write!(f, " [{value}]")?;
        }
        Ok(())
    }
}

fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation outcome for one file. An empty issue list means the file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub path: PathBuf,
    pub file_type: FileType,
    pub rows_checked: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
            rows_checked: 0,
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}

/// Outcome of walking a lookup-table tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeReport {
    pub root: PathBuf,
    pub files: Vec<ValidationReport>,
    /// Walk-level issues (unknown names), not attached to any file.
    pub issues: Vec<Issue>,
}

impl TreeReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Unknown entries are warnings and do not make a tree invalid.
    pub fn is_valid(&self) -> bool {
        self.files.iter().all(ValidationReport::is_valid)
            && !self
                .issues
                .iter()
                .any(|issue| issue.severity == Severity::Error)
    }

    pub fn invalid_files(&self) -> impl Iterator<Item = &ValidationReport> {
        self.files.iter().filter(|report| !report.is_valid())
    }

    pub fn error_count(&self) -> usize {
        self.files
            .iter()
            .map(ValidationReport::error_count)
            .sum::<usize>()
            + self
                .issues
                .iter()
                .filter(|issue| issue.severity == Severity::Error)
                .count()
    }

    pub fn warning_count(&self) -> usize {
        self.files
            .iter()
            .map(ValidationReport::warning_count)
            .sum::<usize>()
            + self
                .issues
                .iter()
                .filter(|issue| issue.severity == Severity::Warning)
                .count()
    }
}
