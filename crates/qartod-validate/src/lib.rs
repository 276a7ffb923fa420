//! Validation of QARTOD lookup-table files and trees.

#![deny(unsafe_code)]

pub mod checks;
mod context;
mod engine;
mod error;
mod reader;
mod walk;

pub use context::{FileObserver, ValidationContext};
pub use engine::{validate_content, validate_file};
pub use error::{Result, ValidateError};
pub use reader::{Table, split_table};
pub use walk::walk_tree;

use std::path::Path;

use qartod_model::{FileType, ValidationReport};
use qartod_standards::infer_file_type;

/// Validate one file, inferring its type from the name unless one is given.
pub fn validate_path(
    path: &Path,
    file_type: Option<FileType>,
    ctx: &ValidationContext<'_>,
) -> Result<ValidationReport> {
    let file_type = match file_type.or_else(|| infer_file_type(path)) {
        Some(file_type) => file_type,
        None => {
            return Err(ValidateError::UnrecognizedFile {
                path: path.to_path_buf(),
            });
        }
    };
    validate_file(path, file_type, ctx)
}
