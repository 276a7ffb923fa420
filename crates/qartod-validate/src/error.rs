//! Fatal validation errors. Row- and field-level problems are never errors;
//! they are accumulated into a [`qartod_model::ValidationReport`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    /// Target file could not be opened or read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine the file type of {path}")]
    UnrecognizedFile { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ValidateError>;
