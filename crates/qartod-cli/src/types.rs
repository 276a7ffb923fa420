use std::path::PathBuf;

use qartod_model::Vocabularies;
use qartod_standards::{Catalog, CatalogOptions, Config};

/// Which diagnostics reach stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageMode {
    /// Only violations and the summary.
    #[default]
    Errors,
    /// Also a progress line per file and per valid file.
    Verbose,
}

/// Settings shared by every validation command.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub messages: MessageMode,
    pub config: Option<PathBuf>,
    pub catalog: CatalogOptions,
    pub json: bool,
}

impl RunSettings {
    pub fn is_verbose(&self) -> bool {
        self.messages == MessageMode::Verbose
    }
}

/// Everything loaded before the first file is read.
#[derive(Debug)]
pub struct LoadedInputs {
    pub config_path: Option<PathBuf>,
    pub config: Config,
    pub catalog: Catalog,
    pub vocabularies: Vocabularies,
}
