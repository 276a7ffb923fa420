use std::path::Path;

use qartod_model::{FileType, Vocabularies};
use qartod_standards::Catalog;

/// Called before each file is validated. `Sync` lets one context serve several threads.
pub type FileObserver<'a> = &'a (dyn Fn(&Path, FileType) + Sync);

/// Everything a validation run reads. Built once, shared by reference.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub catalog: &'a Catalog,
    pub vocabularies: &'a Vocabularies,
    pub observer: Option<FileObserver<'a>>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(catalog: &'a Catalog, vocabularies: &'a Vocabularies) -> Self {
        Self {
            catalog,
            vocabularies,
            observer: None,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: FileObserver<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub(crate) fn notify(&self, path: &Path, file_type: FileType) {
        if let Some(observer) = self.observer {
            observer(path, file_type);
        }
    }
}
