#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod loaders;
pub mod paths;
pub mod schema;

pub use crate::catalog::{ARRAY_ID_RANGE, Catalog, INSTRUMENT_RANGE, PLATFORM_ID_RANGE};
pub use crate::config::{Config, Layout, VocabularySources};
pub use crate::error::StandardsError;
pub use crate::layout::{
    CLIMATOLOGY_TABLES_DIR, DEFAULT_SENSOR_TYPES, data_qc_file_type, infer_file_type,
    sensor_file_type,
};
pub use crate::loaders::{VocabularyBuilder, expand_file_pattern, load_vocabularies};
pub use crate::paths::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, resolve_config_path};
pub use crate::schema::{CatalogOptions, Column, MatchMode, NumericMode, RowSchema, Validator};
