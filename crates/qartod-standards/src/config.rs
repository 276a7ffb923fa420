#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StandardsError};
use crate::layout::DEFAULT_SENSOR_TYPES;

/// Validator configuration, read from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub vocabulary: VocabularySources,
    #[serde(default)]
    pub layout: Layout,
}

/// Files the controlled vocabularies are loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularySources {
    /// One reference designator per line.
    #[serde(default)]
    pub reference_designators: Vec<PathBuf>,
    /// Deployment sheets with a `Reference Designator` column. The file name may
    /// use `*` and `?` wildcards, e.g. `lookups/*_Deploy.csv`.
    #[serde(default)]
    pub deployments: Vec<PathBuf>,
    /// One unit per line.
    #[serde(default)]
    pub units: Vec<PathBuf>,
    /// `id:type` per line.
    #[serde(default)]
    pub parameters: Vec<PathBuf>,
    /// `code:name` per line.
    #[serde(default)]
    pub type_names: Vec<PathBuf>,
    /// SQL dumps with `INSERT INTO "unit"` / `INSERT INTO "parameter"` statements.
    #[serde(default)]
    pub preload_sql: Vec<PathBuf>,
}

impl VocabularySources {
    pub fn is_empty(&self) -> bool {
        self.reference_designators.is_empty()
            && self.deployments.is_empty()
            && self.units.is_empty()
            && self.parameters.is_empty()
            && self.type_names.is_empty()
            && self.preload_sql.is_empty()
    }

    fn resolve_against(&mut self, base: &Path) {
        for list in [
            &mut self.reference_designators,
            &mut self.deployments,
            &mut self.units,
            &mut self.parameters,
            &mut self.type_names,
            &mut self.preload_sql,
        ] {
            for path in list.iter_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    /// Sensor-type directory names accepted under the tree root.
    #[serde(default = "default_sensor_types")]
    pub sensor_types: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            sensor_types: default_sensor_types(),
        }
    }
}

impl Layout {
    pub fn is_sensor_type(&self, name: &str) -> bool {
        self.sensor_types.iter().any(|sensor| sensor == name)
    }
}

fn default_sensor_types() -> Vec<String> {
    DEFAULT_SENSOR_TYPES
        .iter()
        .map(|sensor| (*sensor).to_string())
        .collect()
}

impl Config {
    /// Load a config file. Relative source paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| StandardsError::io(path, err))?;
        let mut config = Self::parse(&text, path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.vocabulary.resolve_against(base);
        Ok(config)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_sensor_type(&self, name: &str) -> bool {
        self.layout.is_sensor_type(name)
    }
}
