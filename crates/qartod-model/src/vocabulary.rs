use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Valid `_DataLevel` values.
pub const DATA_LEVELS: &[&str] = &["", "L0", "L1", "L2"];

/// A named, insertion-ordered set of valid values.
#[derive(Debug, Clone, Default)]
pub struct LookupSet {
    name: String,
    values: Vec<String>,
    index: HashSet<String>,
}

impl LookupSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn from_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(name);
        for value in values {
            set.insert(value);
        }
        set
    }

    /// Insert a value; returns false if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.index.contains(&value) {
            return false;
        }
        self.index.insert(value.clone());
        self.values.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains(value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Which controlled vocabulary a membership check consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    ReferenceDesignators,
    Parameters,
    Units,
    DataLevels,
}

impl Vocabulary {
    pub fn label(self) -> &'static str {
        match self {
            Self::ReferenceDesignators => "reference designators",
            Self::Parameters => "parameters",
            Self::Units => "units",
            Self::DataLevels => "data levels",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable lookup context shared by every validation call.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    reference_designators: LookupSet,
    parameters: LookupSet,
    units: LookupSet,
    data_levels: LookupSet,
    parameter_types: BTreeMap<String, String>,
    type_names: BTreeMap<String, String>,
}

impl Vocabularies {
    /// Assemble the context. The empty unit is always accepted, so it is added here.
    pub fn new(
        reference_designators: LookupSet,
        parameters: LookupSet,
        mut units: LookupSet,
        parameter_types: BTreeMap<String, String>,
        type_names: BTreeMap<String, String>,
    ) -> Self {
        units.insert("");
        Self {
            reference_designators,
            parameters,
            units,
            data_levels: LookupSet::from_values("data levels", DATA_LEVELS.iter().copied()),
            parameter_types,
            type_names,
        }
    }

    pub fn get(&self, vocabulary: Vocabulary) -> &LookupSet {
        match vocabulary {
            Vocabulary::ReferenceDesignators => &self.reference_designators,
            Vocabulary::Parameters => &self.parameters,
            Vocabulary::Units => &self.units,
            Vocabulary::DataLevels => &self.data_levels,
        }
    }

    pub fn contains(&self, vocabulary: Vocabulary, value: &str) -> bool {
        self.get(vocabulary).contains(value)
    }

    pub fn parameter_type(&self, parameter: &str) -> Option<&str> {
        self.parameter_types.get(parameter).map(String::as_str)
    }

    /// Resolve a parameter's type code to its display name.
    pub fn parameter_type_name(&self, parameter: &str) -> Option<&str> {
        let code = self.parameter_type(parameter)?;
        self.type_names.get(code).map(String::as_str)
    }

    pub fn parameter_types(&self) -> &BTreeMap<String, String> {
        &self.parameter_types
    }

    pub fn type_names(&self) -> &BTreeMap<String, String> {
        &self.type_names
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::new(
            LookupSet::new("reference designators"),
            LookupSet::new("parameters"),
            LookupSet::new("units"),
            BTreeMap::new(),
            BTreeMap::new(),
        )
    }
}
