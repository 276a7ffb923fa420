//! Controlled-vocabulary loaders.
//!
//! Every source is read once by [`VocabularyBuilder`]; [`VocabularyBuilder::build`]
//! then hands out an immutable [`Vocabularies`] context.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use csv::ReaderBuilder;
use regex::Regex;
use tracing::{debug, warn};

use qartod_model::{LookupSet, Vocabularies};

use crate::config::VocabularySources;
use crate::error::{Result, StandardsError};

static UNIT_INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"INSERT INTO "unit" VALUES\(\d+,'(.*)'\)"#).expect("Invalid unit insert regex")
});

static PARAMETER_INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"INSERT INTO "parameter" VALUES\(\d+,'(.*)',.*"#)
        .expect("Invalid parameter insert regex")
});

/// Header of the designator column in deployment sheets.
pub const DEPLOYMENT_DESIGNATOR_COLUMN: &str = "Reference Designator";

/// Values extracted from a preload SQL dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadExtract {
    pub units: Vec<String>,
    pub parameters: Vec<String>,
}

/// Non-blank lines, trimmed.
pub fn parse_line_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `key:value` lines. Malformed lines are logged and skipped.
pub fn parse_key_value_lines(text: &str, source: &Path) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => warn!(
                path = %source.display(),
                line = idx + 1,
                "skipping malformed key:value line"
            ),
        }
    }
    pairs
}

/// Pull unit strings and parameter names out of `INSERT INTO` statements.
pub fn parse_preload_sql(text: &str) -> PreloadExtract {
    let mut extract = PreloadExtract::default();
    for line in text.lines() {
        if let Some(captures) = UNIT_INSERT.captures(line) {
            extract.units.push(captures[1].to_string());
        }
        if let Some(captures) = PARAMETER_INSERT.captures(line) {
            // the capture runs past the name; only the text up to the first quote is the name
            let name = captures[1].split('\'').next().unwrap_or_default();
            extract.parameters.push(name.to_string());
        }
    }
    extract
}

/// Collect the `Reference Designator` column of a deployment sheet.
pub fn read_deployment_designators(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|err| match err.into_kind() {
            csv::ErrorKind::Io(source) => StandardsError::io(path, source),
            other => StandardsError::csv(path, format!("{other:?}")),
        })?;

    let headers = reader
        .headers()
        .map_err(|err| StandardsError::csv(path, err))?
        .clone();
    // the placement of this column varies from one sheet to another
    let column = headers
        .iter()
        .position(|header| header.trim_matches('\u{feff}').trim() == DEPLOYMENT_DESIGNATOR_COLUMN)
        .ok_or_else(|| {
            StandardsError::csv(
                path,
                format!("missing '{DEPLOYMENT_DESIGNATOR_COLUMN}' column"),
            )
        })?;

    let mut designators = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StandardsError::csv(path, err))?;
        if let Some(value) = record.get(column).map(str::trim)
            && !value.is_empty()
        {
            designators.push(value.to_string());
        }
    }
    Ok(designators)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| StandardsError::io(path, err))
}

/// Accumulates vocabulary sources, then freezes them.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    reference_designators: LookupSet,
    parameters: LookupSet,
    units: LookupSet,
    parameter_types: BTreeMap<String, String>,
    type_names: BTreeMap<String, String>,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self {
            reference_designators: LookupSet::new("reference designators"),
            parameters: LookupSet::new("parameters"),
            units: LookupSet::new("units"),
            parameter_types: BTreeMap::new(),
            type_names: BTreeMap::new(),
        }
    }

    /// Load every source listed in the configuration.
    pub fn load_sources(&mut self, sources: &VocabularySources) -> Result<()> {
        for path in &sources.reference_designators {
            self.load_reference_designators(path)?;
        }
        for pattern in &sources.deployments {
            for path in expand_file_pattern(pattern)? {
                self.load_deployment_sheet(&path)?;
            }
        }
        for path in &sources.units {
            self.load_units(path)?;
        }
        for path in &sources.parameters {
            self.load_parameters(path)?;
        }
        for path in &sources.type_names {
            self.load_type_names(path)?;
        }
        for path in &sources.preload_sql {
            self.load_preload_sql(path)?;
        }
        Ok(())
    }

    /// Returns the number of designators read.
    pub fn load_reference_designators(&mut self, path: &Path) -> Result<usize> {
        let values = parse_line_list(&read_text(path)?);
        debug!(path = %path.display(), count = values.len(), "loaded reference designators");
        Ok(extend(&mut self.reference_designators, values))
    }

    pub fn load_deployment_sheet(&mut self, path: &Path) -> Result<usize> {
        let values = read_deployment_designators(path)?;
        debug!(path = %path.display(), count = values.len(), "loaded deployment sheet");
        Ok(extend(&mut self.reference_designators, values))
    }

    pub fn load_units(&mut self, path: &Path) -> Result<usize> {
        let values = parse_line_list(&read_text(path)?);
        debug!(path = %path.display(), count = values.len(), "loaded units");
        Ok(extend(&mut self.units, values))
    }

    /// `id:type` lines; the ID becomes a valid parameter.
    pub fn load_parameters(&mut self, path: &Path) -> Result<usize> {
        let pairs = parse_key_value_lines(&read_text(path)?, path);
        let count = pairs.len();
        for (id, parameter_type) in pairs {
            self.parameters.insert(id.clone());
            self.parameter_types.insert(id, parameter_type);
        }
        debug!(path = %path.display(), count, "loaded parameters");
        Ok(count)
    }

    pub fn load_type_names(&mut self, path: &Path) -> Result<usize> {
        let pairs = parse_key_value_lines(&read_text(path)?, path);
        let count = pairs.len();
        self.type_names.extend(pairs);
        debug!(path = %path.display(), count, "loaded parameter type names");
        Ok(count)
    }

    pub fn load_preload_sql(&mut self, path: &Path) -> Result<usize> {
        let extract = parse_preload_sql(&read_text(path)?);
        debug!(
            path = %path.display(),
            units = extract.units.len(),
            parameters = extract.parameters.len(),
            "loaded preload dump"
        );
        let count = extract.units.len() + extract.parameters.len();
        extend(&mut self.units, extract.units);
        extend(&mut self.parameters, extract.parameters);
        Ok(count)
    }

    pub fn add_reference_designator(&mut self, value: impl Into<String>) -> &mut Self {
        self.reference_designators.insert(value);
        self
    }

    pub fn add_parameter(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters.insert(value);
        self
    }

    pub fn add_unit(&mut self, value: impl Into<String>) -> &mut Self {
        self.units.insert(value);
        self
    }

    pub fn build(self) -> Vocabularies {
        Vocabularies::new(
            self.reference_designators,
            self.parameters,
            self.units,
            self.parameter_types,
            self.type_names,
        )
    }
}

/// Expand `*` and `?` in the file-name component of `path`, sorted by path.
/// Paths without wildcards are returned as given.
pub fn expand_file_pattern(path: &Path) -> Result<Vec<PathBuf>> {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return Ok(vec![path.to_path_buf()]);
    };
    if !name.contains(['*', '?']) {
        return Ok(vec![path.to_path_buf()]);
    }
    let matcher = wildcard_regex(name)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| StandardsError::io(dir, err))? {
        let entry = entry.map_err(|err| StandardsError::io(dir, err))?;
        let entry_path = entry.path();
        if let Some(file_name) = entry.file_name().to_str()
            && matcher.is_match(file_name)
            && entry_path.is_file()
        {
            matches.push(entry_path);
        }
    }
    matches.sort();
    if matches.is_empty() {
        warn!(pattern = %path.display(), "no files match pattern");
    }
    Ok(matches)
}

fn wildcard_regex(name: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    for ch in name.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|source| StandardsError::Pattern {
        pattern: name.to_string(),
        source,
    })
}

fn extend(set: &mut LookupSet, values: Vec<String>) -> usize {
    let count = values.len();
    for value in values {
        set.insert(value);
    }
    count
}

/// Build vocabularies straight from a configuration's sources.
pub fn load_vocabularies(sources: &VocabularySources) -> Result<Vocabularies> {
    let mut builder = VocabularyBuilder::new();
    builder.load_sources(sources)?;
    Ok(builder.build())
}
