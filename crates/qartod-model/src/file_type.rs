//! The fixed catalog of lookup-table file types and their text dialects.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of QC reference file. The set is closed; there is no schema inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    GrossRange,
    Climatology,
    ClimatologyTable,
    GlobalRange,
    Gradient,
    LocalRange,
    Spike,
    StuckValue,
    Trend,
}

impl FileType {
    pub const ALL: [FileType; 9] = [
        FileType::GrossRange,
        FileType::Climatology,
        FileType::ClimatologyTable,
        FileType::GlobalRange,
        FileType::Gradient,
        FileType::LocalRange,
        FileType::Spike,
        FileType::StuckValue,
        FileType::Trend,
    ];

    /// Stable identifier used on the command line and in JSON output.
    pub fn id(self) -> &'static str {
        match self {
            Self::GrossRange => "gross-range",
            Self::Climatology => "climatology",
            Self::ClimatologyTable => "climatology-table",
            Self::GlobalRange => "global-range",
            Self::Gradient => "gradient",
            Self::LocalRange => "local-range",
            Self::Spike => "spike",
            Self::StuckValue => "stuck-value",
            Self::Trend => "trend",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GrossRange => "per-sensor gross range test bounds",
            Self::Climatology => "per-sensor climatology test configuration",
            Self::ClimatologyTable => "monthly climatology range table",
            Self::GlobalRange => "global range test values",
            Self::Gradient => "gradient test values",
            Self::LocalRange => "local range test values",
            Self::Spike => "spike test values",
            Self::StuckValue => "stuck value test values",
            Self::Trend => "trend test values",
        }
    }

    /// Data-QC files are the ones checked against the controlled vocabularies.
    pub fn is_data_qc(self) -> bool {
        !matches!(
            self,
            Self::GrossRange | Self::Climatology | Self::ClimatologyTable
        )
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        FileType::ALL
            .into_iter()
            .find(|file_type| file_type.id() == key)
            .ok_or_else(|| format!("unknown file type: {s}"))
    }
}

/// How a file's lines are split into fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Comma separated with `"` quoting.
    #[default]
    Csv,
    /// Literal `|` split, no quoting.
    Psv,
}

impl Dialect {
    pub fn delimiter(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Psv => '|',
        }
    }

    /// `.psv` files use the pipe dialect, everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        let is_psv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("psv"));
        if is_psv { Self::Psv } else { Self::Csv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_snake_case() {
        assert_eq!("gross-range".parse::<FileType>(), Ok(FileType::GrossRange));
        assert_eq!("stuck_value".parse::<FileType>(), Ok(FileType::StuckValue));
        assert!("salinity".parse::<FileType>().is_err());
    }

    #[test]
    fn dialect_follows_extension() {
        assert_eq!(Dialect::from_path(Path::new("a/b.PSV")), Dialect::Psv);
        assert_eq!(Dialect::from_path(Path::new("a/b.csv")), Dialect::Csv);
        assert_eq!(Dialect::from_path(Path::new("noext")), Dialect::Csv);
    }
}
