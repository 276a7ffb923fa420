//! The fixed file-type catalog.
//!
//! One [`RowSchema`] per [`FileType`]. Schemas are compiled once, then shared
//! read-only across every validation call.

use qartod_model::{FileType, Vocabulary};

use crate::error::Result;
use crate::schema::{CatalogOptions, Column, MatchMode, RowSchema, Validator};

/// Signed decimal as written in QC config literals.
const NUMBER: &str = r"-?[0-9]+(?:\.[0-9]*)?";

const SUBSITE: &str = "#*[0-9A-Za-z]{8}";
const NODE: &str = "[0-9A-Za-z]{5}";
const SENSOR: &str = "[0-9A-Za-z]{2}-[0-9A-Za-z]{9}";
const STREAM: &str = "[0-9a-z_]+";
const GROSS_RANGE_PARAMETERS: &str = r"\{'inp': '.*'\}";
const CLIMATOLOGY_PARAMETERS: &str = r"\{'inp': '.*', 'tinp': '.*', 'zinp': '.*'\}";
const CLIMATOLOGY_TABLE_PATH: &str =
    r"climatology_tables/[0-9A-Za-z]{8}-[0-9A-Za-z]{5}-[0-9A-Za-z]{2}-[0-9A-Za-z]{9}-.*\.csv";
const NAN_PAIR: &str = r"\[nan,\s*nan\]";

/// Character ranges of a reference designator, e.g. `CP01CNSM-RID27-04-DOSTAD000`.
pub const ARRAY_ID_RANGE: (usize, usize) = (0, 8);
pub const PLATFORM_ID_RANGE: (usize, usize) = (9, 14);
pub const INSTRUMENT_RANGE: (usize, usize) = (18, 27);

pub const REFERENCE_DESIGNATOR: &str = "ReferenceDesignator";

/// Number of monthly columns in a climatology table.
const MONTHS: usize = 12;

#[derive(Debug, Clone)]
pub struct Catalog {
    options: CatalogOptions,
    /// Indexed by discriminant; `build` fills one slot per `FileType::ALL` entry, in order.
    schemas: Vec<RowSchema>,
}

impl Catalog {
    pub fn build(options: CatalogOptions) -> Result<Self> {
        let mut schemas = Vec::with_capacity(FileType::ALL.len());
        for file_type in FileType::ALL {
            let columns = columns_for(file_type, options)?;
            schemas.push(RowSchema::new(file_type, columns)?);
        }
        Ok(Self { options, schemas })
    }

    pub fn options(&self) -> CatalogOptions {
        self.options
    }

    pub fn schema(&self, file_type: FileType) -> &RowSchema {
        &self.schemas[file_type as usize]
    }

    pub fn schemas(&self) -> impl Iterator<Item = &RowSchema> {
        self.schemas.iter()
    }
}

fn columns_for(file_type: FileType, options: CatalogOptions) -> Result<Vec<Column>> {
    let mode = options.match_mode;
    let numeric = || Validator::NumericOrEmpty(options.numeric_mode);
    let columns = match file_type {
        FileType::GrossRange => {
            let mut columns = site_columns(mode)?;
            columns.push(Column::new(
                "parameters",
                Validator::pattern(GROSS_RANGE_PARAMETERS, mode)?,
            ));
            columns.push(Column::new(
                "qcConfig",
                Validator::pattern(&gross_range_config(), mode)?,
            ));
            columns.push(Column::new("source", Validator::Always));
            columns.push(Column::new("notes", Validator::Always));
            columns
        }
        FileType::Climatology => {
            let mut columns = site_columns(mode)?;
            columns.push(Column::new(
                "parameters",
                Validator::pattern(CLIMATOLOGY_PARAMETERS, mode)?,
            ));
            columns.push(Column::new(
                "climatologyTable",
                Validator::pattern(CLIMATOLOGY_TABLE_PATH, mode)?,
            ));
            columns.push(Column::new("source", Validator::Always));
            columns.push(Column::new("notes", Validator::Always));
            columns
        }
        FileType::ClimatologyTable => climatology_table_columns(mode)?,
        FileType::GlobalRange => {
            let mut columns = identity_columns();
            columns.push(Column::new("GlobalRangeMin", numeric()));
            columns.push(Column::new("GlobalRangeMax", numeric()));
            columns.extend(trailing_columns(true));
            columns.push(Column::new("_Notes", Validator::Always));
            columns
        }
        FileType::Gradient => {
            let mut columns = identity_columns();
            columns.push(Column::new("GradientTest_xunits", Validator::Always));
            columns.push(Column::new("GradientTest_ddatdx", Validator::Always));
            columns.push(Column::new("GradientTest_mindx", numeric()));
            columns.push(Column::new("GradientTest_startdat", Validator::Always));
            columns.push(Column::new("GradientTest_toldat", Validator::Always));
            columns.extend(trailing_columns(false));
            columns
        }
        FileType::LocalRange => {
            let mut columns = identity_columns();
            for name in [
                "LocalRange_datlim",
                "LocalRange_datlimz",
                "LocalRange_dims",
                "LocalRange_zparam",
                "LocalRange_xparam",
            ] {
                columns.push(Column::new(name, Validator::Always));
            }
            columns.extend(trailing_columns(false));
            columns
        }
        FileType::Spike => {
            numeric_test_columns(&["SpikeTest_ACC", "SpikeTest_N", "SpikeTest_L"], numeric)
        }
        FileType::StuckValue => numeric_test_columns(
            &["StuckValueTest_ResolutionR", "StuckValueTest_NumRepeatValues"],
            numeric,
        ),
        FileType::Trend => numeric_test_columns(
            &[
                "TrendTest_TimeIntLengthDays",
                "TrendTest_PolynomialOrder",
                "TrendTest_nstd",
            ],
            numeric,
        ),
    };
    Ok(columns)
}

fn site_columns(mode: MatchMode) -> Result<Vec<Column>> {
    Ok(vec![
        Column::new("subsite", Validator::pattern(SUBSITE, mode)?),
        Column::new("node", Validator::pattern(NODE, mode)?),
        Column::new("sensor", Validator::pattern(SENSOR, mode)?),
        Column::new("stream", Validator::pattern(STREAM, mode)?),
    ])
}

fn gross_range_config() -> String {
    let pair = format!(r"\[{NUMBER}, {NUMBER}\]");
    format!(
        r"\{{'qartod': \{{'gross_range_test': \{{'suspect_span': {pair}, 'fail_span': {pair}\}}\}}\}}"
    )
}

fn climatology_table_columns(mode: MatchMode) -> Result<Vec<Column>> {
    let pair = format!(r"\[{NUMBER}, {NUMBER}\]");
    let mut columns = vec![
        Column::new("", Validator::pattern(&pair, mode)?)
            .with_sole_row(Validator::Literal("[0, 0]".to_string())),
    ];
    for month in 1..=MONTHS {
        columns.push(Column::new(
            &format!("[{month}, {month}]"),
            Validator::AnyOf(vec![
                Validator::pattern(&pair, mode)?,
                Validator::pattern(NAN_PAIR, mode)?,
            ]),
        ));
    }
    Ok(columns)
}

fn identity_columns() -> Vec<Column> {
    vec![
        Column::new(
            REFERENCE_DESIGNATOR,
            Validator::MemberOf(Vocabulary::ReferenceDesignators),
        ),
        Column::new("ParameterID_R", Validator::MemberOf(Vocabulary::Parameters)),
        Column::new("ParameterID_T", Validator::MemberOf(Vocabulary::Parameters)),
    ]
}

/// `_Units` through `_Instrument`. Gradient and local-range files leave `_Instrument` unchecked.
fn trailing_columns(check_instrument: bool) -> Vec<Column> {
    let (array_start, array_end) = ARRAY_ID_RANGE;
    let (platform_start, platform_end) = PLATFORM_ID_RANGE;
    let (instrument_start, instrument_end) = INSTRUMENT_RANGE;
    vec![
        Column::new("_Units", Validator::MemberOf(Vocabulary::Units)),
        Column::new("_DataLevel", Validator::MemberOf(Vocabulary::DataLevels)),
        Column::new(
            "_Array ID",
            Validator::substring_of(REFERENCE_DESIGNATOR, array_start, array_end),
        ),
        Column::new(
            "_Platform ID",
            Validator::substring_of(REFERENCE_DESIGNATOR, platform_start, platform_end),
        ),
        Column::new(
            "_Instrument",
            if check_instrument {
                Validator::substring_of(REFERENCE_DESIGNATOR, instrument_start, instrument_end)
            } else {
                Validator::Always
            },
        ),
    ]
}

fn numeric_test_columns(names: &[&str], numeric: impl Fn() -> Validator) -> Vec<Column> {
    let mut columns = identity_columns();
    for name in names {
        columns.push(Column::new(name, numeric()));
    }
    columns.extend(trailing_columns(true));
    columns
}
