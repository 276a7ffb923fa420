//! Naming conventions of a QARTOD lookup-table tree.
//!
//! ```text
//! <root>/data_qc_<test>_values.csv
//! <root>/<sensor>/<sensor>_qartod_gross_range_test_values*.csv
//! <root>/<sensor>/<sensor>_qartod_climatology_test_values*.csv
//! <root>/<sensor>/climatology_tables/<table>.csv
//! ```

use std::path::Path;

use qartod_model::FileType;

/// Sensor-type directories recognised when no configuration overrides them.
pub const DEFAULT_SENSOR_TYPES: &[&str] = &[
    "ctdav", "ctdbp", "ctdgv", "ctdmo", "ctdpf", "metbk", "pco2a", "pco2w", "phsen", "presf",
];

/// Subdirectory of a sensor directory holding climatology tables.
pub const CLIMATOLOGY_TABLES_DIR: &str = "climatology_tables";

const DATA_QC_PREFIXES: &[(&str, FileType)] = &[
    ("data_qc_global_range_values", FileType::GlobalRange),
    ("data_qc_gradient_test_values", FileType::Gradient),
    ("data_qc_local_range_values", FileType::LocalRange),
    ("data_qc_spike_test_values", FileType::Spike),
    ("data_qc_stuck_test_values", FileType::StuckValue),
    ("data_qc_trend_test_values", FileType::Trend),
];

const SENSOR_FILE_SUFFIXES: &[(&str, FileType)] = &[
    ("_qartod_gross_range_test_values", FileType::GrossRange),
    ("_qartod_climatology_test_values", FileType::Climatology),
];

/// Match a root-level data-QC file name.
pub fn data_qc_file_type(file_name: &str) -> Option<FileType> {
    DATA_QC_PREFIXES
        .iter()
        .find(|(prefix, _)| file_name.starts_with(prefix))
        .map(|(_, file_type)| *file_type)
}

/// Match a per-sensor file name, `<sensor>_qartod_<test>_test_values*`.
pub fn sensor_file_type(sensor: &str, file_name: &str) -> Option<FileType> {
    let rest = file_name.strip_prefix(sensor)?;
    SENSOR_FILE_SUFFIXES
        .iter()
        .find(|(suffix, _)| rest.starts_with(suffix))
        .map(|(_, file_type)| *file_type)
}

/// Infer a file type from a path alone.
///
/// The sensor prefix of per-sensor files is not checked against any allow-list here.
pub fn infer_file_type(path: &Path) -> Option<FileType> {
    let file_name = path.file_name()?.to_str()?;
    let in_tables_dir = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == CLIMATOLOGY_TABLES_DIR);
    if in_tables_dir {
        return Some(FileType::ClimatologyTable);
    }
    if let Some(file_type) = data_qc_file_type(file_name) {
        return Some(file_type);
    }
    let (sensor, _) = file_name.split_once("_qartod_")?;
    sensor_file_type(sensor, file_name)
}
