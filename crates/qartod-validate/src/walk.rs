//! Walking a lookup-table tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use qartod_model::{FileType, Issue, TreeReport};
use qartod_standards::{
    CLIMATOLOGY_TABLES_DIR, CONFIG_FILE_NAME, Layout, data_qc_file_type, sensor_file_type,
};

use crate::context::ValidationContext;
use crate::engine::validate_file;
use crate::error::{Result, ValidateError};

struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Validate every recognised file under `root`; anything else is reported as unknown.
/// The root-level config file is skipped.
pub fn walk_tree(root: &Path, layout: &Layout, ctx: &ValidationContext<'_>) -> Result<TreeReport> {
    if !root.is_dir() {
        return Err(ValidateError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut report = TreeReport::new(root);

    for entry in read_entries(root)? {
        if entry.is_dir {
            if layout.is_sensor_type(&entry.name) {
                walk_sensor_dir(&entry.path, &entry.name, ctx, &mut report)?;
            } else {
                unknown(&mut report, &entry.path, "not a recognised sensor-type directory");
            }
        } else if let Some(file_type) = data_qc_file_type(&entry.name) {
            report.files.push(validate_file(&entry.path, file_type, ctx)?);
        } else if entry.name != CONFIG_FILE_NAME {
            unknown(&mut report, &entry.path, "not a recognised data-QC lookup file");
        }
    }

    info!(
        root = %root.display(),
        files = report.files.len(),
        invalid = report.invalid_files().count(),
        "tree validated"
    );
    Ok(report)
}

fn walk_sensor_dir(
    dir: &Path,
    sensor: &str,
    ctx: &ValidationContext<'_>,
    report: &mut TreeReport,
) -> Result<()> {
    debug!(sensor, "entering sensor directory");
    for entry in read_entries(dir)? {
        if entry.is_dir {
            if entry.name == CLIMATOLOGY_TABLES_DIR {
                walk_tables_dir(&entry.path, ctx, report)?;
            } else {
                unknown(report, &entry.path, "not a recognised test-type directory");
            }
        } else if let Some(file_type) = sensor_file_type(sensor, &entry.name) {
            report.files.push(validate_file(&entry.path, file_type, ctx)?);
        } else {
            unknown(
                report,
                &entry.path,
                format!("not a recognised lookup file for sensor {sensor}"),
            );
        }
    }
    Ok(())
}

fn walk_tables_dir(dir: &Path, ctx: &ValidationContext<'_>, report: &mut TreeReport) -> Result<()> {
    for entry in read_entries(dir)? {
        if entry.is_dir {
            unknown(report, &entry.path, "unexpected directory among climatology tables");
        } else {
            report
                .files
                .push(validate_file(&entry.path, FileType::ClimatologyTable, ctx)?);
        }
    }
    Ok(())
}

fn unknown(report: &mut TreeReport, path: &Path, reason: impl Into<String>) {
    let issue = Issue::unknown_entry(path, reason);
    debug!(path = %path.display(), "{}", issue.message);
    report.issues.push(issue);
}

/// Non-hidden entries of `dir`, sorted by name.
fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read_error = |source: std::io::Error| ValidateError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        entries.push(Entry {
            is_dir: path.is_dir(),
            path,
            name,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
