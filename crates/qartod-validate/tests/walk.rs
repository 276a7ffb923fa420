use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;

use qartod_model::{FileType, IssueKind, Severity, Vocabularies};
use qartod_standards::{Catalog, CatalogOptions, Layout, VocabularyBuilder};
use qartod_validate::{ValidateError, ValidationContext, validate_file, walk_tree};

const GROSS_RANGE: &str = "subsite,node,sensor,stream,parameters,qcConfig,source,notes\n\
CE01ISSM,MFD37,03-CTDBPC000,ctdbp_cdef_dcl_instrument,{'inp': 'ctdbp_seawater_temperature'},\"{'qartod': {'gross_range_test': {'suspect_span': [1, 10], 'fail_span': [0, 11]}}}\",,\n";

const CLIMATOLOGY: &str = "subsite,node,sensor,stream,parameters,climatologyTable,source,notes\n\
CE01ISSM,MFD37,03-CTDBPC000,ctdbp_cdef_dcl_instrument,\"{'inp': 'temp', 'tinp': 'time', 'zinp': 'None'}\",climatology_tables/CE01ISSM-MFD37-03-CTDBPC000-temp.csv,,\n";

const TABLE: &str = ",\"[1, 1]\",\"[2, 2]\",\"[3, 3]\",\"[4, 4]\",\"[5, 5]\",\"[6, 6]\",\"[7, 7]\",\"[8, 8]\",\"[9, 9]\",\"[10, 10]\",\"[11, 11]\",\"[12, 12]\"\n\
\"[0, 0]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\",\"[nan, nan]\",\"[nan,nan]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\",\"[10, 20]\"\n";

const GLOBAL_RANGE: &str = "ReferenceDesignator,ParameterID_R,ParameterID_T,GlobalRangeMin,GlobalRangeMax,_Units,_DataLevel,_Array ID,_Platform ID,_Instrument,_Notes\n\
CP01CNSM-RID27-04-DOSTAD000,PD7,PD7,0,35,,L1,CP01CNSM,RID27,DOSTAD000,\n";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn vocabularies() -> Vocabularies {
    let mut builder = VocabularyBuilder::new();
    builder
        .add_reference_designator("CP01CNSM-RID27-04-DOSTAD000")
        .add_parameter("PD7");
    builder.build()
}

fn sample_tree(root: &Path) {
    write(&root.join("data_qc_global_range_values.csv"), GLOBAL_RANGE);
    write(&root.join("README.md"), "notes\n");
    write(&root.join(".hidden"), "ignored\n");
    write(
        &root.join("ctdbp/ctdbp_qartod_gross_range_test_values.csv"),
        GROSS_RANGE,
    );
    write(
        &root.join("ctdbp/ctdbp_qartod_climatology_test_values.csv"),
        CLIMATOLOGY,
    );
    write(
        &root.join("ctdbp/climatology_tables/CE01ISSM-MFD37-03-CTDBPC000-temp.csv"),
        TABLE,
    );
    write(&root.join("ctdbp/stray.txt"), "x\n");
    fs::create_dir_all(root.join("ctdbp/spike_tables")).unwrap();
    fs::create_dir_all(root.join("ctdbp/climatology_tables/nested")).unwrap();
    write(&root.join("adcp/adcp_qartod_gross_range_test_values.csv"), GROSS_RANGE);
}

#[test]
fn walks_known_layout() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let seen = Mutex::new(Vec::<(PathBuf, FileType)>::new());
    let observer = |path: &Path, file_type: FileType| {
        seen.lock().unwrap().push((path.to_path_buf(), file_type));
    };
    let ctx = ValidationContext::new(&catalog, &vocabularies).with_observer(&observer);

    let report = walk_tree(dir.path(), &Layout::default(), &ctx).unwrap();

    let types: Vec<FileType> = report.files.iter().map(|file| file.file_type).collect();
    assert_eq!(
        types,
        vec![
            FileType::ClimatologyTable,
            FileType::Climatology,
            FileType::GrossRange,
            FileType::GlobalRange,
        ]
    );
    for file in &report.files {
        assert!(file.is_valid(), "{}: {:?}", file.path.display(), file.issues);
    }

    let unknown: Vec<String> = report
        .issues
        .iter()
        .map(|issue| {
            assert_eq!(issue.kind, IssueKind::UnknownFileOrDirectory);
            assert_eq!(issue.severity, Severity::Warning);
            let value = issue.value.clone().unwrap_or_default();
            Path::new(&value)
                .strip_prefix(dir.path())
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    assert_eq!(
        unknown,
        vec![
            "README.md",
            "adcp",
            "ctdbp/climatology_tables/nested",
            "ctdbp/spike_tables",
            "ctdbp/stray.txt",
        ]
    );

    assert!(report.is_valid());
    assert_eq!(report.warning_count(), 5);
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[test]
fn configured_sensor_types_replace_defaults() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let layout = Layout {
        sensor_types: vec!["adcp".to_string()],
    };

    let report = walk_tree(dir.path(), &layout, &ctx).unwrap();
    let types: Vec<FileType> = report.files.iter().map(|file| file.file_type).collect();
    assert_eq!(types, vec![FileType::GrossRange, FileType::GlobalRange]);
}

#[test]
fn invalid_file_fails_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("data_qc_trend_test_values.csv"),
        "ReferenceDesignator,ParameterID_R\n",
    );

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let report = walk_tree(dir.path(), &Layout::default(), &ctx).unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.invalid_files().count(), 1);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let result = walk_tree(&dir.path().join("missing"), &Layout::default(), &ctx);
    assert!(matches!(result, Err(ValidateError::RootNotFound { .. })));
}

#[test]
fn undecodable_bytes_do_not_abort_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("data_qc_global_range_values.csv"), GLOBAL_RANGE);
    // Latin-1 degree sign in the unchecked notes column.
    let mut gross_range = GROSS_RANGE.trim_end().as_bytes().to_vec();
    gross_range.extend_from_slice(b"max 30\xb0C\n");
    let sensor_dir = dir.path().join("ctdbp");
    fs::create_dir_all(&sensor_dir).unwrap();
    fs::write(sensor_dir.join("ctdbp_qartod_gross_range_test_values.csv"), gross_range).unwrap();

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let report = walk_tree(dir.path(), &Layout::default(), &ctx).unwrap();

    let types: Vec<FileType> = report.files.iter().map(|file| file.file_type).collect();
    assert_eq!(types, vec![FileType::GrossRange, FileType::GlobalRange]);
    assert!(report.is_valid(), "{:?}", report.files);
}

#[test]
fn undecodable_bytes_in_a_checked_column_are_field_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_qc_global_range_values.csv");
    let mut contents = GLOBAL_RANGE.as_bytes().to_vec();
    contents.extend_from_slice(
        b"CP01CNSM-RID27-04-DOSTAD000,PD7,PD7,0,3\xb05,,L1,CP01CNSM,RID27,DOSTAD000,\n",
    );
    fs::write(&path, contents).unwrap();

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let report = validate_file(&path, FileType::GlobalRange, &ctx).unwrap();

    assert_eq!(report.rows_checked, 2);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.kind, IssueKind::FieldFormatInvalid);
    assert_eq!(issue.row, Some(2));
    assert_eq!(issue.column.as_deref(), Some("GlobalRangeMax"));
    assert_eq!(issue.value.as_deref(), Some("3\u{fffd}5"));
}

#[test]
fn root_config_file_is_not_reported() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("data_qc_global_range_values.csv"), GLOBAL_RANGE);
    write(&dir.path().join("qartod.toml"), "[layout]\n");
    write(&dir.path().join("ctdbp/qartod.toml"), "[layout]\n");

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let ctx = ValidationContext::new(&catalog, &vocabularies);
    let report = walk_tree(dir.path(), &Layout::default(), &ctx).unwrap();

    let unknown: Vec<&str> = report
        .issues
        .iter()
        .filter_map(|issue| issue.value.as_deref())
        .collect();
    assert_eq!(unknown.len(), 1, "{unknown:?}");
    assert!(unknown[0].ends_with("qartod.toml"));
    assert!(Path::new(unknown[0]).parent().unwrap().ends_with("ctdbp"));
}

#[test]
fn context_is_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let catalog = Catalog::build(CatalogOptions::default()).unwrap();
    let vocabularies = vocabularies();
    let seen = Mutex::new(0usize);
    let observer = |_: &Path, _: FileType| *seen.lock().unwrap() += 1;
    let ctx = ValidationContext::new(&catalog, &vocabularies).with_observer(&observer);

    let layout = Layout::default();
    let reports: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| walk_tree(dir.path(), &layout, &ctx).unwrap().files.len()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(reports, vec![4, 4]);
    assert_eq!(*seen.lock().unwrap(), 8);
}
