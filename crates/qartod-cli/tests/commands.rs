//! Integration tests for the command layer.

use std::fs;
use std::path::{Path, PathBuf};

use qartod_cli::cli::{FileArgs, TreeArgs, TypesArgs};
use qartod_cli::commands::{load_inputs, parameters_by_type, run_file, run_tree, run_types};
use qartod_cli::types::RunSettings;
use qartod_model::{FileType, IssueKind, Vocabulary};
use qartod_standards::VocabularyBuilder;

const GLOBAL_RANGE_HEADER: &str = "ReferenceDesignator,ParameterID_R,ParameterID_T,GlobalRangeMin,GlobalRangeMax,_Units,_DataLevel,_Array ID,_Platform ID,_Instrument,_Notes";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A tree with its own configuration and vocabulary sources.
fn sample_tree(root: &Path) -> PathBuf {
    write(
        &root.join("vocab/reference_designators.txt"),
        "CP01CNSM-RID27-04-DOSTAD000\n",
    );
    write(&root.join("vocab/parameters.txt"), "PD7:quantity\n");
    write(&root.join("vocab/units.txt"), "deg_C\n");
    let config = root.join("qartod.toml");
    write(
        &config,
        r#"[vocabulary]
reference_designators = ["vocab/reference_designators.txt"]
parameters = ["vocab/parameters.txt"]
units = ["vocab/units.txt"]

[layout]
sensor_types = ["ctdbp"]
"#,
    );
    write(
        &root.join("data_qc_global_range_values.csv"),
        &format!(
            "{GLOBAL_RANGE_HEADER}\n\
             CP01CNSM-RID27-04-DOSTAD000,PD7,PD7,-2,35,deg_C,L1,CP01CNSM,RID27,DOSTAD000,\n\
             CP01CNSM-RID27-04-DOSTAD000,PD7,PD9,-2,35,deg_C,L1,CP01CNSM,RID27,DOSTAD000,\n"
        ),
    );
    config
}

fn settings_for(config: PathBuf) -> RunSettings {
    RunSettings {
        config: Some(config),
        ..RunSettings::default()
    }
}

#[test]
fn loads_configured_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_tree(dir.path());
    let inputs = load_inputs(&settings_for(config.clone()), dir.path()).unwrap();
    assert_eq!(inputs.config_path, Some(config));
    assert_eq!(inputs.config.layout.sensor_types, vec!["ctdbp".to_string()]);
    assert!(
        inputs
            .vocabularies
            .contains(Vocabulary::ReferenceDesignators, "CP01CNSM-RID27-04-DOSTAD000")
    );
}

#[test]
fn tree_reports_unknown_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_tree(dir.path());
    let args = TreeArgs {
        root: dir.path().to_path_buf(),
    };
    let report = run_tree(&args, &settings_for(config)).unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.files.len(), 1);
    let file = &report.files[0];
    assert_eq!(file.file_type, FileType::GlobalRange);
    assert_eq!(file.issues.len(), 1);
    assert_eq!(file.issues[0].row, Some(2));
    assert_eq!(file.issues[0].column.as_deref(), Some("ParameterID_T"));

    // the root config file is skipped; the vocabulary directory is not part of the layout
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.kind, IssueKind::UnknownFileOrDirectory);
    assert!(issue.value.as_deref().is_some_and(|path| path.ends_with("vocab")));
}

#[test]
fn file_command_infers_type() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_tree(dir.path());
    let args = FileArgs {
        path: dir.path().join("data_qc_global_range_values.csv"),
        file_type: None,
    };
    let report = run_file(&args, &settings_for(config)).unwrap();
    assert_eq!(report.file_type, FileType::GlobalRange);
    assert_eq!(report.rows_checked, 2);
}

#[test]
fn file_command_rejects_unrecognised_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_tree(dir.path());
    let path = dir.path().join("notes.csv");
    write(&path, "a,b\n");
    let args = FileArgs {
        path,
        file_type: None,
    };
    let error = run_file(&args, &settings_for(config)).unwrap_err();
    assert!(format!("{error:#}").contains("cannot determine the file type"));
}

#[test]
fn missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = TreeArgs {
        root: dir.path().to_path_buf(),
    };
    let result = run_tree(&args, &settings_for(dir.path().join("absent.toml")));
    assert!(result.is_err());
}

#[test]
fn types_lists_catalog() {
    run_types(&TypesArgs { columns: true }, &RunSettings::default()).unwrap();
}

#[test]
fn parameters_are_grouped_by_type_name() {
    let dir = tempfile::tempdir().unwrap();
    let parameters = dir.path().join("parameters.txt");
    write(&parameters, "PD7:quantity\nPD8:quantity\nPD1:function\n");
    let type_names = dir.path().join("parameter_types.txt");
    write(&type_names, "quantity:Quantity\n");

    let mut builder = VocabularyBuilder::new();
    builder.load_parameters(&parameters).unwrap();
    builder.load_type_names(&type_names).unwrap();
    let counts = parameters_by_type(&builder.build());

    let counts: Vec<(&str, usize)> = counts.iter().map(|(name, n)| (name.as_str(), *n)).collect();
    assert_eq!(counts, vec![("Quantity", 2), ("function", 1)]);
}
