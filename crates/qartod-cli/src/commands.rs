use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use qartod_model::{FileType, TreeReport, ValidationReport, Vocabularies, Vocabulary};
use qartod_standards::{Catalog, Config, load_vocabularies, resolve_config_path};
use qartod_validate::{ValidationContext, validate_path, walk_tree};

use crate::cli::{FileArgs, TreeArgs, TypesArgs};
use crate::summary::apply_table_style;
use crate::types::{LoadedInputs, RunSettings};

/// Resolve and load the configuration, vocabularies and catalog.
pub fn load_inputs(settings: &RunSettings, root: &Path) -> Result<LoadedInputs> {
    let config_path = resolve_config_path(settings.config.as_deref(), Some(root));
    let config = match &config_path {
        Some(path) => {
            Config::load(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => {
            debug!("no configuration file found, using defaults");
            Config::default()
        }
    };
    let vocabularies =
        load_vocabularies(&config.vocabulary).context("load controlled vocabularies")?;
    let catalog = Catalog::build(settings.catalog).context("build schema catalog")?;
    Ok(LoadedInputs {
        config_path,
        config,
        catalog,
        vocabularies,
    })
}

fn echo_progress(path: &Path, file_type: FileType) {
    println!("validating {file_type} file: {}", path.display());
}

pub fn run_tree(args: &TreeArgs, settings: &RunSettings) -> Result<TreeReport> {
    let span = info_span!("tree", root = %args.root.display());
    let _guard = span.enter();

    let inputs = load_inputs(settings, &args.root)?;
    let mut ctx = ValidationContext::new(&inputs.catalog, &inputs.vocabularies);
    if settings.is_verbose() && !settings.json {
        ctx = ctx.with_observer(&echo_progress);
    }
    let report = walk_tree(&args.root, &inputs.config.layout, &ctx)
        .with_context(|| format!("validate tree {}", args.root.display()))?;
    info!(
        files = report.files.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "tree complete"
    );
    Ok(report)
}

pub fn run_file(args: &FileArgs, settings: &RunSettings) -> Result<ValidationReport> {
    let inputs = load_inputs(settings, Path::new("."))?;
    let mut ctx = ValidationContext::new(&inputs.catalog, &inputs.vocabularies);
    if settings.is_verbose() && !settings.json {
        ctx = ctx.with_observer(&echo_progress);
    }
    validate_path(&args.path, args.file_type, &ctx)
        .with_context(|| format!("validate {}", args.path.display()))
}

pub fn run_types(args: &TypesArgs, settings: &RunSettings) -> Result<()> {
    let catalog = Catalog::build(settings.catalog).context("build schema catalog")?;
    let mut table = Table::new();
    if args.columns {
        table.set_header(vec!["Type", "Column", "Check"]);
    } else {
        table.set_header(vec!["Type", "Description", "Columns", "Vocabularies"]);
    }
    apply_table_style(&mut table);
    for schema in catalog.schemas() {
        if args.columns {
            for column in &schema.columns {
                let mut check = column.validator.describe();
                if let Some(sole_row) = &column.sole_row {
                    check.push_str(&format!(" (single row: {})", sole_row.describe()));
                }
                let name = if column.name.is_empty() {
                    "(blank)".to_string()
                } else {
                    column.name.clone()
                };
                table.add_row(vec![schema.file_type.id().to_string(), name, check]);
            }
        } else {
            table.add_row(vec![
                schema.file_type.id().to_string(),
                schema.file_type.description().to_string(),
                schema.column_count().to_string(),
                if schema.file_type.is_data_qc() { "yes" } else { "no" }.to_string(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_vocabulary(settings: &RunSettings) -> Result<()> {
    let inputs = load_inputs(settings, Path::new("."))?;
    if let Some(path) = &inputs.config_path {
        println!("Config: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec!["Vocabulary", "Entries"]);
    apply_table_style(&mut table);
    for vocabulary in [
        Vocabulary::ReferenceDesignators,
        Vocabulary::Parameters,
        Vocabulary::Units,
        Vocabulary::DataLevels,
    ] {
        let set = inputs.vocabularies.get(vocabulary);
        table.add_row(vec![set.name().to_string(), set.len().to_string()]);
    }
    table.add_row(vec![
        "parameter types".to_string(),
        inputs.vocabularies.parameter_types().len().to_string(),
    ]);
    table.add_row(vec![
        "type names".to_string(),
        inputs.vocabularies.type_names().len().to_string(),
    ]);
    println!("{table}");

    let by_type = parameters_by_type(&inputs.vocabularies);
    if !by_type.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Parameter type", "Parameters"]);
        apply_table_style(&mut table);
        for (name, count) in &by_type {
            table.add_row(vec![name.clone(), count.to_string()]);
        }
        println!("{table}");
    }
    Ok(())
}

/// Parameter counts keyed by type display name, falling back to the raw type code.
pub fn parameters_by_type(vocabularies: &Vocabularies) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (parameter, code) in vocabularies.parameter_types() {
        let name = vocabularies.parameter_type_name(parameter).unwrap_or(code);
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}
