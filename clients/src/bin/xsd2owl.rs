//! `xsd2owl`: Converts XML Schema files into an OWL ontology.
//!
//! Every schema given on the command line (plus every `.xsd` below `--dir`)
//! is mapped into one ontology, serialized to `--out` or standard output.
//!
//! **Usage:**
//! ```text
//! xsd2owl <SCHEMA>... [--dir <path>] [--config <file>] [--namespace <ns>]...
//!         [--default-namespace <ns>] [--type <name> | --element <name>]
//!         [--format turtle|ntriples|jsonld] [--out <path>] [--artifacts <dir>] [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;
use xsd2owl_mapper::{Config, ConversionReport, MapError, Mapper, Namer, UsageIndex};
use xsd2owl_ontology::{Format, Ontology};
use xsd2owl_schema::Schema;

/// Convert XML Schema documents into an OWL ontology.
#[derive(Parser)]
#[command(name = "xsd2owl", about = "Convert XML Schema documents into an OWL ontology")]
struct Args {
    /// Schema files to convert.
    schemas: Vec<PathBuf>,

    /// Also convert every `.xsd` file below this directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Namespace to process; repeatable. Overrides the configuration file.
    #[arg(long = "namespace")]
    namespaces: Vec<String>,

    /// Namespace for components that have none.
    #[arg(long)]
    default_namespace: Option<String>,

    /// Convert only the named global complex type.
    #[arg(long = "type", conflicts_with = "element")]
    type_name: Option<String>,

    /// Convert only the named global element.
    #[arg(long)]
    element: Option<String>,

    /// Output serialization.
    #[arg(long, default_value = "turtle")]
    format: Format,

    /// Output file (default: standard output).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write all serializations to this directory and run the conformance suite on them.
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Log per-element decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;
    let files = collect_schemas(&args.schemas, args.dir.as_deref())?;
    if files.is_empty() {
        bail!("no schema files given");
    }

    let mut schemas = Vec::with_capacity(files.len());
    let mut usage = UsageIndex::default();
    for path in &files {
        let schema = Schema::from_file(path)
            .with_context(|| format!("Failed to load schema {}", path.display()))?;
        usage.add_schema(&schema, &Namer::new(&schema, &config.default_namespace));
        schemas.push(schema);
    }

    let mut ontology = config.header().map_or_else(Ontology::new, Ontology::with_header);
    let mut report = ConversionReport::default();
    let mut matched = false;

    for (path, schema) in files.iter().zip(&schemas) {
        let config = schema_config(&config, schema);
        info!(
            schema = %path.display(),
            namespaces = ?config.namespaces_to_process,
            "converting schema"
        );

        let mut mapper = Mapper::with_usage(schema, &config, &mut ontology, &usage);
        let outcome = match (&args.type_name, &args.element) {
            (Some(name), _) => mapper.convert_type(name).map(|_| ()),
            (None, Some(name)) => mapper.convert_element(name),
            (None, None) => mapper.convert(),
        };
        match outcome {
            Ok(()) => matched = true,
            Err(MapError::UnknownType(_) | MapError::UnknownElement(_)) => {}
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to convert {}", path.display()));
            }
        }
        report.merge(mapper.finish());
    }

    if !matched {
        let name = args
            .type_name
            .as_deref()
            .or(args.element.as_deref())
            .unwrap_or_default();
        bail!("'{name}' is not declared by any of the given schemas");
    }

    for warning in &report.warnings {
        warn!("{warning}");
    }

    let text = ontology.serialize(args.format);
    match &args.out {
        Some(out) => {
            fs::write(out, &text)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("  Written: {}", out.display());
        }
        None => print!("{text}"),
    }
    eprintln!("Converted {} schema(s): {report}", files.len());

    if let Some(dir) = &args.artifacts {
        xsd2owl_conformance::write_artifacts(&ontology, dir)?;
        let conformance = xsd2owl_conformance::run_all(dir, Some(&ontology))?;
        eprintln!("{conformance}");
        if !conformance.all_passed() {
            eprintln!(
                "Conformance FAILED: {} check(s) did not pass.",
                conformance.failure_count()
            );
            process::exit(1);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Reads the configuration file, then applies command-line overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if !args.namespaces.is_empty() {
        config.namespaces_to_process.clone_from(&args.namespaces);
    }
    if let Some(ns) = &args.default_namespace {
        config.default_namespace.clone_from(ns);
    }
    Ok(config)
}

/// The configuration for one schema: processes its target namespace when none is configured.
fn schema_config(config: &Config, schema: &Schema) -> Config {
    let mut config = config.clone();
    if config.namespaces_to_process.is_empty() {
        config.namespaces_to_process.push(schema.target_namespace().to_owned());
    }
    config
}

/// Explicit files first, then `.xsd` files below `dir` in sorted order.
fn collect_schemas(files: &[PathBuf], dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut out = files.to_vec();
    if let Some(dir) = dir {
        let mut found = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "xsd") {
                found.push(path.to_path_buf());
            }
        }
        out.extend(found);
    }
    Ok(out)
}
