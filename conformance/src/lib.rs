//! xsd2owl conformance suite.
//!
//! Validates a generated ontology against the standards its output claims:
//! structural OWL constraints on the in-memory graph, and parse-level
//! conformance of the serialized artifacts.
//!
//! # Conformance Scope
//!
//! | Artifact | Standard |
//! |----------|----------|
//! | In-memory ontology | OWL 2 structural constraints |
//! | `ontology.ttl` / `ontology.nt` | RDF 1.1, Turtle 1.1, N-Triples |
//! | `ontology.json` | JSON-LD 1.1 |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use xsd2owl_conformance::{run_all, write_artifacts};
//! use xsd2owl_ontology::Ontology;
//!
//! let ontology = Ontology::new();
//! write_artifacts(&ontology, Path::new("public")).expect("Failed to write artifacts");
//! let report = run_all(Path::new("public"), Some(&ontology)).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use xsd2owl_ontology::{Format, Ontology};

pub use report::{ConformanceReport, Severity, TestResult};

/// File stem shared by every artifact.
pub const ARTIFACT_STEM: &str = "ontology";

/// Every serialization the artifacts directory holds.
pub const ARTIFACT_FORMATS: [Format; 3] = [Format::Turtle, Format::NTriples, Format::JsonLd];

/// Path of the artifact for `format` inside `dir`, e.g. `dir/ontology.ttl`.
#[must_use]
pub fn artifact_path(dir: &Path, format: Format) -> PathBuf {
    dir.join(format!("{ARTIFACT_STEM}.{}", format.extension()))
}

/// Serializes `ontology` in every format into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_artifacts(ontology: &Ontology, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for format in ARTIFACT_FORMATS {
        let path = artifact_path(dir, format);
        std::fs::write(&path, ontology.serialize(format))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), %format, "wrote artifact");
    }
    Ok(())
}

/// Runs the structural checks on a live ontology.
#[must_use]
pub fn validate_ontology(ontology: &Ontology) -> ConformanceReport {
    validators::owl::validate(ontology)
}

/// Runs the artifact validators on `dir`.
///
/// `expected_triples` pins the triple count both RDF artifacts must hold.
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn validate_artifacts(
    dir: &Path,
    expected_triples: Option<usize>,
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    report.extend(validators::rdf::validate(dir, expected_triples)?);
    report.extend(validators::jsonld::validate(dir)?);
    Ok(report)
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. OWL structure (live ontology, skipped when `ontology` is `None`)
/// 2. RDF 1.1 / Turtle 1.1 / N-Triples
/// 3. JSON-LD 1.1
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(artifacts: &Path, ontology: Option<&Ontology>) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    // 1. OWL structure (no file I/O)
    if let Some(ontology) = ontology {
        report.extend(validate_ontology(ontology));
    }

    // 2-3. Serialized artifacts
    let expected = ontology.map(|o| o.triples().len());
    report.extend(validate_artifacts(artifacts, expected)?);

    Ok(report)
}
