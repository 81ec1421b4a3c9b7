//! RDF 1.1 / Turtle 1.1 validator.
//!
//! Validates that the Turtle and N-Triples artifacts are well-formed:
//! - Turtle file parses without errors
//! - N-Triples file parses without errors, one triple per line
//! - Triple counts are consistent between formats

use std::path::Path;

use anyhow::{Context, Result};
use sophia_api::source::TripleSource;
use sophia_turtle::parser::{nt, turtle};

use xsd2owl_ontology::Format;

use crate::artifact_path;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/rdf";

/// Validates the Turtle and N-Triples artifacts for RDF 1.1 conformance.
///
/// When `expected` is given, both artifacts must hold exactly that many triples.
///
/// # Errors
///
/// Returns an error if an artifact exists but cannot be read.
pub fn validate(artifacts: &Path, expected: Option<usize>) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let turtle_count = validate_turtle(artifacts, &mut report)?;
    let nt_count = validate_ntriples(artifacts, &mut report)?;

    if let (Some(ttl), Some(nt)) = (turtle_count, nt_count) {
        if ttl == nt {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("Turtle and N-Triples agree on {ttl} triples"),
            ));
        } else {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("Turtle has {ttl} triples but N-Triples has {nt}"),
            ));
        }
    }
    if let (Some(expected), Some(nt)) = (expected, nt_count) {
        if expected != nt {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("ontology has {expected} triples but the artifacts hold {nt}"),
            ));
        }
    }

    Ok(report)
}

fn read(path: &Path, report: &mut ConformanceReport) -> Result<Option<String>> {
    if !path.exists() {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{} not found in artifacts directory", path.display()),
        ));
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(content))
}

/// Parses the Turtle artifact and returns its triple count if it is valid.
fn validate_turtle(artifacts: &Path, report: &mut ConformanceReport) -> Result<Option<usize>> {
    let path = artifact_path(artifacts, Format::Turtle);
    let Some(content) = read(&path, report)? else {
        return Ok(None);
    };

    let mut count = 0usize;
    match turtle::parse_str(&content).for_each_triple(|_| count += 1) {
        Ok(()) => {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{} parses as Turtle ({count} triples)", path.display()),
            ));
            Ok(Some(count))
        }
        Err(err) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{} is not valid Turtle", path.display()),
                vec![err.to_string()],
            ));
            Ok(None)
        }
    }
}

/// Parses the N-Triples artifact and returns its triple count if it is valid.
fn validate_ntriples(artifacts: &Path, report: &mut ConformanceReport) -> Result<Option<usize>> {
    let path = artifact_path(artifacts, Format::NTriples);
    let Some(content) = read(&path, report)? else {
        return Ok(None);
    };

    // Each non-blank line in N-Triples must end with " ."
    let malformed: Vec<String> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let t = line.trim();
            !t.is_empty() && !t.starts_with('#') && !t.ends_with(" .")
        })
        .map(|(i, _)| format!("line {}: does not end with \" .\"", i + 1))
        .collect();

    let mut count = 0usize;
    let parsed = nt::parse_str(&content).for_each_triple(|_| count += 1);
    match parsed {
        Ok(()) if malformed.is_empty() => {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{} is valid N-Triples ({count} triples)", path.display()),
            ));
            Ok(Some(count))
        }
        Ok(()) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{} has malformed lines", path.display()),
                malformed,
            ));
            Ok(None)
        }
        Err(err) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{} is not valid N-Triples", path.display()),
                vec![err.to_string()],
            ));
            Ok(None)
        }
    }
}
