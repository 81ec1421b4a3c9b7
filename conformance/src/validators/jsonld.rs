//! JSON-LD 1.1 validator.
//!
//! Verifies that the JSON-LD artifact is a well-formed document:
//! - Has `@context` with the standard `owl`, `rdf`, `rdfs` and `xsd` prefixes
//! - Has an `@graph` array of node objects
//! - All `@id` values are absolute IRIs or blank node labels

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use xsd2owl_ontology::Format;

use crate::artifact_path;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/jsonld";

/// Prefixes every generated context declares.
const REQUIRED_PREFIXES: &[&str] = &["owl", "rdf", "rdfs", "xsd"];

/// Validates the JSON-LD artifact for JSON-LD 1.1 conformance.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let json_path = artifact_path(artifacts, Format::JsonLd);
    if !json_path.exists() {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{} not found in artifacts directory", json_path.display()),
        ));
        return Ok(report);
    }

    let content = std::fs::read_to_string(&json_path)
        .with_context(|| format!("Failed to read {}", json_path.display()))?;

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{} is not valid JSON", json_path.display()),
                vec![err.to_string()],
            ));
            return Ok(report);
        }
    };

    check_context(&value, &mut report);
    check_graph(&value, &mut report);

    Ok(report)
}

/// Verifies that the `@context` contains the standard prefixes.
fn check_context(value: &Value, report: &mut ConformanceReport) {
    let Some(context) = value.get("@context") else {
        report.push(TestResult::fail(
            VALIDATOR,
            "JSON-LD document missing @context",
        ));
        return;
    };

    let missing: Vec<String> = REQUIRED_PREFIXES
        .iter()
        .filter(|prefix| context.get(**prefix).and_then(Value::as_str).is_none())
        .map(|prefix| (*prefix).to_owned())
        .collect();
    report.push(TestResult::check(
        VALIDATOR,
        missing,
        "Standard prefixes present in @context",
        "Missing prefixes in @context",
    ));
}

/// Verifies that `@graph` is an array of nodes whose identifiers are absolute.
fn check_graph(value: &Value, report: &mut ConformanceReport) {
    let Some(graph) = value.get("@graph").and_then(Value::as_array) else {
        report.push(TestResult::fail(
            VALIDATOR,
            "JSON-LD document has no @graph array",
        ));
        return;
    };

    let anonymous: Vec<String> = graph
        .iter()
        .enumerate()
        .filter(|(_, node)| node.get("@id").is_none())
        .map(|(i, _)| format!("@graph[{i}] has no @id"))
        .collect();
    report.push(TestResult::check(
        VALIDATOR,
        anonymous,
        format!("@graph holds {} identified nodes", graph.len()),
        "@graph nodes without @id",
    ));

    let mut relative = Vec::new();
    for node in graph {
        collect_relative_ids(node, &mut relative);
    }
    report.push(TestResult::check(
        VALIDATOR,
        relative,
        "All @id values are absolute IRIs",
        "Relative @id values",
    ));
}

/// Walks a JSON value and records every `@id` that is neither absolute nor a blank node.
fn collect_relative_ids(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                if key == "@id" {
                    match inner.as_str() {
                        Some(id) if is_absolute(id) => {}
                        Some(id) => out.push(id.to_owned()),
                        None => out.push(inner.to_string()),
                    }
                } else {
                    collect_relative_ids(inner, out);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_relative_ids(v, out)),
        _ => {}
    }
}

fn is_absolute(id: &str) -> bool {
    if id.starts_with("_:") {
        return true;
    }
    match id.split_once(':') {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        }
        None => false,
    }
}
