//! Turtle 1.1 serializer.
//!
//! Produces a Turtle document with prefix declarations, the optional
//! ontology header, then classes, properties and labelled individuals in
//! creation order. `owl:oneOf` lists use the collection syntax `( ... )`.

use std::fmt::Write as _;

use crate::model::Ontology;

/// Serializes the ontology to a Turtle string.
#[must_use]
pub fn to_turtle(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(64 * 1024);

    // Prefix declarations
    out.push_str("@prefix owl:  <http://www.w3.org/2002/07/owl#> .\n");
    out.push_str("@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n");
    out.push_str("@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n");
    out.push_str("@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .\n");
    for (prefix, iri) in ontology.prefixes() {
        let _ = writeln!(out, "@prefix {prefix}: <{iri}> .");
    }
    out.push('\n');

    if let Some(header) = &ontology.header {
        let mut preds = vec!["a owl:Ontology".to_owned()];
        if let Some(label) = &header.label {
            preds.push(format!("rdfs:label {}", turtle_string(label)));
        }
        if let Some(version) = &header.version {
            preds.push(format!("owl:versionInfo {}", turtle_string(version)));
        }
        write_subject(&mut out, &header.iri, &preds);
    }

    // Classes
    for class in ontology.classes() {
        let mut preds = vec!["a owl:Class".to_owned()];
        if let Some(label) = &class.label {
            preds.push(format!("rdfs:label {}", turtle_string(label)));
        }
        if let Some(comment) = &class.comment {
            preds.push(format!("rdfs:comment {}", turtle_string(comment)));
        }
        for parent in &class.subclass_of {
            preds.push(format!("rdfs:subClassOf <{parent}>"));
        }
        if let Some(members) = &class.one_of {
            let items: String = members.iter().map(|m| format!("<{m}> ")).collect();
            preds.push(format!("owl:oneOf ( {items})"));
        }
        write_subject(&mut out, &class.id, &preds);
    }

    // Properties
    for prop in ontology.properties() {
        let mut preds = Vec::new();
        if !prop.kinds.is_empty() {
            let kinds: Vec<&str> = prop.kinds.iter().map(|k| k.prefixed()).collect();
            preds.push(format!("a {}", kinds.join(" , ")));
        }
        if let Some(label) = &prop.label {
            preds.push(format!("rdfs:label {}", turtle_string(label)));
        }
        if let Some(comment) = &prop.comment {
            preds.push(format!("rdfs:comment {}", turtle_string(comment)));
        }
        for domain in &prop.domains {
            preds.push(format!("rdfs:domain <{domain}>"));
        }
        for range in &prop.ranges {
            preds.push(format!("rdfs:range <{range}>"));
        }
        write_subject(&mut out, &prop.id, &preds);
    }

    // Enumeration members
    for ind in ontology.individuals() {
        if let Some(label) = &ind.label {
            write_subject(
                &mut out,
                &ind.id,
                &[format!("rdfs:label {}", turtle_string(label))],
            );
        }
    }

    out
}

fn write_subject(out: &mut String, subject: &str, preds: &[String]) {
    if preds.is_empty() {
        return;
    }
    let _ = write!(out, "<{subject}>\n  {} .\n\n", preds.join(" ;\n  "));
}

fn turtle_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}
