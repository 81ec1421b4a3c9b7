//! JSON-LD 1.1 serializer.
//!
//! Produces a single JSON-LD document with an `@context` holding the
//! standard prefixes plus every bound prefix, and an `@graph` array with one
//! node per header, class, property and labelled individual.

use serde_json::{json, Map, Value};

use crate::model::{Class, Individual, Ontology, Property};

/// Serializes the ontology to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(ontology: &Ontology) -> Value {
    json!({
        "@context": build_context(ontology),
        "@graph": build_graph(ontology)
    })
}

fn build_context(ontology: &Ontology) -> Value {
    let mut ctx = Map::new();
    ctx.insert("owl".to_owned(), json!("http://www.w3.org/2002/07/owl#"));
    ctx.insert(
        "rdf".to_owned(),
        json!("http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    );
    ctx.insert(
        "rdfs".to_owned(),
        json!("http://www.w3.org/2000/01/rdf-schema#"),
    );
    ctx.insert("xsd".to_owned(), json!("http://www.w3.org/2001/XMLSchema#"));
    for (prefix, iri) in ontology.prefixes() {
        ctx.insert(prefix.clone(), json!(iri));
    }
    Value::Object(ctx)
}

fn build_graph(ontology: &Ontology) -> Value {
    let mut nodes: Vec<Value> = Vec::new();

    if let Some(header) = &ontology.header {
        let mut node = json!({
            "@id": header.iri,
            "@type": "owl:Ontology"
        });
        if let Some(label) = &header.label {
            node["rdfs:label"] = json!(label);
        }
        if let Some(version) = &header.version {
            node["owl:versionInfo"] = json!(version);
        }
        nodes.push(node);
    }

    nodes.extend(ontology.classes().iter().map(class_to_json));
    nodes.extend(ontology.properties().iter().map(property_to_json));
    nodes.extend(
        ontology
            .individuals()
            .iter()
            .filter_map(individual_to_json),
    );

    Value::Array(nodes)
}

fn ids(iris: &[String]) -> Vec<Value> {
    iris.iter().map(|iri| json!({ "@id": iri })).collect()
}

fn class_to_json(class: &Class) -> Value {
    let mut node = json!({
        "@id": class.id,
        "@type": "owl:Class"
    });
    if let Some(label) = &class.label {
        node["rdfs:label"] = json!(label);
    }
    if let Some(comment) = &class.comment {
        node["rdfs:comment"] = json!(comment);
    }
    if !class.subclass_of.is_empty() {
        node["rdfs:subClassOf"] = Value::Array(ids(&class.subclass_of));
    }
    if let Some(members) = &class.one_of {
        node["owl:oneOf"] = json!({ "@list": ids(members) });
    }
    node
}

fn property_to_json(prop: &Property) -> Value {
    let mut node = json!({ "@id": prop.id });
    if !prop.kinds.is_empty() {
        let kinds: Vec<&str> = prop.kinds.iter().map(|k| k.prefixed()).collect();
        node["@type"] = json!(kinds);
    }
    if let Some(label) = &prop.label {
        node["rdfs:label"] = json!(label);
    }
    if let Some(comment) = &prop.comment {
        node["rdfs:comment"] = json!(comment);
    }
    if !prop.domains.is_empty() {
        node["rdfs:domain"] = Value::Array(ids(&prop.domains));
    }
    if !prop.ranges.is_empty() {
        node["rdfs:range"] = Value::Array(ids(&prop.ranges));
    }
    node
}

fn individual_to_json(ind: &Individual) -> Option<Value> {
    let label = ind.label.as_ref()?;
    Some(json!({
        "@id": ind.id,
        "rdfs:label": label
    }))
}
