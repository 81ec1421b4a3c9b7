//! Demonstrates building a small ontology by hand and serializing it.
//!
//! Run with: `cargo run --example dump_ontology -p xsd2owl-ontology`

use xsd2owl_ontology::{Format, Individual, Ontology, OntologyHeader};

fn main() {
    let ns = "http://example.org/plic#";
    let mut ontology = Ontology::with_header(OntologyHeader {
        iri: "http://example.org/plic".to_owned(),
        label: Some("Plinian Core (demo)".to_owned()),
        version: Some("0.1".to_owned()),
    });
    ontology.bind_prefix("plic", ns);

    let class = format!("{ns}SexEnumType");
    ontology.add_class(&class, Some("Enum values for Sex"), None);
    ontology.add_one_of_members(
        &class,
        ["Male", "Female"]
            .iter()
            .map(|v| Individual {
                id: format!("{class}_{v}"),
                label: Some(v.to_lowercase()),
            })
            .collect(),
    );
    let prop = format!("{ns}hasSex");
    ontology.add_object_property(&prop, Some("has Sex"), None);
    ontology.add_property_domain_range(&prop, None, Some(&class));

    println!("Ontology:");
    println!("  Classes:      {}", ontology.class_count());
    println!("  Properties:   {}", ontology.property_count());
    println!("  Individuals:  {}", ontology.individual_count());
    println!();

    for format in [Format::Turtle, Format::NTriples, Format::JsonLd] {
        let text = ontology.serialize(format);
        println!("{format} output ({} bytes):", text.len());
        println!("{text}");
    }
}
