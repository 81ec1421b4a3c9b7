//! OWL ontology store for xsd2owl.
//!
//! The `xsd2owl-ontology` crate is the RDF sink the schema mapper writes
//! into: an append-only collection of OWL classes, datatype and object
//! properties, and enumeration individuals, with idempotent creation and
//! serializers that produce Turtle, N-Triples, and JSON-LD output.
//!
//! # Entry Point
//!
//! ```
//! let mut ontology = xsd2owl_ontology::Ontology::new();
//! ontology.add_class("http://example.org/plic#DistributionType", Some("Distribution"), None);
//! assert!(!ontology.add_class("http://example.org/plic#DistributionType", None, None));
//! assert_eq!(ontology.class_count(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! use xsd2owl_ontology::{Format, Ontology};
//!
//! let ontology = Ontology::new();
//! let turtle = ontology.serialize(Format::Turtle);
//! let ntriples = xsd2owl_ontology::serializer::ntriples::to_ntriples(&ontology);
//! assert!(turtle.contains("@prefix owl:"));
//! assert!(ntriples.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod model;
pub mod serializer;
pub mod store;
pub mod triples;

pub use model::{iris, Class, Individual, Ontology, OntologyHeader, Property, PropertyKind};
pub use serializer::{Format, UnknownFormat};
pub use triples::{Term, Triple};

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> Ontology {
        let mut onto = Ontology::new();
        onto.add_class("urn:ex:A", Some("A"), None);
        onto.add_object_property("urn:ex:hasB", Some("has B"), None);
        onto.add_property_domain_range("urn:ex:hasB", Some("urn:ex:A"), Some("urn:ex:B"));
        onto
    }

    #[test]
    fn repeated_construction_is_deterministic() {
        assert_eq!(build().triple_set(), build().triple_set());
        assert_eq!(
            build().serialize(Format::Turtle),
            build().serialize(Format::Turtle)
        );
    }

    #[test]
    fn all_class_iris_unique() {
        let mut onto = build();
        onto.add_class("urn:ex:A", None, None);
        let mut iris = std::collections::HashSet::new();
        for class in onto.classes() {
            assert!(iris.insert(&class.id), "Duplicate class IRI: {}", class.id);
        }
    }
}
