//! Core ontology model types.
//!
//! These types hold the OWL vocabulary derived from an XML Schema as owned
//! Rust data. Records are created through the idempotent `add_*` methods of
//! [`Ontology`] (see [`crate::store`]) and read back through the lookups below.

use std::collections::HashMap;

/// Whether a property is a datatype or an object property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`: relates a resource to an XSD literal.
    Datatype,
    /// `owl:ObjectProperty`: relates two resources.
    Object,
}

impl PropertyKind {
    /// Returns the full IRI of the OWL property type.
    #[must_use]
    pub fn iri(self) -> &'static str {
        match self {
            PropertyKind::Datatype => iris::OWL_DATATYPE_PROPERTY,
            PropertyKind::Object => iris::OWL_OBJECT_PROPERTY,
        }
    }

    /// Returns the prefixed name used by the Turtle and JSON-LD serializers.
    #[must_use]
    pub fn prefixed(self) -> &'static str {
        match self {
            PropertyKind::Datatype => "owl:DatatypeProperty",
            PropertyKind::Object => "owl:ObjectProperty",
        }
    }
}

/// An OWL class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Full IRI.
    pub id: String,
    /// Human-readable label.
    pub label: Option<String>,
    /// Description, taken from the schema annotation.
    pub comment: Option<String>,
    /// Full IRIs of parent classes (`rdfs:subClassOf`).
    pub subclass_of: Vec<String>,
    /// Ordered member IRIs of an `owl:oneOf` enumeration, if any.
    pub one_of: Option<Vec<String>>,
}

/// An OWL property definition.
///
/// A property may be referenced by `rdfs:domain`/`rdfs:range` before it is
/// declared, in which case `kinds` is empty until a declaration arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Full IRI.
    pub id: String,
    /// Declared OWL property types, in declaration order.
    pub kinds: Vec<PropertyKind>,
    /// Human-readable label.
    pub label: Option<String>,
    /// Description.
    pub comment: Option<String>,
    /// Full IRIs of `rdfs:domain` classes.
    pub domains: Vec<String>,
    /// Full IRIs of `rdfs:range` classes or XSD datatypes.
    pub ranges: Vec<String>,
}

impl Property {
    /// Returns true if the property was declared with the given kind.
    #[must_use]
    pub fn is(&self, kind: PropertyKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// A member of an enumeration class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// Full IRI.
    pub id: String,
    /// Human-readable label; absent for members used verbatim as IRIs.
    pub label: Option<String>,
}

/// Ontology-level metadata emitted as an `owl:Ontology` resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyHeader {
    /// IRI of the ontology itself.
    pub iri: String,
    /// Optional `rdfs:label`.
    pub label: Option<String>,
    /// Optional `owl:versionInfo`.
    pub version: Option<String>,
}

/// An append-only OWL ontology.
///
/// Classes, properties and individuals are kept in insertion order so that
/// serialization is deterministic for a deterministic traversal.
#[derive(Debug, Default, Clone)]
pub struct Ontology {
    /// Optional `owl:Ontology` header.
    pub header: Option<OntologyHeader>,
    pub(crate) prefixes: Vec<(String, String)>,
    pub(crate) classes: Vec<Class>,
    pub(crate) properties: Vec<Property>,
    pub(crate) individuals: Vec<Individual>,
    pub(crate) class_index: HashMap<String, usize>,
    pub(crate) property_index: HashMap<String, usize>,
    pub(crate) individual_index: HashMap<String, usize>,
}

impl Ontology {
    /// Creates an empty ontology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ontology carrying an `owl:Ontology` header.
    #[must_use]
    pub fn with_header(header: OntologyHeader) -> Self {
        Self {
            header: Some(header),
            ..Self::default()
        }
    }

    /// Looks up a class by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn class(&self, iri: &str) -> Option<&Class> {
        self.class_index.get(iri).map(|&i| &self.classes[i])
    }

    /// Looks up a property by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn property(&self, iri: &str) -> Option<&Property> {
        self.property_index.get(iri).map(|&i| &self.properties[i])
    }

    /// Looks up an individual by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn individual(&self, iri: &str) -> Option<&Individual> {
        self.individual_index.get(iri).map(|&i| &self.individuals[i])
    }

    /// All classes in creation order.
    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// All properties in creation order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// All individuals in creation order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Prefix bindings, in binding order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Returns the total number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the total number of properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Returns the total number of individuals.
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:oneOf`.
    pub const OWL_ONE_OF: &str = "http://www.w3.org/2002/07/owl#oneOf";
    /// `owl:versionInfo`.
    pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`.
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`.
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`.
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}
