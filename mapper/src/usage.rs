//! Element usage analysis for domain inference.
//!
//! A property gets an `rdfs:domain` only when its element is used in a single
//! place. Occurrences are grouped by synthesized property URI, so a global
//! definition and every `ref` to it fall in the same bucket. An index can
//! span several schemas converted into the same ontology.

use std::collections::HashMap;

use xsd2owl_schema::{Element, Schema};

use crate::naming::Namer;

/// How one element occurrence is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Use {
    /// A top-level element definition.
    Global,
    /// An `<xs:element ref="..."/>` inside a content model.
    Reference,
    /// A local element definition inside a content model.
    Local,
}

impl Use {
    fn of(element: &Element) -> Self {
        if element.reference.is_some() {
            Use::Reference
        } else if element.global {
            Use::Global
        } else {
            Use::Local
        }
    }
}

/// Occurrences of every element, keyed by property URI.
#[derive(Debug, Clone, Default)]
pub struct UsageIndex {
    uses: HashMap<String, Vec<Use>>,
}

impl UsageIndex {
    /// Scans every element-shaped component of the schema.
    ///
    /// Elements whose property URI cannot be synthesized are left out.
    #[must_use]
    pub fn build(schema: &Schema, namer: &Namer<'_>) -> Self {
        let mut index = Self::default();
        index.add_schema(schema, namer);
        index
    }

    /// Adds the occurrences of another schema to the index.
    ///
    /// Used when several schemas are converted into one ontology, so that an
    /// element used once in each of them is not considered unique.
    pub fn add_schema(&mut self, schema: &Schema, namer: &Namer<'_>) {
        for (id, element) in schema.elements() {
            if let Ok(uri) = namer.property_uri(id, None, None) {
                self.uses.entry(uri).or_default().push(Use::of(element));
            }
        }
    }

    /// All occurrences sharing a property URI, in scan order.
    #[must_use]
    pub fn uses(&self, property_uri: &str) -> &[Use] {
        self.uses
            .get(property_uri)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when the property is used once: a single occurrence, or a global
    /// definition plus exactly one reference.
    #[must_use]
    pub fn has_unique_use(&self, property_uri: &str) -> bool {
        matches!(
            self.uses(property_uri),
            [] | [_] | [Use::Global, Use::Reference] | [Use::Reference, Use::Global]
        )
    }
}
