//! Idempotent write operations on an [`Ontology`].
//!
//! Every `add_*` method is safe to call repeatedly with the same IRI: the
//! first call creates the record, later calls leave it untouched. The boolean
//! return value tells the caller whether anything was created.

use tracing::{debug, warn};

use crate::model::{Class, Individual, Ontology, Property, PropertyKind};

impl Ontology {
    /// Binds a prefix to a namespace IRI for serialization.
    ///
    /// Rebinding an existing prefix replaces its IRI. Bindings of the empty
    /// prefix and of the standard `rdf`, `rdfs`, `owl`, `xsd` prefixes are
    /// ignored since the serializers always declare those.
    pub fn bind_prefix(&mut self, prefix: &str, iri: &str) {
        if prefix.is_empty() || matches!(prefix, "rdf" | "rdfs" | "owl" | "xsd") {
            return;
        }
        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some(binding) => iri.clone_into(&mut binding.1),
            None => self.prefixes.push((prefix.to_owned(), iri.to_owned())),
        }
    }

    /// Adds an OWL class with an optional label and description.
    ///
    /// Returns `false` without touching the existing triples when the class
    /// already exists.
    pub fn add_class(&mut self, iri: &str, label: Option<&str>, comment: Option<&str>) -> bool {
        if self.class_index.contains_key(iri) {
            debug!(class = iri, "class already exists");
            return false;
        }
        self.class_index.insert(iri.to_owned(), self.classes.len());
        self.classes.push(Class {
            id: iri.to_owned(),
            label: label.map(str::to_owned),
            comment: comment.map(str::to_owned),
            subclass_of: Vec::new(),
            one_of: None,
        });
        true
    }

    /// Adds an `rdfs:subClassOf` link between two classes.
    ///
    /// Returns `false` if the subclass is not declared or the link exists.
    pub fn add_subclass_of(&mut self, iri: &str, parent: &str) -> bool {
        let Some(&idx) = self.class_index.get(iri) else {
            warn!(class = iri, parent, "cannot add subclass link to an undeclared class");
            return false;
        };
        let class = &mut self.classes[idx];
        if class.subclass_of.iter().any(|p| p == parent) {
            return false;
        }
        class.subclass_of.push(parent.to_owned());
        true
    }

    /// Adds an `owl:DatatypeProperty` with an optional label and description.
    pub fn add_datatype_property(
        &mut self,
        iri: &str,
        label: Option<&str>,
        comment: Option<&str>,
    ) -> bool {
        self.declare_property(iri, PropertyKind::Datatype, label, comment)
    }

    /// Adds an `owl:ObjectProperty` with an optional label and description.
    pub fn add_object_property(
        &mut self,
        iri: &str,
        label: Option<&str>,
        comment: Option<&str>,
    ) -> bool {
        self.declare_property(iri, PropertyKind::Object, label, comment)
    }

    fn declare_property(
        &mut self,
        iri: &str,
        kind: PropertyKind,
        label: Option<&str>,
        comment: Option<&str>,
    ) -> bool {
        let property = self.property_entry(iri);
        if property.is(kind) {
            debug!(property = iri, ?kind, "property already exists");
            return false;
        }
        property.kinds.push(kind);
        if property.label.is_none() {
            property.label = label.map(str::to_owned);
        }
        if property.comment.is_none() {
            property.comment = comment.map(str::to_owned);
        }
        true
    }

    /// Attaches `rdfs:domain` and/or `rdfs:range` to a property.
    ///
    /// Either side may be omitted. Values already attached are not repeated.
    /// When both sides are `None` nothing is recorded.
    pub fn add_property_domain_range(
        &mut self,
        iri: &str,
        domain: Option<&str>,
        range: Option<&str>,
    ) {
        if domain.is_none() && range.is_none() {
            return;
        }
        let property = self.property_entry(iri);
        if let Some(domain) = domain {
            if !property.domains.iter().any(|d| d == domain) {
                property.domains.push(domain.to_owned());
            }
        }
        if let Some(range) = range {
            if !property.ranges.iter().any(|r| r == range) {
                property.ranges.push(range.to_owned());
            }
        }
    }

    /// Materializes an ordered `owl:oneOf` list on a declared class.
    ///
    /// Members carrying a label are recorded as individuals. A class that
    /// already has an enumeration keeps it; the call then returns `false`.
    pub fn add_one_of_members(&mut self, class_iri: &str, members: Vec<Individual>) -> bool {
        let Some(&idx) = self.class_index.get(class_iri) else {
            warn!(class = class_iri, "cannot attach owl:oneOf to an undeclared class");
            return false;
        };
        if self.classes[idx].one_of.is_some() {
            warn!(class = class_iri, "class already has an owl:oneOf enumeration");
            return false;
        }
        let ids = members.iter().map(|m| m.id.clone()).collect();
        self.classes[idx].one_of = Some(ids);
        for member in members {
            if member.label.is_none() {
                continue;
            }
            match self.individual_index.get(&member.id) {
                Some(&existing) => {
                    if self.individuals[existing].label.is_none() {
                        self.individuals[existing].label = member.label;
                    }
                }
                None => {
                    self.individual_index
                        .insert(member.id.clone(), self.individuals.len());
                    self.individuals.push(member);
                }
            }
        }
        true
    }

    fn property_entry(&mut self, iri: &str) -> &mut Property {
        let idx = match self.property_index.get(iri) {
            Some(&idx) => idx,
            None => {
                let idx = self.properties.len();
                self.property_index.insert(iri.to_owned(), idx);
                self.properties.push(Property {
                    id: iri.to_owned(),
                    kinds: Vec::new(),
                    label: None,
                    comment: None,
                    domains: Vec::new(),
                    ranges: Vec::new(),
                });
                idx
            }
        };
        &mut self.properties[idx]
    }
}
