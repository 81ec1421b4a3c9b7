//! Element classification: which property an element becomes and its range.

use tracing::{debug, info};
use xsd2owl_ontology::Individual;
use xsd2owl_schema::{ComponentId, ComponentKind, Content, Restriction};

use crate::datatypes::rdf_datatype;
use crate::error::MapError;
use crate::naming::{clean_annotation, member_label, member_uri, verbatim_iri};
use crate::report::WarningKind;
use crate::traversal::{unexpected, Mapper};

impl Mapper<'_> {
    /// Maps an element to a datatype or object property.
    ///
    /// The property gets its owning complex type as domain when the element
    /// is used only once in the schema. References stop after the domain: the
    /// referenced global element carries the type-dependent mapping.
    ///
    /// # Errors
    ///
    /// [`MapError::UnexpectedKind`] if `id` is not an element, or a naming
    /// error for the element, its owner or its anonymous type.
    pub fn map_element(&mut self, id: ComponentId) -> Result<(), MapError> {
        let schema = self.schema;
        let component = schema.get(id);
        let Some(element) = component.as_element() else {
            return Err(unexpected(id, "element", component.kind.label()));
        };
        let described = component.describe();

        if !self.filter.in_scope(component) {
            info!(component = %described, "ignoring element outside processed namespaces");
            self.report.out_of_scope += 1;
            return Ok(());
        }

        let comment = component.annotation.as_deref().and_then(clean_annotation);
        let uri = self.namer.property_uri(id, None, None)?;
        let label = self.namer.property_label(id, None)?;

        if let Some(owner) = self.owner_complex_type(id) {
            if self.usage.has_unique_use(&uri) {
                let domain = self.namer.class_uri(owner)?;
                self.set_domain(id, &uri, &domain);
            }
        }

        if element.reference.is_some() {
            debug!(component = %described, "element reference, mapped at its definition");
            return Ok(());
        }
        debug!(component = %described, property = %uri, "processing element");

        let comment = comment.as_deref();
        let type_ = element.type_;
        match &schema.get(type_).kind {
            ComponentKind::AtomicBuiltin => {
                self.ontology.add_datatype_property(&uri, Some(&label), comment);
                self.set_builtin_range(id, &uri, type_);
            }
            ComponentKind::AtomicRestriction(restriction)
                if !restriction.enumeration.is_empty() =>
            {
                self.map_enumeration(id, type_, restriction, comment)?;
                self.ontology.add_object_property(&uri, Some(&label), comment);
                let class = self.namer.enum_class_uri(id)?;
                self.ontology.add_property_domain_range(&uri, None, Some(&class));
            }
            ComponentKind::AtomicRestriction(_) => {
                self.ontology.add_datatype_property(&uri, Some(&label), comment);
                match schema.primitive_builtin(type_) {
                    Some(builtin) => self.set_builtin_range(id, &uri, builtin),
                    None => self.warn(
                        id,
                        WarningKind::Unmanaged,
                        "restriction without a builtin base",
                    ),
                }
            }
            ComponentKind::ComplexType(_) if schema.is_any_type(type_) => {
                self.ontology.add_datatype_property(&uri, Some(&label), comment);
            }
            ComponentKind::ComplexType(shape) => {
                if let Some(builtin) = schema.builtin_content(shape) {
                    self.ontology.add_datatype_property(&uri, Some(&label), comment);
                    self.set_builtin_range(id, &uri, builtin);
                } else if let Content::Simple(text) = shape.content {
                    self.ontology.add_datatype_property(&uri, Some(&label), comment);
                    match schema.primitive_builtin(text) {
                        Some(builtin) => self.set_builtin_range(id, &uri, builtin),
                        None => self.warn(
                            id,
                            WarningKind::Unmanaged,
                            "simple content without a builtin base",
                        ),
                    }
                } else {
                    self.ontology.add_object_property(&uri, Some(&label), comment);
                    let range = if schema.get(type_).name.is_some() {
                        Some(self.namer.class_uri(type_)?)
                    } else {
                        self.map_complex_type(type_)?
                    };
                    if let Some(range) = range {
                        self.ontology.add_property_domain_range(&uri, None, Some(&range));
                    }
                }
            }
            ComponentKind::Group(_) | ComponentKind::Element(_) | ComponentKind::Other(_) => {
                self.warn(id, WarningKind::Unmanaged, "non-managed element type");
            }
        }
        Ok(())
    }

    /// Creates the enumeration class of an element and its `owl:oneOf` members.
    fn map_enumeration(
        &mut self,
        element: ComponentId,
        type_: ComponentId,
        restriction: &Restriction,
        comment: Option<&str>,
    ) -> Result<(), MapError> {
        let schema = self.schema;
        let class = self.namer.enum_class_uri(element)?;
        let local = schema.get(element).name.as_deref().unwrap_or_default();
        self.ontology
            .add_class(&class, Some(&format!("Enum values for {local}")), comment);

        let verbatim = schema
            .primitive_builtin(type_)
            .is_some_and(|b| schema.get(b).name.as_deref() == Some("anyURI"));
        let mut members = Vec::with_capacity(restriction.enumeration.len());
        for value in &restriction.enumeration {
            let iri = if verbatim { verbatim_iri(value) } else { None };
            let member = match iri {
                Some(iri) => {
                    if iri != value.trim() {
                        self.warn(
                            element,
                            WarningKind::InvalidIri,
                            format!("enumeration value {value:?} escaped to <{iri}>"),
                        );
                    }
                    Individual {
                        id: iri.into_owned(),
                        label: None,
                    }
                }
                None => {
                    if verbatim {
                        self.warn(
                            element,
                            WarningKind::InvalidIri,
                            format!("enumeration value {value:?} is not an absolute IRI"),
                        );
                    }
                    Individual {
                        id: member_uri(&class, value),
                        label: Some(member_label(value)),
                    }
                }
            };
            members.push(member);
        }
        debug!(class = %class, values = ?restriction.enumeration, "enumeration members");
        self.ontology.add_one_of_members(&class, members);
        Ok(())
    }

    /// Sets the single domain of a property. A property already bound to
    /// another class keeps its first domain.
    fn set_domain(&mut self, element: ComponentId, uri: &str, domain: &str) {
        let existing = self
            .ontology
            .property(uri)
            .and_then(|p| p.domains.iter().find(|d| d.as_str() != domain).cloned());
        match existing {
            Some(existing) => self.warn(
                element,
                WarningKind::ConflictingDomain,
                format!("{uri} already has domain {existing}, {domain} not added"),
            ),
            None => self.ontology.add_property_domain_range(uri, Some(domain), None),
        }
    }

    fn set_builtin_range(&mut self, element: ComponentId, uri: &str, builtin: ComponentId) {
        let schema = self.schema;
        let name = schema.get(builtin).name.as_deref().unwrap_or_default();
        match rdf_datatype(name) {
            Some(datatype) => self.ontology.add_property_domain_range(uri, None, Some(&datatype)),
            None => self.warn(
                element,
                WarningKind::UnknownBuiltin,
                format!("no datatype mapping for xs:{name}, range left unset"),
            ),
        }
    }

    /// The first ancestor of a component that is a complex type.
    fn owner_complex_type(&self, id: ComponentId) -> Option<ComponentId> {
        let mut current = self.schema.parent(id);
        while let Some(at) = current {
            if self.schema.get(at).as_complex_type().is_some() {
                return Some(at);
            }
            current = self.schema.parent(at);
        }
        None
    }
}
