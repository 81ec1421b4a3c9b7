//! Recursive traversal: complex types, model groups and whole-schema entry points.
//!
//! The traversal is depth-first and follows declaration order. Complex types
//! open a tracing span named after their class so nested log lines carry the
//! path that led to them. Every particle of a content model is mapped in
//! isolation: an error is logged, recorded in the report and the next sibling
//! is processed.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, info, info_span, warn};
use xsd2owl_ontology::{iris, Ontology};
use xsd2owl_schema::{ComponentId, ComponentKind, Schema, XSD_NS};

use crate::config::Config;
use crate::error::MapError;
use crate::filter::NamespaceFilter;
use crate::naming::{clean_annotation, Namer};
use crate::report::{ConversionReport, Warning, WarningKind};
use crate::usage::UsageIndex;

/// Maps components of one schema into an ontology.
///
/// ```
/// use xsd2owl_mapper::{Config, Mapper};
/// use xsd2owl_ontology::Ontology;
/// use xsd2owl_schema::Schema;
///
/// let schema = Schema::parse_str(r#"
///     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
///                targetNamespace="http://example.org/plic/">
///       <xs:complexType name="DistributionType">
///         <xs:sequence><xs:element name="Scope" type="xs:string"/></xs:sequence>
///       </xs:complexType>
///     </xs:schema>"#)?;
/// let config = Config::for_namespace("http://example.org/plic/");
/// let mut ontology = Ontology::new();
/// let mut mapper = Mapper::new(&schema, &config, &mut ontology);
/// mapper.convert()?;
/// let report = mapper.finish();
/// assert_eq!((report.classes, report.properties), (1, 1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Mapper<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) ontology: &'a mut Ontology,
    pub(crate) namer: Namer<'a>,
    pub(crate) filter: NamespaceFilter,
    pub(crate) usage: Cow<'a, UsageIndex>,
    pub(crate) report: ConversionReport,
    /// Base types mapped ahead of their place in declaration order.
    premapped: HashSet<ComponentId>,
    baseline: [usize; 3],
}

impl<'a> Mapper<'a> {
    /// Prepares a conversion of `schema` into `ontology`.
    ///
    /// Namespace prefixes declared by the schema are bound in the ontology.
    /// Element uses are counted over this schema only.
    pub fn new(schema: &'a Schema, config: &'a Config, ontology: &'a mut Ontology) -> Self {
        let namer = Namer::new(schema, &config.default_namespace);
        let usage = Cow::Owned(UsageIndex::build(schema, &namer));
        Self::assemble(schema, config, ontology, namer, usage)
    }

    /// Prepares a conversion that decides domains from a usage index shared
    /// by every schema written into `ontology`.
    ///
    /// ```
    /// use xsd2owl_mapper::{Config, Mapper, Namer, UsageIndex};
    /// use xsd2owl_ontology::Ontology;
    /// use xsd2owl_schema::Schema;
    ///
    /// let config = Config::for_namespace("http://example.org/plic/");
    /// let schemas = [
    ///     Schema::parse_str(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
    ///         targetNamespace="http://example.org/plic/"/>"#)?,
    /// ];
    /// let mut usage = UsageIndex::default();
    /// for schema in &schemas {
    ///     usage.add_schema(schema, &Namer::new(schema, &config.default_namespace));
    /// }
    /// let mut ontology = Ontology::new();
    /// for schema in &schemas {
    ///     Mapper::with_usage(schema, &config, &mut ontology, &usage).convert()?;
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_usage(
        schema: &'a Schema,
        config: &'a Config,
        ontology: &'a mut Ontology,
        usage: &'a UsageIndex,
    ) -> Self {
        let namer = Namer::new(schema, &config.default_namespace);
        Self::assemble(schema, config, ontology, namer, Cow::Borrowed(usage))
    }

    fn assemble(
        schema: &'a Schema,
        config: &'a Config,
        ontology: &'a mut Ontology,
        namer: Namer<'a>,
        usage: Cow<'a, UsageIndex>,
    ) -> Self {
        for (prefix, iri) in schema.namespaces() {
            if iri != XSD_NS && iri != iris::XSD {
                ontology.bind_prefix(prefix, iri);
            }
        }
        let baseline = [
            ontology.class_count(),
            ontology.property_count(),
            ontology.individual_count(),
        ];
        Self {
            schema,
            ontology,
            namer,
            filter: config.filter(),
            usage,
            report: ConversionReport::default(),
            premapped: HashSet::new(),
            baseline,
        }
    }

    /// Maps every global component in declaration order.
    ///
    /// # Errors
    ///
    /// Any error raised while mapping a global component itself (not one of
    /// its children, which are recovered) aborts the conversion.
    pub fn convert(&mut self) -> Result<(), MapError> {
        let schema = self.schema;
        for &id in schema.globals() {
            match &schema.get(id).kind {
                ComponentKind::ComplexType(_) => {
                    if !self.premapped.contains(&id) {
                        self.map_complex_type(id)?;
                    }
                }
                ComponentKind::Element(_) => self.map_element(id)?,
                _ => self.warn(id, WarningKind::Unmanaged, "non-managed global component"),
            }
        }
        Ok(())
    }

    /// Maps the global type `name` only. Returns its class URI, if one was created.
    ///
    /// # Errors
    ///
    /// [`MapError::UnknownType`] if no global type has that name, or any error
    /// raised while mapping the type itself.
    pub fn convert_type(&mut self, name: &str) -> Result<Option<String>, MapError> {
        let id = self
            .schema
            .type_named(name)
            .ok_or_else(|| MapError::UnknownType(name.to_owned()))?;
        match self.schema.get(id).kind {
            ComponentKind::ComplexType(_) => self.map_complex_type(id),
            _ => {
                self.warn(
                    id,
                    WarningKind::Unmanaged,
                    "only complex types are mapped to classes",
                );
                Ok(None)
            }
        }
    }

    /// Maps the global element `name` only.
    ///
    /// # Errors
    ///
    /// [`MapError::UnknownElement`] if no global element has that name, or any
    /// error raised while mapping the element itself.
    pub fn convert_element(&mut self, name: &str) -> Result<(), MapError> {
        let id = self
            .schema
            .element_named(name)
            .ok_or_else(|| MapError::UnknownElement(name.to_owned()))?;
        self.map_element(id)
    }

    /// The report so far.
    #[must_use]
    pub fn report(&self) -> &ConversionReport {
        &self.report
    }

    /// Ends the conversion and returns its report.
    #[must_use]
    pub fn finish(mut self) -> ConversionReport {
        self.report.classes = self.ontology.class_count() - self.baseline[0];
        self.report.properties = self.ontology.property_count() - self.baseline[1];
        self.report.individuals = self.ontology.individual_count() - self.baseline[2];
        self.report
    }

    /// Maps a complex type to a class and walks its content model.
    ///
    /// Returns the class URI, or `None` when no class is created: the type is
    /// out of scope, extends a builtin, or has simple content.
    ///
    /// # Errors
    ///
    /// [`MapError::UnexpectedKind`] if `id` is not a complex type, or a naming
    /// error for the type itself.
    pub fn map_complex_type(&mut self, id: ComponentId) -> Result<Option<String>, MapError> {
        let schema = self.schema;
        let component = schema.get(id);
        let Some(shape) = component.as_complex_type() else {
            return Err(unexpected(id, "complex type", component.kind.label()));
        };
        let described = component.describe();

        if !self.filter.in_scope(component) {
            info!(component = %described, "ignoring complex type outside processed namespaces");
            self.report.out_of_scope += 1;
            return Ok(None);
        }

        if schema.builtin_content(shape).is_some() {
            debug!(
                component = %described,
                "builtin extension, range is set on the owning property"
            );
            return Ok(None);
        }
        if shape.has_simple_content() {
            self.warn(
                id,
                WarningKind::Unmanaged,
                "complex type with simple content should be managed at the parent level",
            );
            return Ok(None);
        }

        let uri = self.namer.class_uri(id)?;
        let label = self.namer.class_label(id)?;
        let comment = component.annotation.as_deref().and_then(clean_annotation);

        let span = info_span!("complex_type", class = %uri);
        let _guard = span.enter();
        info!(component = %described, "processing complex type");

        self.ontology.add_class(&uri, Some(&label), comment.as_deref());
        if let Some(parent) = self.base_class(shape.base)? {
            self.ontology.add_subclass_of(&uri, &parent);
        }
        if let Some(model) = shape.model() {
            self.map_group(model)?;
        }

        info!(component = %described, "completed complex type");
        Ok(Some(uri))
    }

    /// Walks a model group. Groups carry no name and are never filtered.
    ///
    /// # Errors
    ///
    /// [`MapError::UnexpectedKind`] if `id` is not a model group. Errors in
    /// particles are recovered and recorded.
    pub fn map_group(&mut self, id: ComponentId) -> Result<(), MapError> {
        let schema = self.schema;
        let component = schema.get(id);
        let ComponentKind::Group(group) = &component.kind else {
            return Err(unexpected(id, "group", component.kind.label()));
        };
        debug!(
            compositor = ?group.compositor,
            particles = group.particles.len(),
            "walking model group"
        );

        for &child in &group.particles {
            let result = match &schema.get(child).kind {
                ComponentKind::Element(_) => self.map_element(child),
                ComponentKind::Group(_) => self.map_group(child),
                _ => {
                    self.warn(
                        child,
                        WarningKind::Unmanaged,
                        "non-managed component in content model",
                    );
                    Ok(())
                }
            };
            if let Err(err) = result {
                self.warn(
                    child,
                    WarningKind::Recovered,
                    format!("skipped after error: {err}"),
                );
            }
        }
        Ok(())
    }

    /// Class of the base a complex type derives from, when that base is a
    /// named, in-scope complex type other than `xs:anyType`.
    ///
    /// The base is mapped first if it has no class yet, so a single-type
    /// conversion never links to an undeclared class.
    fn base_class(&mut self, base: Option<ComponentId>) -> Result<Option<String>, MapError> {
        let Some(base) = base else {
            return Ok(None);
        };
        let component = self.schema.get(base);
        let mapped = component.as_complex_type().is_some()
            && component.name.is_some()
            && !self.schema.is_any_type(base)
            && self.filter.in_scope(component);
        if !mapped {
            return Ok(None);
        }
        let uri = self.namer.class_uri(base)?;
        if self.ontology.class(&uri).is_some() {
            return Ok(Some(uri));
        }
        debug!(base = %uri, "mapping base type before its derivation");
        self.premapped.insert(base);
        self.map_complex_type(base)
    }

    /// Logs a warning and records it in the report.
    pub(crate) fn warn(
        &mut self,
        component: ComponentId,
        kind: WarningKind,
        message: impl Into<String>,
    ) {
        let message = message.into();
        let subject = self.schema.get(component).describe();
        warn!(component = %subject, %kind, "{message}");
        self.report.warnings.push(Warning {
            kind,
            component,
            subject,
            message,
        });
    }
}

pub(crate) fn unexpected(
    component: ComponentId,
    expected: &'static str,
    found: &'static str,
) -> MapError {
    MapError::UnexpectedKind {
        component,
        expected,
        found,
    }
}
