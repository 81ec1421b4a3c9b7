//! URI and label synthesis for schema components.
//!
//! Classes are named after the nearest named component (`{ns}ThropicType`),
//! properties after their element (`{ns}hasThropic`), enumeration members
//! after their class and value (`{ns}SexEnumType_Male`).

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use thiserror::Error;
use tracing::warn;
use xsd2owl_schema::{ComponentId, Schema};

/// Characters replaced by `_` in enumeration member URIs.
const MEMBER_PUNCTUATION: &[char] = &[
    '!', '@', '#', '$', '%', '&', '*', '(', ')', '[', ']', '{', '}', ';', ':', ',', '.', '/', '<',
    '>', '?', '|', '`', '~', '=', '+', ' ',
];

/// Bytes left as-is when percent-encoding a member value.
const MEMBER_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Bytes that may not appear in an IRI reference; escaped in verbatim IRIs.
const IRI_FORBIDDEN: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Naming failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Neither the component nor any of its ancestors has a local name.
    #[error("component {0} has no named ancestor")]
    NoNameableAncestor(ComponentId),

    /// A property was requested for a component lacking a name or namespace,
    /// and no override was supplied.
    #[error("component {component} has no {missing} and no override was given")]
    MissingNameOrNamespace {
        /// The component being named.
        component: ComponentId,
        /// `"local name"` or `"namespace"`.
        missing: &'static str,
    },
}

/// Inserts a space at every camel-case word boundary.
///
/// A boundary precedes an uppercase letter that follows a lowercase letter,
/// or an uppercase letter (other than the first character) that is followed
/// by a lowercase letter. Runs of capitals stay together.
///
/// ```
/// use xsd2owl_mapper::naming::camel_case_split;
///
/// assert_eq!(camel_case_split("FeedingAtomizedType"), "Feeding Atomized Type");
/// assert_eq!(camel_case_split("XMLSchema"), "XML Schema");
/// ```
#[must_use]
pub fn camel_case_split(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let after_lower = chars[i - 1].is_ascii_lowercase();
            let before_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if after_lower || before_lower {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

/// Uppercases the first character.
#[must_use]
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URI of an enumeration member: `{class_uri}_{encoded value}`.
#[must_use]
pub fn member_uri(class_uri: &str, value: &str) -> String {
    let replaced: String = value
        .trim()
        .chars()
        .map(|c| if MEMBER_PUNCTUATION.contains(&c) { '_' } else { c })
        .collect();
    format!(
        "{class_uri}_{}",
        utf8_percent_encode(&replaced, MEMBER_SAFE)
    )
}

/// Turns an `xs:anyURI` enumeration value into an absolute IRI.
///
/// Surrounding whitespace is dropped and bytes forbidden in IRIs are
/// percent-encoded. Returns `None` when the value has no scheme.
///
/// ```
/// use xsd2owl_mapper::naming::verbatim_iri;
///
/// assert_eq!(verbatim_iri(" urn:isbn:0451 ").as_deref(), Some("urn:isbn:0451"));
/// assert_eq!(verbatim_iri("http://x.org/a b").as_deref(), Some("http://x.org/a%20b"));
/// assert_eq!(verbatim_iri("licenses/by"), None);
/// ```
#[must_use]
pub fn verbatim_iri(value: &str) -> Option<Cow<'_, str>> {
    let value = value.trim();
    let (scheme, _) = value.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| utf8_percent_encode(value, IRI_FORBIDDEN).into())
}

/// Label of an enumeration member: camel-case split and lowercased.
#[must_use]
pub fn member_label(value: &str) -> String {
    camel_case_split(value.trim()).to_lowercase()
}

/// Flattens annotation text onto one line; blank text yields `None`.
#[must_use]
pub fn clean_annotation(text: &str) -> Option<String> {
    let cleaned = text.replace('\n', " ").replace('\r', "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_owned())
}

/// Synthesizes URIs and labels for components of one schema.
#[derive(Debug, Clone, Copy)]
pub struct Namer<'a> {
    schema: &'a Schema,
    default_namespace: &'a str,
}

impl<'a> Namer<'a> {
    /// Creates a namer; `default_namespace` replaces empty namespaces.
    #[must_use]
    pub fn new(schema: &'a Schema, default_namespace: &'a str) -> Self {
        Self {
            schema,
            default_namespace,
        }
    }

    /// Normalizes a schema namespace into an RDF namespace ending in `/` or `#`.
    #[must_use]
    pub fn rdf_namespace(&self, namespace: &str) -> String {
        let mut ns = if namespace.is_empty() {
            warn!(default = self.default_namespace, "namespace not provided, using default");
            self.default_namespace.to_owned()
        } else {
            namespace.to_owned()
        };
        if !ns.ends_with('/') && !ns.ends_with('#') {
            ns.push('#');
        }
        ns
    }

    fn namespace_of(&self, id: ComponentId) -> String {
        self.rdf_namespace(self.schema.get(id).namespace.as_deref().unwrap_or_default())
    }

    /// Local name of the component, or of its nearest named ancestor.
    ///
    /// # Errors
    ///
    /// [`NamingError::NoNameableAncestor`] if the walk reaches a root without a name.
    pub fn nameable_ancestor(&self, id: ComponentId) -> Result<&'a str, NamingError> {
        let mut current = Some(id);
        while let Some(at) = current {
            let component = self.schema.get(at);
            match component.name.as_deref() {
                Some(name) if !name.is_empty() => return Ok(name),
                _ => current = component.parent,
            }
        }
        Err(NamingError::NoNameableAncestor(id))
    }

    /// Class URI of a complex type.
    ///
    /// # Errors
    ///
    /// [`NamingError::NoNameableAncestor`] for an anonymous type with no
    /// named ancestor.
    pub fn class_uri(&self, id: ComponentId) -> Result<String, NamingError> {
        let name = upper_first(self.nameable_ancestor(id)?);
        let mut uri = format!("{}{name}", self.namespace_of(id));
        if !uri.ends_with("Type") {
            uri.push_str("Type");
        }
        Ok(uri)
    }

    /// Human-readable class label, without the `Type` suffix.
    ///
    /// # Errors
    ///
    /// Same as [`Namer::class_uri`].
    pub fn class_label(&self, id: ComponentId) -> Result<String, NamingError> {
        let name = upper_first(self.nameable_ancestor(id)?);
        let stem = name.strip_suffix("Type").unwrap_or(&name);
        Ok(camel_case_split(stem))
    }

    fn local_name(
        &self,
        id: ComponentId,
        local_name: Option<&'a str>,
    ) -> Result<&'a str, NamingError> {
        local_name
            .or(self.schema.get(id).name.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or(NamingError::MissingNameOrNamespace {
                component: id,
                missing: "local name",
            })
    }

    /// Property URI: `{ns}has{LocalName}`.
    ///
    /// `namespace` is used verbatim; the component's own namespace is
    /// normalized with [`Namer::rdf_namespace`].
    ///
    /// # Errors
    ///
    /// [`NamingError::MissingNameOrNamespace`] when neither the component nor
    /// the overrides supply a local name and a namespace.
    pub fn property_uri(
        &self,
        id: ComponentId,
        local_name: Option<&'a str>,
        namespace: Option<&str>,
    ) -> Result<String, NamingError> {
        let name = self.local_name(id, local_name)?;
        let ns = match (namespace, self.schema.get(id).namespace.as_deref()) {
            (Some(ns), _) => ns.to_owned(),
            (None, Some(ns)) => self.rdf_namespace(ns),
            (None, None) => {
                return Err(NamingError::MissingNameOrNamespace {
                    component: id,
                    missing: "namespace",
                })
            }
        };
        Ok(format!("{ns}has{}", upper_first(name)))
    }

    /// Property label: `has {Local Name}`.
    ///
    /// # Errors
    ///
    /// [`NamingError::MissingNameOrNamespace`] when no local name is available.
    pub fn property_label(
        &self,
        id: ComponentId,
        local_name: Option<&'a str>,
    ) -> Result<String, NamingError> {
        let name = self.local_name(id, local_name)?;
        Ok(camel_case_split(&format!("has{}", upper_first(name))))
    }

    /// URI of the enumeration class for an element: `{ns}{localName}EnumType`.
    ///
    /// # Errors
    ///
    /// [`NamingError::MissingNameOrNamespace`] when the element has no name.
    pub fn enum_class_uri(&self, id: ComponentId) -> Result<String, NamingError> {
        let name = self.local_name(id, None)?;
        Ok(format!("{}{name}EnumType", self.namespace_of(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsd2owl_schema::{ComplexType, Component, ComponentKind, Element};

    const NS: &str = "http://example.org/plic/";
    const DEFAULT: &str = "http://example.org/default#";

    fn complex() -> ComponentKind {
        ComponentKind::ComplexType(ComplexType::empty())
    }

    fn element(schema: &Schema) -> ComponentKind {
        ComponentKind::Element(Element {
            type_: schema.any_type(),
            reference: None,
            global: false,
        })
    }

    #[test]
    fn camel_split_examples() {
        assert_eq!(
            camel_case_split("FeedingAtomizedType"),
            "Feeding Atomized Type"
        );
        assert_eq!(camel_case_split("hasCommonName"), "has Common Name");
        assert_eq!(camel_case_split("lowercase"), "lowercase");
        assert_eq!(camel_case_split("ISO"), "ISO");
        assert_eq!(camel_case_split("hasIUCNStatus"), "has IUCN Status");
        assert_eq!(camel_case_split(""), "");
    }

    #[test]
    fn rdf_namespace_normalizes() {
        let schema = Schema::new(NS);
        let namer = Namer::new(&schema, DEFAULT);
        assert_eq!(namer.rdf_namespace(NS), NS);
        assert_eq!(namer.rdf_namespace("urn:x#"), "urn:x#");
        assert_eq!(
            namer.rdf_namespace("http://example.org/x"),
            "http://example.org/x#"
        );
        assert_eq!(namer.rdf_namespace(""), DEFAULT);
    }

    #[test]
    fn named_class_gets_type_suffix_once() {
        let mut schema = Schema::new(NS);
        let a = schema.add(
            Component::new(complex())
                .named("DistributionType")
                .in_namespace(NS),
        );
        let b = schema.add(
            Component::new(complex())
                .named("distribution")
                .in_namespace(NS),
        );
        let namer = Namer::new(&schema, DEFAULT);
        assert_eq!(
            namer.class_uri(a).as_deref(),
            Ok("http://example.org/plic/DistributionType")
        );
        assert_eq!(
            namer.class_uri(b).as_deref(),
            Ok("http://example.org/plic/DistributionType")
        );
        assert_eq!(namer.class_label(a).as_deref(), Ok("Distribution"));
    }

    #[test]
    fn anonymous_class_borrows_nearest_name() {
        let mut schema = Schema::new(NS);
        let outer = schema.add(
            Component::new(complex())
                .named("FeedingAtomizedType")
                .in_namespace(NS),
        );
        let seq = schema.add(Component::new(complex()).in_namespace(NS).child_of(outer));
        let kind = element(&schema);
        let thropic = schema.add(
            Component::new(kind)
                .named("Thropic")
                .in_namespace(NS)
                .child_of(seq),
        );
        let anon = schema.add(Component::new(complex()).in_namespace(NS).child_of(thropic));
        let namer = Namer::new(&schema, DEFAULT);
        assert_eq!(
            namer.class_uri(anon).as_deref(),
            Ok("http://example.org/plic/ThropicType")
        );
        assert_eq!(namer.class_label(anon).as_deref(), Ok("Thropic"));
    }

    #[test]
    fn orphan_anonymous_class_fails() {
        let mut schema = Schema::new(NS);
        let anon = schema.add(Component::new(complex()).in_namespace(NS));
        let namer = Namer::new(&schema, DEFAULT);
        assert_eq!(
            namer.class_uri(anon),
            Err(NamingError::NoNameableAncestor(anon))
        );
    }

    #[test]
    fn property_naming_and_overrides() {
        let mut schema = Schema::new("http://example.org/plic");
        let kind = element(&schema);
        let e = schema.add(
            Component::new(kind)
                .named("commonName")
                .in_namespace("http://example.org/plic"),
        );
        let namer = Namer::new(&schema, DEFAULT);
        assert_eq!(
            namer.property_uri(e, None, None).as_deref(),
            Ok("http://example.org/plic#hasCommonName")
        );
        assert_eq!(
            namer.property_uri(e, Some("other"), Some("urn:x#")).as_deref(),
            Ok("urn:x#hasOther")
        );
        assert_eq!(
            namer.property_label(e, None).as_deref(),
            Ok("has Common Name")
        );
    }

    #[test]
    fn property_without_name_or_namespace_fails() {
        let mut schema = Schema::new(NS);
        let kind = element(&schema);
        let anon = schema.add(Component::new(kind.clone()).in_namespace(NS));
        let no_ns = schema.add(Component::new(kind).named("Foo"));
        let namer = Namer::new(&schema, DEFAULT);
        assert!(matches!(
            namer.property_uri(anon, None, None),
            Err(NamingError::MissingNameOrNamespace { missing: "local name", .. })
        ));
        assert!(matches!(
            namer.property_uri(no_ns, None, None),
            Err(NamingError::MissingNameOrNamespace { missing: "namespace", .. })
        ));
        assert_eq!(
            namer.property_uri(anon, Some("Foo"), None).as_deref(),
            Ok("http://example.org/plic/hasFoo")
        );
    }

    #[test]
    fn member_uris_are_sanitized() {
        let class = "http://example.org/plic/SexEnumType";
        assert_eq!(member_uri(class, " Male "), format!("{class}_Male"));
        assert_eq!(member_uri(class, "a.b c"), format!("{class}_a_b_c"));
        assert_eq!(member_uri(class, "Côte"), format!("{class}_C%C3%B4te"));
        assert_eq!(member_uri(class, "x\"y"), format!("{class}_x%22y"));
        assert_eq!(member_label("NotEvaluated"), "not evaluated");
    }

    #[test]
    fn verbatim_iris_need_a_scheme() {
        assert_eq!(
            verbatim_iri("http://example.org/{id}|v").as_deref(),
            Some("http://example.org/%7Bid%7D%7Cv")
        );
        assert!(matches!(verbatim_iri("urn:x"), Some(Cow::Borrowed("urn:x"))));
        assert_eq!(verbatim_iri("1http://x.org/"), None);
        assert_eq!(verbatim_iri(":nothing"), None);
        assert_eq!(verbatim_iri("no scheme"), None);
    }

    #[test]
    fn annotations_are_flattened() {
        assert_eq!(clean_annotation("  a\r\nb  ").as_deref(), Some("a b"));
        assert_eq!(clean_annotation(" \n "), None);
    }
}
