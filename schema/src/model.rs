//! Schema component records and the arena that owns them.
//!
//! Components reference each other (parent, type, base, particles) by
//! [`ComponentId`] only. The arena is built once, by the loader or by hand in
//! tests, and is read-only afterwards.

use std::collections::HashMap;
use std::fmt;

/// The XML Schema namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Index of a component in its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Position of the component in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A schema component: common attributes plus its kind-specific shape.
#[derive(Debug, Clone)]
pub struct Component {
    /// Local name; `None` for anonymous types and model groups.
    pub name: Option<String>,
    /// Target namespace; the empty string for no-namespace schemas.
    pub namespace: Option<String>,
    /// Owning component, `None` for global components and builtins.
    pub parent: Option<ComponentId>,
    /// Raw `xs:documentation` text, if any.
    pub annotation: Option<String>,
    /// What kind of component this is.
    pub kind: ComponentKind,
}

impl Component {
    /// Creates an anonymous, parentless component of the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            name: None,
            namespace: None,
            parent: None,
            annotation: None,
            kind,
        }
    }

    /// Sets the local name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the parent.
    #[must_use]
    pub fn child_of(mut self, parent: ComponentId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the annotation text.
    #[must_use]
    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }

    /// Returns the element shape if this is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            ComponentKind::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the complex type shape if this is a complex type.
    #[must_use]
    pub fn as_complex_type(&self) -> Option<&ComplexType> {
        match &self.kind {
            ComponentKind::ComplexType(ct) => Some(ct),
            _ => None,
        }
    }

    /// Short description used in log output.
    #[must_use]
    pub fn describe(&self) -> String {
        let kind = self.kind.label();
        match (&self.name, &self.namespace) {
            (Some(name), Some(ns)) => format!("{kind} {ns}{name}"),
            (Some(name), None) => format!("{kind} {name}"),
            (None, _) => format!("(anonymous) {kind}"),
        }
    }
}

/// The closed set of component shapes.
#[derive(Debug, Clone)]
pub enum ComponentKind {
    /// `xs:complexType`, named or anonymous, including `xs:anyType`.
    ComplexType(ComplexType),
    /// A model group: `xs:sequence`, `xs:choice` or `xs:all`.
    Group(Group),
    /// `xs:element`, a definition or a reference.
    Element(Element),
    /// A builtin simple type such as `xs:string`; the name is its local name.
    AtomicBuiltin,
    /// A simple type restricting another one, possibly by enumeration.
    AtomicRestriction(Restriction),
    /// Shapes the mapper does not translate.
    Other(OtherShape),
}

impl ComponentKind {
    /// Human-readable name of the kind.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::ComplexType(_) => "complex type",
            ComponentKind::Group(_) => "group",
            ComponentKind::Element(_) => "element",
            ComponentKind::AtomicBuiltin => "builtin type",
            ComponentKind::AtomicRestriction(_) => "simple type",
            ComponentKind::Other(shape) => shape.label(),
        }
    }
}

/// Content of a complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// No child elements (empty or attributes only).
    Empty,
    /// Element content described by a model group.
    Model(ComponentId),
    /// Text content of the given simple type, plus attributes.
    Simple(ComponentId),
}

/// How a complex type derives from its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// `xs:extension`.
    Extension,
    /// `xs:restriction`.
    Restriction,
}

/// Shape of an `xs:complexType`.
#[derive(Debug, Clone)]
pub struct ComplexType {
    /// Content model.
    pub content: Content,
    /// Base type of a derivation.
    pub base: Option<ComponentId>,
    /// Derivation method, if the type derives from a base.
    pub derivation: Option<Derivation>,
}

impl ComplexType {
    /// A complex type with no content and no base.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            content: Content::Empty,
            base: None,
            derivation: None,
        }
    }

    /// True if the type derives by extension.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        self.derivation == Some(Derivation::Extension)
    }

    /// True if the content is text plus attributes, with no nested elements.
    #[must_use]
    pub fn has_simple_content(&self) -> bool {
        matches!(self.content, Content::Simple(_))
    }

    /// The model group holding child particles, if any.
    #[must_use]
    pub fn model(&self) -> Option<ComponentId> {
        match self.content {
            Content::Model(group) => Some(group),
            Content::Empty | Content::Simple(_) => None,
        }
    }
}

/// Compositor of a model group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    /// `xs:sequence`.
    Sequence,
    /// `xs:choice`.
    Choice,
    /// `xs:all`.
    All,
}

/// Shape of a model group.
#[derive(Debug, Clone)]
pub struct Group {
    /// The compositor.
    pub compositor: Compositor,
    /// Child particles in declaration order.
    pub particles: Vec<ComponentId>,
}

/// Shape of an `xs:element`.
#[derive(Debug, Clone)]
pub struct Element {
    /// Resolved type; `xs:anyType` when the declaration names none.
    pub type_: ComponentId,
    /// The referenced global element, for `<xs:element ref="..."/>`.
    pub reference: Option<ComponentId>,
    /// True for top-level element declarations.
    pub global: bool,
}

/// Shape of a restricted simple type.
#[derive(Debug, Clone)]
pub struct Restriction {
    /// The restricted base type.
    pub base: ComponentId,
    /// Enumeration facet values in declaration order.
    pub enumeration: Vec<String>,
}

/// Components with no mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherShape {
    /// `xs:any`.
    Wildcard,
    /// `xs:list`.
    List,
    /// `xs:union`.
    Union,
    /// A reference the loader could not resolve.
    Unresolved,
}

impl OtherShape {
    fn label(self) -> &'static str {
        match self {
            OtherShape::Wildcard => "wildcard",
            OtherShape::List => "list type",
            OtherShape::Union => "union type",
            OtherShape::Unresolved => "unresolved component",
        }
    }
}

/// An arena of schema components.
#[derive(Debug, Clone)]
pub struct Schema {
    components: Vec<Component>,
    globals: Vec<ComponentId>,
    target_namespace: String,
    namespaces: Vec<(String, String)>,
    types: HashMap<String, ComponentId>,
    elements: HashMap<String, ComponentId>,
    builtins: HashMap<String, ComponentId>,
    any_type: ComponentId,
}

impl Schema {
    /// Creates an empty schema for the given target namespace.
    ///
    /// The arena always contains the `xs:anyType` complex type.
    #[must_use]
    pub fn new(target_namespace: impl Into<String>) -> Self {
        let any = Component::new(ComponentKind::ComplexType(ComplexType::empty()))
            .named("anyType")
            .in_namespace(XSD_NS);
        Self {
            components: vec![any],
            globals: Vec::new(),
            target_namespace: target_namespace.into(),
            namespaces: Vec::new(),
            types: HashMap::new(),
            elements: HashMap::new(),
            builtins: HashMap::new(),
            any_type: ComponentId(0),
        }
    }

    /// Appends a component and returns its id.
    pub fn add(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(component);
        id
    }

    /// Replaces the kind of an existing component.
    pub fn set_kind(&mut self, id: ComponentId, kind: ComponentKind) {
        self.components[id.0].kind = kind;
    }

    /// Records a component as a top-level declaration.
    ///
    /// Named complex types and elements also become reachable through
    /// [`Schema::type_named`] and [`Schema::element_named`].
    pub fn add_global(&mut self, id: ComponentId) {
        if self.globals.contains(&id) {
            return;
        }
        let component = &self.components[id.0];
        if let Some(name) = component.name.clone() {
            match component.kind {
                ComponentKind::Element(_) => {
                    self.elements.entry(name).or_insert(id);
                }
                ComponentKind::ComplexType(_) | ComponentKind::AtomicRestriction(_) => {
                    self.types.entry(name).or_insert(id);
                }
                _ => {}
            }
        }
        self.globals.push(id);
    }

    /// Records a namespace prefix declared on the schema root.
    pub fn declare_namespace(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.namespaces.push((prefix.into(), iri.into()));
    }

    /// Returns the builtin simple type with the given local name, creating it
    /// on first use.
    pub fn builtin(&mut self, name: &str) -> ComponentId {
        if name == "anyType" {
            return self.any_type;
        }
        if let Some(&id) = self.builtins.get(name) {
            return id;
        }
        let id = self.add(
            Component::new(ComponentKind::AtomicBuiltin)
                .named(name)
                .in_namespace(XSD_NS),
        );
        self.builtins.insert(name.to_owned(), id);
        id
    }

    /// The component with the given id.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// The parent of a component, if any.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.components[id.0].parent
    }

    /// Iterates all components in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i), c))
    }

    /// Iterates every element-shaped component: definitions and references,
    /// global and local.
    pub fn elements(&self) -> impl Iterator<Item = (ComponentId, &Element)> {
        self.iter()
            .filter_map(|(id, c)| c.as_element().map(|e| (id, e)))
    }

    /// Top-level components in declaration order.
    #[must_use]
    pub fn globals(&self) -> &[ComponentId] {
        &self.globals
    }

    /// Looks up a global named type.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<ComponentId> {
        self.types.get(name).copied()
    }

    /// Looks up a global element.
    #[must_use]
    pub fn element_named(&self, name: &str) -> Option<ComponentId> {
        self.elements.get(name).copied()
    }

    /// The schema's target namespace.
    #[must_use]
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Prefix bindings declared on the schema root.
    #[must_use]
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Id of the `xs:anyType` complex type.
    #[must_use]
    pub fn any_type(&self) -> ComponentId {
        self.any_type
    }

    /// True if the component is `xs:anyType`.
    #[must_use]
    pub fn is_any_type(&self, id: ComponentId) -> bool {
        id == self.any_type
    }

    /// True if the component is a builtin simple type.
    #[must_use]
    pub fn is_builtin(&self, id: ComponentId) -> bool {
        matches!(self.get(id).kind, ComponentKind::AtomicBuiltin)
    }

    /// For a complex type extending a builtin (simple content), the builtin.
    #[must_use]
    pub fn builtin_content(&self, ct: &ComplexType) -> Option<ComponentId> {
        match ct.content {
            Content::Simple(base) if ct.is_extension() && self.is_builtin(base) => Some(base),
            _ => None,
        }
    }

    /// Walks restriction bases down to the primitive builtin type.
    ///
    /// Returns `None` if the chain ends on anything else, or loops.
    #[must_use]
    pub fn primitive_builtin(&self, id: ComponentId) -> Option<ComponentId> {
        let mut current = id;
        for _ in 0..self.components.len() {
            match &self.get(current).kind {
                ComponentKind::AtomicBuiltin => return Some(current),
                ComponentKind::AtomicRestriction(r) => current = r.base,
                _ => return None,
            }
        }
        None
    }

    /// Total number of components, builtins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if the arena only holds `xs:anyType`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://example.org/plic/";

    #[test]
    fn builtins_are_interned() {
        let mut schema = Schema::new(NS);
        let a = schema.builtin("string");
        let b = schema.builtin("string");
        assert_eq!(a, b);
        assert!(schema.is_builtin(a));
        assert_eq!(schema.builtin("anyType"), schema.any_type());
    }

    #[test]
    fn globals_are_indexed_by_name() {
        let mut schema = Schema::new(NS);
        let ct = schema.add(
            Component::new(ComponentKind::ComplexType(ComplexType::empty()))
                .named("DistributionType")
                .in_namespace(NS),
        );
        schema.add_global(ct);
        schema.add_global(ct);
        assert_eq!(schema.globals(), &[ct]);
        assert_eq!(schema.type_named("DistributionType"), Some(ct));
        assert_eq!(schema.element_named("DistributionType"), None);
    }

    #[test]
    fn primitive_builtin_walks_restrictions() {
        let mut schema = Schema::new(NS);
        let string = schema.builtin("string");
        let r1 = schema.add(Component::new(ComponentKind::AtomicRestriction(Restriction {
            base: string,
            enumeration: vec![],
        })));
        let r2 = schema.add(Component::new(ComponentKind::AtomicRestriction(Restriction {
            base: r1,
            enumeration: vec!["a".into()],
        })));
        assert_eq!(schema.primitive_builtin(r2), Some(string));
        assert_eq!(schema.primitive_builtin(schema.any_type()), None);
    }

    #[test]
    fn builtin_content_requires_extension() {
        let mut schema = Schema::new(NS);
        let string = schema.builtin("string");
        let ext = ComplexType {
            content: Content::Simple(string),
            base: Some(string),
            derivation: Some(Derivation::Extension),
        };
        let res = ComplexType {
            derivation: Some(Derivation::Restriction),
            ..ext.clone()
        };
        assert_eq!(schema.builtin_content(&ext), Some(string));
        assert_eq!(schema.builtin_content(&res), None);
        assert!(res.has_simple_content());
    }

    #[test]
    fn describe_formats_names() {
        let named = Component::new(ComponentKind::AtomicBuiltin)
            .named("string")
            .in_namespace("xs:");
        assert_eq!(named.describe(), "builtin type xs:string");
        let anon = Component::new(ComponentKind::ComplexType(ComplexType::empty()));
        assert_eq!(anon.describe(), "(anonymous) complex type");
    }
}
