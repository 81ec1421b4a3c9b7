//! XSD loader: turns an `xs:schema` document into a [`Schema`] arena.
//!
//! Loading runs in two passes. The first indexes every top-level
//! `complexType`, `simpleType`, `element` and `group` declaration by name.
//! The second builds components in declaration order, resolving type names
//! on demand. Named types and global elements are memoized before their body
//! is built, so recursive references terminate.
//!
//! Named model groups are instantiated at every `<xs:group ref>` site, so the
//! elements they contain get the referencing complex type as ancestor.

use std::collections::HashMap;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::model::{
    ComplexType, Component, ComponentId, ComponentKind, Compositor, Content, Derivation, Element,
    Group, OtherShape, Restriction, Schema, XSD_NS,
};

impl Schema {
    /// Parses an XSD document from a string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the text is not well-formed XML, the root is
    /// not `xs:schema`, or a QName uses an unbound prefix.
    pub fn parse_str(text: &str) -> Result<Schema, SchemaError> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        if !is_xsd(root, "schema") {
            return Err(SchemaError::NotASchema(root.tag_name().name().to_owned()));
        }
        let mut loader = Loader::new(root);
        loader.index();
        loader.build_globals()?;
        Ok(loader.schema)
    }

    /// Reads and parses an XSD file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read, or any error of
    /// [`Schema::parse_str`].
    pub fn from_file(path: &Path) -> Result<Schema, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Schema::parse_str(&text)
    }
}

fn is_xsd(node: Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XSD_NS)
        && node.tag_name().name() == local
}

fn xsd_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|c| c.is_element() && c.tag_name().namespace() == Some(XSD_NS))
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, names: &[&str]) -> Option<Node<'a, 'input>> {
    xsd_children(node).find(|c| names.contains(&c.tag_name().name()))
}

/// Concatenated `xs:annotation/xs:documentation` text of a declaration.
fn annotation_text(node: Node<'_, '_>) -> Option<String> {
    let annotation = first_child(node, &["annotation"])?;
    let parts: Vec<String> = xsd_children(annotation)
        .filter(|c| c.tag_name().name() == "documentation")
        .map(|doc| {
            doc.descendants()
                .filter(Node::is_text)
                .filter_map(|t| t.text())
                .collect::<String>()
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn required<'a>(node: Node<'a, '_>, attribute: &'static str) -> Result<&'a str, SchemaError> {
    node.attribute(attribute)
        .ok_or_else(|| SchemaError::MissingAttribute {
            element: node.tag_name().name().to_owned(),
            attribute,
        })
}

struct Loader<'a, 'input> {
    root: Node<'a, 'input>,
    schema: Schema,
    type_decls: HashMap<&'a str, Node<'a, 'input>>,
    element_decls: HashMap<&'a str, Node<'a, 'input>>,
    group_decls: HashMap<&'a str, Node<'a, 'input>>,
    built_types: HashMap<String, ComponentId>,
    built_elements: HashMap<String, ComponentId>,
    unresolved: HashMap<(String, String), ComponentId>,
    group_stack: Vec<&'a str>,
}

impl<'a, 'input> Loader<'a, 'input> {
    fn new(root: Node<'a, 'input>) -> Self {
        let target = root.attribute("targetNamespace").unwrap_or_default();
        let mut schema = Schema::new(target);
        for ns in root.namespaces() {
            if let Some(prefix) = ns.name() {
                if prefix != "xml" {
                    schema.declare_namespace(prefix, ns.uri());
                }
            }
        }
        Self {
            root,
            schema,
            type_decls: HashMap::new(),
            element_decls: HashMap::new(),
            group_decls: HashMap::new(),
            built_types: HashMap::new(),
            built_elements: HashMap::new(),
            unresolved: HashMap::new(),
            group_stack: Vec::new(),
        }
    }

    fn target(&self) -> String {
        self.schema.target_namespace().to_owned()
    }

    fn index(&mut self) {
        for child in xsd_children(self.root) {
            let Some(name) = child.attribute("name") else {
                continue;
            };
            let table = match child.tag_name().name() {
                "complexType" | "simpleType" => &mut self.type_decls,
                "element" => &mut self.element_decls,
                "group" => &mut self.group_decls,
                _ => continue,
            };
            if table.insert(name, child).is_some() {
                warn!(name, "duplicate global declaration, keeping the last one");
            }
        }
    }

    fn build_globals(&mut self) -> Result<(), SchemaError> {
        for child in xsd_children(self.root) {
            let tag = child.tag_name().name();
            match tag {
                "complexType" | "simpleType" => {
                    let id = self.named_type(required(child, "name")?)?;
                    self.schema.add_global(id);
                }
                "element" => {
                    let id = self.global_element(required(child, "name")?)?;
                    self.schema.add_global(id);
                }
                "import" | "include" | "redefine" | "override" => {
                    warn!(
                        directive = tag,
                        location = child.attribute("schemaLocation").unwrap_or_default(),
                        "schema composition is not followed"
                    );
                }
                _ => debug!(declaration = tag, "skipping top-level declaration"),
            }
        }
        Ok(())
    }

    /// Resolves a QName attribute value to `(namespace, local name)`.
    fn resolve_qname(
        &self,
        node: Node<'a, 'input>,
        qname: &'a str,
    ) -> Result<(String, &'a str), SchemaError> {
        let (prefix, local) = match qname.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, qname),
        };
        match (prefix, node.lookup_namespace_uri(prefix)) {
            (_, Some(ns)) => Ok((ns.to_owned(), local)),
            (None, None) => Ok((String::new(), local)),
            (Some(prefix), None) => Err(SchemaError::UnboundPrefix {
                prefix: prefix.to_owned(),
                qname: qname.to_owned(),
            }),
        }
    }

    fn unresolved(&mut self, namespace: &str, name: &str) -> ComponentId {
        let key = (namespace.to_owned(), name.to_owned());
        if let Some(&id) = self.unresolved.get(&key) {
            return id;
        }
        warn!(namespace, name, "unresolved schema reference");
        let id = self.schema.add(
            Component::new(ComponentKind::Other(OtherShape::Unresolved))
                .named(name)
                .in_namespace(namespace),
        );
        self.unresolved.insert(key, id);
        id
    }

    fn resolve_type_ref(
        &mut self,
        node: Node<'a, 'input>,
        qname: &'a str,
    ) -> Result<ComponentId, SchemaError> {
        let (ns, local) = self.resolve_qname(node, qname)?;
        if ns == XSD_NS {
            return Ok(self.schema.builtin(local));
        }
        if ns == self.schema.target_namespace() && self.type_decls.contains_key(local) {
            return self.named_type(local);
        }
        Ok(self.unresolved(&ns, local))
    }

    fn named_type(&mut self, name: &'a str) -> Result<ComponentId, SchemaError> {
        if let Some(&id) = self.built_types.get(name) {
            return Ok(id);
        }
        let Some(&node) = self.type_decls.get(name) else {
            let target = self.target();
            return Ok(self.unresolved(&target, name));
        };
        let id = self.alloc(node, Some(name), None);
        self.built_types.insert(name.to_owned(), id);
        if node.tag_name().name() == "complexType" {
            self.complex_type_body(node, id)?;
        } else {
            self.simple_type_body(node, id)?;
        }
        Ok(id)
    }

    fn global_element(&mut self, name: &'a str) -> Result<ComponentId, SchemaError> {
        if let Some(&id) = self.built_elements.get(name) {
            return Ok(id);
        }
        let Some(&node) = self.element_decls.get(name) else {
            let target = self.target();
            return Ok(self.unresolved(&target, name));
        };
        let id = self.alloc(node, Some(name), None);
        self.built_elements.insert(name.to_owned(), id);
        let type_ = self.element_type(node, id)?;
        self.schema.set_kind(
            id,
            ComponentKind::Element(Element {
                type_,
                reference: None,
                global: true,
            }),
        );
        Ok(id)
    }

    /// Adds a placeholder component carrying the common attributes of `node`.
    fn alloc(
        &mut self,
        node: Node<'a, 'input>,
        name: Option<&str>,
        parent: Option<ComponentId>,
    ) -> ComponentId {
        let component = Component {
            name: name.map(str::to_owned),
            namespace: Some(self.target()),
            parent,
            annotation: annotation_text(node),
            kind: ComponentKind::Other(OtherShape::Unresolved),
        };
        self.schema.add(component)
    }

    fn element_type(
        &mut self,
        node: Node<'a, 'input>,
        element: ComponentId,
    ) -> Result<ComponentId, SchemaError> {
        if let Some(qname) = node.attribute("type") {
            return self.resolve_type_ref(node, qname);
        }
        if let Some(inline) = first_child(node, &["complexType"]) {
            let id = self.alloc(inline, None, Some(element));
            self.complex_type_body(inline, id)?;
            return Ok(id);
        }
        if let Some(inline) = first_child(node, &["simpleType"]) {
            let id = self.alloc(inline, None, Some(element));
            self.simple_type_body(inline, id)?;
            return Ok(id);
        }
        Ok(self.schema.any_type())
    }

    fn local_element(
        &mut self,
        node: Node<'a, 'input>,
        parent: ComponentId,
    ) -> Result<ComponentId, SchemaError> {
        if let Some(qname) = node.attribute("ref") {
            let (ns, local) = self.resolve_qname(node, qname)?;
            let target = if ns == self.schema.target_namespace() {
                self.global_element(local)?
            } else {
                self.unresolved(&ns, local)
            };
            let referenced = self.schema.get(target);
            let type_ = referenced
                .as_element()
                .map_or(self.schema.any_type(), |e| e.type_);
            let component = Component {
                name: referenced.name.clone(),
                namespace: referenced.namespace.clone(),
                parent: Some(parent),
                annotation: annotation_text(node).or_else(|| referenced.annotation.clone()),
                kind: ComponentKind::Element(Element {
                    type_,
                    reference: Some(target),
                    global: false,
                }),
            };
            return Ok(self.schema.add(component));
        }

        let name = required(node, "name")?;
        let id = self.alloc(node, Some(name), Some(parent));
        let type_ = self.element_type(node, id)?;
        self.schema.set_kind(
            id,
            ComponentKind::Element(Element {
                type_,
                reference: None,
                global: false,
            }),
        );
        Ok(id)
    }

    fn model_group(
        &mut self,
        node: Node<'a, 'input>,
        parent: ComponentId,
    ) -> Result<ComponentId, SchemaError> {
        let compositor = match node.tag_name().name() {
            "choice" => Compositor::Choice,
            "all" => Compositor::All,
            _ => Compositor::Sequence,
        };
        let id = self.alloc(node, None, Some(parent));
        let mut particles = Vec::new();
        for child in xsd_children(node) {
            let particle = match child.tag_name().name() {
                "element" => self.local_element(child, id)?,
                "sequence" | "choice" | "all" => self.model_group(child, id)?,
                "group" => self.group_ref(child, id)?,
                "any" => {
                    let target = self.target();
                    self.schema.add(
                        Component::new(ComponentKind::Other(OtherShape::Wildcard))
                            .in_namespace(target)
                            .child_of(id),
                    )
                }
                _ => continue,
            };
            particles.push(particle);
        }
        self.schema.set_kind(
            id,
            ComponentKind::Group(Group {
                compositor,
                particles,
            }),
        );
        Ok(id)
    }

    fn group_ref(
        &mut self,
        node: Node<'a, 'input>,
        parent: ComponentId,
    ) -> Result<ComponentId, SchemaError> {
        let qname = required(node, "ref")?;
        let (ns, local) = self.resolve_qname(node, qname)?;
        let decl = self.group_decls.get(local).copied();
        let model = decl.and_then(|d| first_child(d, &["sequence", "choice", "all"]));
        match model {
            Some(model) if !self.group_stack.contains(&local) => {
                self.group_stack.push(local);
                let id = self.model_group(model, parent);
                self.group_stack.pop();
                id
            }
            Some(_) => {
                warn!(group = local, "recursive model group reference");
                Ok(self.unresolved(&ns, local))
            }
            None => Ok(self.unresolved(&ns, local)),
        }
    }

    fn content_model(
        &mut self,
        node: Node<'a, 'input>,
        parent: ComponentId,
    ) -> Result<Option<ComponentId>, SchemaError> {
        match first_child(node, &["sequence", "choice", "all", "group"]) {
            Some(child) if child.tag_name().name() == "group" => {
                self.group_ref(child, parent).map(Some)
            }
            Some(child) => self.model_group(child, parent).map(Some),
            None => Ok(None),
        }
    }

    fn complex_type_body(
        &mut self,
        node: Node<'a, 'input>,
        id: ComponentId,
    ) -> Result<(), SchemaError> {
        let mut shape = ComplexType::empty();

        if let Some(content) = first_child(node, &["complexContent", "simpleContent"]) {
            let Some(derivation) = first_child(content, &["extension", "restriction"]) else {
                self.schema.set_kind(id, ComponentKind::ComplexType(shape));
                return Ok(());
            };
            let base = self.resolve_type_ref(derivation, required(derivation, "base")?)?;
            shape.base = Some(base);
            shape.derivation = Some(match derivation.tag_name().name() {
                "extension" => Derivation::Extension,
                _ => Derivation::Restriction,
            });

            if content.tag_name().name() == "simpleContent" {
                // Simple content of a simple-content base is the base's text type.
                let text_type = match self.schema.get(base).as_complex_type() {
                    Some(ComplexType {
                        content: Content::Simple(inner),
                        ..
                    }) => *inner,
                    _ => base,
                };
                shape.content = Content::Simple(text_type);
            } else {
                let own = self.content_model(derivation, id)?;
                let inherited = match shape.derivation {
                    Some(Derivation::Extension) => {
                        self.schema.get(base).as_complex_type().and_then(ComplexType::model)
                    }
                    _ => None,
                };
                shape.content = match (inherited, own) {
                    (Some(inherited), Some(own)) => {
                        let target = self.target();
                        let group = self.schema.add(
                            Component::new(ComponentKind::Group(Group {
                                compositor: Compositor::Sequence,
                                particles: vec![inherited, own],
                            }))
                            .in_namespace(target)
                            .child_of(id),
                        );
                        Content::Model(group)
                    }
                    (Some(group), None) | (None, Some(group)) => Content::Model(group),
                    (None, None) => Content::Empty,
                };
            }
        } else if let Some(model) = self.content_model(node, id)? {
            shape.content = Content::Model(model);
        }

        self.schema.set_kind(id, ComponentKind::ComplexType(shape));
        Ok(())
    }

    fn simple_type_body(
        &mut self,
        node: Node<'a, 'input>,
        id: ComponentId,
    ) -> Result<(), SchemaError> {
        let kind = if let Some(restriction) = first_child(node, &["restriction"]) {
            let base = match restriction.attribute("base") {
                Some(qname) => self.resolve_type_ref(restriction, qname)?,
                None => match first_child(restriction, &["simpleType"]) {
                    Some(inline) => {
                        let base = self.alloc(inline, None, Some(id));
                        self.simple_type_body(inline, base)?;
                        base
                    }
                    None => self.schema.builtin("anySimpleType"),
                },
            };
            let enumeration = xsd_children(restriction)
                .filter(|c| c.tag_name().name() == "enumeration")
                .filter_map(|c| c.attribute("value"))
                .map(str::to_owned)
                .collect();
            ComponentKind::AtomicRestriction(Restriction { base, enumeration })
        } else if first_child(node, &["list"]).is_some() {
            ComponentKind::Other(OtherShape::List)
        } else if first_child(node, &["union"]).is_some() {
            ComponentKind::Other(OtherShape::Union)
        } else {
            ComponentKind::Other(OtherShape::Unresolved)
        };
        self.schema.set_kind(id, kind);
        Ok(())
    }
}
