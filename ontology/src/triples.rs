//! Canonical triple view of an [`Ontology`].
//!
//! The store keeps typed records; this module flattens them into the RDF
//! triples they stand for. `rdf:List` cells for `owl:oneOf` enumerations get
//! blank node labels derived from the class position and the cell index, so
//! the same ontology always produces the same triples.

use std::collections::BTreeSet;

use crate::model::iris::{
    OWL_CLASS, OWL_ONE_OF, OWL_ONTOLOGY, OWL_VERSION_INFO, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL,
    RDFS_RANGE, RDFS_SUBCLASS_OF, RDF_FIRST, RDF_NIL, RDF_REST, RDF_TYPE,
};
use crate::model::Ontology;

/// An RDF term as produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A blank node label, without the `_:` prefix.
    Blank(String),
    /// A plain string literal.
    Literal(String),
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject: an IRI or a blank node.
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Triple {
    fn new(subject: Term, predicate: &str, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.to_owned(),
            object,
        }
    }
}

fn iri(s: &str) -> Term {
    Term::Iri(s.to_owned())
}

fn lit(s: &str) -> Term {
    Term::Literal(s.to_owned())
}

/// Returns the blank node label of cell `cell` of the `owl:oneOf` list of the
/// class at position `class`.
#[must_use]
pub fn list_cell_label(class: usize, cell: usize) -> String {
    format!("oneOf{class}_{cell}")
}

impl Ontology {
    /// Returns every triple of the ontology, in serialization order.
    #[must_use]
    pub fn triples(&self) -> Vec<Triple> {
        let mut out = Vec::new();

        if let Some(header) = &self.header {
            out.push(Triple::new(iri(&header.iri), RDF_TYPE, iri(OWL_ONTOLOGY)));
            if let Some(label) = &header.label {
                out.push(Triple::new(iri(&header.iri), RDFS_LABEL, lit(label)));
            }
            if let Some(version) = &header.version {
                out.push(Triple::new(
                    iri(&header.iri),
                    OWL_VERSION_INFO,
                    lit(version),
                ));
            }
        }

        for (idx, class) in self.classes.iter().enumerate() {
            let subject = iri(&class.id);
            out.push(Triple::new(subject.clone(), RDF_TYPE, iri(OWL_CLASS)));
            if let Some(label) = &class.label {
                out.push(Triple::new(subject.clone(), RDFS_LABEL, lit(label)));
            }
            if let Some(comment) = &class.comment {
                out.push(Triple::new(subject.clone(), RDFS_COMMENT, lit(comment)));
            }
            for parent in &class.subclass_of {
                out.push(Triple::new(subject.clone(), RDFS_SUBCLASS_OF, iri(parent)));
            }
            if let Some(members) = &class.one_of {
                if members.is_empty() {
                    out.push(Triple::new(subject, OWL_ONE_OF, iri(RDF_NIL)));
                    continue;
                }
                let head = Term::Blank(list_cell_label(idx, 0));
                out.push(Triple::new(subject, OWL_ONE_OF, head));
                for (cell, member) in members.iter().enumerate() {
                    let node = Term::Blank(list_cell_label(idx, cell));
                    out.push(Triple::new(node.clone(), RDF_FIRST, iri(member)));
                    let rest = if cell + 1 == members.len() {
                        iri(RDF_NIL)
                    } else {
                        Term::Blank(list_cell_label(idx, cell + 1))
                    };
                    out.push(Triple::new(node, RDF_REST, rest));
                }
            }
        }

        for prop in &self.properties {
            let subject = iri(&prop.id);
            for kind in &prop.kinds {
                out.push(Triple::new(subject.clone(), RDF_TYPE, iri(kind.iri())));
            }
            if let Some(label) = &prop.label {
                out.push(Triple::new(subject.clone(), RDFS_LABEL, lit(label)));
            }
            if let Some(comment) = &prop.comment {
                out.push(Triple::new(subject.clone(), RDFS_COMMENT, lit(comment)));
            }
            for domain in &prop.domains {
                out.push(Triple::new(subject.clone(), RDFS_DOMAIN, iri(domain)));
            }
            for range in &prop.ranges {
                out.push(Triple::new(subject.clone(), RDFS_RANGE, iri(range)));
            }
        }

        for ind in &self.individuals {
            if let Some(label) = &ind.label {
                out.push(Triple::new(iri(&ind.id), RDFS_LABEL, lit(label)));
            }
        }

        out
    }

    /// Returns the triples as an ordered set, for order-independent comparison.
    #[must_use]
    pub fn triple_set(&self) -> BTreeSet<Triple> {
        self.triples().into_iter().collect()
    }
}
