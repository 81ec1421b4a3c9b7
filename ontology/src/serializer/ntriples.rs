//! N-Triples serializer.
//!
//! Produces a valid N-Triples document (one triple per line, absolute IRIs)
//! from the canonical triple view, so `owl:oneOf` lists are spelled out with
//! blank nodes.

use crate::model::Ontology;
use crate::triples::Term;

/// Serializes the ontology to an N-Triples string.
#[must_use]
pub fn to_ntriples(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(64 * 1024);
    for triple in ontology.triples() {
        term(&mut out, &triple.subject);
        out.push_str(" <");
        out.push_str(&triple.predicate);
        out.push_str("> ");
        term(&mut out, &triple.object);
        out.push_str(" .\n");
    }
    out
}

fn term(out: &mut String, term: &Term) {
    match term {
        Term::Iri(iri) => {
            out.push('<');
            out.push_str(iri);
            out.push('>');
        }
        Term::Blank(label) => {
            out.push_str("_:");
            out.push_str(label);
        }
        Term::Literal(s) => {
            out.push('"');
            out.push_str(
                &s.replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('\n', "\\n")
                    .replace('\r', "\\r"),
            );
            out.push('"');
        }
    }
}
