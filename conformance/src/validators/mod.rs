//! Conformance validators, one module per standard.

pub mod jsonld;
pub mod owl;
pub mod rdf;
