//! Serializers for the generated ontology.
//!
//! Three serialization formats are supported:
//! - **Turtle** ([`turtle`]): the default, for RDF tooling and human review
//! - **N-Triples** ([`ntriples`]): for streaming/bulk processing and diffs
//! - **JSON-LD** ([`jsonld`]): for web consumers (requires the `serializers` feature)

#[cfg(feature = "serializers")]
pub mod jsonld;
pub mod ntriples;
pub mod turtle;

use std::fmt;
use std::str::FromStr;

use crate::model::Ontology;

/// Output format of [`Ontology::serialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// Turtle 1.1.
    #[default]
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1, pretty-printed.
    #[cfg(feature = "serializers")]
    JsonLd,
}

impl Format {
    /// Conventional file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
            #[cfg(feature = "serializers")]
            Format::JsonLd => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Turtle => "turtle",
            Format::NTriples => "ntriples",
            #[cfg(feature = "serializers")]
            Format::JsonLd => "jsonld",
        })
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown RDF format '{}'", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Format::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(Format::NTriples),
            #[cfg(feature = "serializers")]
            "jsonld" | "json-ld" | "json" => Ok(Format::JsonLd),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl Ontology {
    /// Serializes the accumulated graph in the requested format.
    #[must_use]
    pub fn serialize(&self, format: Format) -> String {
        match format {
            Format::Turtle => turtle::to_turtle(self),
            Format::NTriples => ntriples::to_ntriples(self),
            #[cfg(feature = "serializers")]
            Format::JsonLd => {
                let value = jsonld::to_json_ld(self);
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}
