//! Converter configuration, read from TOML.
//!
//! ```toml
//! default_namespace = "http://example.org/default#"
//! namespaces_to_process = ["http://example.org/plic/"]
//!
//! [ontology]
//! iri = "http://example.org/plic/ontology"
//! version = "1.0.0"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xsd2owl_ontology::OntologyHeader;

use crate::filter::NamespaceFilter;

/// Namespace used when a component has none.
pub const DEFAULT_NAMESPACE: &str = "http://example.org/default#";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML is malformed or has unexpected keys.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings shared by the naming rules and the namespace filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replaces empty component namespaces.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    /// Schema namespaces whose components are translated.
    #[serde(default)]
    pub namespaces_to_process: Vec<String>,
    /// Optional `owl:Ontology` header of the output.
    #[serde(default)]
    pub ontology: Option<OntologySettings>,
}

/// The `[ontology]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OntologySettings {
    /// Ontology IRI.
    pub iri: String,
    /// `rdfs:label` of the ontology.
    #[serde(default)]
    pub label: Option<String>,
    /// `owl:versionInfo` of the ontology.
    #[serde(default)]
    pub version: Option<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            namespaces_to_process: Vec::new(),
            ontology: None,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Toml`] if the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Toml`]
    /// if it is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Config processing a single namespace.
    #[must_use]
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespaces_to_process: vec![namespace.into()],
            ..Self::default()
        }
    }

    /// The namespace allow-list.
    #[must_use]
    pub fn filter(&self) -> NamespaceFilter {
        NamespaceFilter::new(self.namespaces_to_process.iter().cloned())
    }

    /// Ontology header described by the `[ontology]` table.
    #[must_use]
    pub fn header(&self) -> Option<OntologyHeader> {
        self.ontology.as_ref().map(|o| OntologyHeader {
            iri: o.iri.clone(),
            label: o.label.clone(),
            version: o.version.clone(),
        })
    }
}
