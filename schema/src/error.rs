//! Errors raised while loading and parsing schema documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an XML Schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `xs:schema`.
    #[error("root element <{0}> is not an xs:schema")]
    NotASchema(String),

    /// A QName uses a prefix with no namespace binding in scope.
    #[error("unbound namespace prefix '{prefix}' in '{qname}'")]
    UnboundPrefix {
        /// The unbound prefix.
        prefix: String,
        /// The full QName as written.
        qname: String,
    },

    /// A required attribute is absent.
    #[error("missing attribute '{attribute}' on <xs:{element}>")]
    MissingAttribute {
        /// Local name of the schema element.
        element: String,
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// The schema file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
