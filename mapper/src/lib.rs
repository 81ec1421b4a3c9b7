//! XML Schema to OWL mapping engine.
//!
//! `xsd2owl-mapper` walks an [`xsd2owl_schema::Schema`] and writes into an
//! [`xsd2owl_ontology::Ontology`]:
//!
//! | Schema component | Ontology resource |
//! |------------------|-------------------|
//! | complex type (named or anonymous) | `owl:Class` |
//! | element of a builtin or simple-content type | `owl:DatatypeProperty` |
//! | element of a complex type | `owl:ObjectProperty` ranged on its class |
//! | element of an enumerated simple type | `owl:ObjectProperty` ranged on an `owl:oneOf` class |
//!
//! Only components whose namespace appears in
//! [`Config::namespaces_to_process`] are translated.
//!
//! # Entry Point
//!
//! ```
//! use xsd2owl_mapper::Config;
//! use xsd2owl_ontology::Ontology;
//! use xsd2owl_schema::Schema;
//!
//! let schema = Schema::parse_str(r#"
//!     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                targetNamespace="http://example.org/plic/">
//!       <xs:element name="Sex">
//!         <xs:simpleType>
//!           <xs:restriction base="xs:string">
//!             <xs:enumeration value="Male"/>
//!             <xs:enumeration value="Female"/>
//!           </xs:restriction>
//!         </xs:simpleType>
//!       </xs:element>
//!     </xs:schema>"#)?;
//! let config = Config::for_namespace("http://example.org/plic/");
//! let mut ontology = Ontology::new();
//! let report = xsd2owl_mapper::convert(&schema, &config, &mut ontology)?;
//! assert_eq!(report.individuals, 2);
//! assert!(ontology.class("http://example.org/plic/SexEnumType").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

mod classify;
pub mod config;
pub mod datatypes;
pub mod error;
pub mod filter;
pub mod naming;
pub mod report;
mod traversal;
pub mod usage;

pub use config::{Config, ConfigError, OntologySettings};
pub use error::MapError;
pub use filter::NamespaceFilter;
pub use naming::{Namer, NamingError};
pub use report::{ConversionReport, Warning, WarningKind};
pub use traversal::Mapper;
pub use usage::{UsageIndex, Use};

use xsd2owl_ontology::Ontology;
use xsd2owl_schema::Schema;

/// Maps every global component of `schema` into `ontology`.
///
/// # Errors
///
/// Returns the first error raised by a global component; see [`Mapper::convert`].
pub fn convert(
    schema: &Schema,
    config: &Config,
    ontology: &mut Ontology,
) -> Result<ConversionReport, MapError> {
    let mut mapper = Mapper::new(schema, config, ontology);
    mapper.convert()?;
    Ok(mapper.finish())
}
