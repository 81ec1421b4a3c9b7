//! XML Schema component tree for xsd2owl.
//!
//! `xsd2owl-schema` loads an XSD document into a [`Schema`]: an arena of
//! [`Component`]s linked by [`ComponentId`]. Every component knows its parent,
//! so the mapper can walk up from a local element to the complex type that
//! owns it.
//!
//! ```
//! use xsd2owl_schema::Schema;
//!
//! let schema = Schema::parse_str(r#"
//!     <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
//!                targetNamespace="http://example.org/plic/">
//!       <xs:complexType name="DistributionType">
//!         <xs:sequence><xs:element name="Scope" type="xs:string"/></xs:sequence>
//!       </xs:complexType>
//!     </xs:schema>"#)?;
//! assert!(schema.type_named("DistributionType").is_some());
//! # Ok::<(), xsd2owl_schema::SchemaError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
mod loader;
pub mod model;

pub use error::SchemaError;
pub use model::{
    ComplexType, Component, ComponentId, ComponentKind, Compositor, Content, Derivation, Element,
    Group, OtherShape, Restriction, Schema, XSD_NS,
};
