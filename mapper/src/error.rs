//! Errors raised while mapping schema components.

use thiserror::Error;
use xsd2owl_schema::ComponentId;

use crate::naming::NamingError;

/// Errors raised while mapping schema components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A URI or label could not be synthesized.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// No global type has the requested name.
    #[error("no global type named '{0}'")]
    UnknownType(String),

    /// No global element has the requested name.
    #[error("no global element named '{0}'")]
    UnknownElement(String),

    /// A mapping step was handed a component of the wrong kind.
    #[error("component {component} is a {found}, expected a {expected}")]
    UnexpectedKind {
        /// The offending component.
        component: ComponentId,
        /// Kind the step handles.
        expected: &'static str,
        /// Kind actually found.
        found: &'static str,
    },
}
