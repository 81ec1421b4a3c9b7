//! Namespace allow-list gating which components are translated.

use std::collections::BTreeSet;

use xsd2owl_schema::Component;

/// The set of schema namespaces to process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceFilter {
    allowed: BTreeSet<String>,
}

impl NamespaceFilter {
    /// Builds a filter from an allow-list.
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: namespaces.into_iter().map(Into::into).collect(),
        }
    }

    /// True if components of `namespace` are translated.
    #[must_use]
    pub fn allows(&self, namespace: &str) -> bool {
        self.allowed.contains(namespace)
    }

    /// True if the component's namespace is on the allow-list.
    ///
    /// A component without a namespace is never in scope.
    #[must_use]
    pub fn in_scope(&self, component: &Component) -> bool {
        component
            .namespace
            .as_deref()
            .is_some_and(|ns| self.allows(ns))
    }

    /// True if nothing is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Allowed namespaces in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}
