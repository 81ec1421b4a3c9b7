//! Outcome of a conversion: what was emitted and what was skipped.

use std::fmt;

use xsd2owl_schema::ComponentId;

/// Category of a conversion warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A component shape with no mapping rule.
    Unmanaged,
    /// A builtin type missing from the datatype table; the range was left unset.
    UnknownBuiltin,
    /// An error inside one component; its subtree was skipped.
    Recovered,
    /// A property already has a domain from another class; the new one was dropped.
    ConflictingDomain,
    /// An enumeration value that is not a usable IRI was rewritten.
    InvalidIri,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningKind::Unmanaged => "unmanaged",
            WarningKind::UnknownBuiltin => "unknown-builtin",
            WarningKind::Recovered => "recovered",
            WarningKind::ConflictingDomain => "conflicting-domain",
            WarningKind::InvalidIri => "invalid-iri",
        })
    }
}

/// A non-fatal problem met during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Category.
    pub kind: WarningKind,
    /// The component concerned.
    pub component: ComponentId,
    /// Human-readable description of the component.
    pub subject: String,
    /// What happened.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
    }
}

/// Counts of emitted resources plus every warning, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Classes added to the ontology.
    pub classes: usize,
    /// Properties added to the ontology.
    pub properties: usize,
    /// Enumeration individuals added to the ontology.
    pub individuals: usize,
    /// Components skipped because their namespace is not processed.
    pub out_of_scope: usize,
    /// Warnings in the order they were raised.
    pub warnings: Vec<Warning>,
}

impl ConversionReport {
    /// Warnings of one category.
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// True if no warning was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Adds the counts and warnings of another report.
    pub fn merge(&mut self, other: ConversionReport) {
        self.classes += other.classes;
        self.properties += other.properties;
        self.individuals += other.individuals;
        self.out_of_scope += other.out_of_scope;
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} classes, {} properties, {} individuals, {} out of scope, {} warnings",
            self.classes,
            self.properties,
            self.individuals,
            self.out_of_scope,
            self.warnings.len()
        )
    }
}
