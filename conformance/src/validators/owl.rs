//! OWL structural validator.
//!
//! Checks the live ontology, without file I/O:
//! - Domains are declared classes
//! - Ranges are declared classes or XSD datatypes
//! - Each property has at most one domain
//! - Each property is typed, and never both datatype and object property
//! - `owl:oneOf` lists are non-empty and their members are known
//! - `rdfs:subClassOf` targets are declared classes

use std::collections::HashSet;

use xsd2owl_ontology::{iris, Ontology, PropertyKind};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/owl";

/// Validates OWL structural constraints on a generated ontology.
#[must_use]
pub fn validate(ontology: &Ontology) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let classes: HashSet<&str> = ontology.classes().iter().map(|c| c.id.as_str()).collect();
    let is_datatype = |iri: &str| {
        iri.starts_with(iris::XSD) || iri == "http://www.w3.org/2000/01/rdf-schema#Literal"
    };

    let mut unknown_domains = Vec::new();
    let mut unknown_ranges = Vec::new();
    let mut multi_domain = Vec::new();
    let mut untyped = Vec::new();
    let mut punned = Vec::new();
    for prop in ontology.properties() {
        for domain in &prop.domains {
            if !classes.contains(domain.as_str()) {
                unknown_domains.push(format!("{} rdfs:domain {domain}", prop.id));
            }
        }
        for range in &prop.ranges {
            if !classes.contains(range.as_str()) && !is_datatype(range) {
                unknown_ranges.push(format!("{} rdfs:range {range}", prop.id));
            }
            if prop.is(PropertyKind::Object) && is_datatype(range) {
                punned.push(format!(
                    "object property {} ranged on datatype {range}",
                    prop.id
                ));
            }
        }
        if prop.domains.len() > 1 {
            multi_domain.push(format!("{} has {} domains", prop.id, prop.domains.len()));
        }
        if prop.kinds.is_empty() {
            untyped.push(prop.id.clone());
        }
        if prop.is(PropertyKind::Object) && prop.is(PropertyKind::Datatype) {
            punned.push(format!(
                "{} is both a datatype and an object property",
                prop.id
            ));
        }
    }

    report.push(TestResult::check(
        VALIDATOR,
        unknown_domains,
        "All property domains are declared classes",
        "Property domains reference undeclared classes",
    ));
    if unknown_ranges.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            "All property ranges are declared classes or XSD datatypes",
        ));
    } else {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            "Property ranges reference classes outside this ontology",
            unknown_ranges,
        ));
    }
    report.push(TestResult::check(
        VALIDATOR,
        multi_domain,
        "Every property has at most one domain",
        "Properties with more than one domain",
    ));
    if untyped.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            "Every property is declared with a property type",
        ));
    } else {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            "Properties only seen through references have no property type",
            untyped,
        ));
    }
    report.push(TestResult::check(
        VALIDATOR,
        punned,
        "Datatype and object properties are disjoint",
        "Properties mix datatype and object semantics",
    ));

    check_classes(ontology, &classes, &mut report);
    report
}

fn check_classes(ontology: &Ontology, classes: &HashSet<&str>, report: &mut ConformanceReport) {
    let mut bad_lists = Vec::new();
    let mut bad_parents = Vec::new();
    for class in ontology.classes() {
        if let Some(members) = &class.one_of {
            if members.is_empty() {
                bad_lists.push(format!("{} has an empty owl:oneOf", class.id));
            }
            let mut seen = HashSet::new();
            for member in members {
                if !seen.insert(member.as_str()) {
                    bad_lists.push(format!("{} lists {member} twice", class.id));
                }
            }
        }
        for parent in &class.subclass_of {
            if !classes.contains(parent.as_str()) {
                bad_parents.push(format!("{} rdfs:subClassOf {parent}", class.id));
            }
        }
    }
    report.push(TestResult::check(
        VALIDATOR,
        bad_lists,
        "All owl:oneOf enumerations are non-empty and duplicate-free",
        "Malformed owl:oneOf enumerations",
    ));
    report.push(TestResult::check(
        VALIDATOR,
        bad_parents,
        "All rdfs:subClassOf targets are declared classes",
        "rdfs:subClassOf targets reference undeclared classes",
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsd2owl_ontology::Individual;

    fn failures(report: &ConformanceReport) -> Vec<String> {
        report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.message.clone())
            .collect()
    }

    #[test]
    fn well_formed_ontology_passes() {
        let mut onto = Ontology::new();
        onto.add_class("urn:ex:SpecimenType", Some("Specimen"), None);
        onto.add_class("urn:ex:SexEnumType", None, None);
        onto.add_one_of_members(
            "urn:ex:SexEnumType",
            vec![Individual {
                id: "urn:ex:SexEnumType_Male".into(),
                label: Some("male".into()),
            }],
        );
        onto.add_object_property("urn:ex:hasSex", None, None);
        onto.add_property_domain_range(
            "urn:ex:hasSex",
            Some("urn:ex:SpecimenType"),
            Some("urn:ex:SexEnumType"),
        );
        onto.add_datatype_property("urn:ex:hasName", None, None);
        let string = format!("{}string", iris::XSD);
        onto.add_property_domain_range("urn:ex:hasName", None, Some(&string));
        let report = validate(&onto);
        assert!(report.all_passed(), "{report}");
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn two_domains_fail() {
        let mut onto = Ontology::new();
        onto.add_class("urn:ex:A", None, None);
        onto.add_class("urn:ex:B", None, None);
        onto.add_datatype_property("urn:ex:p", None, None);
        onto.add_property_domain_range("urn:ex:p", Some("urn:ex:A"), None);
        onto.add_property_domain_range("urn:ex:p", Some("urn:ex:B"), None);
        assert_eq!(
            failures(&validate(&onto)),
            vec!["Properties with more than one domain"]
        );
    }

    #[test]
    fn undeclared_domain_fails_and_range_warns() {
        let mut onto = Ontology::new();
        onto.add_object_property("urn:ex:p", None, None);
        onto.add_property_domain_range(
            "urn:ex:p",
            Some("urn:ex:Missing"),
            Some("urn:ex:Elsewhere"),
        );
        let report = validate(&onto);
        assert_eq!(
            failures(&report),
            vec!["Property domains reference undeclared classes"]
        );
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn mixed_property_kinds_fail() {
        let mut onto = Ontology::new();
        onto.add_datatype_property("urn:ex:p", None, None);
        onto.add_object_property("urn:ex:p", None, None);
        assert_eq!(
            failures(&validate(&onto)),
            vec!["Properties mix datatype and object semantics"]
        );
    }

    #[test]
    fn empty_enumeration_fails() {
        let mut onto = Ontology::new();
        onto.add_class("urn:ex:E", None, None);
        onto.add_one_of_members("urn:ex:E", Vec::new());
        assert_eq!(
            failures(&validate(&onto)),
            vec!["Malformed owl:oneOf enumerations"]
        );
    }
}
