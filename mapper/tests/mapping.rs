//! End-to-end mapping tests: XSD text in, ontology out.

use xsd2owl_mapper::{
    convert, Config, ConversionReport, MapError, Mapper, Namer, UsageIndex, WarningKind,
};
use xsd2owl_ontology::{iris, Ontology, PropertyKind};
use xsd2owl_schema::{
    ComplexType, Component, ComponentKind, Compositor, Content, Element, Group, Schema,
};

const NS: &str = "http://example.org/plic/";

const PLIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:plic="http://example.org/plic/"
           targetNamespace="http://example.org/plic/"
           elementFormDefault="qualified">

  <xs:element name="Sex">
    <xs:annotation>
      <xs:documentation>Sex of the
        specimen.</xs:documentation>
    </xs:annotation>
    <xs:simpleType>
      <xs:restriction base="xs:string">
        <xs:enumeration value="Male"/>
        <xs:enumeration value="Female"/>
        <xs:enumeration value="NotEvaluated"/>
      </xs:restriction>
    </xs:simpleType>
  </xs:element>

  <xs:element name="Remarks" type="xs:string"/>
  <xs:element name="Created" type="xs:dateTime"/>

  <xs:complexType name="FeedingAtomizedType">
    <xs:annotation><xs:documentation>Feeding habits.</xs:documentation></xs:annotation>
    <xs:sequence>
      <xs:element name="Thropic" minOccurs="0">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="StrategyThropic" type="xs:string"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
      <xs:element ref="plic:Sex"/>
      <xs:element ref="plic:Remarks"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="DistributionType">
    <xs:sequence>
      <xs:element name="Language" type="xs:language"/>
      <xs:element name="Notes"/>
      <xs:element name="Feeding" type="plic:FeedingAtomizedType"/>
      <xs:element name="Count" type="xs:integer"/>
      <xs:choice>
        <xs:element name="Label" type="plic:LabelType"/>
        <xs:any/>
      </xs:choice>
      <xs:element ref="plic:Remarks"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="LabelType">
    <xs:simpleContent>
      <xs:extension base="xs:string">
        <xs:attribute name="lang" type="xs:string"/>
      </xs:extension>
    </xs:simpleContent>
  </xs:complexType>

  <xs:complexType name="EcologicalSignificanceType">
    <xs:sequence>
      <xs:element ref="plic:Remarks"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>
"#;

fn schema() -> Schema {
    Schema::parse_str(PLIC).expect("fixture schema loads")
}

fn run(config: &Config) -> (Ontology, ConversionReport) {
    let schema = schema();
    let mut ontology = Ontology::new();
    let report = convert(&schema, config, &mut ontology).expect("conversion succeeds");
    (ontology, report)
}

fn plic() -> (Ontology, ConversionReport) {
    run(&Config::for_namespace(NS))
}

fn uri(local: &str) -> String {
    format!("{NS}{local}")
}

#[test]
fn anonymous_type_borrows_element_name() {
    let (onto, _) = plic();
    let class = onto.class(&uri("ThropicType")).expect("anonymous class");
    assert_eq!(class.label.as_deref(), Some("Thropic"));

    let thropic = onto.property(&uri("hasThropic")).expect("property");
    assert!(thropic.is(PropertyKind::Object));
    assert_eq!(thropic.ranges, vec![uri("ThropicType")]);
    assert_eq!(thropic.domains, vec![uri("FeedingAtomizedType")]);

    let strategy = onto.property(&uri("hasStrategyThropic")).expect("nested property");
    assert_eq!(strategy.domains, vec![uri("ThropicType")]);
    assert_eq!(strategy.label.as_deref(), Some("has Strategy Thropic"));
}

#[test]
fn named_complex_type_becomes_labelled_class() {
    let (onto, _) = plic();
    let class = onto.class(&uri("FeedingAtomizedType")).expect("class");
    assert_eq!(class.label.as_deref(), Some("Feeding Atomized"));
    assert_eq!(class.comment.as_deref(), Some("Feeding habits."));
}

#[test]
fn named_type_range_uses_class_uri() {
    let (onto, _) = plic();
    let feeding = onto.property(&uri("hasFeeding")).expect("property");
    assert!(feeding.is(PropertyKind::Object));
    assert_eq!(feeding.ranges, vec![uri("FeedingAtomizedType")]);
    assert_eq!(feeding.domains, vec![uri("DistributionType")]);
}

#[test]
fn enumeration_becomes_one_of_class() {
    let (onto, report) = plic();
    let class_uri = uri("SexEnumType");
    let class = onto.class(&class_uri).expect("enum class");
    assert_eq!(class.label.as_deref(), Some("Enum values for Sex"));
    let comment = class.comment.as_deref().expect("annotation");
    assert!(!comment.contains('\n'));
    assert_eq!(
        comment.split_whitespace().collect::<Vec<_>>().join(" "),
        "Sex of the specimen."
    );
    let members = class.one_of.as_ref().expect("oneOf list");
    assert_eq!(
        members,
        &vec![
            format!("{class_uri}_Male"),
            format!("{class_uri}_Female"),
            format!("{class_uri}_NotEvaluated"),
        ]
    );
    let labels: Vec<_> = members
        .iter()
        .map(|m| onto.individual(m).and_then(|i| i.label.clone()))
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("male".to_owned()),
            Some("female".to_owned()),
            Some("not evaluated".to_owned())
        ]
    );
    assert_eq!(report.individuals, 3);

    let sex = onto.property(&uri("hasSex")).expect("property");
    assert!(sex.is(PropertyKind::Object));
    assert_eq!(sex.ranges, vec![class_uri]);
}

#[test]
fn single_reference_domain_is_reference_site() {
    let (onto, _) = plic();
    let sex = onto.property(&uri("hasSex")).expect("property");
    assert_eq!(sex.domains, vec![uri("FeedingAtomizedType")]);
}

#[test]
fn multiply_referenced_element_gets_no_domain() {
    let (onto, _) = plic();
    let remarks = onto.property(&uri("hasRemarks")).expect("property");
    assert!(remarks.domains.is_empty());
    assert_eq!(remarks.ranges, vec![format!("{}string", iris::XSD)]);
}

#[test]
fn builtin_types_map_to_xsd_datatypes() {
    let (onto, _) = plic();
    let created = onto.property(&uri("hasCreated")).expect("property");
    assert!(created.is(PropertyKind::Datatype));
    assert_eq!(created.ranges, vec![format!("{}dateTime", iris::XSD)]);
    let count = onto.property(&uri("hasCount")).expect("property");
    assert_eq!(count.ranges, vec![format!("{}int", iris::XSD)]);
}

#[test]
fn unknown_builtin_warns_and_leaves_range_unset() {
    let (onto, report) = plic();
    let language = onto.property(&uri("hasLanguage")).expect("property");
    assert!(language.is(PropertyKind::Datatype));
    assert!(language.ranges.is_empty());
    assert_eq!(report.warnings_of(WarningKind::UnknownBuiltin).count(), 1);
}

#[test]
fn any_type_is_untyped_datatype_property() {
    let (onto, _) = plic();
    let notes = onto.property(&uri("hasNotes")).expect("property");
    assert!(notes.is(PropertyKind::Datatype));
    assert!(notes.ranges.is_empty());
}

#[test]
fn simple_content_extension_is_datatype_property() {
    let (onto, report) = plic();
    let label = onto.property(&uri("hasLabel")).expect("property");
    assert!(label.is(PropertyKind::Datatype));
    assert_eq!(label.ranges, vec![format!("{}string", iris::XSD)]);
    assert!(onto.class(&uri("LabelType")).is_none());
    assert!(report
        .warnings_of(WarningKind::Unmanaged)
        .any(|w| w.message.contains("content model")));
}

#[test]
fn out_of_scope_namespace_produces_nothing() {
    let (onto, report) = run(&Config::for_namespace("http://example.org/other/"));
    assert!(onto.triples().is_empty());
    assert_eq!(report.classes + report.properties + report.individuals, 0);
    assert!(report.out_of_scope > 0);
}

#[test]
fn conversion_is_deterministic() {
    let (a, _) = plic();
    let (b, _) = plic();
    assert_eq!(a.triple_set(), b.triple_set());
    assert_eq!(a.triples(), b.triples());
}

#[test]
fn repeated_conversion_is_idempotent() {
    let schema = schema();
    let config = Config::for_namespace(NS);
    let mut ontology = Ontology::new();
    convert(&schema, &config, &mut ontology).expect("first run");
    let first = ontology.triple_set();
    let report = convert(&schema, &config, &mut ontology).expect("second run");
    assert_eq!(ontology.triple_set(), first);
    assert_eq!(report.classes + report.properties + report.individuals, 0);
}

#[test]
fn single_type_mode_maps_one_type() {
    let schema = schema();
    let config = Config::for_namespace(NS);
    let mut ontology = Ontology::new();
    let mut mapper = Mapper::new(&schema, &config, &mut ontology);
    let class = mapper.convert_type("DistributionType").expect("type maps");
    assert_eq!(class, Some(uri("DistributionType")));
    assert!(matches!(
        mapper.convert_type("MissingType"),
        Err(MapError::UnknownType(name)) if name == "MissingType"
    ));
    let _ = mapper.finish();
    assert!(ontology.class(&uri("FeedingAtomizedType")).is_none());
    assert!(ontology.property(&uri("hasFeeding")).is_some());
}

#[test]
fn single_type_mode_declares_the_base_class() {
    let schema = Schema::parse_str(SHAPES).expect("shapes schema loads");
    let config = Config::for_namespace(SHAPES_NS);
    let mut ontology = Ontology::new();
    let mut mapper = Mapper::new(&schema, &config, &mut ontology);
    let class = mapper.convert_type("Taxon").expect("type maps");
    assert_eq!(class, Some(format!("{SHAPES_NS}TaxonType")));
    let _ = mapper.finish();

    let base = format!("{SHAPES_NS}RecordType");
    assert!(ontology.class(&base).is_some());
    let taxon = ontology
        .class(&format!("{SHAPES_NS}TaxonType"))
        .expect("derived class");
    assert_eq!(taxon.subclass_of, vec![base.clone()]);
    let id = ontology
        .property(&format!("{SHAPES_NS}hasIdentifier"))
        .expect("inherited property");
    assert_eq!(id.domains, vec![base]);
}

#[test]
fn base_mapped_early_is_not_mapped_twice() {
    let schema = Schema::parse_str(SHAPES).expect("shapes schema loads");
    let config = Config::for_namespace(SHAPES_NS);
    let mut ontology = Ontology::new();
    let mut mapper = Mapper::new(&schema, &config, &mut ontology);
    mapper.convert_type("Taxon").expect("type maps");
    mapper.convert().expect("conversion succeeds");
    let report = mapper.finish();

    let (expected, full) = shapes();
    let mut classes: Vec<_> = ontology.classes().to_vec();
    let mut expected_classes: Vec<_> = expected.classes().to_vec();
    classes.sort_by(|a, b| a.id.cmp(&b.id));
    expected_classes.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(classes, expected_classes);
    assert_eq!(ontology.property_count(), expected.property_count());
    assert_eq!(report.warnings.len(), full.warnings.len());
}

#[test]
fn single_element_mode_maps_one_element() {
    let schema = schema();
    let config = Config::for_namespace(NS);
    let mut ontology = Ontology::new();
    let mut mapper = Mapper::new(&schema, &config, &mut ontology);
    mapper.convert_element("Created").expect("element maps");
    assert!(matches!(
        mapper.convert_element("Nope"),
        Err(MapError::UnknownElement(_))
    ));
    let report = mapper.finish();
    assert_eq!((report.classes, report.properties), (0, 1));
}

#[test]
fn schema_prefixes_are_bound() {
    let (onto, _) = plic();
    assert!(onto
        .prefixes()
        .iter()
        .any(|(p, iri)| p == "plic" && iri == NS));
    assert!(onto.prefixes().iter().all(|(p, _)| p != "xs"));
}

#[test]
fn no_namespace_schema_uses_default_namespace() {
    let schema = Schema::parse_str(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
             <xs:complexType name="Record">
               <xs:sequence><xs:element name="id" type="xs:string"/></xs:sequence>
             </xs:complexType>
           </xs:schema>"#,
    )
    .expect("schema loads");
    let config = Config {
        default_namespace: "http://example.org/default".to_owned(),
        ..Config::for_namespace("")
    };
    let mut ontology = Ontology::new();
    convert(&schema, &config, &mut ontology).expect("conversion succeeds");
    assert!(ontology
        .class("http://example.org/default#RecordType")
        .is_some());
    let id = ontology
        .property("http://example.org/default#hasId")
        .expect("property");
    assert_eq!(
        id.domains,
        vec!["http://example.org/default#RecordType".to_owned()]
    );
}

const SHAPES: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:s="http://example.org/shapes#"
           targetNamespace="http://example.org/shapes#">
  <xs:group name="Audit">
    <xs:sequence>
      <xs:element name="ModifiedBy" type="xs:string"/>
    </xs:sequence>
  </xs:group>

  <xs:complexType name="RecordType">
    <xs:sequence>
      <xs:element name="Identifier" type="xs:string"/>
      <xs:element name="Note" type="xs:string"/>
      <xs:group ref="s:Audit"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="Taxon">
    <xs:complexContent>
      <xs:extension base="s:RecordType">
        <xs:sequence>
          <xs:element name="Note" type="xs:string"/>
          <xs:element name="Described">
            <xs:simpleType>
              <xs:restriction base="xs:date">
                <xs:pattern value="\d{4}-.*"/>
              </xs:restriction>
            </xs:simpleType>
          </xs:element>
          <xs:element name="License">
            <xs:simpleType>
              <xs:restriction base="xs:anyURI">
                <xs:enumeration value=" http://creativecommons.org/licenses/by/4.0/ "/>
                <xs:enumeration value="http://creativecommons.org/publicdomain/zero/1.0/"/>
              </xs:restriction>
            </xs:simpleType>
          </xs:element>
        </xs:sequence>
      </xs:extension>
    </xs:complexContent>
  </xs:complexType>
</xs:schema>
"#;

fn shapes() -> (Ontology, ConversionReport) {
    let schema = Schema::parse_str(SHAPES).expect("shapes schema loads");
    let mut ontology = Ontology::new();
    let config = Config::for_namespace(SHAPES_NS);
    let report = convert(&schema, &config, &mut ontology).expect("conversion succeeds");
    (ontology, report)
}

const SHAPES_NS: &str = "http://example.org/shapes#";

#[test]
fn extension_of_named_type_is_subclass() {
    let (onto, _) = shapes();
    let taxon = onto.class(&format!("{SHAPES_NS}TaxonType")).expect("derived class");
    assert_eq!(taxon.subclass_of, vec![format!("{SHAPES_NS}RecordType")]);
    assert_eq!(taxon.label.as_deref(), Some("Taxon"));
}

#[test]
fn inherited_elements_keep_the_base_domain() {
    let (onto, _) = shapes();
    let id = onto.property(&format!("{SHAPES_NS}hasIdentifier")).expect("property");
    assert_eq!(id.domains, vec![format!("{SHAPES_NS}RecordType")]);
}

#[test]
fn group_reference_contributes_to_the_referencing_type() {
    let (onto, _) = shapes();
    let modified = onto.property(&format!("{SHAPES_NS}hasModifiedBy")).expect("property");
    assert!(modified.is(PropertyKind::Datatype));
    assert_eq!(modified.domains, vec![format!("{SHAPES_NS}RecordType")]);
}

#[test]
fn same_local_name_in_two_types_gets_no_domain() {
    let (onto, _) = shapes();
    let note = onto.property(&format!("{SHAPES_NS}hasNote")).expect("property");
    assert!(note.domains.is_empty());
}

#[test]
fn restriction_without_enumeration_uses_primitive_range() {
    let (onto, _) = shapes();
    let described = onto.property(&format!("{SHAPES_NS}hasDescribed")).expect("property");
    assert!(described.is(PropertyKind::Datatype));
    assert_eq!(described.ranges, vec![format!("{}date", iris::XSD)]);
    assert_eq!(described.domains, vec![format!("{SHAPES_NS}TaxonType")]);
}

#[test]
fn any_uri_enumeration_members_are_verbatim() {
    let (onto, report) = shapes();
    let class = onto
        .class(&format!("{SHAPES_NS}LicenseEnumType"))
        .expect("enum class");
    assert_eq!(
        class.one_of.as_deref(),
        Some(
            &[
                "http://creativecommons.org/licenses/by/4.0/".to_owned(),
                "http://creativecommons.org/publicdomain/zero/1.0/".to_owned(),
            ][..]
        )
    );
    assert_eq!(report.individuals, 0);
    assert!(onto.individuals().is_empty());
}

#[test]
fn any_uri_values_that_are_not_iris_are_rewritten() {
    let schema = Schema::parse_str(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                      targetNamespace="http://example.org/shapes#">
             <xs:element name="Link">
               <xs:simpleType>
                 <xs:restriction base="xs:anyURI">
                   <xs:enumeration value="http://example.org/a b"/>
                   <xs:enumeration value="http://example.org/&lt;x&gt;"/>
                   <xs:enumeration value="licenses/by"/>
                   <xs:enumeration value="urn:example:ok"/>
                 </xs:restriction>
               </xs:simpleType>
             </xs:element>
           </xs:schema>"#,
    )
    .expect("schema loads");
    let mut ontology = Ontology::new();
    let config = Config::for_namespace(SHAPES_NS);
    let report = convert(&schema, &config, &mut ontology).expect("conversion succeeds");

    let class_uri = format!("{SHAPES_NS}LinkEnumType");
    let class = ontology.class(&class_uri).expect("enum class");
    assert_eq!(
        class.one_of.as_deref(),
        Some(
            &[
                "http://example.org/a%20b".to_owned(),
                "http://example.org/%3Cx%3E".to_owned(),
                format!("{class_uri}_licenses_by"),
                "urn:example:ok".to_owned(),
            ][..]
        )
    );
    assert_eq!(report.warnings_of(WarningKind::InvalidIri).count(), 3);
    let relative = ontology
        .individual(&format!("{class_uri}_licenses_by"))
        .expect("fallback member");
    assert_eq!(relative.label.as_deref(), Some("licenses/by"));
    assert!(ontology
        .serialize(xsd2owl_ontology::Format::Turtle)
        .lines()
        .all(|line| !line.contains("a b>")));
}

/// Schema with one global type and a local `Scope` element, as written by
/// several independent schema files sharing a namespace.
fn scoped_type(type_name: &str) -> Schema {
    Schema::parse_str(&format!(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                      targetNamespace="http://example.org/plic/">
             <xs:complexType name="{type_name}">
               <xs:sequence><xs:element name="Scope" type="xs:string"/></xs:sequence>
             </xs:complexType>
           </xs:schema>"#
    ))
    .expect("schema loads")
}

#[test]
fn shared_usage_across_schemas_leaves_no_domain() {
    let schemas = [scoped_type("AType"), scoped_type("BType")];
    let config = Config::for_namespace(NS);
    let mut usage = UsageIndex::default();
    for schema in &schemas {
        usage.add_schema(schema, &Namer::new(schema, &config.default_namespace));
    }
    let mut ontology = Ontology::new();
    for schema in &schemas {
        let mut mapper = Mapper::with_usage(schema, &config, &mut ontology, &usage);
        mapper.convert().expect("conversion succeeds");
        assert!(mapper.finish().is_clean());
    }
    assert!(ontology.class(&uri("AType")).is_some());
    assert!(ontology.class(&uri("BType")).is_some());
    let scope = ontology.property(&uri("hasScope")).expect("property");
    assert!(scope.domains.is_empty());
}

#[test]
fn second_domain_from_another_schema_is_refused() {
    let schemas = [scoped_type("AType"), scoped_type("BType")];
    let config = Config::for_namespace(NS);
    let mut ontology = Ontology::new();
    let mut report = ConversionReport::default();
    for schema in &schemas {
        let run = convert(schema, &config, &mut ontology).expect("conversion succeeds");
        report.merge(run);
    }
    let scope = ontology.property(&uri("hasScope")).expect("property");
    assert_eq!(scope.domains, vec![uri("AType")]);
    let conflicts: Vec<_> = report.warnings_of(WarningKind::ConflictingDomain).collect();
    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].message.contains("BType"));
}

#[test]
fn failing_particle_is_recovered_and_siblings_are_mapped() {
    let mut schema = Schema::new(NS);
    let string = schema.builtin("string");
    let record = schema.add(
        Component::new(ComponentKind::ComplexType(ComplexType::empty()))
            .named("RecordType")
            .in_namespace(NS),
    );
    schema.add_global(record);
    let group = schema.add(
        Component::new(ComponentKind::Group(Group {
            compositor: Compositor::Sequence,
            particles: Vec::new(),
        }))
        .child_of(record),
    );
    let element = |global| {
        ComponentKind::Element(Element {
            type_: string,
            reference: None,
            global,
        })
    };
    let nameless = schema.add(
        Component::new(element(false))
            .in_namespace(NS)
            .child_of(group),
    );
    let id = schema.add(
        Component::new(element(false))
            .named("Id")
            .in_namespace(NS)
            .child_of(group),
    );
    schema.set_kind(
        group,
        ComponentKind::Group(Group {
            compositor: Compositor::Sequence,
            particles: vec![nameless, id],
        }),
    );
    schema.set_kind(
        record,
        ComponentKind::ComplexType(ComplexType {
            content: Content::Model(group),
            ..ComplexType::empty()
        }),
    );

    let mut ontology = Ontology::new();
    let report = convert(&schema, &Config::for_namespace(NS), &mut ontology)
        .expect("conversion succeeds");

    let has_id = ontology.property(&uri("hasId")).expect("sibling property");
    assert_eq!(has_id.domains, vec![uri("RecordType")]);
    let recovered: Vec<_> = report.warnings_of(WarningKind::Recovered).collect();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].component, nameless);
}
