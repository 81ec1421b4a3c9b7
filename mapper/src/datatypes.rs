//! Fixed table from XSD builtin names to RDF datatype IRIs.

use xsd2owl_ontology::iris::XSD;

/// Builtins with a datatype mapping, paired with the XSD local name they map to.
const BUILTINS: &[(&str, &str)] = &[
    ("string", "string"),
    ("boolean", "boolean"),
    ("decimal", "decimal"),
    ("float", "float"),
    ("double", "double"),
    ("duration", "duration"),
    ("dateTime", "dateTime"),
    ("time", "time"),
    ("date", "date"),
    ("gYearMonth", "gYearMonth"),
    ("gYear", "gYear"),
    ("gMonthDay", "gMonthDay"),
    ("gDay", "gDay"),
    ("gMonth", "gMonth"),
    ("hexBinary", "hexBinary"),
    ("base64Binary", "base64Binary"),
    ("anyURI", "anyURI"),
    ("integer", "int"),
    ("int", "int"),
    ("short", "short"),
    ("byte", "byte"),
    ("nonNegativeInteger", "nonNegativeInteger"),
    ("unsignedLong", "unsignedLong"),
    ("unsignedInt", "unsignedInt"),
    ("unsignedShort", "unsignedShort"),
    ("unsignedByte", "unsignedByte"),
    ("positiveInteger", "positiveInteger"),
];

/// RDF datatype IRI for an XSD builtin local name, if the table covers it.
///
/// ```
/// use xsd2owl_mapper::datatypes::rdf_datatype;
///
/// assert_eq!(rdf_datatype("integer").as_deref(), Some("http://www.w3.org/2001/XMLSchema#int"));
/// assert_eq!(rdf_datatype("language"), None);
/// ```
#[must_use]
pub fn rdf_datatype(builtin: &str) -> Option<String> {
    BUILTINS
        .iter()
        .find(|(name, _)| *name == builtin)
        .map(|(_, local)| format!("{XSD}{local}"))
}
