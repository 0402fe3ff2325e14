use serde::{Deserialize, Serialize};

/// A controlled-vocabulary term with its source and accession.
///
/// `term_source` holds the *name* of an [`OntologySourceReference`] declared
/// at investigation scope (or a raw name when no declaration exists). It is
/// a weak reference: consumers resolve it by name via
/// [`Investigation::ontology_source`](crate::model::Investigation::ontology_source),
/// never by ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyAnnotation {
    /// Term label, e.g. "metabolite profiling"
    pub name: String,

    /// Name of the ontology the term comes from, e.g. "OBI"
    pub term_source: String,

    /// Accession of the term within its ontology
    pub term_accession: String,
}

impl OntologyAnnotation {
    /// Annotation with a bare label and no ontology metadata.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Declaration of an ontology used by the investigation.
///
/// Declared once, at investigation scope; everything else refers to it by
/// name through [`OntologyAnnotation::term_source`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologySourceReference {
    /// Ontology name, the key other entities reference
    pub name: String,

    /// Location of the ontology file
    pub file: String,

    /// Ontology version in use
    pub version: String,

    /// Free-text description
    pub description: String,
}
