use serde::{Deserialize, Serialize};

use super::ontology::{OntologyAnnotation, OntologySourceReference};
use super::study::Study;

/// A publication attached to an investigation or a study.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// PubMed identifier
    pub pubmed_id: String,

    /// Digital object identifier
    pub doi: String,

    /// Author list as a single string
    pub author_list: String,

    /// Publication title
    pub title: String,

    /// Publication status, e.g. "published"
    pub status: OntologyAnnotation,
}

/// A person attached to an investigation or a study.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Family name
    pub last_name: String,

    /// Given name
    pub first_name: String,

    /// Middle initials
    pub mid_initials: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Fax number
    pub fax: String,

    /// Postal address
    pub address: String,

    /// Affiliated organisation
    pub affiliation: String,

    /// Roles held by this person. Empty unless explicitly filled
    /// downstream.
    pub roles: Vec<OntologyAnnotation>,
}

/// A parameter declared by a [`Protocol`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameter {
    /// Parameter name with its ontology metadata
    pub name: OntologyAnnotation,
}

/// An experimental protocol declared at study scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Protocol name, the key processes reference
    pub name: String,

    /// Kind of protocol, e.g. "extraction"
    pub protocol_type: OntologyAnnotation,

    /// Free-text description
    pub description: String,

    /// Protocol URI
    pub uri: String,

    /// Protocol version
    pub version: String,

    /// Declared parameters, in declaration order
    pub parameters: Vec<ProtocolParameter>,
}

/// Root of the entity graph: the top-level container for one or more
/// related studies. Exactly one per conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    /// Investigation identifier
    pub identifier: String,

    /// Investigation title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Submission date as it appears in the archive
    pub submission_date: String,

    /// Public release date as it appears in the archive
    pub public_release_date: String,

    /// Ontologies declared for the whole investigation
    pub ontology_source_references: Vec<OntologySourceReference>,

    /// Investigation-scoped publications, in declaration order
    pub publications: Vec<Publication>,

    /// Investigation-scoped contacts, in declaration order
    pub contacts: Vec<Contact>,

    /// The studies this investigation contains
    pub studies: Vec<Study>,
}

impl Investigation {
    /// Resolve an [`OntologyAnnotation::term_source`] name against the
    /// declared ontology source references.
    pub fn ontology_source(&self, name: &str) -> Option<&OntologySourceReference> {
        self.ontology_source_references
            .iter()
            .find(|osr| osr.name == name)
    }
}
