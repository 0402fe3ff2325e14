//! Pure mapping functions from raw metadata records to typed entities.
//!
//! One builder per entity kind; no I/O, no side effects. Builders that
//! serve both the investigation and study scopes take a [`Scope`] that
//! selects the shared header prefix (both sections use suffixes like
//! `" Person Last Name"`). Every required header that is absent raises a
//! named [`GraphError::MissingField`].

use crate::model::{
    Contact, OntologyAnnotation, OntologySourceReference, Protocol, ProtocolParameter, Publication,
};
use crate::tree::Record;

use super::annotations::{annotation, annotation_list};
use super::{required, GraphError, Scope};

/// Build the investigation's ontology source reference list.
pub fn ontology_source_references(
    records: &[Record],
) -> Result<Vec<OntologySourceReference>, GraphError> {
    let scope = Scope::Investigation;
    records
        .iter()
        .map(|r| {
            Ok(OntologySourceReference {
                name: required(r, scope, "Term Source Name")?.to_string(),
                file: required(r, scope, "Term Source File")?.to_string(),
                version: required(r, scope, "Term Source Version")?.to_string(),
                description: required(r, scope, "Term Source Description")?.to_string(),
            })
        })
        .collect()
}

/// Build a publication list for the given scope, preserving record order.
pub fn publications(records: &[Record], scope: Scope) -> Result<Vec<Publication>, GraphError> {
    let prefix = scope.prefix();
    records
        .iter()
        .map(|r| {
            Ok(Publication {
                pubmed_id: required(r, scope, &format!("{prefix} PubMed ID"))?.to_string(),
                doi: required(r, scope, &format!("{prefix} Publication DOI"))?.to_string(),
                author_list: required(r, scope, &format!("{prefix} Publication Author List"))?
                    .to_string(),
                title: required(r, scope, &format!("{prefix} Publication Title"))?.to_string(),
                status: annotation(r, scope, &format!("{prefix} Publication Status"))?,
            })
        })
        .collect()
}

/// Build a contact list for the given scope, preserving record order.
///
/// Roles stay empty here; the archive's contact sections declare them as a
/// separate annotation triple that downstream consumers may attach.
pub fn contacts(records: &[Record], scope: Scope) -> Result<Vec<Contact>, GraphError> {
    let prefix = scope.prefix();
    records
        .iter()
        .map(|r| {
            Ok(Contact {
                last_name: required(r, scope, &format!("{prefix} Person Last Name"))?.to_string(),
                first_name: required(r, scope, &format!("{prefix} Person First Name"))?
                    .to_string(),
                mid_initials: required(r, scope, &format!("{prefix} Person Mid Initials"))?
                    .to_string(),
                email: required(r, scope, &format!("{prefix} Person Email"))?.to_string(),
                phone: required(r, scope, &format!("{prefix} Person Phone"))?.to_string(),
                fax: required(r, scope, &format!("{prefix} Person Fax"))?.to_string(),
                address: required(r, scope, &format!("{prefix} Person Address"))?.to_string(),
                affiliation: required(r, scope, &format!("{prefix} Person Affiliation"))?
                    .to_string(),
                roles: Vec::new(),
            })
        })
        .collect()
}

/// Build a study's protocol list, preserving record order.
pub fn protocols(records: &[Record]) -> Result<Vec<Protocol>, GraphError> {
    let scope = Scope::Study;
    records
        .iter()
        .map(|r| {
            Ok(Protocol {
                name: required(r, scope, "Study Protocol Name")?.to_string(),
                protocol_type: annotation(r, scope, "Study Protocol Type")?,
                description: required(r, scope, "Study Protocol Description")?.to_string(),
                uri: required(r, scope, "Study Protocol URI")?.to_string(),
                version: required(r, scope, "Study Protocol Version")?.to_string(),
                parameters: protocol_parameters(r)?,
            })
        })
        .collect()
}

fn protocol_parameters(record: &Record) -> Result<Vec<ProtocolParameter>, GraphError> {
    let annotations =
        annotation_list(record, Scope::Study, "Study Protocol Parameters Name")?;
    Ok(annotations
        .into_iter()
        .map(|name| ProtocolParameter { name })
        .collect())
}

/// Build a study's design descriptor list, one annotation per record.
pub fn design_descriptors(records: &[Record]) -> Result<Vec<OntologyAnnotation>, GraphError> {
    records
        .iter()
        .map(|r| annotation(r, Scope::Study, "Study Design Type"))
        .collect()
}
