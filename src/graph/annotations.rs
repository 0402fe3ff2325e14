//! Reconstruction of ontology annotations from their tabular encoding.
//!
//! Repeated annotations are stored as three parallel semicolon-delimited
//! columns: `<base>`, `<base> Term Source REF`, and
//! `<base> Term Accession Number`. Position `i` across the three token
//! lists describes one annotation. Single (non-repeated) annotated fields
//! use the same three columns without splitting.

use crate::model::OntologyAnnotation;
use crate::tree::Record;

use super::{required, GraphError, Scope};

pub(crate) const TERM_SOURCE_SUFFIX: &str = " Term Source REF";
pub(crate) const TERM_ACCESSION_SUFFIX: &str = " Term Accession Number";

/// Build a single annotation from the triple of columns rooted at `base`.
pub fn annotation(
    record: &Record,
    scope: Scope,
    base: &str,
) -> Result<OntologyAnnotation, GraphError> {
    Ok(OntologyAnnotation {
        name: required(record, scope, base)?.to_string(),
        term_source: required(record, scope, &format!("{base}{TERM_SOURCE_SUFFIX}"))?.to_string(),
        term_accession: required(record, scope, &format!("{base}{TERM_ACCESSION_SUFFIX}"))?
            .to_string(),
    })
}

/// Build the ordered annotation list encoded by the semicolon-delimited
/// triple of columns rooted at `base`.
///
/// The three columns must tokenize to the same length; a disagreement is an
/// [`GraphError::InconsistentAnnotationArity`] and aborts the build.
pub fn annotation_list(
    record: &Record,
    scope: Scope,
    base: &str,
) -> Result<Vec<OntologyAnnotation>, GraphError> {
    let names: Vec<&str> = required(record, scope, base)?.split(';').collect();
    let sources: Vec<&str> = required(record, scope, &format!("{base}{TERM_SOURCE_SUFFIX}"))?
        .split(';')
        .collect();
    let accessions: Vec<&str> =
        required(record, scope, &format!("{base}{TERM_ACCESSION_SUFFIX}"))?
            .split(';')
            .collect();

    if names.len() != sources.len() || names.len() != accessions.len() {
        return Err(GraphError::InconsistentAnnotationArity {
            field: base.to_string(),
            names: names.len(),
            sources: sources.len(),
            accessions: accessions.len(),
        });
    }

    Ok(names
        .iter()
        .zip(sources.iter())
        .zip(accessions.iter())
        .map(|((name, source), accession)| OntologyAnnotation {
            name: name.to_string(),
            term_source: source.to_string(),
            term_accession: accession.to_string(),
        })
        .collect())
}

/// Flatten an annotation list back into its three semicolon-joined column
/// values, the exact inverse of [`annotation_list`].
pub fn join_annotations(annotations: &[OntologyAnnotation]) -> (String, String, String) {
    let names: Vec<&str> = annotations.iter().map(|a| a.name.as_str()).collect();
    let sources: Vec<&str> = annotations.iter().map(|a| a.term_source.as_str()).collect();
    let accessions: Vec<&str> = annotations.iter().map(|a| a.term_accession.as_str()).collect();
    (names.join(";"), sources.join(";"), accessions.join(";"))
}
