//! # Graph Assembly
//!
//! The forward half of the mapping engine: interpreting a [`RawTree`] into
//! a connected [`Investigation`] graph with resolved cross-references.
//!
//! The pipeline runs leaves-first. Node dictionaries classify each study's
//! and assay's nodes ([`nodes`]), the process linker resolves declared
//! input/output/protocol names against them ([`processes`]), the entity
//! builders turn metadata records into typed entities ([`builders`]), and
//! [`assemble`] composes the result top-down.
//!
//! Failure is atomic: any missing required field, inconsistent annotation
//! arity, or undeclared protocol aborts the whole conversion. A partially
//! built investigation is never returned. The one non-error special case is
//! a raw tree with no investigation metadata at all, which yields
//! `Ok(None)`: nothing to convert is not a validation problem.

pub mod annotations;
pub mod builders;
pub mod nodes;
pub mod processes;

#[cfg(test)]
mod tests;

use std::fmt;

use log::{debug, info};

use crate::model::{Assay, Investigation, Study};
use crate::tree::{RawAssay, RawStudy, RawTree, Record};

/// The metadata scope a record belongs to. Selects the header prefix shared
/// by investigation- and study-scoped sections, and attributes errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Investigation-level sections ("Investigation ..." headers)
    Investigation,
    /// Study-level sections ("Study ..." headers)
    Study,
    /// Assay records ("Study Assay ..." headers)
    Assay,
}

impl Scope {
    /// Header prefix for this scope.
    pub fn prefix(self) -> &'static str {
        match self {
            Scope::Investigation => "Investigation",
            Scope::Study => "Study",
            Scope::Assay => "Study Assay",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Investigation => write!(f, "investigation"),
            Scope::Study => write!(f, "study"),
            Scope::Assay => write!(f, "assay"),
        }
    }
}

/// Errors raised while assembling the entity graph.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// A required column header is absent from a metadata record
    #[error("missing required field '{field}' in {scope} metadata")]
    MissingField {
        /// Scope of the record the field was expected in
        scope: Scope,
        /// The absent column header
        field: String,
    },

    /// Parallel semicolon-delimited annotation columns disagree in length
    #[error(
        "annotation columns for '{field}' disagree in arity: \
         {names} names, {sources} term sources, {accessions} term accessions"
    )]
    InconsistentAnnotationArity {
        /// Base header of the annotation triple
        field: String,
        /// Token count of the name column
        names: usize,
        /// Token count of the term-source column
        sources: usize,
        /// Token count of the term-accession column
        accessions: usize,
    },

    /// A process declares a protocol the owning study does not
    #[error("process '{process}' executes undeclared protocol '{protocol}'")]
    UnknownProtocol {
        /// Name of the offending process node
        process: String,
        /// The declared protocol name that did not resolve
        protocol: String,
    },
}

/// Look up a required header in a record.
pub(crate) fn required<'a>(
    record: &'a Record,
    scope: Scope,
    header: &str,
) -> Result<&'a str, GraphError> {
    record
        .get(header)
        .map(String::as_str)
        .ok_or_else(|| GraphError::MissingField {
            scope,
            field: header.to_string(),
        })
}

/// Assemble a raw parse tree into an [`Investigation`].
///
/// Returns `Ok(None)` when the tree carries no investigation metadata
/// (nothing to convert). Any other shortfall is a [`GraphError`] and the
/// conversion fails as a whole.
pub fn assemble(tree: &RawTree) -> Result<Option<Investigation>, GraphError> {
    if tree.metadata.is_empty() {
        info!("raw tree carries no investigation metadata, nothing to convert");
        return Ok(None);
    }

    let scope = Scope::Investigation;
    let investigation = Investigation {
        identifier: required(&tree.metadata, scope, "Investigation Identifier")?.to_string(),
        title: required(&tree.metadata, scope, "Investigation Title")?.to_string(),
        description: required(&tree.metadata, scope, "Investigation Description")?.to_string(),
        submission_date: required(&tree.metadata, scope, "Investigation Submission Date")?
            .to_string(),
        public_release_date: required(
            &tree.metadata,
            scope,
            "Investigation Public Release Date",
        )?
        .to_string(),
        ontology_source_references: builders::ontology_source_references(&tree.ontology_refs)?,
        publications: builders::publications(&tree.publications, Scope::Investigation)?,
        contacts: builders::contacts(&tree.contacts, Scope::Investigation)?,
        studies: tree
            .studies
            .iter()
            .map(assemble_study)
            .collect::<Result<Vec<_>, _>>()?,
    };

    info!(
        "assembled investigation '{}' with {} studies",
        investigation.identifier,
        investigation.studies.len()
    );
    Ok(Some(investigation))
}

fn assemble_study(raw: &RawStudy) -> Result<Study, GraphError> {
    let scope = Scope::Study;
    let protocols = builders::protocols(&raw.protocols)?;
    let dicts = nodes::NodeDictionaries::classify(&raw.nodes);
    let process_sequence =
        processes::link_processes(&raw.process_nodes, &dicts, &protocols, None)?;

    let study = Study {
        identifier: required(&raw.metadata, scope, "Study Identifier")?.to_string(),
        title: required(&raw.metadata, scope, "Study Title")?.to_string(),
        description: required(&raw.metadata, scope, "Study Description")?.to_string(),
        submission_date: required(&raw.metadata, scope, "Study Submission Date")?.to_string(),
        public_release_date: required(&raw.metadata, scope, "Study Public Release Date")?
            .to_string(),
        design_descriptors: builders::design_descriptors(&raw.design_descriptors)?,
        publications: builders::publications(&raw.publications, Scope::Study)?,
        contacts: builders::contacts(&raw.contacts, Scope::Study)?,
        assays: raw
            .assays
            .iter()
            .map(|a| assemble_assay(a, &protocols))
            .collect::<Result<Vec<_>, _>>()?,
        protocols,
        sources: dicts.sources,
        samples: dicts.samples,
        data_files: dicts.data_files,
        process_sequence,
    };

    debug!(
        "assembled study '{}': {} sources, {} samples, {} processes, {} assays",
        study.identifier,
        study.sources.len(),
        study.samples.len(),
        study.process_sequence.len(),
        study.assays.len()
    );
    Ok(study)
}

fn assemble_assay(
    raw: &RawAssay,
    protocols: &[crate::model::Protocol],
) -> Result<Assay, GraphError> {
    let scope = Scope::Assay;
    let dicts = nodes::NodeDictionaries::classify(&raw.nodes);
    let process_sequence =
        processes::link_processes(&raw.process_nodes, &dicts, protocols, Some(&raw.metadata))?;

    Ok(Assay {
        file_name: required(&raw.metadata, scope, "Study Assay File Name")?.to_string(),
        measurement_type: annotations::annotation(
            &raw.metadata,
            scope,
            "Study Assay Measurement Type",
        )?,
        technology_type: annotations::annotation(
            &raw.metadata,
            scope,
            "Study Assay Technology Type",
        )?,
        technology_platform: required(&raw.metadata, scope, "Study Assay Technology Platform")?
            .to_string(),
        sources: dicts.sources,
        samples: dicts.samples,
        data_files: dicts.data_files,
        process_sequence,
    })
}
