use serde::{Deserialize, Serialize};

use super::investigation::{Contact, Protocol, Publication};
use super::material::{DataFile, Material, MaterialRef, Sample, Source};
use super::ontology::OntologyAnnotation;
use super::process::Process;

/// A measurement campaign within a study, with its own node dictionaries and
/// process sequence.
///
/// The source/sample/data dictionaries are rebuilt from the assay's own
/// table, independently of the owning study's dictionaries; process
/// references in [`Assay::process_sequence`] point into *these* lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assay {
    /// Assay table file name
    pub file_name: String,

    /// What the assay measures
    pub measurement_type: OntologyAnnotation,

    /// Technology used for the measurement
    pub technology_type: OntologyAnnotation,

    /// Instrument platform as free text
    pub technology_platform: String,

    /// Source nodes declared in the assay table, in declaration order
    pub sources: Vec<Source>,

    /// Sample nodes declared in the assay table, in declaration order
    pub samples: Vec<Sample>,

    /// Data file nodes declared in the assay table, in declaration order
    pub data_files: Vec<DataFile>,

    /// The assay's process steps, in table encounter order
    pub process_sequence: Vec<Process>,
}

impl Assay {
    /// Resolve a process input reference against this assay's dictionaries.
    pub fn resolve_input(&self, r: MaterialRef) -> Option<Material<'_>> {
        resolve(&self.sources, &self.samples, r)
    }

    /// Resolve a process output index against this assay's samples.
    pub fn resolve_output(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }
}

/// A research study with its own protocols, materials, and assays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    /// Study identifier
    pub identifier: String,

    /// Study title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Submission date as it appears in the archive
    pub submission_date: String,

    /// Public release date as it appears in the archive
    pub public_release_date: String,

    /// Design types, one per declared descriptor record
    pub design_descriptors: Vec<OntologyAnnotation>,

    /// Study-scoped publications, in declaration order
    pub publications: Vec<Publication>,

    /// Study-scoped contacts, in declaration order
    pub contacts: Vec<Contact>,

    /// Protocols this study's processes may execute
    pub protocols: Vec<Protocol>,

    /// Source nodes declared in the study table, in declaration order
    pub sources: Vec<Source>,

    /// Sample nodes declared in the study table, in declaration order
    pub samples: Vec<Sample>,

    /// Data file nodes declared in the study table, in declaration order
    pub data_files: Vec<DataFile>,

    /// The study's process steps, in table encounter order
    pub process_sequence: Vec<Process>,

    /// The assays this study contains
    pub assays: Vec<Assay>,
}

impl Study {
    /// Resolve a process input reference against this study's dictionaries.
    pub fn resolve_input(&self, r: MaterialRef) -> Option<Material<'_>> {
        resolve(&self.sources, &self.samples, r)
    }

    /// Resolve a process output index against this study's samples.
    pub fn resolve_output(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// The protocol a process executes, if it declares one.
    pub fn executed_protocol(&self, process: &Process) -> Option<&Protocol> {
        process
            .executes_protocol
            .and_then(|i| self.protocols.get(i))
    }
}

fn resolve<'a>(
    sources: &'a [Source],
    samples: &'a [Sample],
    r: MaterialRef,
) -> Option<Material<'a>> {
    match r {
        MaterialRef::Source(i) => sources.get(i).map(Material::Source),
        MaterialRef::Sample(i) => samples.get(i).map(Material::Sample),
    }
}
