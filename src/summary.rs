//! # Summary Statistics
//!
//! Read-only statistics over a finished [`Investigation`] graph: entity
//! counts per study and per investigation, the set of characteristic
//! categories in play, and the assay files involved. Consumes the graph
//! without touching it; nothing here can fail.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Investigation, Study};

/// Summary of one study.
#[derive(Debug, Clone)]
pub struct StudySummary {
    /// Study identifier
    pub identifier: String,

    /// Study title
    pub title: String,

    /// Number of source nodes in the study table
    pub num_sources: usize,

    /// Number of sample nodes in the study table
    pub num_samples: usize,

    /// Number of process steps, study table plus all assay tables
    pub num_processes: usize,

    /// Number of data file nodes across the study's assay tables
    pub num_data_files: usize,

    /// Names of the study's protocols, in declaration order
    pub protocol_names: Vec<String>,

    /// Assay table file names, in declaration order
    pub assay_files: Vec<String>,

    /// Distinct characteristic categories over the study's and its assays'
    /// materials
    pub characteristic_categories: BTreeSet<String>,
}

impl StudySummary {
    /// Summarise one study.
    pub fn from_study(study: &Study) -> Self {
        let mut categories = BTreeSet::new();
        let mut collect = |sources: &[crate::model::Source], samples: &[crate::model::Sample]| {
            for c in sources.iter().flat_map(|s| s.characteristics.iter()) {
                categories.insert(c.category.name.clone());
            }
            for c in samples.iter().flat_map(|s| s.characteristics.iter()) {
                categories.insert(c.category.name.clone());
            }
        };
        collect(&study.sources, &study.samples);
        for assay in &study.assays {
            collect(&assay.sources, &assay.samples);
        }

        Self {
            identifier: study.identifier.clone(),
            title: study.title.clone(),
            num_sources: study.sources.len(),
            num_samples: study.samples.len(),
            num_processes: study.process_sequence.len()
                + study
                    .assays
                    .iter()
                    .map(|a| a.process_sequence.len())
                    .sum::<usize>(),
            num_data_files: study.data_files.len()
                + study.assays.iter().map(|a| a.data_files.len()).sum::<usize>(),
            protocol_names: study.protocols.iter().map(|p| p.name.clone()).collect(),
            assay_files: study.assays.iter().map(|a| a.file_name.clone()).collect(),
            characteristic_categories: categories,
        }
    }
}

/// Summary of a whole investigation.
#[derive(Debug, Clone)]
pub struct InvestigationSummary {
    /// Investigation identifier
    pub identifier: String,

    /// Number of studies
    pub num_studies: usize,

    /// Number of assays across all studies
    pub num_assays: usize,

    /// Number of ontology source references declared
    pub num_ontology_sources: usize,

    /// Per-study summaries, in declaration order
    pub studies: Vec<StudySummary>,
}

impl InvestigationSummary {
    /// Summarise an investigation.
    pub fn from_investigation(investigation: &Investigation) -> Self {
        Self {
            identifier: investigation.identifier.clone(),
            num_studies: investigation.studies.len(),
            num_assays: investigation.studies.iter().map(|s| s.assays.len()).sum(),
            num_ontology_sources: investigation.ontology_source_references.len(),
            studies: investigation
                .studies
                .iter()
                .map(StudySummary::from_study)
                .collect(),
        }
    }
}

impl fmt::Display for InvestigationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Investigation Summary")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Identifier: {}", self.identifier)?;
        writeln!(f, "Studies: {}", self.num_studies)?;
        writeln!(f, "Assays: {}", self.num_assays)?;
        writeln!(f, "Ontology sources: {}", self.num_ontology_sources)?;
        for study in &self.studies {
            writeln!(f)?;
            write!(f, "{study}")?;
        }
        Ok(())
    }
}

impl fmt::Display for StudySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Study: {} ({})", self.identifier, self.title)?;
        writeln!(f, "  Sources: {}", self.num_sources)?;
        writeln!(f, "  Samples: {}", self.num_samples)?;
        writeln!(f, "  Processes: {}", self.num_processes)?;
        writeln!(f, "  Data files: {}", self.num_data_files)?;
        if !self.protocol_names.is_empty() {
            writeln!(f, "  Protocols: {}", self.protocol_names.join(", "))?;
        }
        if !self.assay_files.is_empty() {
            writeln!(f, "  Assay files: {}", self.assay_files.join(", "))?;
        }
        if !self.characteristic_categories.is_empty() {
            let categories: Vec<&str> = self
                .characteristic_categories
                .iter()
                .map(String::as_str)
                .collect();
            writeln!(f, "  Characteristic categories: {}", categories.join(", "))?;
        }
        Ok(())
    }
}
