//! Classification of a raw node graph into material and data dictionaries.
//!
//! Every node is routed by its type tag: `"Source Name"` nodes become
//! sources, `"Sample Name"` nodes become samples, and nodes whose tag ends
//! with `"Data File"` become data files. The three dictionaries are
//! pairwise disjoint; a node matching none of the tags appears in none of
//! them. Each dictionary preserves declaration order and keeps a
//! name-to-index lookup so the process linker can resolve references.

use std::collections::HashMap;

use crate::model::{Characteristic, DataFile, OntologyAnnotation, Sample, Source};
use crate::tree::RawNode;

use super::annotations::{TERM_ACCESSION_SUFFIX, TERM_SOURCE_SUFFIX};

const SOURCE_TAG: &str = "Source Name";
const SAMPLE_TAG: &str = "Sample Name";
const DATA_TAG_SUFFIX: &str = "Data File";
const CHARACTERISTICS_PREFIX: &str = "Characteristics[";

/// The source, sample, and data lookup tables derived from one node graph.
///
/// Rebuilt independently per study and per assay; references never cross
/// the owning scope.
#[derive(Debug, Default)]
pub struct NodeDictionaries {
    /// Sources in declaration order
    pub sources: Vec<Source>,

    /// Samples in declaration order
    pub samples: Vec<Sample>,

    /// Data files in declaration order
    pub data_files: Vec<DataFile>,

    source_index: HashMap<String, usize>,
    sample_index: HashMap<String, usize>,
    data_index: HashMap<String, usize>,
}

impl NodeDictionaries {
    /// Classify a node graph. A node re-declaring an existing name replaces
    /// the earlier entry in place, keeping its original position.
    pub fn classify(nodes: &[RawNode]) -> Self {
        let mut dicts = Self::default();
        for node in nodes {
            if node.node_type == SOURCE_TAG {
                let source = Source {
                    name: node.name.clone(),
                    characteristics: characteristics(node),
                };
                match dicts.source_index.get(&node.name) {
                    Some(&i) => dicts.sources[i] = source,
                    None => {
                        dicts.source_index.insert(node.name.clone(), dicts.sources.len());
                        dicts.sources.push(source);
                    }
                }
            } else if node.node_type == SAMPLE_TAG {
                let sample = Sample {
                    name: node.name.clone(),
                    characteristics: characteristics(node),
                    factor_values: Vec::new(),
                };
                match dicts.sample_index.get(&node.name) {
                    Some(&i) => dicts.samples[i] = sample,
                    None => {
                        dicts.sample_index.insert(node.name.clone(), dicts.samples.len());
                        dicts.samples.push(sample);
                    }
                }
            } else if node.node_type.ends_with(DATA_TAG_SUFFIX) {
                let data = DataFile {
                    name: node.name.clone(),
                    data_type: node.node_type.clone(),
                };
                match dicts.data_index.get(&node.name) {
                    Some(&i) => dicts.data_files[i] = data,
                    None => {
                        dicts.data_index.insert(node.name.clone(), dicts.data_files.len());
                        dicts.data_files.push(data);
                    }
                }
            }
            // Anything else is not a recognized node kind and is dropped.
        }
        dicts
    }

    /// Index of the source with this name, if any.
    pub fn source_ref(&self, name: &str) -> Option<usize> {
        self.source_index.get(name).copied()
    }

    /// Index of the sample with this name, if any.
    pub fn sample_ref(&self, name: &str) -> Option<usize> {
        self.sample_index.get(name).copied()
    }

    /// Index of the data file with this name, if any.
    pub fn data_ref(&self, name: &str) -> Option<usize> {
        self.data_index.get(name).copied()
    }
}

/// Derive a node's characteristic list from its `Characteristics[...]`
/// column headers.
///
/// The bracketed label names the category; paired
/// `Characteristics[X] Term Source REF` / `... Term Accession Number`
/// columns, when present, fill the category's ontology metadata.
fn characteristics(node: &RawNode) -> Vec<Characteristic> {
    node.metadata
        .keys()
        .filter(|header| header.starts_with(CHARACTERISTICS_PREFIX) && header.ends_with(']'))
        .map(|header| {
            let label = header
                .trim_start_matches(CHARACTERISTICS_PREFIX)
                .trim_end_matches(']');
            let lookup = |suffix: &str| {
                node.metadata
                    .get(&format!("{header}{suffix}"))
                    .cloned()
                    .unwrap_or_default()
            };
            Characteristic {
                category: OntologyAnnotation {
                    name: label.to_string(),
                    term_source: lookup(TERM_SOURCE_SUFFIX),
                    term_accession: lookup(TERM_ACCESSION_SUFFIX),
                },
            }
        })
        .collect()
}
