use serde::{Deserialize, Serialize};

use super::ontology::OntologyAnnotation;

/// One `Characteristics[...]` column attached to a material node.
///
/// Only the category is captured here. When the node's table carries paired
/// `... Term Source REF` / `... Term Accession Number` columns for the same
/// bracketed label, the category annotation includes that ontology metadata;
/// otherwise the category is a bare label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    /// What is being characterised, e.g. "organism"
    pub category: OntologyAnnotation,
}

/// A factor value attached to a sample.
///
/// Factor-value resolution is not performed by this crate; the list exists
/// so downstream consumers filling it in have a stable shape to target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorValue {
    /// Name of the study factor
    pub factor_name: String,

    /// The value observed for this sample
    pub value: String,
}

/// A source material node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Node name, unique within its owning dictionary
    pub name: String,

    /// Characteristics declared on the node's table columns
    pub characteristics: Vec<Characteristic>,
}

/// A sample material node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Node name, unique within its owning dictionary
    pub name: String,

    /// Characteristics declared on the node's table columns
    pub characteristics: Vec<Characteristic>,

    /// Always empty in this crate; see [`FactorValue`]
    pub factor_values: Vec<FactorValue>,
}

/// A data file node. Built only for node type tags ending in `"Data File"`,
/// e.g. "Raw Spectral Data File".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    /// File name as it appears in the table
    pub name: String,

    /// The raw node-type tag
    pub data_type: String,
}

/// Index reference from a process into its owning scope's material
/// dictionaries.
///
/// `Source(i)` points at `sources[i]`, `Sample(i)` at `samples[i]` of the
/// study or assay that owns the process sequence. Identity is by index
/// within one scope; references never cross scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialRef {
    /// Index into the owning scope's source dictionary
    Source(usize),
    /// Index into the owning scope's sample dictionary
    Sample(usize),
}

/// A resolved view of a [`MaterialRef`], borrowed from the owning scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material<'a> {
    /// A resolved source node
    Source(&'a Source),
    /// A resolved sample node
    Sample(&'a Sample),
}

impl Material<'_> {
    /// Name of the underlying node.
    pub fn name(&self) -> &str {
        match self {
            Material::Source(s) => &s.name,
            Material::Sample(s) => &s.name,
        }
    }
}
