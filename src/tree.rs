//! # Raw Parse Tree
//!
//! The already-tokenized intermediate structure the forward mapping
//! consumes. Low-level ISA-Tab tokenizing is an external collaborator; its
//! output crosses this boundary either as these types constructed directly
//! or as a JSON document deserialized with [`RawTree::from_json_reader`].
//!
//! Metadata records map column header to cell value. `BTreeMap` keeps
//! header iteration deterministic, which the characteristic scan relies on.
//! Node and process lists preserve table encounter order.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One metadata record: column header mapped to cell value.
pub type Record = BTreeMap<String, String>;

/// Errors reading a raw tree from its JSON form.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// I/O error reading the document
    #[error("failed to read raw tree: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid raw tree
    #[error("failed to parse raw tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named node of a study or assay table: a material, data file, or
/// anything else the tokenizer surfaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    /// Node name, the key shared across table columns
    pub name: String,

    /// Type tag, e.g. "Source Name", "Sample Name", "Raw Spectral Data File"
    pub node_type: String,

    /// Column header mapped to cell value for this node's row span
    #[serde(default)]
    pub metadata: Record,

    /// Declared input node names (unused for material nodes)
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Declared output node names (unused for material nodes)
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// A process node: one protocol application column span in a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProcessNode {
    /// Process node name
    pub name: String,

    /// Declared protocol name, when the table carries a Protocol REF column
    #[serde(default)]
    pub protocol: Option<String>,

    /// Names of the nodes this process consumes, in table order
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Names of the nodes this process produces, in table order
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// A parsed assay: its metadata record plus its own node graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAssay {
    /// Assay metadata from the investigation file's STUDY ASSAYS section
    #[serde(default)]
    pub metadata: Record,

    /// Nodes of the assay table, in encounter order
    #[serde(default)]
    pub nodes: Vec<RawNode>,

    /// Process nodes of the assay table, in encounter order
    #[serde(default)]
    pub process_nodes: Vec<RawProcessNode>,
}

/// A parsed study: metadata, entity records, node graph, and assays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStudy {
    /// Study metadata from the investigation file's STUDY section
    #[serde(default)]
    pub metadata: Record,

    /// STUDY DESIGN DESCRIPTORS records
    #[serde(default)]
    pub design_descriptors: Vec<Record>,

    /// STUDY PUBLICATIONS records
    #[serde(default)]
    pub publications: Vec<Record>,

    /// STUDY CONTACTS records
    #[serde(default)]
    pub contacts: Vec<Record>,

    /// STUDY PROTOCOLS records
    #[serde(default)]
    pub protocols: Vec<Record>,

    /// Nodes of the study table, in encounter order
    #[serde(default)]
    pub nodes: Vec<RawNode>,

    /// Process nodes of the study table, in encounter order
    #[serde(default)]
    pub process_nodes: Vec<RawProcessNode>,

    /// The study's assays, in declaration order
    #[serde(default)]
    pub assays: Vec<RawAssay>,
}

/// The root of the raw parse tree for one archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTree {
    /// INVESTIGATION section metadata. Empty means the archive carried
    /// nothing to convert; the assembler then yields no investigation.
    #[serde(default)]
    pub metadata: Record,

    /// ONTOLOGY SOURCE REFERENCE records
    #[serde(default)]
    pub ontology_refs: Vec<Record>,

    /// INVESTIGATION PUBLICATIONS records
    #[serde(default)]
    pub publications: Vec<Record>,

    /// INVESTIGATION CONTACTS records
    #[serde(default)]
    pub contacts: Vec<Record>,

    /// The parsed studies, in declaration order
    #[serde(default)]
    pub studies: Vec<RawStudy>,
}

impl RawTree {
    /// Deserialize a raw tree from a JSON reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, TreeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Deserialize a raw tree from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}
