//! # isatab - ISA-Tab Investigation Graph Mapping
//!
//! `isatab` converts between the sectioned, tab-delimited description of a
//! scientific investigation (ISA-Tab: studies, assays, materials,
//! processes) and a strongly-typed in-memory entity graph, and back.
//!
//! ## Key Features
//!
//! - **Bidirectional mapping**: a forward pass assembling a raw parsed
//!   table structure into a connected [`model::Investigation`] graph with
//!   resolved cross-references, and an inverse pass serializing the graph
//!   back into the sectioned tabular layout.
//!
//! - **Three encodings, one graph**: flat key/value metadata rows,
//!   semicolon-delimited parallel-array columns for repeated ontology
//!   annotations, and the implicit process graph encoded by shared node
//!   names are all reconciled into one referentially consistent graph.
//!
//! - **Atomic conversion**: the caller receives either a fully valid
//!   investigation or a single descriptive error. Partial graphs are never
//!   surfaced.
//!
//! - **MetaboLights retrieval**: study archives can be fetched straight
//!   from the public MetaboLights archive over HTTPS.
//!
//! ## Quick Start
//!
//! ```rust
//! use isatab::graph;
//! use isatab::tree::RawTree;
//! use isatab::writer::dump_investigation;
//!
//! let tree = RawTree::from_json_reader(std::io::Cursor::new(
//!     r#"{
//!         "metadata": {
//!             "Investigation Identifier": "INV1",
//!             "Investigation Title": "Example",
//!             "Investigation Description": "",
//!             "Investigation Submission Date": "",
//!             "Investigation Public Release Date": ""
//!         }
//!     }"#,
//! ))?;
//!
//! if let Some(investigation) = graph::assemble(&tree)? {
//!     let mut out = Vec::new();
//!     dump_investigation(&investigation, &mut out)?;
//!     assert!(String::from_utf8_lossy(&out).contains("INVESTIGATION"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tree`]: the raw parse tree boundary (input of the forward pass)
//! - [`model`]: the typed entity graph
//! - [`graph`]: annotation assembly, entity builders, node dictionaries,
//!   process linking, and the top-level graph assembler
//! - [`writer`]: the inverse transform to the sectioned tabular layout
//! - [`net`]: MetaboLights study retrieval
//! - [`summary`]: read-only statistics over a finished graph
//! - [`validator`]: external validator invocation
//!
//! Low-level ISA-Tab tokenizing is an external collaborator: the forward
//! pass consumes an already-parsed [`tree::RawTree`], which can also be
//! loaded from JSON.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod graph;
pub mod model;
pub mod net;
pub mod summary;
pub mod tree;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::graph::{assemble, GraphError, Scope};
    pub use crate::model::{
        Assay, Contact, Investigation, Material, MaterialRef, OntologyAnnotation,
        OntologySourceReference, Process, Protocol, Publication, Sample, Source, Study,
    };
    pub use crate::net::{FetchedStudy, MtblsClient, NetError};
    pub use crate::summary::{InvestigationSummary, StudySummary};
    pub use crate::tree::{RawAssay, RawNode, RawProcessNode, RawStudy, RawTree, TreeError};
    pub use crate::validator::{validate, ValidatorError, ValidatorOutcome};
    pub use crate::writer::{
        dump_investigation, dump_investigation_to_path, dump_section, Section, WriterError,
    };
}
