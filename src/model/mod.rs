//! # Entity Model
//!
//! The strongly-typed investigation graph produced by the forward mapping
//! and consumed by the serializer and the summary statistics.
//!
//! Containment follows the archive layout: an [`Investigation`] owns its
//! [`Study`] list, a study owns its [`Assay`] list, and each study or assay
//! owns its process sequence. Processes do not own the materials they
//! transform; they hold index references ([`MaterialRef`]) into the
//! source/sample dictionaries of their owning scope, so the same sample can
//! appear as the output of one step and the input of the next without
//! re-allocation.
//!
//! A sample declared both in a study table and in one of its assay tables is
//! represented by two distinct entity instances, one per scope. This mirrors
//! the archive, where the two tables are independent, and is intentional.
//!
//! The graph is built in one pass and immutable thereafter; all types
//! derive `Serialize`/`Deserialize` so a finished graph can be exported as
//! JSON.

mod investigation;
mod material;
mod ontology;
mod process;
mod study;

pub use investigation::{
    Contact, Investigation, Protocol, ProtocolParameter, Publication,
};
pub use material::{Characteristic, DataFile, FactorValue, Material, MaterialRef, Sample, Source};
pub use ontology::{OntologyAnnotation, OntologySourceReference};
pub use process::{ParameterValue, Process};
pub use study::{Assay, Study};
