//! Linking of raw process nodes into an ordered process sequence.
//!
//! Declared input/output name lists are resolved against the owning scope's
//! [`NodeDictionaries`]; the emitted [`Process`] records carry resolved
//! index references, not names. Output order equals the raw declaration
//! order; nothing here iterates an unordered map.

use log::{debug, warn};

use crate::model::{MaterialRef, Process};
use crate::tree::{RawProcessNode, Record};

use super::nodes::NodeDictionaries;
use super::GraphError;

/// Assay metadata resolved for a process run.
///
/// Each of the three fields degrades to the empty string independently when
/// the owning assay's metadata lacks it (or when there is no owning assay,
/// as for study-level process sequences). Absence never aborts the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssayContext {
    /// "Study Assay Measurement Type", or empty
    pub measurement_type: String,

    /// "Study Assay Technology Platform", or empty
    pub technology_platform: String,

    /// "Study Assay Technology Type", or empty
    pub technology_type: String,
}

impl AssayContext {
    /// Resolve the context from an assay metadata record, field by field.
    pub fn from_metadata(metadata: Option<&Record>) -> Self {
        let lookup = |header: &str| {
            metadata
                .and_then(|m| m.get(header))
                .cloned()
                .unwrap_or_default()
        };
        Self {
            measurement_type: lookup("Study Assay Measurement Type"),
            technology_platform: lookup("Study Assay Technology Platform"),
            technology_type: lookup("Study Assay Technology Type"),
        }
    }
}

/// Link a collection of raw process nodes against the given dictionaries.
///
/// `protocols` is always the *study's* protocol list, also for assay-level
/// process sequences; protocols are declared at study scope only.
/// `assay_metadata` is present for assay-level runs and absent for
/// study-level runs.
pub fn link_processes(
    process_nodes: &[RawProcessNode],
    dicts: &NodeDictionaries,
    protocols: &[crate::model::Protocol],
    assay_metadata: Option<&Record>,
) -> Result<Vec<Process>, GraphError> {
    let context = AssayContext::from_metadata(assay_metadata);
    process_nodes
        .iter()
        .map(|node| link_process(node, dicts, protocols, &context))
        .collect()
}

fn link_process(
    node: &RawProcessNode,
    dicts: &NodeDictionaries,
    protocols: &[crate::model::Protocol],
    context: &AssayContext,
) -> Result<Process, GraphError> {
    debug!(
        "linking process '{}' (measurement type: '{}', platform: '{}', technology: '{}')",
        node.name, context.measurement_type, context.technology_platform, context.technology_type
    );

    let executes_protocol = match &node.protocol {
        None => None,
        Some(name) => Some(
            protocols
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| GraphError::UnknownProtocol {
                    process: node.name.clone(),
                    protocol: name.clone(),
                })?,
        ),
    };

    // A name present in both dictionaries contributes one entry from each;
    // the fan-out is intentional and not deduplicated.
    let mut inputs = Vec::new();
    for name in &node.inputs {
        if let Some(i) = dicts.source_ref(name) {
            inputs.push(MaterialRef::Source(i));
        }
        if let Some(i) = dicts.sample_ref(name) {
            inputs.push(MaterialRef::Sample(i));
        }
    }

    // Outputs resolve through the sample dictionary only; names landing on
    // sources or data files are excluded.
    let mut outputs = Vec::new();
    for name in &node.outputs {
        match dicts.sample_ref(name) {
            Some(i) => outputs.push(i),
            None => warn!(
                "process '{}' output '{}' is not a sample, excluding it",
                node.name, name
            ),
        }
    }

    Ok(Process {
        name: node.name.clone(),
        executes_protocol,
        parameter_values: Vec::new(),
        inputs,
        outputs,
    })
}
