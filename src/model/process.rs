use serde::{Deserialize, Serialize};

use super::material::MaterialRef;

/// A parameter value recorded against a process.
///
/// Parameter-value resolution is not performed by this crate; see
/// [`Process::parameter_values`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Name of the protocol parameter
    pub category: String,

    /// The recorded value
    pub value: String,
}

/// One step of a process sequence, transforming input materials into output
/// samples under a protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process node name from the table
    pub name: String,

    /// Index into the owning study's protocol list, when the table declares
    /// a protocol for this step. A declared name that does not match any
    /// study protocol aborts the build; `None` means no declaration.
    pub executes_protocol: Option<usize>,

    /// Always empty in this crate
    pub parameter_values: Vec<ParameterValue>,

    /// Resolved inputs, in table order. A name found in both the source and
    /// sample dictionaries contributes one entry from each.
    pub inputs: Vec<MaterialRef>,

    /// Resolved outputs as indices into the owning scope's sample
    /// dictionary, in table order. Output names resolving to sources or
    /// data files are excluded.
    pub outputs: Vec<usize>,
}
