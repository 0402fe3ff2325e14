//! # External Validator Invocation
//!
//! Runs the black-box ISA-Tab validator executable against a source
//! directory and a configuration directory, and interprets its exit status.
//! The validator's own diagnostic output goes straight to the inherited
//! stdio streams; this crate never parses it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

/// Errors raised before or while launching the validator process.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The ISA-Tab source directory does not exist
    #[error("isatab directory does not exist: {0}")]
    MissingInputPath(PathBuf),

    /// The configuration directory does not exist
    #[error("configuration directory does not exist: {0}")]
    MissingConfigPath(PathBuf),

    /// The validator executable could not be launched
    #[error("failed to launch validator '{command}': {source}")]
    Launch {
        /// The command that failed to start
        command: String,
        /// The underlying launch error
        source: std::io::Error,
    },
}

/// Interpretation of the validator's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorOutcome {
    /// Exit code 0
    Passed,
    /// Positive exit code
    Failed(i32),
    /// Terminated without an exit code, carrying the signal number where
    /// the platform exposes it
    Signaled(Option<i32>),
}

impl ValidatorOutcome {
    /// Whether the validator accepted the archive.
    pub fn is_success(self) -> bool {
        matches!(self, ValidatorOutcome::Passed)
    }
}

impl fmt::Display for ValidatorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorOutcome::Passed => write!(f, "validation passed"),
            ValidatorOutcome::Failed(code) => write!(f, "validation failed with code {code}"),
            ValidatorOutcome::Signaled(Some(signal)) => {
                write!(f, "validator terminated by signal {signal}")
            }
            ValidatorOutcome::Signaled(None) => write!(f, "validator terminated by signal"),
        }
    }
}

/// Validate an ISA-Tab directory with the external validator executable.
///
/// Both directories are checked for existence before anything is launched.
/// The validator is invoked as `<validator> -c <config_dir> <isatab_dir>`.
pub fn validate(
    isatab_dir: &Path,
    config_dir: &Path,
    validator: &Path,
) -> Result<ValidatorOutcome, ValidatorError> {
    if !isatab_dir.exists() {
        return Err(ValidatorError::MissingInputPath(isatab_dir.to_path_buf()));
    }
    if !config_dir.exists() {
        return Err(ValidatorError::MissingConfigPath(config_dir.to_path_buf()));
    }

    info!("using source ISA-Tab folder: {}", isatab_dir.display());
    info!("ISA configuration folder: {}", config_dir.display());

    let status = Command::new(validator)
        .arg("-c")
        .arg(config_dir)
        .arg(isatab_dir)
        .status()
        .map_err(|source| ValidatorError::Launch {
            command: validator.display().to_string(),
            source,
        })?;

    let outcome = match status.code() {
        Some(0) => ValidatorOutcome::Passed,
        Some(code) => ValidatorOutcome::Failed(code),
        None => ValidatorOutcome::Signaled(signal_of(&status)),
    };
    info!("{outcome}");
    Ok(outcome)
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
