//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: synthesis error (bad dimensions)
//! - 11: I/O error (request read, PNG write)
//! - 12: input error (bad prompt, layout, density or JSON)
//! - 13: serialization error
//! - 14: generation failure (canvas rejected after rebuild)

use colorgrid_core::SynthesisError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A synthesis-level error other than I/O or generation failure.
    Synthesis(SynthesisError),
    /// An I/O error (request file, snapshot writing).
    Io(String),
    /// A user input error (bad prompt, unknown layout, bad JSON).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
    /// Neither the chosen layout nor the rebuild produced a valid canvas.
    Generation(SynthesisError),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Synthesis(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Generation(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Synthesis(e) | CliError::Generation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<SynthesisError> for CliError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::Io(msg) => CliError::Io(msg),
            SynthesisError::UnknownLayout(_)
            | SynthesisError::UnknownDensity(_)
            | SynthesisError::InvalidPrompt(_) => CliError::Input(e.to_string()),
            e @ SynthesisError::Generation(_) => CliError::Generation(e),
            other => CliError::Synthesis(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
