// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for passenv.
//!
//! Messages carry identifiers, variable names and paths. They never carry
//! secret values.

use thiserror::Error;

/// Exit code used when the target command cannot be located.
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Exit code used for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// The primary error type used across the resolution, fetch and launch pipeline.
#[derive(Debug, Error)]
pub enum PassenvError {
    /// A store prefix, store entry or profile could not be located.
    #[error("{0}")]
    NotFound(String),

    /// A profile parsed correctly but has the wrong shape.
    #[error("invalid profile {path}: {message}")]
    Validation { path: String, message: String },

    /// A profile could not be parsed, or its format is not recognized.
    #[error("failed to parse profile {path}: {message}")]
    Parse { path: String, message: String },

    /// The external fetch command failed for an identifier.
    #[error("pass show failed for '{identifier}': {message}")]
    Fetch { identifier: String, message: String },

    /// The fetch command succeeded but printed no usable line.
    #[error("Empty secret for '{identifier}'")]
    EmptySecret { identifier: String },

    /// The target executable does not exist on `PATH`.
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// Launching the target command failed for another reason.
    #[error("Failed to exec command: {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing passenv's own output failed, e.g. a closed pipe on stdout.
    #[error("failed to write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors surfaced outside the config crate's diagnostics.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PassenvError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound { .. } => EXIT_COMMAND_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}
