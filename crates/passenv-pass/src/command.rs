// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pass show` backend.
//!
//! Runs `<command...> show <identifier>` with stdin closed and both output
//! streams captured. Each fetch is a separate child process.

use std::process::Stdio;

use async_trait::async_trait;
use passenv_core::{PassenvError, SecretBackend};
use secrecy::SecretString;
use tracing::debug;

use crate::output::{failure_message, first_nonempty_line};

/// Default fetch program.
pub const DEFAULT_PROGRAM: &str = "pass";

/// Fetches secrets by running an external `pass`-compatible command.
#[derive(Debug, Clone)]
pub struct PassCommand {
    program: String,
    args: Vec<String>,
}

impl PassCommand {
    /// Build from a tokenized command line such as `["ssh", "vault", "pass"]`.
    ///
    /// An empty command line falls back to `pass`.
    pub fn new(argv: Vec<String>) -> Self {
        let mut argv = argv.into_iter();
        match argv.next() {
            Some(program) => Self {
                program,
                args: argv.collect(),
            },
            None => Self::default(),
        }
    }

    /// Full argv for fetching `identifier`.
    pub fn argv_for(&self, identifier: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push("show".to_string());
        argv.push(identifier.to_string());
        argv
    }
}

impl Default for PassCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: Vec::new(),
        }
    }
}

#[async_trait]
impl SecretBackend for PassCommand {
    fn name(&self) -> &str {
        &self.program
    }

    async fn fetch(&self, identifier: &str) -> Result<SecretString, PassenvError> {
        let argv = self.argv_for(identifier);
        let output = tokio::process::Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PassenvError::Fetch {
                identifier: identifier.to_string(),
                message: format!("failed to run `{}`: {e}", self.program),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                identifier,
                status = %output.status,
                "fetch command failed"
            );
            return Err(PassenvError::Fetch {
                identifier: identifier.to_string(),
                message: failure_message(&stderr, &stdout, &output.status.to_string()),
            });
        }

        match first_nonempty_line(&stdout) {
            Some(value) => {
                debug!(identifier, "secret fetched");
                Ok(SecretString::from(value.to_string()))
            }
            None => Err(PassenvError::EmptySecret {
                identifier: identifier.to_string(),
            }),
        }
    }
}
