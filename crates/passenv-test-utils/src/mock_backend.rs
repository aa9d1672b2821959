// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock secret backend for deterministic testing.
//!
//! `MockBackend` implements `SecretBackend` with pre-configured values and
//! failures, and records every identifier it was asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use passenv_core::{PassenvError, SecretBackend};
use secrecy::SecretString;

/// What the mock answers for one identifier.
#[derive(Debug, Clone)]
enum Answer {
    Value(String),
    Fail(String),
    Empty,
}

/// A secret backend that answers from an in-memory table.
///
/// Unknown identifiers fail the way `pass` does for a missing entry.
#[derive(Debug, Default)]
pub struct MockBackend {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock backend with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend pre-loaded with `(identifier, value)` pairs.
    pub fn with_secrets(pairs: &[(&str, &str)]) -> Self {
        let mut backend = Self::new();
        for (identifier, value) in pairs {
            backend = backend.secret(identifier, value);
        }
        backend
    }

    /// Answer `identifier` with `value`.
    pub fn secret(mut self, identifier: &str, value: &str) -> Self {
        self.answers
            .insert(identifier.to_string(), Answer::Value(value.to_string()));
        self
    }

    /// Fail `identifier` with `message`.
    pub fn failing(mut self, identifier: &str, message: &str) -> Self {
        self.answers
            .insert(identifier.to_string(), Answer::Fail(message.to_string()));
        self
    }

    /// Answer `identifier` with an empty secret.
    pub fn empty(mut self, identifier: &str) -> Self {
        self.answers.insert(identifier.to_string(), Answer::Empty);
        self
    }

    /// Identifiers requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl SecretBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, identifier: &str) -> Result<SecretString, PassenvError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(identifier.to_string());
        }
        match self.answers.get(identifier) {
            Some(Answer::Value(v)) => Ok(SecretString::from(v.clone())),
            Some(Answer::Fail(message)) => Err(PassenvError::Fetch {
                identifier: identifier.to_string(),
                message: message.clone(),
            }),
            Some(Answer::Empty) => Err(PassenvError::EmptySecret {
                identifier: identifier.to_string(),
            }),
            None => Err(PassenvError::Fetch {
                identifier: identifier.to_string(),
                message: format!("Error: {identifier} is not in the password store."),
            }),
        }
    }
}
