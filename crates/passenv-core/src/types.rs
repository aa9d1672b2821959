// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by reference sources, the composer and the launcher.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use secrecy::{ExposeSecret, SecretString};

/// One environment variable to populate from one secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    /// Environment variable name to set in the child.
    pub variable_name: String,
    /// Opaque identifier handed to the fetch command.
    pub identifier: String,
}

impl SecretReference {
    pub fn new(variable_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            identifier: identifier.into(),
        }
    }
}

/// Ordered references with unique variable names.
///
/// Inserting a name that is already present replaces its identifier in place:
/// the last value wins, the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    references: Vec<SecretReference>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reference, returning the identifier it replaced, if any.
    pub fn insert(&mut self, reference: SecretReference) -> Option<String> {
        match self
            .references
            .iter_mut()
            .find(|r| r.variable_name == reference.variable_name)
        {
            Some(existing) => Some(std::mem::replace(
                &mut existing.identifier,
                reference.identifier,
            )),
            None => {
                self.references.push(reference);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecretReference> {
        self.references.iter()
    }

    /// Variable names in set order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.references
            .iter()
            .map(|r| r.variable_name.as_str())
            .collect()
    }
}

impl FromIterator<SecretReference> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = SecretReference>>(iter: I) -> Self {
        let mut set = ReferenceSet::new();
        for reference in iter {
            set.insert(reference);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a SecretReference;
    type IntoIter = std::slice::Iter<'a, SecretReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.references.iter()
    }
}

/// Fetched secret values keyed by variable name, in fetch order.
///
/// Values are held as [`SecretString`] so `Debug` output stays redacted.
#[derive(Debug, Default)]
pub struct ResolvedEnv {
    entries: Vec<(String, SecretString)>,
}

impl ResolvedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any earlier value for the same name.
    pub fn insert(&mut self, variable_name: impl Into<String>, value: SecretString) {
        let variable_name = variable_name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == variable_name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((variable_name, value)),
        }
    }

    pub fn get(&self, variable_name: &str) -> Option<&SecretString> {
        self.entries
            .iter()
            .find(|(k, _)| k == variable_name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variable names sorted lexicographically, for display.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|(k, _)| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SecretString)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Read-only copy of the parent process environment, taken once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        std::env::vars_os().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(OsStr::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(name)).map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Build the child environment: this snapshot overlaid with `additions`.
    ///
    /// The snapshot itself is left untouched.
    pub fn overlay(&self, additions: &ResolvedEnv) -> BTreeMap<OsString, OsString> {
        let mut env = self.vars.clone();
        for (name, value) in additions.iter() {
            env.insert(
                OsString::from(name),
                OsString::from(value.expose_secret()),
            );
        }
        env
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
