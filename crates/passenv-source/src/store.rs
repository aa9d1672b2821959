// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-scan reference source.
//!
//! Reads entries only from the exact folder `<root>/<prefix>`. Subfolders are
//! never entered.

use std::path::{Component, Path, PathBuf};

use passenv_core::{PassenvError, ReferenceSet, SecretReference, env_name_from_entry};
use tracing::{debug, warn};

use crate::ReferenceSource;

/// Scans one store subfolder for encrypted entries.
#[derive(Debug, Clone)]
pub struct StoreScan {
    root: PathBuf,
    prefix: String,
    suffix: String,
}

impl StoreScan {
    pub fn new(
        root: impl Into<PathBuf>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Store entry names (relative to the root, suffix removed) directly under the prefix.
    ///
    /// Sorted lexicographically by file name with the suffix still attached,
    /// so `a-b.gpg` comes before `a.gpg`. Fails with [`PassenvError::NotFound`] when the
    /// prefix is missing or holds no entries.
    pub fn list_entries(&self) -> Result<Vec<String>, PassenvError> {
        let base = self.root.join(&self.prefix);
        if !base.is_dir() {
            return Err(PassenvError::NotFound(format!(
                "Prefix '{}' not found in password store at '{}'",
                self.prefix,
                base.display()
            )));
        }

        let read_dir = std::fs::read_dir(&base).map_err(|e| {
            PassenvError::NotFound(format!(
                "Prefix '{}' could not be read at '{}': {e}",
                self.prefix,
                base.display()
            ))
        })?;

        let relative_prefix = normalized_prefix(&self.prefix);
        let mut entries = Vec::new();

        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| {
                PassenvError::NotFound(format!("failed to list '{}': {e}", base.display()))
            })?;
            let file_name = dir_entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!(path = %dir_entry.path().display(), "skipping entry with non UTF-8 name");
                continue;
            };
            let Some(stem) = file_name.strip_suffix(self.suffix.as_str()) else {
                continue;
            };
            if !dir_entry.path().is_file() {
                continue;
            }
            if stem.is_empty() {
                warn!(path = %dir_entry.path().display(), "skipping entry with empty name");
                continue;
            }
            let entry = if relative_prefix.is_empty() {
                stem.to_string()
            } else {
                format!("{relative_prefix}/{stem}")
            };
            entries.push((file_name.to_string(), entry));
        }

        if entries.is_empty() {
            return Err(PassenvError::NotFound(format!(
                "No secrets found under prefix '{}' (no *{} files)",
                self.prefix, self.suffix
            )));
        }

        entries.sort();
        debug!(prefix = %self.prefix, count = entries.len(), "store entries listed");
        Ok(entries.into_iter().map(|(_, entry)| entry).collect())
    }
}

impl ReferenceSource for StoreScan {
    fn describe(&self) -> String {
        format!("prefix '{}' in {}", self.prefix, self.root.display())
    }

    fn load(&self) -> Result<ReferenceSet, PassenvError> {
        let mut set = ReferenceSet::new();
        for entry in self.list_entries()? {
            let variable_name = env_name_from_entry(&entry);
            let reference = SecretReference::new(variable_name.clone(), entry.clone());
            if let Some(previous) = set.insert(reference) {
                warn!(
                    variable = %variable_name,
                    replaced = %previous,
                    identifier = %entry,
                    "two entries map to the same variable; the later one wins"
                );
            }
        }
        Ok(set)
    }
}

/// `./secrets/` -> `secrets`, `work//api` -> `work/api`.
fn normalized_prefix(prefix: &str) -> String {
    Path::new(prefix)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
