// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment composition: turn a [`ReferenceSet`] into fetched values.
//!
//! Fetches run one at a time in reference order. The first failure aborts the
//! whole composition and nothing fetched so far is returned.

use tracing::{debug, info};

use crate::error::PassenvError;
use crate::traits::SecretBackend;
use crate::types::{EnvSnapshot, ReferenceSet, ResolvedEnv};

/// Fetch every reference that should be set and return only the additions.
///
/// With `overwrite == false`, references whose variable already exists in
/// `existing` are skipped without calling the backend.
pub async fn compose(
    references: &ReferenceSet,
    existing: &EnvSnapshot,
    overwrite: bool,
    backend: &dyn SecretBackend,
) -> Result<ResolvedEnv, PassenvError> {
    let mut resolved = ResolvedEnv::new();
    let mut skipped = 0usize;

    for reference in references {
        if !overwrite && existing.contains(&reference.variable_name) {
            debug!(
                variable = %reference.variable_name,
                "already set, skipping fetch"
            );
            skipped += 1;
            continue;
        }

        debug!(
            variable = %reference.variable_name,
            identifier = %reference.identifier,
            backend = backend.name(),
            "fetching secret"
        );
        let value = backend.fetch(&reference.identifier).await?;
        resolved.insert(reference.variable_name.clone(), value);
    }

    info!(
        fetched = resolved.len(),
        skipped,
        total = references.len(),
        "environment composed"
    );
    Ok(resolved)
}
