// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable naming for store entries.

/// Convert a store entry to an environment variable name using only its base name.
///
/// `secrets/claude/JIRA_TOKEN` becomes `JIRA_TOKEN`; `secrets/db-password`
/// becomes `DB_PASSWORD`. The result only contains `[A-Z0-9_]`.
pub fn env_name_from_entry(entry: &str) -> String {
    let base = entry.rsplit('/').next().unwrap_or(entry);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Whether `name` can be set as an environment variable on the child.
pub fn is_settable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('=') && !name.contains('\0')
}
