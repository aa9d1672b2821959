// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as relative store prefixes and non-empty fetch commands.

use std::path::{Component, Path};

use crate::diagnostic::ConfigError;
use crate::model::PassenvConfig;

/// Levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PassenvConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(message) = validate_prefix(&config.store.prefix) {
        errors.push(ConfigError::Validation {
            message: format!("store.{message}"),
        });
    }

    let suffix = &config.store.suffix;
    if !suffix.starts_with('.') || suffix.len() < 2 {
        errors.push(ConfigError::Validation {
            message: format!("store.suffix must look like `.gpg`, got `{suffix}`"),
        });
    }

    if config.fetch.argv().is_empty() {
        errors.push(ConfigError::Validation {
            message: "fetch.command must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that a store prefix names a subfolder inside the store.
///
/// The error message starts with `prefix` so callers can qualify it.
pub fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.trim().is_empty() {
        return Err("prefix must not be empty".to_string());
    }
    let path = Path::new(prefix);
    if path.is_absolute() {
        return Err(format!("prefix `{prefix}` must be relative to the store root"));
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(format!("prefix `{prefix}` must not leave the store root"));
    }
    Ok(())
}
