// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for passenv.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! system and user file lookup, `PASSENV_*` environment variable overrides, and
//! single-line diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use passenv_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("store root: {}", config.store_root().display());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_line};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PassenvConfig;

/// Load configuration from the standard hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to diagnostics with typo suggestions
pub fn load_and_validate() -> Result<PassenvConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an explicit file (plus env vars) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PassenvConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file {} does not exist",
            path.display()
        ))]);
    }
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<PassenvConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

fn finish(
    loaded: Result<PassenvConfig, figment::Error>,
) -> Result<PassenvConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
