// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `~/.config/passenv/passenv.toml` > `/etc/passenv/passenv.toml`
//! with environment variable overrides via the `PASSENV_` prefix. The working
//! directory is never consulted.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PassenvConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/passenv/passenv.toml";

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("passenv/passenv.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/passenv/passenv.toml` (system-wide)
/// 3. `~/.config/passenv/passenv.toml` (user config)
/// 4. `PASSENV_*` environment variables
pub fn load_config() -> Result<PassenvConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PassenvConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassenvConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PassenvConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassenvConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PassenvConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that only the first
/// underscore after the section name becomes a dot.
fn env_provider() -> Env {
    Env::prefixed("PASSENV_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PASSENV_FETCH_COMMAND -> "fetch_command"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("store_", "store.", 1)
            .replacen("fetch_", "fetch.", 1)
            .replacen("profiles_", "profiles.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
