// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for passenv.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level passenv configuration.
///
/// Every section is optional and defaults to the behaviour of a plain
/// `pass` installation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PassenvConfig {
    /// Password store location and directory-scan settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// External fetch command settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Profile lookup settings.
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Password store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store root. Falls back to `$PASSWORD_STORE_DIR`, then `~/.password-store`.
    #[serde(default)]
    pub dir: Option<String>,

    /// Subfolder scanned in directory-scan mode.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// File suffix of encrypted entries.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: default_prefix(),
            suffix: default_suffix(),
        }
    }
}

fn default_prefix() -> String {
    "secrets".to_string()
}

fn default_suffix() -> String {
    ".gpg".to_string()
}

/// Fetch command configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Command line invoked as `<command...> show <identifier>`.
    /// Split on whitespace, so `ssh vault pass` is valid.
    #[serde(default = "default_fetch_command")]
    pub command: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            command: default_fetch_command(),
        }
    }
}

fn default_fetch_command() -> String {
    "pass".to_string()
}

impl FetchConfig {
    /// The command line split into argv tokens.
    pub fn argv(&self) -> Vec<String> {
        split_command_line(&self.command)
    }
}

/// Split a command line on whitespace.
pub fn split_command_line(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

/// Profile lookup configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Directory holding named profiles. Defaults to `<config_dir>/passenv/profiles`.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for passenv's own targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl PassenvConfig {
    /// Resolve the password store root for this configuration and the current process.
    pub fn store_root(&self) -> PathBuf {
        resolve_store_root(
            self.store.dir.as_deref(),
            std::env::var_os("PASSWORD_STORE_DIR").map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    /// Resolve the named-profile directory.
    pub fn profile_dir(&self) -> PathBuf {
        resolve_profile_dir(self.profiles.dir.as_deref(), dirs::config_dir(), dirs::home_dir())
    }
}

/// Store root: configured dir, else `$PASSWORD_STORE_DIR`, else `~/.password-store`.
pub fn resolve_store_root(
    configured: Option<&str>,
    password_store_dir: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = configured {
        return expand_home(dir, home.as_deref());
    }
    if let Some(dir) = password_store_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    home.unwrap_or_default().join(".password-store")
}

/// Profile dir: configured dir, else `<config_dir>/passenv/profiles`.
pub fn resolve_profile_dir(
    configured: Option<&str>,
    config_dir: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    match configured {
        Some(dir) => expand_home(dir, home.as_deref()),
        None => config_dir.unwrap_or_default().join("passenv/profiles"),
    }
}

/// Expand a leading `~` or `~/` against `home`. Other paths are returned as-is.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
