// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile reference source.
//!
//! A profile is a YAML, JSON or TOML document with a top-level `envs` mapping
//! of variable names to store identifiers:
//!
//! ```yaml
//! envs:
//!   JIRA_TOKEN: work/jira/token
//!   GITHUB_TOKEN: personal/github
//! ```
//!
//! Keys are used exactly as written. The whole document is validated before
//! any secret is fetched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use passenv_config::model::expand_home;
use passenv_core::naming::is_settable_name;
use passenv_core::{PassenvError, ReferenceSet, SecretReference};
use tracing::{debug, warn};

use crate::ReferenceSource;
use crate::document::{DocumentFormat, Node};

/// Top-level key holding the variable mapping.
pub const ENVS_KEY: &str = "envs";

/// Extensions tried after the bare locator, in priority order.
pub const PROFILE_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "toml"];

/// A validated profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    /// File the profile was loaded from.
    pub path: PathBuf,
    /// Declared references in document order.
    pub envs: ReferenceSet,
}

/// Whether a locator names a file directly rather than a profile in the profile directory.
pub fn is_explicit_path(locator: &str) -> bool {
    locator.contains('/')
        || locator.contains(std::path::MAIN_SEPARATOR)
        || locator.starts_with('~')
        || locator.starts_with('.')
        || Path::new(locator).is_absolute()
}

/// Every path tried for `locator`, in order.
pub fn candidate_paths(locator: &str, profile_dir: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let base = if is_explicit_path(locator) {
        expand_home(locator, home)
    } else {
        profile_dir.join(locator)
    };

    let mut candidates = Vec::with_capacity(PROFILE_EXTENSIONS.len() + 1);
    candidates.push(base.clone());
    for ext in PROFILE_EXTENSIONS {
        let mut with_ext = OsString::from(base.as_os_str());
        with_ext.push(".");
        with_ext.push(ext);
        candidates.push(PathBuf::from(with_ext));
    }
    candidates
}

/// Resolve a locator to the first existing candidate file.
pub fn resolve_profile(
    locator: &str,
    profile_dir: &Path,
    home: Option<&Path>,
) -> Result<PathBuf, PassenvError> {
    let candidates = candidate_paths(locator, profile_dir, home);
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        debug!(locator, path = %found.display(), "profile resolved");
        return Ok(found.clone());
    }

    let tried = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(PassenvError::NotFound(format!(
        "Profile '{locator}' not found (tried: {tried})"
    )))
}

/// Read, parse and validate the profile at `path`.
pub fn load_profile(path: &Path) -> Result<ProfileConfig, PassenvError> {
    let display = path.display().to_string();
    let format = DocumentFormat::from_path(path).ok_or_else(|| PassenvError::Parse {
        path: display.clone(),
        message: format!(
            "unrecognized profile extension (expected one of: {})",
            PROFILE_EXTENSIONS.join(", ")
        ),
    })?;

    let text = std::fs::read_to_string(path).map_err(|e| PassenvError::Parse {
        path: display.clone(),
        message: format!("cannot read file: {e}"),
    })?;

    let document = format.parse(&text).map_err(|message| PassenvError::Parse {
        path: display.clone(),
        message: format!("invalid {format}: {message}"),
    })?;

    let envs = validate_profile(&document).map_err(|message| PassenvError::Validation {
        path: display,
        message,
    })?;

    Ok(ProfileConfig {
        path: path.to_path_buf(),
        envs,
    })
}

/// Check the document shape and extract the `envs` references.
pub fn validate_profile(document: &Node) -> Result<ReferenceSet, String> {
    if document.as_mapping().is_none() {
        return Err(format!("top level must be a mapping, found {}", document.kind()));
    }
    let envs = document
        .get(ENVS_KEY)
        .ok_or_else(|| format!("missing required key `{ENVS_KEY}`"))?;
    let entries = envs.as_mapping().ok_or_else(|| {
        format!(
            "`{ENVS_KEY}` must be a mapping of variable names to secret identifiers, found {}",
            envs.kind()
        )
    })?;

    let mut set = ReferenceSet::new();
    for (key, value) in entries {
        let name = key
            .as_str()
            .ok_or_else(|| format!("`{ENVS_KEY}` keys must be strings, found {}", key.kind()))?;
        if !is_settable_name(name) {
            return Err(format!(
                "`{ENVS_KEY}` key `{name}` is not a valid environment variable name"
            ));
        }
        let identifier = value.as_str().ok_or_else(|| {
            format!(
                "`{ENVS_KEY}.{name}` must be a string identifier, found {}",
                value.kind()
            )
        })?;
        if identifier.trim().is_empty() {
            return Err(format!("`{ENVS_KEY}.{name}` must not be empty"));
        }

        if let Some(previous) = set.insert(SecretReference::new(name, identifier)) {
            warn!(
                variable = name,
                replaced = %previous,
                identifier,
                "duplicate variable in profile; the later one wins"
            );
        }
    }
    Ok(set)
}

/// Profile strategy: locate, load and validate a profile.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    locator: String,
    profile_dir: PathBuf,
    home: Option<PathBuf>,
}

impl ProfileSource {
    pub fn new(
        locator: impl Into<String>,
        profile_dir: impl Into<PathBuf>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            locator: locator.into(),
            profile_dir: profile_dir.into(),
            home,
        }
    }
}

impl ReferenceSource for ProfileSource {
    fn describe(&self) -> String {
        format!("profile '{}'", self.locator)
    }

    fn load(&self) -> Result<ReferenceSet, PassenvError> {
        let path = resolve_profile(&self.locator, &self.profile_dir, self.home.as_deref())?;
        let profile = load_profile(&path)?;
        if profile.envs.is_empty() {
            warn!(path = %profile.path.display(), "profile declares no variables");
        }
        Ok(profile.envs)
    }
}
