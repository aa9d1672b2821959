// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret reference sources for passenv.
//!
//! A reference source decides which secrets to fetch and which variables they
//! populate. Two strategies exist:
//!
//! - [`StoreScan`]: every entry directly inside one store subfolder, named
//!   after the entry's upper-snake-cased base name.
//! - [`ProfileSource`]: the `envs` mapping of a YAML, JSON or TOML profile.

pub mod document;
pub mod profile;
pub mod store;

use passenv_core::{PassenvError, ReferenceSet};

pub use profile::{ProfileConfig, ProfileSource, load_profile, resolve_profile};
pub use store::StoreScan;

/// Produces the references for one run.
pub trait ReferenceSource {
    /// Human-readable description for log output.
    fn describe(&self) -> String;

    /// Produce the ordered reference set, or fail before any fetch happens.
    fn load(&self) -> Result<ReferenceSet, PassenvError>;
}
