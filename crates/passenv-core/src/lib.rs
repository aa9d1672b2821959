// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for passenv.
//!
//! This crate provides the error type, the data model that flows between
//! reference sources, the composer and the launcher, and the
//! [`SecretBackend`] seam that fetchers implement.

pub mod compose;
pub mod error;
pub mod naming;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use compose::compose;
pub use error::PassenvError;
pub use naming::env_name_from_entry;
pub use traits::SecretBackend;
pub use types::{EnvSnapshot, ReferenceSet, ResolvedEnv, SecretReference};
