// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret backend trait: identifier in, one secret value out.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::PassenvError;

/// A source of secret values addressed by opaque identifiers.
///
/// The production backend shells out to `pass`; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Fetch the value for `identifier`.
    ///
    /// Returns [`PassenvError::Fetch`] when the backend fails and
    /// [`PassenvError::EmptySecret`] when it yields nothing usable.
    async fn fetch(&self, identifier: &str) -> Result<SecretString, PassenvError>;
}
