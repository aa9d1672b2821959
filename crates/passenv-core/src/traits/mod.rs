// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams of the pipeline.
//!
//! Backends use `#[async_trait]` so they can be held as `&dyn SecretBackend`.

pub mod backend;

pub use backend::SecretBackend;
