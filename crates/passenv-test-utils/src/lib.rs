// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for passenv integration tests.
//!
//! Provides an in-memory secret backend and a temporary password store so
//! tests run without `pass`, `gpg` or a real store.
//!
//! # Components
//!
//! - [`MockBackend`] - secret backend answering from a table and recording calls
//! - [`StoreFixture`] - temporary password store directory tree

pub mod mock_backend;
pub mod store_fixture;

pub use mock_backend::MockBackend;
pub use store_fixture::StoreFixture;
