// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary password store for tests.
//!
//! Entry files are created empty; only their names matter to the directory
//! scan. The tree is removed when the fixture is dropped.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway store root plus helpers to populate it.
pub struct StoreFixture {
    dir: TempDir,
}

impl StoreFixture {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Store root path.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `<root>/<relative>`, including parent folders.
    pub fn file(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, b"")?;
        Ok(path)
    }

    /// Create `<root>/<relative>.gpg`.
    pub fn entry(&self, relative: &str) -> io::Result<PathBuf> {
        self.file(&format!("{relative}.gpg"))
    }

    /// Create an empty folder `<root>/<relative>`.
    pub fn folder(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a file with `contents`, e.g. a profile document.
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.file(relative)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
