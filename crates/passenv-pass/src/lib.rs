// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret backend that shells out to `pass` (or any command speaking its
//! `show <identifier>` interface, optionally wrapped through another launcher
//! such as `ssh host pass`).

pub mod command;
pub mod output;

pub use command::PassCommand;
