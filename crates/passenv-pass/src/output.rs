// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interpretation of the fetch command's captured output.

/// First line that is non-empty after trimming, trimmed.
pub fn first_nonempty_line(stdout: &str) -> Option<&str> {
    stdout.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Failure message for a non-zero exit: stderr, else stdout, else the status.
pub fn failure_message(stderr: &str, stdout: &str, status: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("exited with {status}")
}
