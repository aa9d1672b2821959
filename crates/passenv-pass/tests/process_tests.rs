// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `PassCommand` against real child processes.
//!
//! The fetch command is `sh -c <script>`; the appended `show <identifier>`
//! arrive as `$0` and `$1` inside the script.

#![cfg(unix)]

use passenv_core::{PassenvError, SecretBackend};
use passenv_pass::PassCommand;
use secrecy::ExposeSecret;

fn sh(script: &str) -> PassCommand {
    PassCommand::new(vec!["sh".to_string(), "-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn first_nonempty_trimmed_line_is_the_value() {
    let backend = sh(r#"printf '\n  topsecret123  \n\n'"#);
    let value = backend.fetch("secrets/TOKEN").await.unwrap();
    assert_eq!(value.expose_secret(), "topsecret123");
}

#[tokio::test]
async fn show_and_identifier_are_passed_last() {
    let backend = sh(r#"printf '%s:%s\n' "$0" "$1""#);
    let value = backend.fetch("work/api key").await.unwrap();
    assert_eq!(value.expose_secret(), "show:work/api key");
}

#[tokio::test]
async fn stdin_is_not_inherited() {
    let backend = sh(r#"if read -r line; then echo "got:$line"; else echo closed; fi"#);
    let value = backend.fetch("x").await.unwrap();
    assert_eq!(value.expose_secret(), "closed");
}

#[tokio::test]
async fn nonzero_exit_reports_stderr() {
    let backend = sh(r#"echo "Error: $1 is not in the password store." >&2; exit 1"#);
    let err = backend.fetch("secrets/MISSING").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "pass show failed for 'secrets/MISSING': Error: secrets/MISSING is not in the password store."
    );
}

#[tokio::test]
async fn nonzero_exit_without_stderr_uses_stdout() {
    let backend = sh("echo '  only stdout  '; exit 3");
    let err = backend.fetch("id").await.unwrap_err();
    assert!(matches!(err, PassenvError::Fetch { ref message, .. } if message == "only stdout"));
}

#[tokio::test]
async fn silent_failure_reports_status() {
    let backend = sh("exit 4");
    let err = backend.fetch("id").await.unwrap_err();
    match err {
        PassenvError::Fetch { message, .. } => {
            assert!(message.starts_with("exited with"), "{message}");
            assert!(message.contains('4'), "{message}");
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_output_is_an_empty_secret() {
    let backend = sh(r#"printf '\n   \n'"#);
    let err = backend.fetch("secrets/BLANK").await.unwrap_err();
    assert!(matches!(err, PassenvError::EmptySecret { ref identifier } if identifier == "secrets/BLANK"));
    assert_eq!(err.to_string(), "Empty secret for 'secrets/BLANK'");
}
