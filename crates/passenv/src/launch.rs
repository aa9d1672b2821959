// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process launcher: command selection, dry-run output, and handing control
//! to the target command.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::{self, Write};

use passenv_core::{PassenvError, ResolvedEnv};
use tracing::debug;

/// Command run when neither trailing arguments nor `--cmd` are given.
pub const DEFAULT_COMMAND: &str = "env";

/// What the launcher does with the composed environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Print variable names and the command line, run nothing.
    DryRun,
    /// Run the command with the composed environment.
    Exec,
}

impl LaunchMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Exec }
    }
}

/// Pick the argv to run.
///
/// Trailing tokens win (a leading `--` is dropped), then the `--cmd` string as
/// a single program name, then [`DEFAULT_COMMAND`].
pub fn select_command(trailing: &[String], fallback: Option<&str>) -> Vec<String> {
    let trailing = match trailing.split_first() {
        Some((first, rest)) if first == "--" => rest,
        _ => trailing,
    };
    if !trailing.is_empty() {
        return trailing.to_vec();
    }
    match fallback.filter(|c| !c.is_empty()) {
        Some(cmd) => vec![cmd.to_string()],
        None => vec![DEFAULT_COMMAND.to_string()],
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c)
}

/// Quote one token for a POSIX shell.
pub fn shell_quote(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("''");
    }
    if token.chars().all(is_shell_safe) {
        return Cow::Borrowed(token);
    }
    Cow::Owned(format!("'{}'", token.replace('\'', r#"'"'"'"#)))
}

/// Join argv into a shell-quoted command line.
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|t| shell_quote(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the dry-run summary. Only variable names are printed.
pub fn write_dry_run<W: Write>(
    out: &mut W,
    additions: &ResolvedEnv,
    command: &[String],
) -> io::Result<()> {
    if additions.is_empty() {
        writeln!(out, "No variables to set.")?;
    } else {
        writeln!(out, "Would set variables (values hidden):")?;
        for name in additions.sorted_names() {
            writeln!(out, "  {name}")?;
        }
    }
    writeln!(out, "Command: {}", shell_join(command))
}

/// [`write_dry_run`] with write failures reported as [`PassenvError::Output`].
pub fn print_dry_run<W: Write>(
    out: &mut W,
    additions: &ResolvedEnv,
    command: &[String],
) -> Result<(), PassenvError> {
    write_dry_run(out, additions, command)
        .and_then(|()| out.flush())
        .map_err(|source| PassenvError::Output { source })
}

fn launch_error(program: &str, err: io::Error) -> PassenvError {
    if err.kind() == io::ErrorKind::NotFound {
        PassenvError::CommandNotFound {
            program: program.to_string(),
        }
    } else {
        PassenvError::Exec {
            program: program.to_string(),
            source: err,
        }
    }
}

/// Run `command` with exactly `env` as its environment.
///
/// On Unix the current process image is replaced and this only returns on
/// failure. Elsewhere the child is spawned with inherited stdio and its exit
/// code is returned.
pub fn exec_command(
    command: &[String],
    env: BTreeMap<OsString, OsString>,
) -> Result<i32, PassenvError> {
    let Some((program, args)) = command.split_first() else {
        return Err(PassenvError::CommandNotFound {
            program: String::new(),
        });
    };
    debug!(program = %program, args = args.len(), vars = env.len(), "launching command");

    let mut cmd = std::process::Command::new(program);
    cmd.args(args).env_clear().envs(env);
    hand_off(cmd, program)
}

#[cfg(unix)]
fn hand_off(mut cmd: std::process::Command, program: &str) -> Result<i32, PassenvError> {
    use std::os::unix::process::CommandExt;
    let err = cmd.exec();
    Err(launch_error(program, err))
}

#[cfg(not(unix))]
fn hand_off(mut cmd: std::process::Command, program: &str) -> Result<i32, PassenvError> {
    let status = cmd.status().map_err(|e| launch_error(program, e))?;
    Ok(status.code().unwrap_or(passenv_core::error::EXIT_FAILURE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn trailing_command_wins_and_separator_is_stripped() {
        assert_eq!(
            select_command(&argv(&["--", "deploy", "--env", "prod"]), Some("ignored")),
            argv(&["deploy", "--env", "prod"])
        );
        assert_eq!(
            select_command(&argv(&["make", "--", "x"]), None),
            argv(&["make", "--", "x"])
        );
    }

    #[test]
    fn fallback_is_a_single_token() {
        assert_eq!(select_command(&[], Some("my tool")), argv(&["my tool"]));
        assert_eq!(select_command(&argv(&["--"]), Some("make")), argv(&["make"]));
    }

    #[test]
    fn default_is_env() {
        assert_eq!(select_command(&[], None), argv(&["env"]));
        assert_eq!(select_command(&[], Some("")), argv(&["env"]));
    }

    #[test]
    fn quoting_matches_posix_rules() {
        assert_eq!(shell_quote("deploy"), "deploy");
        assert_eq!(shell_quote("--env=prod"), "--env=prod");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), r#"'it'"'"'s'"#);
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn dry_run_prints_sorted_names_and_command() {
        let mut additions = ResolvedEnv::new();
        additions.insert("ZED", SecretString::from("zvalue".to_string()));
        additions.insert("ALPHA", SecretString::from("avalue".to_string()));

        let mut out = Vec::new();
        write_dry_run(&mut out, &additions, &argv(&["deploy", "--env", "prod"])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Would set variables (values hidden):\n  ALPHA\n  ZED\nCommand: deploy --env prod\n"
        );
        assert!(!text.contains("zvalue"));
        assert!(!text.contains("avalue"));
    }

    #[test]
    fn dry_run_with_nothing_to_set() {
        let mut out = Vec::new();
        write_dry_run(&mut out, &ResolvedEnv::new(), &argv(&["env"])).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No variables to set.\nCommand: env\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_stdout_is_an_output_error() {
        let err =
            print_dry_run(&mut ClosedPipe, &ResolvedEnv::new(), &argv(&["env"])).unwrap_err();
        assert!(matches!(err, PassenvError::Output { .. }));
        assert!(err.to_string().starts_with("failed to write output"));
    }

    #[test]
    fn not_found_maps_to_command_not_found() {
        let err = launch_error("deploy", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.exit_code(), 127);
        let err = launch_error("deploy", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, PassenvError::Exec { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn launch_mode_from_flag() {
        assert_eq!(LaunchMode::from_dry_run(true), LaunchMode::DryRun);
        assert_eq!(LaunchMode::from_dry_run(false), LaunchMode::Exec);
    }
}
