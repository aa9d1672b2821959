// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! passenv - run a command with environment variables populated from `pass`.
//!
//! This is the binary entry point: it parses flags, loads configuration,
//! resolves and fetches secrets, then dry-runs or execs the target command.

mod launch;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use passenv_config::PassenvConfig;
use passenv_config::diagnostic::{ConfigError, render_line};
use passenv_config::model::split_command_line;
use passenv_config::validation::validate_prefix;
use passenv_core::{EnvSnapshot, PassenvError, compose};
use passenv_pass::PassCommand;
use passenv_source::{ProfileSource, ReferenceSource, StoreScan};
use tracing::info;

use crate::launch::{LaunchMode, exec_command, print_dry_run, select_command};

/// Execute a command with environment variables from pass.
#[derive(Parser, Debug)]
#[command(name = "passenv", version, about, long_about = None)]
struct Cli {
    /// Store folder to read secrets from, non-recursive [default: secrets]
    #[arg(long, value_name = "DIR", conflicts_with = "profile")]
    prefix: Option<String>,

    /// Profile name or path mapping variable names to store entries
    #[arg(long, short = 'p', value_name = "PROFILE")]
    profile: Option<String>,

    /// Overwrite environment variables that are already set
    #[arg(long)]
    overwrite: bool,

    /// Print which variables would be set (no values) and the command
    #[arg(long)]
    dry_run: bool,

    /// Command to run if nothing is given after `--` [default: env]
    #[arg(long, value_name = "COMMAND")]
    cmd: Option<String>,

    /// Command line used to fetch secrets, e.g. "ssh vault pass" [default: pass]
    #[arg(long, value_name = "COMMAND")]
    pass_cmd: Option<String>,

    /// Password store root [default: $PASSWORD_STORE_DIR or ~/.password-store]
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Command and arguments to run (use `--` to separate)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

/// Where references come from for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceChoice {
    Store {
        root: PathBuf,
        prefix: String,
        suffix: String,
    },
    Profile {
        locator: String,
        profile_dir: PathBuf,
    },
}

impl SourceChoice {
    fn into_source(self) -> Box<dyn ReferenceSource> {
        match self {
            SourceChoice::Store {
                root,
                prefix,
                suffix,
            } => Box::new(StoreScan::new(root, prefix, suffix)),
            SourceChoice::Profile {
                locator,
                profile_dir,
            } => Box::new(ProfileSource::new(locator, profile_dir, dirs::home_dir())),
        }
    }
}

/// Everything a run needs, resolved from flags and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunPlan {
    source: SourceChoice,
    fetch_argv: Vec<String>,
    overwrite: bool,
    mode: LaunchMode,
    command: Vec<String>,
}

/// Combine flags with configuration. Flags win.
fn plan(cli: &Cli, config: &PassenvConfig) -> Result<RunPlan, PassenvError> {
    let source = match &cli.profile {
        Some(locator) => SourceChoice::Profile {
            locator: locator.clone(),
            profile_dir: config.profile_dir(),
        },
        None => {
            let prefix = cli
                .prefix
                .clone()
                .unwrap_or_else(|| config.store.prefix.clone());
            validate_prefix(&prefix).map_err(|m| PassenvError::Config(format!("--{m}")))?;
            SourceChoice::Store {
                root: cli.store_dir.clone().unwrap_or_else(|| config.store_root()),
                prefix,
                suffix: config.store.suffix.clone(),
            }
        }
    };

    let fetch_argv = match &cli.pass_cmd {
        Some(line) => {
            let argv = split_command_line(line);
            if argv.is_empty() {
                return Err(PassenvError::Config(
                    "--pass-cmd must not be empty".to_string(),
                ));
            }
            argv
        }
        None => config.fetch.argv(),
    };

    Ok(RunPlan {
        source,
        fetch_argv,
        overwrite: cli.overwrite,
        mode: LaunchMode::from_dry_run(cli.dry_run),
        command: select_command(&cli.command, cli.cmd.as_deref()),
    })
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passenv={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .init();
}

/// Resolve, fetch and launch. Returns the exit code on success paths that return.
async fn run(plan: RunPlan, snapshot: EnvSnapshot) -> Result<i32, PassenvError> {
    let source = plan.source.into_source();
    let references = source.load()?;
    info!(source = %source.describe(), references = references.len(), "references loaded");

    let backend = PassCommand::new(plan.fetch_argv);
    let additions = compose(&references, &snapshot, plan.overwrite, &backend).await?;

    match plan.mode {
        LaunchMode::DryRun => {
            print_dry_run(&mut std::io::stdout().lock(), &additions, &plan.command)?;
            Ok(0)
        }
        LaunchMode::Exec => exec_command(&plan.command, snapshot.overlay(&additions)),
    }
}

const ERROR_TAG: &str = "[ERROR]";

/// One stderr line for a fatal error. The tag is red on a terminal.
fn error_line(message: impl std::fmt::Display, colour: bool) -> String {
    if colour {
        use colored::Colorize;
        format!("{} {message}", ERROR_TAG.red().bold())
    } else {
        format!("{ERROR_TAG} {message}")
    }
}

fn report(message: impl std::fmt::Display) {
    eprintln!("{}", error_line(message, std::io::stderr().is_terminal()));
}

fn fail(err: &PassenvError) -> ! {
    report(err);
    std::process::exit(err.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => passenv_config::load_and_validate_path(path),
        None => passenv_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                report(render_line(error));
            }
            std::process::exit(passenv_core::error::EXIT_FAILURE);
        }
    };

    init_tracing(&config.logging.level);

    let plan = match plan(&cli, &config) {
        Ok(plan) => plan,
        Err(err) => fail(&err),
    };

    match run(plan, EnvSnapshot::from_process()).await {
        Ok(code) => std::process::exit(code),
        Err(err) => fail(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("passenv").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    fn config() -> PassenvConfig {
        let mut config = PassenvConfig::default();
        config.store.dir = Some("/store".to_string());
        config.profiles.dir = Some("/profiles".to_string());
        config
    }

    #[test]
    fn defaults_scan_secrets_and_run_env() {
        let plan = plan(&parse(&[]), &config()).unwrap();
        assert_eq!(
            plan.source,
            SourceChoice::Store {
                root: PathBuf::from("/store"),
                prefix: "secrets".to_string(),
                suffix: ".gpg".to_string(),
            }
        );
        assert_eq!(plan.fetch_argv, vec!["pass"]);
        assert!(!plan.overwrite);
        assert_eq!(plan.mode, LaunchMode::Exec);
        assert_eq!(plan.command, vec!["env"]);
    }

    #[test]
    fn trailing_command_after_separator() {
        let cli = parse(&["--dry-run", "--", "deploy", "--env", "prod"]);
        let plan = plan(&cli, &config()).unwrap();
        assert_eq!(plan.mode, LaunchMode::DryRun);
        assert_eq!(plan.command, vec!["deploy", "--env", "prod"]);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "--prefix",
            "work/api",
            "--store-dir",
            "/other",
            "--pass-cmd",
            "ssh vault pass",
            "--overwrite",
            "--cmd",
            "make",
        ]);
        let plan = plan(&cli, &config()).unwrap();
        assert_eq!(
            plan.source,
            SourceChoice::Store {
                root: PathBuf::from("/other"),
                prefix: "work/api".to_string(),
                suffix: ".gpg".to_string(),
            }
        );
        assert_eq!(plan.fetch_argv, vec!["ssh", "vault", "pass"]);
        assert!(plan.overwrite);
        assert_eq!(plan.command, vec!["make"]);
    }

    #[test]
    fn profile_mode_uses_profile_dir() {
        let plan = plan(&parse(&["--profile", "work"]), &config()).unwrap();
        assert_eq!(
            plan.source,
            SourceChoice::Profile {
                locator: "work".to_string(),
                profile_dir: PathBuf::from("/profiles"),
            }
        );
    }

    #[test]
    fn prefix_and_profile_conflict() {
        let result = Cli::try_parse_from(["passenv", "--prefix", "a", "--profile", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn escaping_prefix_flag_is_rejected() {
        let err = plan(&parse(&["--prefix", "../elsewhere"]), &config()).unwrap_err();
        assert!(matches!(err, PassenvError::Config(ref m) if m.starts_with("--prefix")));
    }

    #[test]
    fn config_and_runtime_errors_share_the_tag() {
        let config_err = ConfigError::MissingKey {
            key: "store.prefix".to_string(),
        };
        let runtime_err = PassenvError::NotFound("Prefix 'x' not found".to_string());

        assert_eq!(
            error_line(render_line(&config_err), false),
            format!("[ERROR] {}", render_line(&config_err))
        );
        assert_eq!(
            error_line(&runtime_err, false),
            "[ERROR] Prefix 'x' not found"
        );
    }

    #[test]
    fn blank_pass_cmd_is_rejected() {
        let err = plan(&parse(&["--pass-cmd", "  "]), &config()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
