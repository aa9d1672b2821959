// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the passenv configuration system.

use passenv_config::diagnostic::{ConfigError, render_line};
use passenv_config::model::PassenvConfig;
use passenv_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_passenv_config() {
    let toml = r#"
[store]
dir = "/srv/pass"
prefix = "work"
suffix = ".age"

[fetch]
command = "ssh vault pass"

[profiles]
dir = "/srv/profiles"

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.store.dir.as_deref(), Some("/srv/pass"));
    assert_eq!(config.store.prefix, "work");
    assert_eq!(config.store.suffix, ".age");
    assert_eq!(config.fetch.argv(), vec!["ssh", "vault", "pass"]);
    assert_eq!(config.profiles.dir.as_deref(), Some("/srv/profiles"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.store_root(), std::path::PathBuf::from("/srv/pass"));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert!(config.store.dir.is_none());
    assert_eq!(config.store.prefix, "secrets");
    assert_eq!(config.store.suffix, ".gpg");
    assert_eq!(config.fetch.command, "pass");
    assert!(config.profiles.dir.is_none());
    assert_eq!(config.logging.level, "warn");
}

/// Unknown field in [store] becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_in_store_suggests_correction() {
    let toml = r#"
[store]
prefx = "work"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { suggestion, .. } => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("prefix"));
    assert!(errors.iter().any(|e| render_line(e).contains("did you mean `prefix`")));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let result = toml::from_str::<PassenvConfig>("[vault]\nkey = 1\n");
    assert!(result.is_err());
}

/// Wrong value type is reported as a diagnostic rather than a panic.
#[test]
fn wrong_type_produces_diagnostic() {
    let toml = r#"
[fetch]
command = 42
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject integer command");
    assert!(!errors.is_empty());
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_)))
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_through_load() {
    let toml = r#"
[store]
prefix = "/absolute"
"#;

    let errors = load_and_validate_str(toml).expect_err("absolute prefix must be rejected");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("store.prefix"))
    ));
}

/// Explicit config paths must exist.
#[test]
fn missing_explicit_config_file_is_an_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/passenv.toml"))
        .expect_err("missing file should error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("/nonexistent/passenv.toml"));
}

/// Environment overrides beat file values for an explicit config path.
#[test]
fn env_override_beats_explicit_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("passenv.toml", "[fetch]\ncommand = \"gopass\"\n")?;
        jail.set_env("PASSENV_FETCH_COMMAND", "pass");

        let path = jail.directory().join("passenv.toml");
        let config = load_and_validate_path(&path).expect("config should load");
        assert_eq!(config.fetch.command, "pass");
        Ok(())
    });
}
