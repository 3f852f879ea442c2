// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for sshm configuration loading.

use figment::Jail;
use sshm_config::diagnostic::ConfigError;
use sshm_config::{load_and_validate, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
log_level = "debug"
default_profile = "alice"

[storage]
database_path = "/tmp/sshm-test.db"
wal_mode = false

[vault]
kdf_memory_cost = 131072
kdf_iterations = 4
kdf_parallelism = 2

[launcher]
ssh_program = "/usr/bin/ssh"
sshpass_program = "/usr/local/bin/sshpass"
tmux_split = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.default_profile.as_deref(), Some("alice"));
    assert_eq!(config.storage.database_path, "/tmp/sshm-test.db");
    assert!(!config.storage.wal_mode);
    let kdf = config.vault.kdf_params();
    assert_eq!(kdf.memory_cost, 131072);
    assert_eq!(kdf.iterations, 4);
    assert_eq!(kdf.parallelism, 2);
    assert_eq!(config.launcher.ssh_program, "/usr/bin/ssh");
    assert!(!config.launcher.tmux_split);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.log_level, "warn");
    assert!(config.default_profile.is_none());
    assert!(config.storage.database_path.ends_with("sshm.db"));
    assert!(config.storage.wal_mode);
    assert_eq!(config.vault.kdf_memory_cost, 65536);
    assert_eq!(config.vault.kdf_iterations, 3);
    assert_eq!(config.vault.kdf_parallelism, 4);
    assert_eq!(config.launcher.ssh_program, "ssh");
    assert_eq!(config.launcher.sshpass_program, "sshpass");
    assert!(config.launcher.tmux_split);
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = r#"
[vault]
kdf_iteratons = 5
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
            if key == "kdf_iteratons" && suggestion.as_deref() == Some("kdf_iterations"))
    });
    assert!(found, "expected an UnknownKey with a suggestion, got: {errors:?}");
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown section should be rejected");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "logging")));
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[storage]
wal_mode = "sometimes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("wal_mode"))));
}

#[test]
fn validation_runs_after_parsing() {
    let toml = r#"
[vault]
kdf_iterations = 1
"#;

    let errors = load_and_validate_str(toml).expect_err("weak KDF should fail validation");
    assert!(matches!(
        &errors[0],
        ConfigError::Validation { message } if message.contains("kdf_iterations")
    ));
}

#[test]
fn env_overrides_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "sshm.toml",
            r#"
[storage]
database_path = "from-file.db"
"#,
        )?;
        jail.set_env("SSHM_STORAGE_DATABASE_PATH", "from-env.db");
        jail.set_env("SSHM_VAULT_KDF_ITERATIONS", "5");

        let config = load_and_validate(None).expect("config should load");
        assert_eq!(config.storage.database_path, "from-env.db");
        assert_eq!(config.vault.kdf_iterations, 5);
        Ok(())
    });
}

#[test]
fn master_password_variable_is_not_a_config_key() {
    Jail::expect_with(|jail| {
        jail.set_env("SSHM_MASTER_PASSWORD", "hunter2");
        let config = load_and_validate(None).expect("SSHM_MASTER_PASSWORD must be ignored");
        assert_eq!(config.log_level, "warn");
        Ok(())
    });
}

#[test]
fn explicit_path_is_used() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "default_profile = \"ops\"\n")?;
        let config = load_and_validate(Some(std::path::Path::new("custom.toml")))
            .expect("explicit config should load");
        assert_eq!(config.default_profile.as_deref(), Some("ops"));
        Ok(())
    });
}
