//! Integration tests for Settings config loading
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use dndtree::application::ApplicationError;
use dndtree::config::{Settings, DEFAULT_ROW_HEIGHT};

/// Serializes tests that read or write `DNDTREE_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets an environment variable for the lifetime of the guard.
struct EnvVarGuard {
    key: &'static str,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &str) -> Self {
        std::env::set_var(key, value);
        Self { key }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.key);
    }
}

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.row_height, DEFAULT_ROW_HEIGHT);
    assert!(settings.show_ids);
    assert!(settings.expand_all);
}

#[test]
fn given_local_config_with_scalars_when_load_then_overrides_defaults() {
    // Arrange
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dndtree.toml"),
        r#"
row_height = 32.0
show_ids = false
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert: specified scalars replaced, the rest inherited
    assert_eq!(settings.row_height, 32.0);
    assert!(!settings.show_ids);
    assert!(settings.expand_all);
}

#[test]
fn given_default_file_with_tilde_when_load_then_expands_home() {
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dndtree.toml"),
        "default_file = \"~/trees/nodes.toml\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let file = settings.default_file.expect("default_file set");
    assert!(!file.to_string_lossy().starts_with('~'));
    assert!(file.ends_with("trees/nodes.toml"));
}

#[test]
fn given_non_positive_row_height_when_load_then_config_error() {
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".dndtree.toml"), "row_height = 0.0\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".dndtree.toml"), "row_height = \"tall\"\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_settings_when_serialized_then_roundtrips_through_toml() {
    let settings = Settings::default();

    let toml = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&toml).unwrap();

    assert_eq!(parsed, settings);
}

#[test]
fn given_template_when_parsed_then_is_valid_toml() {
    let parsed: Result<toml::Table, _> = toml::from_str(&Settings::template());
    assert!(parsed.is_ok());
}

#[test]
fn given_env_override_when_load_then_beats_local_config() {
    // Arrange
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dndtree.toml"),
        "row_height = 32.0\nshow_ids = false\n",
    )
    .unwrap();
    let _row_height = EnvVarGuard::set("DNDTREE_ROW_HEIGHT", "24.5");

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert: env wins for row_height, local file still applies elsewhere
    assert_eq!(settings.row_height, 24.5);
    assert!(!settings.show_ids);
}

#[test]
fn given_invalid_env_row_height_when_load_then_config_error() {
    let _lock = env_lock();
    let dir = TempDir::new().unwrap();
    let _row_height = EnvVarGuard::set("DNDTREE_ROW_HEIGHT", "-3");

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
