//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dndtree/dndtree.toml`
//! 3. Local config: `<dir>/.dndtree.toml` (usually the working directory)
//! 4. Environment variables: `DNDTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Default row height used to lay out rows for drop resolution.
pub const DEFAULT_ROW_HEIGHT: f32 = 48.0;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_file: Option<PathBuf>,
    pub row_height: Option<f32>,
    pub show_ids: Option<bool>,
    pub expand_all: Option<bool>,
}

/// Unified configuration for dndtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Node file used when a command is given none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,
    /// Distance between consecutive rows when laying out visible rows
    pub row_height: f32,
    /// Prefix rendered labels with the node id
    pub show_ids: bool,
    /// Start with every node expanded
    pub expand_all: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_file: None,
            row_height: DEFAULT_ROW_HEIGHT,
            show_ids: true,
            expand_all: true,
        }
    }
}

/// Get the XDG config directory for dndtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dndtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dndtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".dndtree.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_file: overlay
                .default_file
                .clone()
                .or_else(|| self.default_file.clone()),
            row_height: overlay.row_height.unwrap_or(self.row_height),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            expand_all: overlay.expand_all.unwrap_or(self.expand_all),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(file) = &self.default_file {
            let expanded = expand_path(file.to_string_lossy().as_ref());
            self.default_file = Some(PathBuf::from(expanded));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ApplicationError::Config {
                message: format!("row_height must be positive, got {}", self.row_height),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.dndtree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/dndtree/dndtree.toml`
    /// 3. Local config: `<local_dir>/.dndtree.toml`
    /// 4. Environment variables: `DNDTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply DNDTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("DNDTREE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_file") {
            settings.default_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_float("row_height") {
            settings.row_height = val as f32;
        }
        if let Ok(val) = config.get_bool("show_ids") {
            settings.show_ids = val;
        }
        if let Ok(val) = config.get_bool("expand_all") {
            settings.expand_all = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dndtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dndtree/dndtree.toml
#   Local:  ./.dndtree.toml
#   Env:    DNDTREE_* environment variables

# Node file used when a command is given none
# default_file = "~/trees/nodes.toml"

# Distance between rows when laying out visible rows for drop resolution
# row_height = 48.0

# Prefix labels with the node id
# show_ids = true

# Start with every node expanded
# expand_all = true
"#
        .to_string()
    }
}
