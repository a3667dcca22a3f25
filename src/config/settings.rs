//! TOML-based configuration for metamodel.
//!
//! Selects which model the registry builds and where its definition lives.
//!
//! Example configuration:
//! ```toml
//! [model]
//! name = "genomic"
//! definitions_dir = "${METAMODEL_HOME}/models"
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches `${VAR}` and `$VAR`.
static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}|\$([A-Za-z0-9_]+)").unwrap());

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Model selection.
    pub model: ModelSettings,
}

/// Which model to build and where its definitions are stored.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Name of the model (e.g. "genomic"). No model is configured when unset.
    pub name: Option<String>,

    /// Directory holding `<name>_model.json` files (supports ${ENV_VAR} expansion).
    pub definitions_dir: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: None,
            definitions_dir: "models".to_string(),
        }
    }
}

impl ModelSettings {
    /// The definitions directory with environment variables expanded.
    pub fn resolved_definitions_dir(&self) -> Result<PathBuf, SettingsError> {
        Ok(PathBuf::from(expand_env_vars(&self.definitions_dir)?))
    }

    /// The configured model name, if set and non-blank.
    pub fn model_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// File name of the definition for a model.
pub fn definition_file_name(model_name: &str) -> String {
    format!("{}_model.json", model_name)
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        if settings.model.definitions_dir.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "model.definitions_dir must not be empty".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `METAMODEL_CONFIG`
    /// 2. `./metamodel.toml`
    /// 3. `~/.config/metamodel/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("METAMODEL_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("metamodel.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("metamodel").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        tracing::debug!("no config file found, using default settings");
        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept as-is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut last = 0;

    for caps in ENV_VAR.captures_iter(s) {
        let Some(whole) = caps.get(0) else { continue };
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();

        let value =
            env::var(var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.to_string()))?;
        result.push_str(&s[last..whole.start()]);
        result.push_str(&value);
        last = whole.end();
    }
    result.push_str(&s[last..]);

    Ok(result)
}
