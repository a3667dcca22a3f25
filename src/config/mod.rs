//! Configuration module for metamodel.
//!
//! Handles model selection settings and environment variable expansion.

mod settings;

pub use settings::{
    definition_file_name, expand_env_vars, ModelSettings, Settings, SettingsError,
};
