//! Model registry and build-once cache.
//!
//! The registry resolves a configured model name to a definition and builds
//! the [`Model`]. The [`ModelCache`] holds the one shared instance and is
//! passed explicitly to whatever needs it, so tests can build independent
//! models without global state.
//!
//! # Lookup
//!
//! ```text
//! Settings.model.name = "genomic"
//!   -> DefinitionSource::load("genomic")      (file: <definitions_dir>/genomic_model.json)
//!   -> ModelDefinition::build()
//!   -> ModelCache (Arc<Model>, built once)
//! ```

mod cache;
mod definition;

pub use cache::ModelCache;
pub use definition::{ClassDefinition, FieldDefinition, ModelDefinition};

use std::path::PathBuf;

use crate::config::{definition_file_name, Settings, SettingsError};
use crate::metadata::{Model, ModelError};

/// Errors that can occur while resolving and building a configured model.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No model name configured (set model.name in metamodel.toml)")]
    NoModelConfigured,

    #[error("Model definition not found: {0}")]
    DefinitionNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Definition '{definition}' does not match configured model '{configured}'")]
    NameMismatch {
        configured: String,
        definition: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Source of serialized model definitions.
pub trait DefinitionSource: Send + Sync {
    /// Load the definition for a model name.
    fn load(&self, model_name: &str) -> RegistryResult<ModelDefinition>;
}

/// Reads `<dir>/<name>_model.json`.
#[derive(Debug, Clone)]
pub struct FileDefinitionSource {
    dir: PathBuf,
}

impl FileDefinitionSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the definition file for a model name.
    pub fn path_for(&self, model_name: &str) -> PathBuf {
        self.dir.join(definition_file_name(model_name))
    }
}

impl DefinitionSource for FileDefinitionSource {
    fn load(&self, model_name: &str) -> RegistryResult<ModelDefinition> {
        let path = self.path_for(model_name);
        tracing::debug!(model = model_name, path = %path.display(), "loading model definition");
        ModelDefinition::from_file(path)
    }
}

/// Resolves the configured model name to a built [`Model`].
pub struct ModelRegistry {
    model_name: Option<String>,
    source: Box<dyn DefinitionSource>,
}

impl ModelRegistry {
    pub fn new(model_name: impl Into<String>, source: impl DefinitionSource + 'static) -> Self {
        Self {
            model_name: Some(model_name.into()),
            source: Box::new(source),
        }
    }

    /// Registry backed by definition files, as configured in `settings`.
    pub fn from_settings(settings: &Settings) -> RegistryResult<Self> {
        let dir = settings.model.resolved_definitions_dir()?;
        Ok(Self {
            model_name: settings.model.model_name().map(str::to_string),
            source: Box::new(FileDefinitionSource::new(dir)),
        })
    }

    /// The configured model name.
    pub fn model_name(&self) -> RegistryResult<&str> {
        self.model_name
            .as_deref()
            .ok_or(RegistryError::NoModelConfigured)
    }

    /// Load the configured definition and build a fresh model.
    ///
    /// Every call builds a new instance; use [`ModelCache`] to share one.
    pub fn build(&self) -> RegistryResult<Model> {
        let model_name = self.model_name()?;
        let definition = self.source.load(model_name)?;
        if definition.name != model_name {
            return Err(RegistryError::NameMismatch {
                configured: model_name.to_string(),
                definition: definition.name,
            });
        }

        let model = definition.build()?;
        tracing::info!(
            model = model.name(),
            classes = model.len(),
            "built model from definition"
        );
        Ok(model)
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}
