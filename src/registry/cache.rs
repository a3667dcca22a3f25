//! Build-once cache for the shared model.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::{ModelRegistry, RegistryResult};
use crate::metadata::Model;

/// Holds the process-wide [`Model`], built at most once.
///
/// Concurrent first callers block until the first build finishes and then
/// observe the same instance. A failed build stores nothing, so the next
/// call tries again.
#[derive(Debug, Default)]
pub struct ModelCache {
    model: OnceCell<Arc<Model>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached model, building it through `registry` on first use.
    pub fn get_or_build(&self, registry: &ModelRegistry) -> RegistryResult<Arc<Model>> {
        self.model
            .get_or_try_init(|| match registry.build() {
                Ok(model) => {
                    tracing::info!(model = model.name(), "cached model");
                    Ok(Arc::new(model))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "model build failed, nothing cached");
                    Err(e)
                }
            })
            .cloned()
    }

    /// The cached model, if it has been built.
    pub fn get(&self) -> Option<Arc<Model>> {
        self.model.get().cloned()
    }

    pub fn is_built(&self) -> bool {
        self.model.get().is_some()
    }
}
