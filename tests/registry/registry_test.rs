#[cfg(test)]
mod tests {
    use metamodel::config::Settings;
    use metamodel::{
        DefinitionSource, FileDefinitionSource, ModelCache, ModelDefinition, ModelError,
        ModelRegistry, RegistryError, RegistryResult,
    };
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
    }

    /// Serves a fixed definition and counts how often it is loaded.
    struct CountingSource {
        json: String,
        loads: Arc<AtomicUsize>,
        fail: Arc<AtomicBool>,
    }

    impl CountingSource {
        fn new(json: &str) -> Self {
            Self {
                json: json.to_string(),
                loads: Arc::new(AtomicUsize::new(0)),
                fail: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl DefinitionSource for CountingSource {
        fn load(&self, _model_name: &str) -> RegistryResult<ModelDefinition> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            // Widen the window for concurrent first access
            thread::sleep(Duration::from_millis(20));
            if self.fail.load(Ordering::SeqCst) {
                return ModelDefinition::from_json(
                    r#"{"name": "zoo", "classes": [{"name": "Dog", "extends": "Ghost"}]}"#,
                );
            }
            ModelDefinition::from_json(&self.json)
        }
    }

    const ZOO: &str = r#"{
        "name": "zoo",
        "classes": [
            {"name": "Animal"},
            {"name": "Dog", "extends": "Animal"},
            {"name": "Cat", "extends": "Animal"}
        ]
    }"#;

    #[test]
    fn test_registry_from_settings() {
        let toml = format!(
            "[model]\nname = \"genomic\"\ndefinitions_dir = \"{}\"\n",
            fixtures_dir().display()
        );
        let settings = Settings::from_toml(&toml).unwrap();
        let registry = ModelRegistry::from_settings(&settings).unwrap();

        assert_eq!(registry.model_name().unwrap(), "genomic");
        let model = registry.build().unwrap();
        assert_eq!(model.name(), "genomic");
        assert!(model.has_class("Gene"));
    }

    #[test]
    fn test_registry_propagates_model_error() {
        let registry = ModelRegistry::new("broken", FileDefinitionSource::new(fixtures_dir()));
        assert!(matches!(
            registry.build(),
            Err(RegistryError::Model(ModelError::UnresolvedSuperclass { .. }))
        ));
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let source = CountingSource::new(ZOO);
        let loads = Arc::clone(&source.loads);
        let registry = ModelRegistry::new("zoo", source);
        let cache = ModelCache::new();

        assert!(!cache.is_built());
        assert!(cache.get().is_none());

        let first = cache.get_or_build(&registry).unwrap();
        let second = cache.get_or_build(&registry).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_built());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cache_builds_once_under_concurrent_first_access() {
        let source = CountingSource::new(ZOO);
        let loads = Arc::clone(&source.loads);
        let registry = Arc::new(ModelRegistry::new("zoo", source));
        let cache = Arc::new(ModelCache::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_build(&registry).unwrap()
                })
            })
            .collect();

        let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        for model in &models[1..] {
            assert!(Arc::ptr_eq(&models[0], model));
        }
        let animal = models[0].class("Animal").unwrap();
        assert_eq!(animal.direct_subclasses().len(), 2);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let source = CountingSource::new(ZOO);
        let loads = Arc::clone(&source.loads);
        let fail = Arc::clone(&source.fail);
        let registry = ModelRegistry::new("zoo", source);
        let cache = ModelCache::new();

        fail.store(true, Ordering::SeqCst);
        let err = cache.get_or_build(&registry).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Model(ModelError::UnresolvedSuperclass { ref class, ref missing })
                if class == "Dog" && missing == "Ghost"
        ));
        assert!(!cache.is_built());

        fail.store(false, Ordering::SeqCst);
        let model = cache.get_or_build(&registry).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_independent_caches_do_not_share_models() {
        let registry = ModelRegistry::new("zoo", CountingSource::new(ZOO));
        let a = ModelCache::new();
        let b = ModelCache::new();

        let model_a = a.get_or_build(&registry).unwrap();
        let model_b = b.get_or_build(&registry).unwrap();
        assert!(!Arc::ptr_eq(&model_a, &model_b));
        assert_eq!(model_a.fingerprint(), model_b.fingerprint());
    }
}
