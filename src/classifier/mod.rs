use crate::{
    error::Result,
    registry::{ProfileRegistry, ProfileSnapshot},
};
use compact_str::CompactString;

mod config;

pub use config::{ClassifierConfig, DEFAULT_ALPHA};

/// Snapshot and settings a classifier is constructed from.
///
/// Its vector indexes are bound to the registry languages at creation time.
#[derive(Clone, Debug)]
pub struct Classifier {
    snapshot: ProfileSnapshot,
    config: ClassifierConfig,
}

impl Classifier {
    #[inline]
    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    #[inline]
    pub fn alpha(&self) -> Option<f64> {
        self.config.alpha
    }

    #[inline]
    pub fn languages(&self) -> &[CompactString] {
        self.snapshot.languages()
    }

    #[inline]
    pub fn into_parts(self) -> (ProfileSnapshot, ClassifierConfig) {
        (self.snapshot, self.config)
    }
}

#[derive(Clone, Debug)]
pub struct ClassifierFactory<'r> {
    registry: &'r ProfileRegistry,
    config: ClassifierConfig,
}

impl<'r> ClassifierFactory<'r> {
    #[inline]
    pub fn new(registry: &'r ProfileRegistry) -> Self {
        Self {
            registry,
            config: ClassifierConfig::default(),
        }
    }

    /// Smoothing parameter, passed through as is
    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config = self.config.alpha(alpha);
        self
    }

    #[inline]
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Fails with [`Error::NeedProfile`](crate::Error::NeedProfile) if no language is registered
    #[inline]
    pub fn build(self) -> Result<Classifier> {
        let snapshot = self.registry.snapshot()?;
        Ok(Classifier {
            snapshot,
            config: self.config,
        })
    }

    #[inline]
    pub fn create(registry: &'r ProfileRegistry) -> Result<Classifier> {
        Self::new(registry).build()
    }

    #[inline]
    pub fn create_with_alpha(registry: &'r ProfileRegistry, alpha: f64) -> Result<Classifier> {
        Self::new(registry).alpha(alpha).build()
    }

    #[inline]
    pub fn create_with_config(
        registry: &'r ProfileRegistry,
        config: ClassifierConfig,
    ) -> Result<Classifier> {
        Self::new(registry).config(config).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, LanguageProfile};

    fn registry_en() -> ProfileRegistry {
        let mut registry = ProfileRegistry::new();
        registry
            .register(
                LanguageProfile::new("en", [10]).with_frequencies([("a", 1)]),
                1,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_create_need_profile() {
        let registry = ProfileRegistry::new();
        assert_eq!(
            ClassifierFactory::create(&registry).unwrap_err(),
            Error::NeedProfile
        );
        assert_eq!(
            ClassifierFactory::create_with_alpha(&registry, 0.5).unwrap_err(),
            Error::NeedProfile
        );
    }

    #[test]
    fn test_create() {
        let registry = registry_en();
        let classifier = ClassifierFactory::create(&registry).unwrap();
        assert_eq!(classifier.languages(), &["en"]);
        assert_eq!(classifier.alpha(), None);
    }

    #[test]
    fn test_create_with_alpha() {
        let registry = registry_en();
        let classifier = ClassifierFactory::create_with_alpha(&registry, 0.1).unwrap();
        assert_eq!(classifier.alpha(), Some(0.1));
        assert_eq!(classifier.config().alpha_or_default(), 0.1);
    }

    #[test]
    fn test_builder_config_then_alpha() {
        let registry = registry_en();
        let classifier = ClassifierFactory::new(&registry)
            .config(ClassifierConfig::with_alpha(0.9))
            .alpha(0.3)
            .build()
            .unwrap();
        let (snapshot, config) = classifier.into_parts();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(config.get_alpha(), Some(0.3));
    }
}
