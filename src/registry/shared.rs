use super::{ProfileRegistry, ProfileSnapshot};
use crate::{
    classifier::{Classifier, ClassifierFactory},
    error::Result,
    profile::LanguageProfile,
};
use ::core::ops::Range;
use ::std::sync::Arc;
use parking_lot::RwLock;

/// [`ProfileRegistry`] behind a lock, for loading and building classifiers from different threads.
///
/// A load batch holds the write lock until it is fully applied,
/// so readers never see a partially registered batch.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry(Arc<RwLock<ProfileRegistry>>);

impl From<ProfileRegistry> for SharedRegistry {
    #[inline]
    fn from(registry: ProfileRegistry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }
}

impl SharedRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all profiles under a single write lock
    #[inline]
    pub fn load(
        &self,
        profiles: impl IntoIterator<Item = LanguageProfile>,
    ) -> Result<Range<usize>> {
        self.0.write().register_batch(profiles)
    }

    #[inline]
    pub fn register(
        &self,
        profile: LanguageProfile,
        expected_language_count: usize,
    ) -> Result<usize> {
        self.0.write().register(profile, expected_language_count)
    }

    #[inline]
    pub fn snapshot(&self) -> Result<ProfileSnapshot> {
        self.0.read().snapshot()
    }

    #[inline]
    pub fn create(&self) -> Result<Classifier> {
        ClassifierFactory::create(&self.0.read())
    }

    #[inline]
    pub fn create_with_alpha(&self, alpha: f64) -> Result<Classifier> {
        ClassifierFactory::create_with_alpha(&self.0.read(), alpha)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// See [`ProfileRegistry::reset`]
    #[cfg(any(test, feature = "test-util"))]
    #[doc(hidden)]
    #[inline]
    pub fn reset(&self) {
        self.0.write().reset();
    }
}
