use crate::{
    error::{Error, Result},
    profile::LanguageProfile,
};
use ::core::ops::Range;
use ::std::sync::OnceLock;
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use rustc_hash::FxHashMap;

mod shared;
mod snapshot;

pub use shared::SharedRegistry;
pub use snapshot::ProfileSnapshot;

/// Vectors only grow, so a vector can be shorter than the languages list.
/// Missing trailing slots are zero probabilities.
pub(crate) type NgramProbabilities = FxHashMap<CompactString, Vec<f64>>;
pub(crate) type LanguageIndex = AHashMap<CompactString, usize>;

/// Profile validated and converted to probabilities, ready to be applied
struct PreparedProfile {
    name: CompactString,
    probabilities: Vec<(CompactString, f64)>,
}

impl PreparedProfile {
    fn new(profile: LanguageProfile) -> Result<Self> {
        let probabilities = profile.probabilities().map(|p| {
            p.into_iter()
                .map(|(ngram, prob)| (ngram.clone(), prob))
                .collect::<Vec<_>>()
        });

        match probabilities {
            Ok(probabilities) => Ok(Self {
                name: profile.into_name(),
                probabilities,
            }),
            Err(e) => {
                tracing::warn!("Language profile `{}` rejected: {e}", profile.name());
                Err(Error::format(profile.into_name(), e))
            }
        }
    }
}

/// Aggregates language profiles into one ngram probability table.
///
/// Every language gets a fixed index (registration order), which is its slot
/// in every probability vector.
#[derive(Clone, Debug, Default)]
pub struct ProfileRegistry {
    languages: Vec<CompactString>,
    language_index: LanguageIndex,
    table: NgramProbabilities,
    /// Built on first [`snapshot`](Self::snapshot), dropped by every mutation
    snapshot: OnceLock<ProfileSnapshot>,
}

impl ProfileRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn check_duplicate(&self, name: &str) -> Result<()> {
        if self.language_index.contains_key(name) {
            tracing::warn!("Language profile `{name}` is already registered");
            return Err(Error::DuplicateLanguage(name.into()));
        }
        Ok(())
    }

    /// Registers a language profile and returns its index.
    ///
    /// `expected_language_count` is the number of languages in the load batch,
    /// used only to presize new probability vectors.
    ///
    /// On error nothing is applied.
    pub fn register(
        &mut self,
        profile: LanguageProfile,
        expected_language_count: usize,
    ) -> Result<usize> {
        self.check_duplicate(profile.name())?;
        let prepared = PreparedProfile::new(profile)?;

        Ok(self.apply(prepared, expected_language_count))
    }

    /// Registers all profiles, or none of them if any is a duplicate or is malformed.
    ///
    /// Returns the range of assigned indexes.
    pub fn register_batch(
        &mut self,
        profiles: impl IntoIterator<Item = LanguageProfile>,
    ) -> Result<Range<usize>> {
        let profiles: Vec<LanguageProfile> = profiles.into_iter().collect();

        let mut names = AHashSet::with_capacity(profiles.len());
        for profile in profiles.iter() {
            self.check_duplicate(profile.name())?;
            if !names.insert(profile.name()) {
                tracing::warn!("Language profile `{}` is repeated in batch", profile.name());
                return Err(Error::DuplicateLanguage(profile.name().into()));
            }
        }
        drop(names);

        let prepared = Self::prepare_all(profiles)?;

        let start = self.languages.len();
        let expected_language_count = start + prepared.len();
        for p in prepared {
            self.apply(p, expected_language_count);
        }
        tracing::info!(
            "Registered {} language profiles, {} total",
            expected_language_count - start,
            self.languages.len()
        );

        Ok(start..self.languages.len())
    }

    /// Reports the first malformed profile in input order
    #[cfg(not(target_family = "wasm"))]
    fn prepare_all(profiles: Vec<LanguageProfile>) -> Result<Vec<PreparedProfile>> {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        let prepared: Vec<Result<PreparedProfile>> =
            profiles.into_par_iter().map(PreparedProfile::new).collect();
        prepared.into_iter().collect()
    }

    #[cfg(target_family = "wasm")]
    fn prepare_all(profiles: Vec<LanguageProfile>) -> Result<Vec<PreparedProfile>> {
        profiles.into_iter().map(PreparedProfile::new).collect()
    }

    fn apply(&mut self, prepared: PreparedProfile, expected_language_count: usize) -> usize {
        self.snapshot.take();
        let index = self.languages.len();
        let capacity = expected_language_count.max(index + 1);
        let ngrams_len = prepared.probabilities.len();

        for (ngram, probability) in prepared.probabilities {
            let probabilities = self
                .table
                .entry(ngram)
                .or_insert_with(|| Vec::with_capacity(capacity));
            if probabilities.len() <= index {
                probabilities.resize(index + 1, 0.0);
            }
            probabilities[index] = probability;
        }

        tracing::debug!(
            "Registered language profile `{}` at {index} with {ngrams_len} ngrams",
            prepared.name
        );
        self.language_index.insert(prepared.name.clone(), index);
        self.languages.push(prepared.name);

        index
    }

    /// Immutable copy of the current state with every vector padded to the languages count.
    ///
    /// The copy is built once per registry state; until the next registration
    /// every call returns a clone sharing the same storage.
    pub fn snapshot(&self) -> Result<ProfileSnapshot> {
        if self.languages.is_empty() {
            return Err(Error::NeedProfile);
        }

        Ok(self
            .snapshot
            .get_or_init(|| {
                ProfileSnapshot::new(&self.languages, &self.language_index, &self.table)
            })
            .clone())
    }

    /// Clears all registered languages and probabilities.
    ///
    /// Test setup only. Snapshots taken earlier are not affected,
    /// but their indexes will no longer match new registrations.
    #[cfg(any(test, feature = "test-util"))]
    #[doc(hidden)]
    pub fn reset(&mut self) {
        self.snapshot.take();
        self.languages.clear();
        self.language_index.clear();
        self.table.clear();
    }

    /// Registered languages in index order
    #[inline]
    pub fn languages(&self) -> &[CompactString] {
        &self.languages
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    #[inline]
    pub fn index_of(&self, language: &str) -> Option<usize> {
        self.language_index.get(language).copied()
    }

    #[inline]
    pub fn contains_language(&self, language: &str) -> bool {
        self.language_index.contains_key(language)
    }

    /// Count of distinct ngrams over all languages
    #[inline]
    pub fn ngram_count(&self) -> usize {
        self.table.len()
    }

    /// Probability of `ngram` in `language`, [`None`] if the language is not registered
    pub fn probability(&self, ngram: &str, language: &str) -> Option<f64> {
        let index = self.index_of(language)?;
        Some(
            self.table
                .get(ngram)
                .and_then(|probabilities| probabilities.get(index))
                .copied()
                .unwrap_or(0.0),
        )
    }
}
