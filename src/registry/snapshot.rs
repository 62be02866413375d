use super::{LanguageIndex, NgramProbabilities};
use ::std::sync::Arc;
use compact_str::CompactString;
use rustc_hash::FxHashMap;

type SnapshotNgrams = FxHashMap<CompactString, Box<[f64]>>;

#[derive(Debug)]
struct SnapshotInner {
    languages: Box<[CompactString]>,
    language_index: LanguageIndex,
    table: SnapshotNgrams,
}

/// Immutable view of a [`ProfileRegistry`](super::ProfileRegistry).
///
/// Every probability vector has exactly [`len`](Self::len) slots, slot `i`
/// belonging to `languages()[i]`. Clones share the same storage.
#[derive(Clone, Debug)]
pub struct ProfileSnapshot(Arc<SnapshotInner>);

impl ProfileSnapshot {
    pub(super) fn new(
        languages: &[CompactString],
        language_index: &LanguageIndex,
        table: &NgramProbabilities,
    ) -> Self {
        let languages_len = languages.len();
        let mut padded =
            SnapshotNgrams::with_capacity_and_hasher(table.len(), Default::default());
        for (ngram, probabilities) in table.iter() {
            debug_assert!(probabilities.len() <= languages_len);
            let mut v = Vec::with_capacity(languages_len);
            v.extend_from_slice(probabilities);
            v.resize(languages_len, 0.0);
            padded.insert(ngram.clone(), v.into_boxed_slice());
        }
        tracing::trace!(
            "Snapshot of {languages_len} languages, {} ngrams",
            padded.len()
        );

        Self(Arc::new(SnapshotInner {
            languages: languages.into(),
            language_index: language_index.clone(),
            table: padded,
        }))
    }

    /// Languages in index order
    #[inline]
    pub fn languages(&self) -> &[CompactString] {
        &self.0.languages
    }

    /// Count of languages, which is also the length of every probability vector
    #[inline]
    pub fn len(&self) -> usize {
        self.0.languages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.languages.is_empty()
    }

    #[inline]
    pub fn index_of(&self, language: &str) -> Option<usize> {
        self.0.language_index.get(language).copied()
    }

    /// Per language probabilities of `ngram`, [`None`] if no language observed it
    #[inline]
    pub fn probabilities(&self, ngram: &str) -> Option<&[f64]> {
        self.0.table.get(ngram).map(|p| p.as_ref())
    }

    /// [`None`] if the language is unknown
    pub fn probability(&self, ngram: &str, language: &str) -> Option<f64> {
        let index = self.index_of(language)?;
        Some(
            self.probabilities(ngram)
                .map(|p| p[index])
                .unwrap_or(0.0),
        )
    }

    #[inline]
    pub fn contains_ngram(&self, ngram: &str) -> bool {
        self.0.table.contains_key(ngram)
    }

    #[inline]
    pub fn ngram_count(&self) -> usize {
        self.0.table.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.0
            .table
            .iter()
            .map(|(ngram, probabilities)| (ngram.as_str(), probabilities.as_ref()))
    }
}
