use crate::error::FormatError;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub type ProfileNgrams = FxHashMap<CompactString, i64>;

/// Ngram length as counted by profile generators: chars outside the BMP take 2 units
#[inline]
pub(crate) fn ngram_len(ngram: &str) -> usize {
    ngram.encode_utf16().count()
}

/// Ngram occurrence counts of a single language.
///
/// `totals_by_length[n - 1]` is the total count of all ngrams of length `n`,
/// where length is measured in UTF-16 code units, the convention profiles are generated with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    name: CompactString,
    #[serde(rename = "freq", default)]
    frequencies: ProfileNgrams,
    #[serde(rename = "n_words", default)]
    totals_by_length: Vec<i64>,
}

impl LanguageProfile {
    #[inline]
    pub fn new(name: impl Into<CompactString>, totals_by_length: impl Into<Vec<i64>>) -> Self {
        Self {
            name: name.into(),
            frequencies: Default::default(),
            totals_by_length: totals_by_length.into(),
        }
    }

    #[inline]
    pub fn with_frequencies<K: Into<CompactString>>(
        mut self,
        frequencies: impl IntoIterator<Item = (K, i64)>,
    ) -> Self {
        for (ngram, count) in frequencies {
            self.add(ngram, count);
        }
        self
    }

    /// Adds `count` to the ngram, inserting it if absent
    #[inline]
    pub fn add(&mut self, ngram: impl Into<CompactString>, count: i64) {
        *self.frequencies.entry(ngram.into()).or_default() += count;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn frequencies(&self) -> &ProfileNgrams {
        &self.frequencies
    }

    #[inline]
    pub fn frequency(&self, ngram: &str) -> Option<i64> {
        self.frequencies.get(ngram).copied()
    }

    #[inline]
    pub fn totals_by_length(&self) -> &[i64] {
        &self.totals_by_length
    }

    /// Length (in UTF-16 code units) of the longest ngram, 0 if there are none
    pub fn max_key_len(&self) -> usize {
        self.frequencies
            .keys()
            .map(|ngram| ngram_len(ngram))
            .max()
            .unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    #[inline]
    pub(crate) fn into_name(self) -> CompactString {
        self.name
    }

    /// Probability of each ngram within ngrams of the same length:
    /// `count / totals_by_length[len - 1]`.
    ///
    /// Fails on the first inconsistent count, so a result never holds NaN or infinity.
    pub fn probabilities(&self) -> Result<Vec<(&CompactString, f64)>, FormatError> {
        let mut res = Vec::with_capacity(self.frequencies.len());
        for (ngram, &count) in self.frequencies.iter() {
            let length = ngram_len(ngram);
            if length == 0 {
                return Err(FormatError::EmptyNgram);
            }
            if count < 0 {
                return Err(FormatError::NegativeCount {
                    ngram: ngram.clone(),
                    count,
                });
            }
            let Some(&total) = self.totals_by_length.get(length - 1) else {
                return Err(FormatError::MissingLengthTotal {
                    ngram: ngram.clone(),
                    length,
                });
            };
            if total <= 0 {
                return Err(FormatError::NonPositiveLengthTotal { length, total });
            }

            res.push((ngram, count as f64 / total as f64));
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn probability_of(probabilities: &[(&CompactString, f64)], ngram: &str) -> f64 {
        probabilities
            .iter()
            .find(|(n, _)| n.as_str() == ngram)
            .map(|(_, p)| *p)
            .unwrap()
    }

    #[test]
    fn test_probabilities_length_stratified() {
        let profile = LanguageProfile::new("en", [100, 50]).with_frequencies([("a", 10), ("th", 5)]);
        let probabilities = profile.probabilities().unwrap();

        assert_eq!(probabilities.len(), 2);
        assert!(approx_eq!(f64, probability_of(&probabilities, "a"), 0.1, ulps = 2));
        assert!(approx_eq!(f64, probability_of(&probabilities, "th"), 0.1, ulps = 2));
    }

    #[test]
    fn test_key_length_not_in_bytes() {
        // "éa" is 3 bytes but 2 code units
        let profile = LanguageProfile::new("fr", [0, 4]).with_frequencies([("éa", 1)]);
        let probabilities = profile.probabilities().unwrap();
        assert!(approx_eq!(f64, probability_of(&probabilities, "éa"), 0.25, ulps = 2));
        assert_eq!(profile.max_key_len(), 2);
    }

    #[test]
    fn test_key_length_outside_bmp() {
        // U+1D49C is a surrogate pair, so "\u{1D49C}a" has length 3
        let profile =
            LanguageProfile::new("xx", [100, 10, 5]).with_frequencies([("\u{1D49C}a", 1)]);
        let probabilities = profile.probabilities().unwrap();
        assert!(approx_eq!(
            f64,
            probability_of(&probabilities, "\u{1D49C}a"),
            0.2,
            ulps = 2
        ));
        assert_eq!(profile.max_key_len(), 3);
    }

    #[test]
    fn test_zero_total() {
        let profile = LanguageProfile::new("en", [0, 0, 10]).with_frequencies([("ab", 1)]);
        assert_eq!(
            profile.probabilities(),
            Err(FormatError::NonPositiveLengthTotal {
                length: 2,
                total: 0
            })
        );
    }

    #[test]
    fn test_negative_total() {
        let profile = LanguageProfile::new("en", [-3]).with_frequencies([("a", 1)]);
        assert_eq!(
            profile.probabilities(),
            Err(FormatError::NonPositiveLengthTotal {
                length: 1,
                total: -3
            })
        );
    }

    #[test]
    fn test_unused_length_total_is_not_checked() {
        let profile = LanguageProfile::new("en", [0, 0, 4]).with_frequencies([("abc", 2)]);
        assert!(profile.probabilities().is_ok());
    }

    #[test]
    fn test_missing_total() {
        let profile = LanguageProfile::new("en", [10]).with_frequencies([("abc", 1)]);
        assert_eq!(
            profile.probabilities(),
            Err(FormatError::MissingLengthTotal {
                ngram: "abc".into(),
                length: 3
            })
        );
    }

    #[test]
    fn test_negative_count() {
        let profile = LanguageProfile::new("en", [10]).with_frequencies([("a", -1)]);
        assert_eq!(
            profile.probabilities(),
            Err(FormatError::NegativeCount {
                ngram: "a".into(),
                count: -1
            })
        );
    }

    #[test]
    fn test_empty_ngram() {
        let profile = LanguageProfile::new("en", [10]).with_frequencies([("", 1)]);
        assert_eq!(profile.probabilities(), Err(FormatError::EmptyNgram));
    }

    #[test]
    fn test_add_accumulates() {
        let mut profile = LanguageProfile::new("en", [10]);
        profile.add("a", 2);
        profile.add("a", 3);
        assert_eq!(profile.frequency("a"), Some(5));
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn test_deserialize() {
        let profile: LanguageProfile = serde_json::from_str(
            r#"{"freq":{"a":10,"th":5},"n_words":[100,50],"name":"en"}"#,
        )
        .unwrap();

        assert_eq!(profile.name(), "en");
        assert_eq!(profile.frequency("th"), Some(5));
        assert_eq!(profile.totals_by_length(), &[100, 50]);
    }
}
