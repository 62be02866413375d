//! # Language profile aggregation
//!
//! Builds the shared ngram probability table consumed by a language classifier.
//!
//! Each [`LanguageProfile`] holds ngram occurrence counts and the total count per
//! ngram length. [`ProfileRegistry`] turns them into one table, mapping every ngram
//! to a vector of probabilities with a slot per registered language.
//! A probability is `count / total_of_ngrams_with_the_same_length`.
//!
//! # Example
//! ```rust
//! use langram_profiles::{ClassifierFactory, LanguageProfile, ProfileRegistry};
//!
//! let mut registry = ProfileRegistry::new();
//! registry.register_batch([
//!     LanguageProfile::new("en", [0, 0, 100]).with_frequencies([("the", 100)]),
//!     LanguageProfile::new("fr", [0, 80]).with_frequencies([("le", 80)]),
//! ])?;
//!
//! let classifier = ClassifierFactory::create_with_alpha(&registry, 0.5)?;
//! let snapshot = classifier.snapshot();
//! assert_eq!(snapshot.languages(), &["en", "fr"]);
//! assert_eq!(snapshot.probabilities("the"), Some(&[1.0, 0.0][..]));
//! assert_eq!(snapshot.probabilities("le"), Some(&[0.0, 1.0][..]));
//! # Ok::<(), langram_profiles::Error>(())
//! ```
//!
//! Registration is `&mut self` and not synchronized. Use [`SharedRegistry`]
//! to load and build classifiers from different threads.

#[allow(unused_macros)]
macro_rules! ahashmap {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(ahashmap!(@single $rest)),*]));

    ($($key:expr => $value:expr,)+) => { ahashmap!($($key => $value),+) };
    ($($key:expr => $value:expr),*) => {
        {
            let _cap = ahashmap!(@count $($key),*);
            let mut _map = ::ahash::AHashMap::with_capacity(_cap);
            $(
                let _ = _map.insert($key, $value);
            )*
            _map.into()
        }
    };
}

mod classifier;
mod error;
mod profile;
mod registry;

pub use classifier::{Classifier, ClassifierConfig, ClassifierFactory, DEFAULT_ALPHA};
pub use error::{Error, FormatError, Result};
pub use profile::{LanguageProfile, ProfileNgrams};
pub use registry::{ProfileRegistry, ProfileSnapshot, SharedRegistry};
