use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Duplicate language profile `{0}`")]
    DuplicateLanguage(CompactString),
    #[error("Language profile `{language}` format error")]
    Format {
        language: CompactString,
        #[source]
        source: FormatError,
    },
    #[error("Need to register at least one language profile")]
    NeedProfile,
}

impl Error {
    /// Language identifier the error refers to, if any
    #[inline]
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::DuplicateLanguage(language) | Self::Format { language, .. } => {
                Some(language.as_str())
            }
            Self::NeedProfile => None,
        }
    }

    #[inline]
    pub(crate) fn format(language: impl Into<CompactString>, source: FormatError) -> Self {
        Self::Format {
            language: language.into(),
            source,
        }
    }
}

/// Inconsistent counts inside a single profile
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Empty ngram key")]
    EmptyNgram,
    #[error("Ngram `{ngram}` has no total for length {length}")]
    MissingLengthTotal { ngram: CompactString, length: usize },
    #[error("Total {total} for ngram length {length} must be positive")]
    NonPositiveLengthTotal { length: usize, total: i64 },
    #[error("Ngram `{ngram}` has negative count {count}")]
    NegativeCount { ngram: CompactString, count: i64 },
}
