//! Error types for onoma.

use thiserror::Error;

/// Result type for onoma operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for onoma operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A tag sequence contains a value outside the active scheme's alphabet.
    ///
    /// Fatal for the sentence: it indicates a corrupt corpus or a
    /// codec/model scheme mismatch, so it is propagated rather than skipped.
    #[error("invalid tag: {0:?}")]
    InvalidTag(String),

    /// Spans handed to `encode` overlap each other.
    ///
    /// Precondition violation: overlap resolution must run before encoding.
    #[error("overlapping spans: [{a_start}, {a_end}) and [{b_start}, {b_end})")]
    OverlappingSpans {
        /// Start of the first offending span.
        a_start: usize,
        /// End of the first offending span.
        a_end: usize,
        /// Start of the second offending span.
        b_start: usize,
        /// End of the second offending span.
        b_end: usize,
    },

    /// A span handed to `encode` extends past the sentence.
    #[error("span [{start}, {end}) exceeds token count {token_count}")]
    SpanOutOfBounds {
        /// Start of the offending span.
        start: usize,
        /// End of the offending span.
        end: usize,
        /// Number of tokens in the sentence being encoded.
        token_count: usize,
    },

    /// The statistical tagger failed to produce a usable tag sequence.
    #[error("tagger error: {0}")]
    Tagger(String),

    /// Structural error in corpus input.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid annotator configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tagger error.
    pub fn tagger(msg: impl Into<String>) -> Self {
        Error::Tagger(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
