//! The statistical source: a black-box sequence tagger behind a codec.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::codec::{SequenceCodec, TagScheme, OUTSIDE};
use crate::error::{Error, Result};
use crate::sources::NameFinder;
use crate::span::Span;

/// The narrow interface to a trained sequence-labelling model.
///
/// The model's training and decoding internals live elsewhere; this crate
/// only ever asks it for a raw per-token tag sequence and tells it when to
/// forget its adaptive data. Implementations must return exactly one tag
/// per input token, in the scheme the wrapping [`StatisticalFinder`] was
/// configured with.
pub trait SequenceTagger: Send {
    /// Tag one tokenized sentence, one tag per token.
    fn tag(&mut self, tokens: &[String]) -> Result<Vec<String>>;

    /// Forget within-document adaptive data. Models without adaptive
    /// features can keep the default no-op.
    fn clear_adaptive_data(&mut self) {}
}

/// Statistical name finding: run the tagger, decode its tags into spans.
///
/// All scheme knowledge sits in the codec; the finder itself only enforces
/// the one-tag-per-token contract.
pub struct StatisticalFinder {
    tagger: Box<dyn SequenceTagger>,
    codec: SequenceCodec,
}

impl StatisticalFinder {
    /// Wrap a tagger whose output uses the given scheme.
    #[must_use]
    pub fn new(tagger: Box<dyn SequenceTagger>, scheme: TagScheme) -> Self {
        Self {
            tagger,
            codec: SequenceCodec::new(scheme),
        }
    }

    /// The codec used to decode tagger output.
    #[must_use]
    pub fn codec(&self) -> SequenceCodec {
        self.codec
    }
}

impl NameFinder for StatisticalFinder {
    fn spans(&mut self, tokens: &[String]) -> Result<Vec<Span>> {
        let tags = self.tagger.tag(tokens)?;
        if tags.len() != tokens.len() {
            return Err(Error::tagger(format!(
                "tagger returned {} tags for {} tokens",
                tags.len(),
                tokens.len()
            )));
        }
        self.codec.decode(&tags)
    }

    fn clear_adaptive_data(&mut self) {
        self.tagger.clear_adaptive_data();
    }
}

/// A scripted tagger for tests.
///
/// Returns the queued responses in order (all-`O` once exhausted) and
/// counts `clear_adaptive_data` calls through a shared counter, so tests
/// can verify the annotator's clearing policy after handing the tagger
/// over.
///
/// # Example
///
/// ```rust
/// use onoma::{MockTagger, SequenceTagger};
///
/// let mut tagger = MockTagger::with_responses(vec![
///     vec!["B-LOC".into(), "O".into()],
/// ]);
/// let clears = tagger.clear_counter();
///
/// let tokens: Vec<String> = vec!["Paris".into(), "shines".into()];
/// assert_eq!(tagger.tag(&tokens).unwrap(), vec!["B-LOC", "O"]);
/// tagger.clear_adaptive_data();
/// assert_eq!(clears.load(std::sync::atomic::Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct MockTagger {
    responses: Vec<Vec<String>>,
    call: usize,
    clears: Arc<AtomicUsize>,
}

impl MockTagger {
    /// A tagger that always answers all-`O`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tagger that plays back the given responses, one per sentence.
    #[must_use]
    pub fn with_responses(responses: Vec<Vec<String>>) -> Self {
        Self {
            responses,
            ..Self::default()
        }
    }

    /// Shared counter of `clear_adaptive_data` calls.
    #[must_use]
    pub fn clear_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.clears)
    }
}

impl SequenceTagger for MockTagger {
    fn tag(&mut self, tokens: &[String]) -> Result<Vec<String>> {
        let response = self.responses.get(self.call).cloned();
        self.call += 1;
        Ok(response.unwrap_or_else(|| vec![OUTSIDE.to_string(); tokens.len()]))
    }

    fn clear_adaptive_data(&mut self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}
