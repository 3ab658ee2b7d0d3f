//! Per-sentence combination of the statistical, gazetteer, and numeric
//! sources into one consistent annotation.
//!
//! # How spans flow through a sentence
//!
//! ```text
//! tokens: ["Paris", "is", "nice"]
//!
//!          │
//!          ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ statistical source (Statistical / PostProcess modes)         │
//! │   tagger → raw tags → codec → [LOC 0..1]                     │
//! └──────────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ PostProcess: gazetteer match_all (exact view) → [CITY 0..1]  │
//! │   post_process_duplicates drops the statistical [LOC 0..1]   │
//! │   (same tokens, gazetteer wins), survivors + dict spans      │
//! │   concatenate                                                │
//! └──────────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ numeric lexer (optional add-on) → spans appended             │
//! └──────────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ resolve: start asc, longer wins → conflict-free spans        │
//! │ spans → Names (surface = covered tokens joined by spaces)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly one of the three tagging modes is active per annotator; the
//! numeric lexer is orthogonal to all of them. Sentences must be processed
//! in order: the statistical source carries cross-sentence adaptive state,
//! cleared at the points [`ClearPolicy`] dictates.

use std::sync::Arc;

use crate::codec::TagScheme;
use crate::entity::Name;
use crate::error::{Error, Result};
use crate::gazetteer::GazetteerStack;
use crate::resolve::{post_process_duplicates, resolve};
use crate::sources::{
    DictionaryFinder, NameFinder, NumericFinder, SequenceTagger, StatisticalFinder,
};
use crate::span::Span;

/// Which sources produce the base span set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaggingMode {
    /// Statistical tagger only.
    #[default]
    Statistical,
    /// Statistical tagger post-processed by the gazetteers: on any entity
    /// both saw, the gazetteer's decision wins.
    PostProcess,
    /// Gazetteers only; the statistical source never runs.
    DictionaryOnly,
}

/// When the statistical source's adaptive data is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClearPolicy {
    /// After every sentence.
    PerSentence,
    /// Never during a document (still cleared at document end).
    #[default]
    Never,
    /// Only when a sentence carries the document-start marker.
    DocumentStart,
}

/// One tokenized sentence plus its document-boundary flag.
///
/// `document_start` is surfaced by the corpus reader (a `-DOCSTART-`
/// marker preceded this sentence); the annotator only consults it under
/// [`ClearPolicy::DocumentStart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// The sentence's tokens.
    pub tokens: Vec<String>,
    /// Whether a document boundary immediately precedes this sentence.
    pub document_start: bool,
}

impl Sentence {
    /// A sentence with no document boundary in front of it.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            document_start: false,
        }
    }

    /// A sentence that opens a new document.
    #[must_use]
    pub fn document_start(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            document_start: true,
        }
    }
}

/// Builder for [`Annotator`].
#[derive(Default)]
pub struct AnnotatorBuilder {
    mode: TaggingMode,
    clear_policy: ClearPolicy,
    numeric_lexer: bool,
    tagger: Option<(Box<dyn SequenceTagger>, TagScheme)>,
    gazetteers: Option<Arc<GazetteerStack>>,
}

impl AnnotatorBuilder {
    /// Set the tagging mode (default: [`TaggingMode::Statistical`]).
    #[must_use]
    pub fn mode(mut self, mode: TaggingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the adaptive-data clearing policy (default: [`ClearPolicy::Never`]).
    #[must_use]
    pub fn clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.clear_policy = policy;
        self
    }

    /// Enable the numeric lexer add-on.
    #[must_use]
    pub fn numeric_lexer(mut self, enabled: bool) -> Self {
        self.numeric_lexer = enabled;
        self
    }

    /// Provide the statistical tagger and the scheme its tags use.
    #[must_use]
    pub fn tagger(mut self, tagger: Box<dyn SequenceTagger>, scheme: TagScheme) -> Self {
        self.tagger = Some((tagger, scheme));
        self
    }

    /// Provide the loaded gazetteer stack.
    #[must_use]
    pub fn gazetteers(mut self, stack: Arc<GazetteerStack>) -> Self {
        self.gazetteers = Some(stack);
        self
    }

    /// Build the annotator, validating that the chosen mode has the
    /// sources it needs.
    pub fn build(self) -> Result<Annotator> {
        let needs_tagger = matches!(
            self.mode,
            TaggingMode::Statistical | TaggingMode::PostProcess
        );
        let needs_gazetteers = matches!(
            self.mode,
            TaggingMode::PostProcess | TaggingMode::DictionaryOnly
        );

        if needs_tagger && self.tagger.is_none() {
            return Err(Error::config(format!(
                "{:?} mode requires a tagger",
                self.mode
            )));
        }
        if needs_gazetteers && self.gazetteers.is_none() {
            return Err(Error::config(format!(
                "{:?} mode requires gazetteers",
                self.mode
            )));
        }

        let statistical = if needs_tagger {
            self.tagger
                .map(|(tagger, scheme)| StatisticalFinder::new(tagger, scheme))
        } else {
            None
        };
        // Combination runs against the exact-case views; the ignore-case
        // views exist for standalone dictionary tagging.
        let dictionary = if needs_gazetteers {
            self.gazetteers.map(DictionaryFinder::exact)
        } else {
            None
        };

        Ok(Annotator {
            mode: self.mode,
            clear_policy: self.clear_policy,
            statistical,
            dictionary,
            numeric: self.numeric_lexer.then(NumericFinder::new),
        })
    }
}

/// The per-sentence source combiner.
///
/// Owns its statistical source (and that source's adaptive state), so use
/// one annotator per concurrently-processed document. The gazetteer stack
/// behind it is shared and immutable.
pub struct Annotator {
    mode: TaggingMode,
    clear_policy: ClearPolicy,
    statistical: Option<StatisticalFinder>,
    dictionary: Option<DictionaryFinder>,
    numeric: Option<NumericFinder>,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("mode", &self.mode)
            .field("clear_policy", &self.clear_policy)
            .field("statistical", &self.statistical.is_some())
            .field("dictionary", &self.dictionary.is_some())
            .field("numeric", &self.numeric.is_some())
            .finish()
    }
}

impl Annotator {
    /// Start building an annotator.
    #[must_use]
    pub fn builder() -> AnnotatorBuilder {
        AnnotatorBuilder::default()
    }

    /// The active tagging mode.
    #[must_use]
    pub fn mode(&self) -> TaggingMode {
        self.mode
    }

    /// The active clearing policy.
    #[must_use]
    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_policy
    }

    /// Annotate one sentence: run the enabled sources, reconcile their
    /// spans, and return the resolved entities in token order.
    pub fn annotate_sentence(&mut self, sentence: &Sentence) -> Result<Vec<Name>> {
        let tokens = &sentence.tokens;
        let mut working: Vec<Span> = Vec::new();

        if let Some(statistical) = self.statistical.as_mut() {
            if self.clear_policy == ClearPolicy::DocumentStart && sentence.document_start {
                statistical.clear_adaptive_data();
            }
            working = statistical.spans(tokens)?;
        }

        match self.mode {
            TaggingMode::Statistical => {}
            TaggingMode::PostProcess => {
                if let Some(dictionary) = self.dictionary.as_mut() {
                    let dict_spans = dictionary.spans(tokens)?;
                    working = post_process_duplicates(&working, &dict_spans);
                    working.extend(dict_spans);
                }
            }
            TaggingMode::DictionaryOnly => {
                if let Some(dictionary) = self.dictionary.as_mut() {
                    working = dictionary.spans(tokens)?;
                }
            }
        }

        if let Some(numeric) = self.numeric.as_mut() {
            working.extend(numeric.spans(tokens)?);
        }

        let names = resolve(&working)
            .into_iter()
            .map(|span| Name::from_span(span, tokens))
            .collect();

        if self.clear_policy == ClearPolicy::PerSentence {
            if let Some(statistical) = self.statistical.as_mut() {
                statistical.clear_adaptive_data();
            }
        }
        Ok(names)
    }

    /// Annotate a document's sentences strictly in order.
    ///
    /// Adaptive data is cleared once more when the document ends,
    /// regardless of policy.
    pub fn annotate_document(&mut self, sentences: &[Sentence]) -> Result<Vec<Vec<Name>>> {
        let mut annotated = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            annotated.push(self.annotate_sentence(sentence)?);
        }
        if let Some(statistical) = self.statistical.as_mut() {
            statistical.clear_adaptive_data();
        }
        log::debug!(
            "annotated {} sentences, {} entities",
            sentences.len(),
            annotated.iter().map(Vec::len).sum::<usize>()
        );
        Ok(annotated)
    }
}
