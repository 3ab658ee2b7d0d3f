//! # onoma
//!
//! Multilingual named entity recognition over tokenized sentences.
//!
//! Three span sources feed one reconciliation pipeline:
//!
//! | Source | Signal | Good at |
//! |--------|--------|---------|
//! | [`StatisticalFinder`] | external sequence tagger | anything the model was trained on |
//! | [`DictionaryFinder`] | gazetteer files | known names, exact types |
//! | [`NumericFinder`] | format rules | dates, times, money, percents |
//!
//! ```text
//! tokens ──► statistical ─► decode (BIO/BILOU) ─┐
//!        ──► gazetteers  ─► match_all ──────────┼─► dedup ─► resolve ─► Names
//!        ──► numeric     ─► rules ──────────────┘
//! ```
//!
//! The statistical model itself is a black box behind the [`SequenceTagger`]
//! trait: the crate asks it for raw per-token tags and decodes them with the
//! same [`SequenceCodec`] the corpus readers use. All overlap between
//! sources is settled by one deterministic policy ([`resolve`]): earlier
//! start wins, longer span wins at equal start.
//!
//! ## Quick start
//!
//! ```rust
//! use onoma::{Annotator, EntityType, GazetteerStack, MockTagger, Sentence, TagScheme, TaggingMode};
//! use std::sync::Arc;
//!
//! // Gazetteers normally load from a directory of form<TAB>type files.
//! let mut stack = GazetteerStack::new();
//! stack.push_entries("cities", [("Paris", EntityType::Other("CITY".into()))]);
//!
//! // The tagger is your trained model; scripted here.
//! let tagger = MockTagger::with_responses(vec![
//!     vec!["B-LOC".into(), "O".into(), "O".into()],
//! ]);
//!
//! let mut annotator = Annotator::builder()
//!     .tagger(Box::new(tagger), TagScheme::Bio)
//!     .gazetteers(Arc::new(stack))
//!     .mode(TaggingMode::PostProcess)
//!     .build()?;
//!
//! let sentence = Sentence::new(vec!["Paris".into(), "is".into(), "nice".into()]);
//! let names = annotator.annotate_sentence(&sentence)?;
//!
//! // The gazetteer's CITY wins over the tagger's LOC for the same tokens.
//! assert_eq!(names.len(), 1);
//! assert_eq!(names[0].text, "Paris");
//! assert_eq!(names[0].label, EntityType::Other("CITY".into()));
//! # Ok::<(), onoma::Error>(())
//! ```
//!
//! ## Tagging modes
//!
//! Exactly one of three modes is active per [`Annotator`]
//! (the numeric lexer is an independent add-on to any of them):
//!
//! - [`TaggingMode::Statistical`] — the tagger's decoded spans stand alone.
//! - [`TaggingMode::PostProcess`] — gazetteer hits veto the tagger's
//!   decision wherever both saw the same tokens.
//! - [`TaggingMode::DictionaryOnly`] — gazetteers only, no model needed.
//!
//! ## Concurrency
//!
//! Loaded gazetteers are immutable and shared via `Arc`; the codec,
//! matchers and resolver are pure. Only the statistical source is
//! stateful (within-document adaptive data), so use one [`Annotator`] per
//! concurrently-processed document and keep each document's sentences in
//! order.

#![warn(missing_docs)]

pub mod annotate;
pub mod codec;
pub mod corpus;
mod entity;
mod error;
pub mod gazetteer;
pub mod lexer;
pub mod resolve;
pub mod sources;
mod span;

pub use annotate::{Annotator, AnnotatorBuilder, ClearPolicy, Sentence, TaggingMode};
pub use codec::{SequenceCodec, TagScheme, OUTSIDE};
pub use corpus::{read_tagged_sentences, write_tagged_sentence, TaggedSentence, DOCSTART};
pub use entity::{EntityType, Name};
pub use error::{Error, Result};
pub use gazetteer::{CaseMode, Gazetteer, GazetteerStack};
pub use lexer::NumericLexer;
pub use resolve::{post_process_duplicates, resolve};
pub use sources::{
    DictionaryFinder, MockTagger, NameFinder, NumericFinder, SequenceTagger, StatisticalFinder,
};
pub use span::Span;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use onoma::prelude::*;
    //!
    //! let codec = SequenceCodec::new(TagScheme::Bio);
    //! let spans = codec.decode(&["B-PER", "I-PER", "O"]).unwrap();
    //! assert_eq!(spans[0], Span::new(0, 2, EntityType::Person));
    //! ```
    pub use crate::annotate::{Annotator, ClearPolicy, Sentence, TaggingMode};
    pub use crate::codec::{SequenceCodec, TagScheme};
    pub use crate::entity::{EntityType, Name};
    pub use crate::error::{Error, Result};
    pub use crate::gazetteer::{CaseMode, Gazetteer, GazetteerStack};
    pub use crate::resolve::{post_process_duplicates, resolve};
    pub use crate::sources::{NameFinder, SequenceTagger};
    pub use crate::span::Span;
}
