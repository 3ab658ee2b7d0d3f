//! Reading and writing tab-separated tagged corpora.
//!
//! The wire format shared by the CoNLL-style corpus variants:
//!
//! ```text
//! -DOCSTART-  O          ← document boundary (consumed, never a token)
//!
//! Wolff       B-PER
//! ,           O
//! currently   O
//! a           O
//! journalist  O
//!
//! Argentina   B-LOC      ← blank line above ended the first sentence
//! played      O
//! ```
//!
//! Columns are `token<TAB>tag`; variants with extra middle columns
//! (`token POS tag`, or the four-column CoNLL-2003 layout) are accepted by
//! taking the first field as the token and the last as the tag. A
//! `-DOCSTART-` line marks a document boundary and is surfaced as the next
//! sentence's `document_start` flag — what (if anything) to do with that
//! flag is the annotator's [`ClearPolicy`](crate::ClearPolicy) decision,
//! not the reader's.
//!
//! Unlike gazetteer files, corpus files with broken lines are corrupt
//! training/evaluation data: structural problems are hard errors.

use std::io::{BufRead, Write};

use crate::annotate::Sentence;
use crate::codec::SequenceCodec;
use crate::error::{Error, Result};
use crate::span::Span;

/// The document-boundary marker used by CoNLL-2003 style corpora.
pub const DOCSTART: &str = "-DOCSTART-";

/// One sentence read from a tagged corpus: tokens, raw tags, and whether a
/// document boundary preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    /// The sentence's tokens.
    pub tokens: Vec<String>,
    /// The raw per-token tags, untouched by the reader.
    pub tags: Vec<String>,
    /// Whether a `-DOCSTART-` marker immediately preceded this sentence.
    pub document_start: bool,
}

impl TaggedSentence {
    /// Decode the raw tags into gold spans with the shared codec.
    pub fn decode(&self, codec: &SequenceCodec) -> Result<Vec<Span>> {
        codec.decode(&self.tags)
    }

    /// Drop the tags, keeping what the annotator consumes.
    #[must_use]
    pub fn into_sentence(self) -> Sentence {
        Sentence {
            tokens: self.tokens,
            document_start: self.document_start,
        }
    }
}

/// Read every sentence of a tagged corpus.
///
/// Blank lines end sentences; consecutive blank lines are ignored. A
/// `-DOCSTART-` line must be followed by a blank line (or end of input)
/// and flags the next sentence as a document start.
pub fn read_tagged_sentences(reader: impl BufRead) -> Result<Vec<TaggedSentence>> {
    let mut sentences = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    let mut document_start = false;
    let mut expect_blank_after_docstart = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if line.is_empty() {
            expect_blank_after_docstart = false;
            if !tokens.is_empty() {
                sentences.push(TaggedSentence {
                    tokens: std::mem::take(&mut tokens),
                    tags: std::mem::take(&mut tags),
                    document_start,
                });
                document_start = false;
            }
            continue;
        }
        if expect_blank_after_docstart {
            return Err(Error::parse(format!(
                "expected blank line after {DOCSTART}, got {line:?}"
            )));
        }
        if line.starts_with(DOCSTART) {
            document_start = true;
            expect_blank_after_docstart = true;
            continue;
        }

        let (token, tag) = split_columns(line)?;
        tokens.push(token.to_string());
        tags.push(tag.to_string());
    }

    if !tokens.is_empty() {
        sentences.push(TaggedSentence {
            tokens,
            tags,
            document_start,
        });
    }
    Ok(sentences)
}

/// Write one annotated sentence in two-column format, ending with the
/// blank-line sentence separator. Spans must already be conflict-free.
pub fn write_tagged_sentence(
    out: &mut impl Write,
    tokens: &[String],
    spans: &[Span],
    codec: &SequenceCodec,
) -> Result<()> {
    let tags = codec.encode(spans, tokens.len())?;
    for (token, tag) in tokens.iter().zip(&tags) {
        writeln!(out, "{token}\t{tag}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// First field is the token, last field is the tag.
///
/// Tab-separated columns are tried first (the two-column variant), falling
/// back to whitespace splitting for the space-separated multi-column
/// variants.
fn split_columns(line: &str) -> Result<(&str, &str)> {
    let fields: Vec<&str> = if line.contains('\t') {
        line.split('\t').filter(|f| !f.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    };
    match (fields.first(), fields.last()) {
        (Some(&token), Some(&tag)) if fields.len() >= 2 => Ok((token, tag)),
        _ => Err(Error::parse(format!(
            "expected at least two columns, got {line:?}"
        ))),
    }
}
