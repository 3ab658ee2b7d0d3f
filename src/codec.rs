//! Tag-sequence codec: BIO/BILOU per-token tags to spans and back.
//!
//! Every consumer of per-token tagging goes through this one codec: corpus
//! readers decode gold annotations with it, the statistical source decodes
//! its tagger's raw output with it, and the corpus writer encodes resolved
//! spans back through it. Historically each of those call sites reimplements
//! the scan with slightly different boundary handling; centralizing it here
//! pins the behavior down once.
//!
//! # Boundary policy
//!
//! ```text
//! tags:   B-PER  B-PER          I-ORG  I-ORG  O         B-LOC  I-PER
//!         └─┬─┘  └─┬─┘          └────┬─────┘            └─┬─┘  └─┬─┘
//!         [0,1)  [1,2)           [0,2) ORG              LOC    PER
//!         two adjacent PER,      leading I- recovered   type change closes
//!         never merged           as a begin             the open run
//! ```
//!
//! A `B-` (or `U-`) immediately after an open run always closes that run
//! first and starts a new entity: two adjacent same-type entities stay two
//! entities.

use crate::entity::EntityType;
use crate::error::{Error, Result};
use crate::span::Span;

/// The tag written for tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// Per-token tagging scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagScheme {
    /// Begin / Inside / Outside
    #[default]
    Bio,
    /// Begin / Inside / Last / Outside / Unit
    Bilou,
}

/// Prefix of a non-`O` tag, split off before the `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Begin,
    Inside,
    Last,
    Unit,
}

/// Bidirectional converter between tag sequences and span lists.
///
/// # Example
///
/// ```rust
/// use onoma::{EntityType, SequenceCodec, Span, TagScheme};
///
/// let codec = SequenceCodec::new(TagScheme::Bio);
/// let spans = codec.decode(&["B-PER", "I-PER", "O"]).unwrap();
/// assert_eq!(spans, vec![Span::new(0, 2, EntityType::Person)]);
///
/// let tags = codec.encode(&spans, 3).unwrap();
/// assert_eq!(tags, vec!["B-PER", "I-PER", "O"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceCodec {
    scheme: TagScheme,
}

impl SequenceCodec {
    /// Create a codec for the given scheme.
    #[must_use]
    pub fn new(scheme: TagScheme) -> Self {
        Self { scheme }
    }

    /// The scheme this codec encodes and decodes.
    #[must_use]
    pub fn scheme(&self) -> TagScheme {
        self.scheme
    }

    /// Decode a per-token tag sequence into entity spans.
    ///
    /// Tolerant of the irregularities real corpora and taggers produce: an
    /// `I-` (or BILOU `L-`) with no open run starts one, and an `I-` whose
    /// type differs from the open run closes the run and starts a new one.
    /// A tag outside the scheme's alphabet is [`Error::InvalidTag`].
    pub fn decode<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        // Open run: (start index, type). The end is implied by whichever
        // later tag closes the run.
        let mut open: Option<(usize, EntityType)> = None;

        for (i, tag) in tags.iter().enumerate() {
            let tag = tag.as_ref();
            if tag == OUTSIDE {
                if let Some((start, label)) = open.take() {
                    spans.push(Span::new(start, i, label));
                }
                continue;
            }
            let (prefix, label) = self.split_tag(tag)?;
            match prefix {
                Prefix::Begin => {
                    if let Some((start, old)) = open.take() {
                        spans.push(Span::new(start, i, old));
                    }
                    open = Some((i, label));
                }
                Prefix::Inside => match open.take() {
                    Some((start, old)) if old == label => {
                        open = Some((start, old));
                    }
                    Some((start, old)) => {
                        // Type change without an explicit boundary tag.
                        spans.push(Span::new(start, i, old));
                        open = Some((i, label));
                    }
                    None => {
                        // Entity starting at a segment boundary with I-.
                        open = Some((i, label));
                    }
                },
                Prefix::Unit => {
                    if let Some((start, old)) = open.take() {
                        spans.push(Span::new(start, i, old));
                    }
                    spans.push(Span::new(i, i + 1, label));
                }
                Prefix::Last => match open.take() {
                    Some((start, old)) if old == label => {
                        spans.push(Span::new(start, i + 1, old));
                    }
                    Some((start, old)) => {
                        spans.push(Span::new(start, i, old));
                        spans.push(Span::new(i, i + 1, label));
                    }
                    None => {
                        spans.push(Span::new(i, i + 1, label));
                    }
                },
            }
        }

        if let Some((start, label)) = open {
            spans.push(Span::new(start, tags.len(), label));
        }
        Ok(spans)
    }

    /// Encode non-overlapping spans as a per-token tag sequence.
    ///
    /// Uncovered indices become [`OUTSIDE`]. Spans must be pairwise
    /// non-overlapping ([`Error::OverlappingSpans`] otherwise — run overlap
    /// resolution first) and must fit within `token_count`
    /// ([`Error::SpanOutOfBounds`]).
    pub fn encode(&self, spans: &[Span], token_count: usize) -> Result<Vec<String>> {
        for span in spans {
            if span.end > token_count {
                return Err(Error::SpanOutOfBounds {
                    start: span.start,
                    end: span.end,
                    token_count,
                });
            }
        }
        let mut ordered: Vec<&Span> = spans.iter().collect();
        ordered.sort_by_key(|s| (s.start, s.end));
        for pair in ordered.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(Error::OverlappingSpans {
                    a_start: pair[0].start,
                    a_end: pair[0].end,
                    b_start: pair[1].start,
                    b_end: pair[1].end,
                });
            }
        }

        let mut tags = vec![OUTSIDE.to_string(); token_count];
        for span in ordered {
            let label = span.label.as_label();
            match self.scheme {
                TagScheme::Bio => {
                    tags[span.start] = format!("B-{label}");
                    for tag in &mut tags[span.start + 1..span.end] {
                        *tag = format!("I-{label}");
                    }
                }
                TagScheme::Bilou => {
                    if span.len() == 1 {
                        tags[span.start] = format!("U-{label}");
                    } else {
                        tags[span.start] = format!("B-{label}");
                        for tag in &mut tags[span.start + 1..span.end - 1] {
                            *tag = format!("I-{label}");
                        }
                        tags[span.end - 1] = format!("L-{label}");
                    }
                }
            }
        }
        Ok(tags)
    }

    /// Split `B-PER` into its prefix and type, validating both against the
    /// active scheme.
    fn split_tag(&self, tag: &str) -> Result<(Prefix, EntityType)> {
        let invalid = || Error::InvalidTag(tag.to_string());
        let (prefix, label) = tag.split_once('-').ok_or_else(invalid)?;
        if label.is_empty() {
            return Err(invalid());
        }
        let prefix = match (prefix, self.scheme) {
            ("B", _) => Prefix::Begin,
            ("I", _) => Prefix::Inside,
            ("U", TagScheme::Bilou) => Prefix::Unit,
            ("L", TagScheme::Bilou) => Prefix::Last,
            _ => return Err(invalid()),
        };
        Ok((prefix, EntityType::from_label(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bio() -> SequenceCodec {
        SequenceCodec::new(TagScheme::Bio)
    }

    fn bilou() -> SequenceCodec {
        SequenceCodec::new(TagScheme::Bilou)
    }

    fn per(start: usize, end: usize) -> Span {
        Span::new(start, end, EntityType::Person)
    }

    // =========================================================================
    // BIO decoding
    // =========================================================================

    #[test]
    fn decode_simple_bio() {
        let spans = bio().decode(&["O", "B-PER", "I-PER", "O", "B-LOC"]).unwrap();
        assert_eq!(
            spans,
            vec![per(1, 3), Span::new(4, 5, EntityType::Location)]
        );
    }

    #[test]
    fn decode_adjacent_begins_stay_separate() {
        // Two same-type entities back to back: never merged into one.
        let spans = bio().decode(&["B-PER", "B-PER"]).unwrap();
        assert_eq!(spans, vec![per(0, 1), per(1, 2)]);
    }

    #[test]
    fn decode_tolerant_leading_inside() {
        let spans = bio().decode(&["I-ORG", "I-ORG", "O"]).unwrap();
        assert_eq!(spans, vec![Span::new(0, 2, EntityType::Organization)]);
    }

    #[test]
    fn decode_inside_type_change_splits() {
        let spans = bio().decode(&["I-ORG", "I-PER"]).unwrap();
        assert_eq!(
            spans,
            vec![Span::new(0, 1, EntityType::Organization), per(1, 2)]
        );
    }

    #[test]
    fn decode_trailing_open_run_closed_at_end() {
        let spans = bio().decode(&["O", "B-LOC", "I-LOC"]).unwrap();
        assert_eq!(spans, vec![Span::new(1, 3, EntityType::Location)]);
    }

    #[test]
    fn decode_begin_after_inside_of_other_type() {
        let spans = bio().decode(&["I-ORG", "B-LOC", "O"]).unwrap();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 1, EntityType::Organization),
                Span::new(1, 2, EntityType::Location),
            ]
        );
    }

    #[test]
    fn decode_all_outside() {
        assert!(bio().decode(&["O", "O", "O"]).unwrap().is_empty());
        assert!(bio().decode::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_unknown_tag() {
        let err = bio().decode(&["B-PER", "X-PER"]).unwrap_err();
        assert!(matches!(err, Error::InvalidTag(t) if t == "X-PER"));
    }

    #[test]
    fn decode_rejects_bilou_tags_in_bio_scheme() {
        assert!(bio().decode(&["U-PER"]).is_err());
        assert!(bio().decode(&["L-PER"]).is_err());
    }

    #[test]
    fn decode_rejects_bare_and_empty_types() {
        assert!(bio().decode(&["B-"]).is_err());
        assert!(bio().decode(&["B"]).is_err());
        assert!(bio().decode(&["PER"]).is_err());
    }

    // =========================================================================
    // BILOU decoding
    // =========================================================================

    #[test]
    fn decode_bilou_unit_and_run() {
        let spans = bilou()
            .decode(&["U-PER", "O", "B-ORG", "I-ORG", "L-ORG"])
            .unwrap();
        assert_eq!(
            spans,
            vec![per(0, 1), Span::new(2, 5, EntityType::Organization)]
        );
    }

    #[test]
    fn decode_bilou_adjacent_units_stay_separate() {
        let spans = bilou().decode(&["U-PER", "U-PER"]).unwrap();
        assert_eq!(spans, vec![per(0, 1), per(1, 2)]);
    }

    #[test]
    fn decode_bilou_unit_closes_open_run() {
        let spans = bilou().decode(&["B-ORG", "U-PER"]).unwrap();
        assert_eq!(
            spans,
            vec![Span::new(0, 1, EntityType::Organization), per(1, 2)]
        );
    }

    #[test]
    fn decode_bilou_stray_last_recovered_as_unit() {
        let spans = bilou().decode(&["O", "L-PER"]).unwrap();
        assert_eq!(spans, vec![per(1, 2)]);
    }

    #[test]
    fn decode_bilou_last_type_mismatch_splits() {
        let spans = bilou().decode(&["B-ORG", "L-PER"]).unwrap();
        assert_eq!(
            spans,
            vec![Span::new(0, 1, EntityType::Organization), per(1, 2)]
        );
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    #[test]
    fn encode_bio() {
        let spans = vec![per(1, 3), Span::new(4, 5, EntityType::Location)];
        let tags = bio().encode(&spans, 6).unwrap();
        assert_eq!(tags, vec!["O", "B-PER", "I-PER", "O", "B-LOC", "O"]);
    }

    #[test]
    fn encode_bilou() {
        let spans = vec![per(0, 1), Span::new(2, 5, EntityType::Organization)];
        let tags = bilou().encode(&spans, 5).unwrap();
        assert_eq!(tags, vec!["U-PER", "O", "B-ORG", "I-ORG", "L-ORG"]);
    }

    #[test]
    fn encode_bilou_two_token_span_has_no_inside() {
        let tags = bilou().encode(&[per(0, 2)], 2).unwrap();
        assert_eq!(tags, vec!["B-PER", "L-PER"]);
    }

    #[test]
    fn encode_rejects_overlap() {
        let err = bio().encode(&[per(0, 3), per(2, 4)], 5).unwrap_err();
        assert!(matches!(err, Error::OverlappingSpans { .. }));
    }

    #[test]
    fn encode_rejects_exact_duplicate() {
        let err = bio().encode(&[per(1, 2), per(1, 2)], 3).unwrap_err();
        assert!(matches!(err, Error::OverlappingSpans { .. }));
    }

    #[test]
    fn encode_rejects_out_of_bounds() {
        let err = bio().encode(&[per(1, 4)], 3).unwrap_err();
        assert!(matches!(err, Error::SpanOutOfBounds { .. }));
    }

    #[test]
    fn encode_empty_is_all_outside() {
        assert_eq!(bio().encode(&[], 3).unwrap(), vec!["O", "O", "O"]);
    }

    // =========================================================================
    // Round trips
    // =========================================================================

    #[test]
    fn roundtrip_bio() {
        let spans = vec![per(0, 2), Span::new(3, 4, EntityType::Location)];
        let tags = bio().encode(&spans, 5).unwrap();
        assert_eq!(bio().decode(&tags).unwrap(), spans);
    }

    #[test]
    fn roundtrip_bilou() {
        let spans = vec![per(0, 1), per(1, 2), Span::new(3, 6, EntityType::Money)];
        let tags = bilou().encode(&spans, 6).unwrap();
        assert_eq!(bilou().decode(&tags).unwrap(), spans);
    }

    #[test]
    fn roundtrip_adjacent_same_type_under_bilou() {
        // BILOU can represent adjacent same-type entities; BIO's B- boundary
        // does the same. Both must survive a round trip un-merged.
        let spans = vec![per(0, 2), per(2, 4)];
        let tags = bilou().encode(&spans, 4).unwrap();
        assert_eq!(tags, vec!["B-PER", "L-PER", "B-PER", "L-PER"]);
        assert_eq!(bilou().decode(&tags).unwrap(), spans);
    }
}
