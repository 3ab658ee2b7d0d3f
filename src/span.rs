//! Token-index spans, the shared currency of every span producer.

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// A half-open token-index range `[start, end)` with an entity type label.
///
/// Spans carry no reference to the tokens themselves; the surface string is
/// looked up by index when needed (see [`Span::surface`]). Two spans are
/// equal iff start, end and label all match.
///
/// Invariant: `start < end`. Every producer in this crate (the codec, the
/// gazetteer matchers, the numeric lexer) upholds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First covered token index
    pub start: usize,
    /// One past the last covered token index
    pub end: usize,
    /// Entity type of the covered tokens
    pub label: EntityType,
}

impl Span {
    /// Create a new span over `[start, end)`.
    #[must_use]
    pub fn new(start: usize, end: usize, label: EntityType) -> Self {
        debug_assert!(start < end, "span must cover at least one token");
        Self { start, end, label }
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no tokens. Always false for well-formed spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether this span shares at least one token index with `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span's range is a superset of `other`'s, types ignored.
    ///
    /// Reflexive: a span contains an equal-ranged span.
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Surface form of the span: covered tokens joined by single spaces.
    #[must_use]
    pub fn surface(&self, tokens: &[String]) -> String {
        tokens[self.start..self.end].join(" ")
    }
}
