//! Overlap resolution: pick a maximal consistent subset of candidate spans.
//!
//! Every sentence's span candidates — whether they came from one source or
//! from the statistical/gazetteer/lexer combination — go through the same
//! policy before anything downstream sees them:
//!
//! ```text
//! candidates:  [====LOC====]
//!                 [==PER==]        dropped (conflicts with earlier start)
//!                          [=ORG=] kept   (no conflict)
//! order:       start ascending, then length descending
//! ```
//!
//! Earlier-starting spans win; among spans starting at the same token, the
//! longer one wins. The functions here are pure and total: well-formed
//! spans in, a conflict-free subset out, no failure modes.

use crate::span::Span;

/// Select a conflict-free subset of possibly-overlapping spans.
///
/// Two spans conflict iff their ranges share at least one token index
/// (equal ranges conflict). Candidates are considered in
/// `(start ascending, length descending)` order and accepted greedily when
/// they conflict with nothing accepted before them. Deterministic, and
/// idempotent: resolving an already-resolved list changes nothing.
///
/// The output is ordered by start index.
#[must_use]
pub fn resolve(spans: &[Span]) -> Vec<Span> {
    let mut candidates: Vec<Span> = spans.to_vec();
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut accepted: Vec<Span> = Vec::new();
    for candidate in candidates {
        if accepted.iter().all(|kept| !kept.overlaps(&candidate)) {
            accepted.push(candidate);
        }
    }
    accepted
}

/// Drop every span in `primary` that contains or is contained by a span in
/// `secondary` (ranges compared, types ignored; equal ranges count).
///
/// Used to let a high-precision source veto another source's decision on
/// the same tokens before the two lists are concatenated: the statistical
/// spans filtered against the gazetteer spans here, then both lists merged,
/// leave the gazetteer's type for any entity both sources saw.
#[must_use]
pub fn post_process_duplicates(primary: &[Span], secondary: &[Span]) -> Vec<Span> {
    primary
        .iter()
        .filter(|p| !secondary.iter().any(|s| p.contains(s) || s.contains(p)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;

    fn loc(start: usize, end: usize) -> Span {
        Span::new(start, end, EntityType::Location)
    }

    fn per(start: usize, end: usize) -> Span {
        Span::new(start, end, EntityType::Person)
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(resolve(&[]).is_empty());
    }

    #[test]
    fn non_conflicting_spans_all_kept() {
        let spans = vec![loc(0, 2), per(2, 3), loc(5, 7)];
        assert_eq!(resolve(&spans), spans);
    }

    #[test]
    fn earlier_start_wins() {
        let spans = vec![per(1, 4), loc(0, 2)];
        assert_eq!(resolve(&spans), vec![loc(0, 2)]);
    }

    #[test]
    fn longer_span_wins_at_equal_start() {
        let spans = vec![loc(2, 3), loc(2, 4)];
        assert_eq!(resolve(&spans), vec![loc(2, 4)]);
    }

    #[test]
    fn exact_duplicates_collapse_to_one() {
        let spans = vec![loc(0, 2), loc(0, 2)];
        assert_eq!(resolve(&spans), vec![loc(0, 2)]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let spans = vec![per(0, 3), loc(1, 2), loc(3, 5), per(4, 6)];
        let once = resolve(&spans);
        assert_eq!(resolve(&once), once);
    }

    #[test]
    fn output_sorted_by_start() {
        let spans = vec![loc(5, 7), per(0, 2), loc(3, 4)];
        let resolved = resolve(&spans);
        assert!(resolved.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn post_process_removes_exact_duplicate() {
        let primary = vec![loc(0, 1), per(3, 5)];
        let secondary = vec![Span::new(0, 1, EntityType::Other("CITY".into()))];
        assert_eq!(post_process_duplicates(&primary, &secondary), vec![per(3, 5)]);
    }

    #[test]
    fn post_process_removes_containment_both_directions() {
        // primary contains a secondary span, and is contained by another
        let primary = vec![per(0, 4), per(6, 7)];
        let secondary = vec![loc(1, 2), loc(5, 8)];
        assert!(post_process_duplicates(&primary, &secondary).is_empty());
    }

    #[test]
    fn post_process_keeps_partial_overlap() {
        // Overlap without containment is not a duplicate; resolution
        // handles it later.
        let primary = vec![per(0, 3)];
        let secondary = vec![loc(2, 5)];
        assert_eq!(post_process_duplicates(&primary, &secondary), primary);
    }

    #[test]
    fn post_process_with_empty_secondary_is_identity() {
        let primary = vec![per(0, 2), loc(4, 6)];
        assert_eq!(post_process_duplicates(&primary, &[]), primary);
    }
}
