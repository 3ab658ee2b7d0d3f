//! Edge-case behavior pinned down through the public API.

use std::sync::Arc;

use onoma::{
    resolve, Annotator, CaseMode, EntityType, Error, Gazetteer, GazetteerStack, MockTagger,
    SequenceCodec, Sentence, Span, TagScheme, TaggingMode,
};

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// =============================================================================
// Codec boundaries
// =============================================================================

#[test]
fn adjacent_same_type_entities_never_merge() {
    let codec = SequenceCodec::new(TagScheme::Bio);
    let spans = codec.decode(&["B-PER", "B-PER"]).unwrap();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 1, EntityType::Person),
            Span::new(1, 2, EntityType::Person),
        ]
    );
}

#[test]
fn leading_inside_tags_recover() {
    let codec = SequenceCodec::new(TagScheme::Bio);
    let spans = codec.decode(&["I-ORG", "I-ORG", "O"]).unwrap();
    assert_eq!(spans, vec![Span::new(0, 2, EntityType::Organization)]);
}

#[test]
fn empty_tag_sequence_decodes_to_nothing() {
    let codec = SequenceCodec::new(TagScheme::Bio);
    assert!(codec.decode::<&str>(&[]).unwrap().is_empty());
}

#[test]
fn encode_requires_resolution_first() {
    let codec = SequenceCodec::new(TagScheme::Bio);
    let overlapping = vec![
        Span::new(0, 2, EntityType::Person),
        Span::new(1, 3, EntityType::Location),
    ];
    assert!(matches!(
        codec.encode(&overlapping, 4),
        Err(Error::OverlappingSpans { .. })
    ));
    // After resolution the same spans encode fine.
    assert!(codec.encode(&resolve(&overlapping), 4).is_ok());
}

// =============================================================================
// Gazetteer corner cases
// =============================================================================

#[test]
fn longest_match_beats_shorter_prefix_entry() {
    let gaz = Gazetteer::from_entries(
        "d",
        CaseMode::IgnoreCase,
        [
            ("new york", EntityType::Location),
            ("new", EntityType::Location),
        ],
    );
    let spans = gaz.match_longest(&tokens(&["i", "love", "new", "york", "city"]));
    assert_eq!(spans, vec![Span::new(2, 4, EntityType::Location)]);
}

#[test]
fn entry_longer_than_sentence_cannot_match() {
    let gaz = Gazetteer::from_entries(
        "d",
        CaseMode::Exact,
        [("one two three four", EntityType::Organization)],
    );
    assert!(gaz.match_longest(&tokens(&["one", "two"])).is_empty());
    assert!(gaz.match_all(&tokens(&["one", "two"])).is_empty());
}

#[test]
fn empty_token_list_matches_nothing() {
    let gaz = Gazetteer::from_entries("d", CaseMode::Exact, [("x", EntityType::Person)]);
    assert!(gaz.match_longest(&[]).is_empty());
    assert!(gaz.match_all(&[]).is_empty());
}

// =============================================================================
// Annotator corner cases
// =============================================================================

#[test]
fn empty_sentence_annotates_to_nothing() {
    let mut stack = GazetteerStack::new();
    stack.push_entries("d", [("Paris", EntityType::Location)]);

    let mut annotator = Annotator::builder()
        .tagger(Box::new(MockTagger::new()), TagScheme::Bio)
        .gazetteers(Arc::new(stack))
        .mode(TaggingMode::PostProcess)
        .numeric_lexer(true)
        .build()
        .unwrap();

    let names = annotator.annotate_sentence(&Sentence::new(vec![])).unwrap();
    assert!(names.is_empty());
}

#[test]
fn sentence_with_no_entities_annotates_to_nothing() {
    let mut annotator = Annotator::builder()
        .tagger(Box::new(MockTagger::new()), TagScheme::Bio)
        .build()
        .unwrap();

    let names = annotator
        .annotate_sentence(&Sentence::new(tokens(&["just", "plain", "words"])))
        .unwrap();
    assert!(names.is_empty());
}

#[test]
fn partial_overlap_is_not_a_duplicate_veto() {
    // Statistical claims 0..2, the gazetteer 1..3: neither contains the
    // other, so post-processing keeps the statistical span and resolution
    // picks the earlier start.
    let tagger = MockTagger::with_responses(vec![vec![
        "B-ORG".into(),
        "I-ORG".into(),
        "O".into(),
    ]]);
    let mut stack = GazetteerStack::new();
    stack.push_entries("d", [("York City", EntityType::Location)]);

    let mut annotator = Annotator::builder()
        .tagger(Box::new(tagger), TagScheme::Bio)
        .gazetteers(Arc::new(stack))
        .mode(TaggingMode::PostProcess)
        .build()
        .unwrap();

    let names = annotator
        .annotate_sentence(&Sentence::new(tokens(&["New", "York", "City"])))
        .unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].text, "New York");
    assert_eq!(names[0].label, EntityType::Organization);
}

#[test]
fn empty_corpus_reads_to_no_sentences() {
    assert!(onoma::read_tagged_sentences("".as_bytes())
        .unwrap()
        .is_empty());
    assert!(onoma::read_tagged_sentences("\n\n\n".as_bytes())
        .unwrap()
        .is_empty());
}
