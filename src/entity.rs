//! Entity type labels and resolved entities.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Entity type classification.
///
/// Standard NER types following CoNLL conventions, plus an escape hatch for
/// gazetteer-defined classes (`city`, `event`, ...). Labels are normalized
/// to upper case so that every source (statistical model, gazetteer file,
/// numeric lexer) agrees on the same spelling of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Person name (PER)
    Person,
    /// Organization name (ORG)
    Organization,
    /// Location/Place (LOC)
    Location,
    /// Date expression (DATE)
    Date,
    /// Time-of-day expression (TIME)
    Time,
    /// Monetary value (MONEY)
    Money,
    /// Percentage (PERCENT)
    Percent,
    /// Any other entity type, stored as an upper-case label
    Other(String),
}

impl EntityType {
    /// Convert to the canonical label string (CoNLL format).
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityType::Person => "PER",
            EntityType::Organization => "ORG",
            EntityType::Location => "LOC",
            EntityType::Date => "DATE",
            EntityType::Time => "TIME",
            EntityType::Money => "MONEY",
            EntityType::Percent => "PERCENT",
            EntityType::Other(s) => s.as_str(),
        }
    }

    /// Parse from a label string, case-insensitively.
    ///
    /// Unknown labels are preserved upper-cased inside [`EntityType::Other`],
    /// so `from_label("city")` and `from_label("CITY")` are the same type.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "PER" | "PERSON" => EntityType::Person,
            "ORG" | "ORGANIZATION" | "ORGANISATION" => EntityType::Organization,
            "LOC" | "LOCATION" | "GPE" => EntityType::Location,
            "DATE" => EntityType::Date,
            "TIME" => EntityType::Time,
            "MONEY" | "CURRENCY" => EntityType::Money,
            "PERCENT" | "PERCENTAGE" => EntityType::Percent,
            other => EntityType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A resolved named entity: surface text, type, and the token span it covers.
///
/// Produced by the [`Annotator`](crate::Annotator) after overlap resolution;
/// this is what a document-model writer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    /// Surface form (covered tokens joined by single spaces)
    pub text: String,
    /// Entity type
    pub label: EntityType,
    /// Token-index span within the sentence
    pub span: Span,
}

impl Name {
    /// Build a `Name` from a span and the sentence's tokens.
    #[must_use]
    pub fn from_span(span: Span, tokens: &[String]) -> Self {
        Self {
            text: span.surface(tokens),
            label: span.label.clone(),
            span,
        }
    }
}
