//! Rule-based recognition of numeric entities: dates, times, percentages,
//! and currency expressions.
//!
//! No model, no dictionary — just format. These entities are recognizable
//! from their shape alone, which makes rules both faster and more precise
//! than a statistical tagger for this slice of the label set. The lexer
//! runs as an independent add-on source; its spans are merged with
//! whatever the other sources produced and reconciled downstream.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::EntityType;
use crate::span::Span;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static SLASH_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap());
static CLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}(?::\d{2})?$").unwrap());
static PERCENT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)?%$").unwrap());
static CURRENCY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$€£¥]\d[\d.,]*$").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)?$").unwrap());
static DAY_OF_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}$").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Month names recognized in written dates, lower-cased.
const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    // Spanish, for the multilingual corpora this crate targets.
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
    "septiembre", "octubre", "noviembre", "diciembre",
];

/// Words that turn a preceding number into a percentage.
const PERCENT_WORDS: &[&str] = &["%", "percent", "pct", "ciento"];

/// Words that turn a preceding number into a currency amount.
const CURRENCY_WORDS: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "pound", "pounds",
    "usd", "eur", "gbp", "yen",
];

/// The single currency-symbol tokens recognized before a bare number.
const CURRENCY_SYMBOLS: &[&str] = &["$", "€", "£", "¥"];

/// Rule-based numeric entity detector over tokenized sentences.
///
/// # Example
///
/// ```rust
/// use onoma::{EntityType, NumericLexer, Span};
///
/// let tokens: Vec<String> = ["Sales", "rose", "15", "percent", "on", "2024-01-15"]
///     .iter().map(|s| s.to_string()).collect();
/// let spans = NumericLexer::new().scan(&tokens);
/// assert_eq!(spans, vec![
///     Span::new(2, 4, EntityType::Percent),
///     Span::new(5, 6, EntityType::Date),
/// ]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericLexer;

impl NumericLexer {
    /// Create a new lexer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan a tokenized sentence for numeric entities.
    ///
    /// Greedy left-to-right: at each position the longest applicable rule
    /// wins and the scan resumes after it, so one pass never produces
    /// overlapping spans.
    #[must_use]
    pub fn scan(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match longest_rule_at(tokens, i) {
                Some(span) => {
                    i = span.end;
                    spans.push(span);
                }
                None => i += 1,
            }
        }
        spans
    }
}

/// Try rules at position `i`, longest first.
fn longest_rule_at(tokens: &[String], i: usize) -> Option<Span> {
    written_date_at(tokens, i)
        .or_else(|| number_pair_at(tokens, i))
        .or_else(|| single_token_at(tokens, i))
}

/// Written dates: `15 January 2024`, `January 15 2024`, `15 January`,
/// `January 15`. Longer variants tried first.
fn written_date_at(tokens: &[String], i: usize) -> Option<Span> {
    let month = |k: usize| {
        tokens.get(k).is_some_and(|t| {
            MONTHS.contains(&t.trim_end_matches('.').to_lowercase().as_str())
        })
    };
    let day = |k: usize| tokens.get(k).is_some_and(|t| DAY_OF_MONTH.is_match(t));
    let year = |k: usize| tokens.get(k).is_some_and(|t| YEAR.is_match(t));

    let date = |len: usize| Some(Span::new(i, i + len, EntityType::Date));

    if day(i) && month(i + 1) && year(i + 2) {
        return date(3);
    }
    if month(i) && day(i + 1) && year(i + 2) {
        return date(3);
    }
    if day(i) && month(i + 1) {
        return date(2);
    }
    if month(i) && day(i + 1) {
        return date(2);
    }
    None
}

/// Two-token rules: `15 percent`, `100 dollars`, `$ 100`.
fn number_pair_at(tokens: &[String], i: usize) -> Option<Span> {
    let next = tokens.get(i + 1)?;
    let here = &tokens[i];

    if NUMBER.is_match(here) {
        let word = next.to_lowercase();
        if PERCENT_WORDS.contains(&word.as_str()) {
            return Some(Span::new(i, i + 2, EntityType::Percent));
        }
        if CURRENCY_WORDS.contains(&word.as_str()) {
            return Some(Span::new(i, i + 2, EntityType::Money));
        }
    }
    if CURRENCY_SYMBOLS.contains(&here.as_str()) && NUMBER.is_match(next) {
        return Some(Span::new(i, i + 2, EntityType::Money));
    }
    None
}

/// Single-token rules: ISO/slashed dates, clock times, `15%`, `$100`.
fn single_token_at(tokens: &[String], i: usize) -> Option<Span> {
    let token = &tokens[i];
    let label = if ISO_DATE.is_match(token) || SLASH_DATE.is_match(token) {
        EntityType::Date
    } else if CLOCK.is_match(token) {
        EntityType::Time
    } else if PERCENT_TOKEN.is_match(token) {
        EntityType::Percent
    } else if CURRENCY_TOKEN.is_match(token) {
        EntityType::Money
    } else {
        return None;
    };
    Some(Span::new(i, i + 1, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(words: &[&str]) -> Vec<Span> {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        NumericLexer::new().scan(&tokens)
    }

    #[test]
    fn iso_and_slash_dates() {
        assert_eq!(
            scan(&["due", "2024-01-15", "or", "1/15/2024"]),
            vec![
                Span::new(1, 2, EntityType::Date),
                Span::new(3, 4, EntityType::Date),
            ]
        );
    }

    #[test]
    fn written_dates_prefer_longest() {
        assert_eq!(
            scan(&["on", "15", "January", "2024", "."]),
            vec![Span::new(1, 4, EntityType::Date)]
        );
        assert_eq!(
            scan(&["on", "January", "15", "."]),
            vec![Span::new(1, 3, EntityType::Date)]
        );
    }

    #[test]
    fn abbreviated_month_with_period() {
        assert_eq!(
            scan(&["on", "Jan.", "15"]),
            vec![Span::new(1, 3, EntityType::Date)]
        );
    }

    #[test]
    fn spanish_months() {
        assert_eq!(
            scan(&["el", "15", "enero", "2024"]),
            vec![Span::new(1, 4, EntityType::Date)]
        );
    }

    #[test]
    fn clock_times() {
        assert_eq!(
            scan(&["at", "18:30", "and", "9:05:59"]),
            vec![
                Span::new(1, 2, EntityType::Time),
                Span::new(3, 4, EntityType::Time),
            ]
        );
    }

    #[test]
    fn percentages() {
        assert_eq!(
            scan(&["up", "15%", "then", "3", "percent"]),
            vec![
                Span::new(1, 2, EntityType::Percent),
                Span::new(3, 5, EntityType::Percent),
            ]
        );
    }

    #[test]
    fn currency() {
        assert_eq!(
            scan(&["$100", "or", "50", "euros", "or", "$", "75.50"]),
            vec![
                Span::new(0, 1, EntityType::Money),
                Span::new(2, 4, EntityType::Money),
                Span::new(5, 7, EntityType::Money),
            ]
        );
    }

    #[test]
    fn plain_words_and_numbers_ignored() {
        assert!(scan(&["just", "42", "words"]).is_empty());
        assert!(scan(&[]).is_empty());
    }

    #[test]
    fn output_never_overlaps() {
        let spans = scan(&["15", "January", "2024", "15%", "$", "10"]);
        for w in spans.windows(2) {
            assert!(w[0].end <= w[1].start);
        }
    }
}
