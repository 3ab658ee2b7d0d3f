//! The gazetteer source: exhaustive dictionary hits over a sentence.

use std::sync::Arc;

use crate::gazetteer::{CaseMode, GazetteerStack};
use crate::sources::NameFinder;
use crate::span::Span;
use crate::Result;

/// Dictionary name finding over a shared gazetteer stack.
///
/// Runs the stack's `match_all` search in one of the two views; hits may
/// overlap each other and are reconciled by the annotator. The stack is
/// behind an `Arc` so several annotators (one per concurrent document) can
/// share one loaded copy.
pub struct DictionaryFinder {
    stack: Arc<GazetteerStack>,
    case_mode: CaseMode,
}

impl DictionaryFinder {
    /// Match against the exact-case views.
    #[must_use]
    pub fn exact(stack: Arc<GazetteerStack>) -> Self {
        Self {
            stack,
            case_mode: CaseMode::Exact,
        }
    }

    /// Match against the ignore-case views.
    #[must_use]
    pub fn ignore_case(stack: Arc<GazetteerStack>) -> Self {
        Self {
            stack,
            case_mode: CaseMode::IgnoreCase,
        }
    }

    /// The view this finder matches against.
    #[must_use]
    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }
}

impl NameFinder for DictionaryFinder {
    fn spans(&mut self, tokens: &[String]) -> Result<Vec<Span>> {
        Ok(match self.case_mode {
            CaseMode::Exact => self.stack.match_all_exact(tokens),
            CaseMode::IgnoreCase => self.stack.match_all_ignore_case(tokens),
        })
    }
}
