//! The rule-based numeric source.

use crate::lexer::NumericLexer;
use crate::sources::NameFinder;
use crate::span::Span;
use crate::Result;

/// Numeric name finding via the format rules in [`NumericLexer`].
///
/// Stateless and infallible; exists so the lexer plugs into the same seam
/// as the other sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFinder {
    lexer: NumericLexer,
}

impl NumericFinder {
    /// Create a numeric finder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameFinder for NumericFinder {
    fn spans(&mut self, tokens: &[String]) -> Result<Vec<Span>> {
        Ok(self.lexer.scan(tokens))
    }
}
