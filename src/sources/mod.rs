//! Span-producing sources.
//!
//! Each source turns one tokenized sentence into candidate entity spans;
//! the [`Annotator`](crate::Annotator) decides which sources run and how
//! their outputs are reconciled. Sources are a closed set constructed from
//! configuration — no runtime plugin loading:
//!
//! | Source | Signal | Produces |
//! |--------|--------|----------|
//! | [`StatisticalFinder`] | external sequence tagger | anything the model was trained on |
//! | [`DictionaryFinder`] | gazetteer stack | known surface forms |
//! | [`NumericFinder`] | format rules | dates, times, percents, currency |

mod dictionary;
mod numeric;
mod statistical;

pub use dictionary::DictionaryFinder;
pub use numeric::NumericFinder;
pub use statistical::{MockTagger, SequenceTagger, StatisticalFinder};

use crate::error::Result;
use crate::span::Span;

/// A per-sentence producer of candidate entity spans.
///
/// `spans` takes `&mut self` because the statistical source carries
/// cross-sentence adaptive state; stateless sources simply ignore it.
pub trait NameFinder {
    /// Candidate spans for one tokenized sentence. Spans from one call may
    /// overlap each other; reconciliation is the caller's job.
    fn spans(&mut self, tokens: &[String]) -> Result<Vec<Span>>;

    /// Forget any memory of recent decisions.
    ///
    /// Called by the annotator at sentence or document boundaries
    /// depending on the configured policy. A no-op for stateless sources.
    fn clear_adaptive_data(&mut self) {}
}
