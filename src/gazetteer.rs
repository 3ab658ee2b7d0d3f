//! Gazetteer (dictionary) loading and token-window matching.
//!
//! A gazetteer file is a two-column, tab-separated list of known surface
//! forms: `Barack Obama<TAB>person`. A directory of such files — one file
//! per entity list — loads into a [`GazetteerStack`] holding an exact-case
//! and an ignore-case view of every file.
//!
//! Two lookup strategies are provided, matching the two ways gazetteers are
//! consumed:
//!
//! - [`Gazetteer::match_longest`] — greedy longest-match-first scan used
//!   when a single dictionary tags a sentence on its own. Non-overlapping
//!   by construction: matched tokens are skipped.
//! - [`Gazetteer::match_all`] — exhaustive per-entry search used when a
//!   stack of dictionaries feeds the combiner. Overlaps are allowed here;
//!   resolution happens downstream.
//!
//! Matching is O(n²) per sentence in the worst case. Sentences are short,
//! so the window scan beats maintaining a trie or automaton.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::entity::EntityType;
use crate::error::Result;
use crate::span::Span;

/// Surface forms never inserted into ignore-case views.
///
/// Short closed-class words that collide with entity abbreviations once
/// case is folded ("US" the country vs "us" the pronoun). Fixed
/// configuration, not computed.
const AMBIGUOUS_FORMS: &[&str] = &["in", "on", "us", "or", "am"];

/// How a gazetteer normalizes its keys and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// Keys and queries compared exactly as written.
    #[default]
    Exact,
    /// Keys lower-cased at load, queries lower-cased at lookup.
    /// Forms on the ambiguous-word list are dropped from this view.
    IgnoreCase,
}

/// One dictionary: an immutable surface-form → entity-type map.
///
/// Loaded once, then shared read-only; nothing here mutates after
/// construction, so a gazetteer can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    name: String,
    case_mode: CaseMode,
    entries: HashMap<String, EntityType>,
    /// Longest entry, in tokens. Bounds the window search.
    max_entry_tokens: usize,
}

impl Gazetteer {
    /// Build a gazetteer from `(surface form, type)` pairs.
    pub fn from_entries<I, S>(name: impl Into<String>, case_mode: CaseMode, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, EntityType)>,
        S: AsRef<str>,
    {
        let mut gazetteer = Self {
            name: name.into(),
            case_mode,
            entries: HashMap::new(),
            max_entry_tokens: 0,
        };
        for (form, label) in entries {
            gazetteer.insert(form.as_ref(), label);
        }
        gazetteer
    }

    /// Load a gazetteer from tab-separated `form<TAB>type` lines.
    ///
    /// Malformed lines are skipped with a warning rather than failing the
    /// load: one bad dictionary row must not abort a run.
    pub fn from_reader(
        name: impl Into<String>,
        case_mode: CaseMode,
        reader: impl BufRead,
    ) -> Result<Self> {
        let name = name.into();
        let entries = parse_entries(&name, reader)?;
        Ok(Self::from_entries(name, case_mode, entries))
    }

    /// Load a gazetteer file from disk.
    pub fn from_path(path: impl AsRef<Path>, case_mode: CaseMode) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(name, case_mode, file)
    }

    fn insert(&mut self, form: &str, label: EntityType) {
        let key = match self.case_mode {
            CaseMode::Exact => form.to_string(),
            CaseMode::IgnoreCase => {
                if AMBIGUOUS_FORMS.iter().any(|w| form.eq_ignore_ascii_case(w)) {
                    log::debug!(
                        "gazetteer {}: skipping ambiguous form {:?} in ignore-case view",
                        self.name,
                        form
                    );
                    return;
                }
                form.to_lowercase()
            }
        };
        self.max_entry_tokens = self.max_entry_tokens.max(key.split(' ').count());
        self.entries.insert(key, label);
    }

    /// Dictionary name (file stem for file-backed gazetteers).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The case handling fixed at load time.
    #[must_use]
    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the gazetteer holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a surface form, normalized per the gazetteer's case mode.
    #[must_use]
    pub fn lookup(&self, form: &str) -> Option<&EntityType> {
        match self.case_mode {
            CaseMode::Exact => self.entries.get(form),
            CaseMode::IgnoreCase => self.entries.get(&form.to_lowercase()),
        }
    }

    /// Exhaustive search: every occurrence of every entry, overlaps allowed.
    ///
    /// Used for multi-dictionary stacks whose hits are reconciled
    /// downstream; no mutual exclusion is applied here. Output is sorted
    /// by `(start, end, label)` so it never depends on map iteration order.
    #[must_use]
    pub fn match_all(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans = Vec::new();
        for (form, label) in &self.entries {
            let pattern: Vec<&str> = form.split(' ').collect();
            if pattern.is_empty() || pattern.len() > tokens.len() {
                continue;
            }
            for start in 0..=tokens.len() - pattern.len() {
                let window = &tokens[start..start + pattern.len()];
                let hit = match self.case_mode {
                    CaseMode::Exact => window.iter().zip(&pattern).all(|(t, p)| t == p),
                    CaseMode::IgnoreCase => window
                        .iter()
                        .zip(&pattern)
                        .all(|(t, p)| t.to_lowercase() == **p),
                };
                if hit {
                    spans.push(Span::new(start, start + pattern.len(), label.clone()));
                }
            }
        }
        // Map iteration order is arbitrary; pin the output order down.
        spans.sort_by(|a, b| {
            (a.start, a.end, a.label.as_label()).cmp(&(b.start, b.end, b.label.as_label()))
        });
        spans
    }

    /// Longest-match scan (see module docs). Matched tokens are consumed:
    /// no overlapping or nested matches come out of one pass.
    #[must_use]
    pub fn match_longest(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let max_end = tokens.len().min(i + self.max_entry_tokens);
            let mut found = None;
            for j in (i + 1..=max_end).rev() {
                let window = tokens[i..j].join(" ");
                if let Some(label) = self.lookup(&window) {
                    found = Some(Span::new(i, j, label.clone()));
                    break;
                }
            }
            match found {
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

/// A directory's worth of gazetteers, each loaded into an exact-case and an
/// ignore-case view (the two views serve different tagging modes).
#[derive(Debug, Clone, Default)]
pub struct GazetteerStack {
    exact: Vec<Gazetteer>,
    ignore_case: Vec<Gazetteer>,
}

impl GazetteerStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file in `dir` as a gazetteer.
    ///
    /// Files load in name order so that the stack's contents do not depend
    /// on directory iteration order.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut stack = Self::new();
        for path in &paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let entries = parse_entries(&name, BufReader::new(File::open(path)?))?;
            stack.push_entries(name, entries);
        }
        log::info!(
            "loaded {} gazetteers from {}",
            stack.num_gazetteers(),
            dir.display()
        );
        Ok(stack)
    }

    /// Add one dictionary's entries to both views.
    pub fn push_entries<I, S>(&mut self, name: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = (S, EntityType)>,
        S: AsRef<str> + Clone,
    {
        let name = name.into();
        let entries: Vec<(S, EntityType)> = entries.into_iter().collect();
        self.exact.push(Gazetteer::from_entries(
            name.clone(),
            CaseMode::Exact,
            entries.iter().cloned(),
        ));
        self.ignore_case.push(Gazetteer::from_entries(
            name,
            CaseMode::IgnoreCase,
            entries,
        ));
    }

    /// Number of loaded gazetteers.
    #[must_use]
    pub fn num_gazetteers(&self) -> usize {
        self.exact.len()
    }

    /// Whether no gazetteers are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// The exact-case gazetteers.
    #[must_use]
    pub fn exact(&self) -> &[Gazetteer] {
        &self.exact
    }

    /// The ignore-case gazetteers.
    #[must_use]
    pub fn ignore_case(&self) -> &[Gazetteer] {
        &self.ignore_case
    }

    /// Every hit of every entry across all exact-case views.
    #[must_use]
    pub fn match_all_exact(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .exact
            .iter()
            .flat_map(|g| g.match_all(tokens))
            .collect();
        spans.sort_by(|a, b| {
            (a.start, a.end, a.label.as_label()).cmp(&(b.start, b.end, b.label.as_label()))
        });
        spans
    }

    /// Every hit of every entry across all ignore-case views.
    #[must_use]
    pub fn match_all_ignore_case(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .ignore_case
            .iter()
            .flat_map(|g| g.match_all(tokens))
            .collect();
        spans.sort_by(|a, b| {
            (a.start, a.end, a.label.as_label()).cmp(&(b.start, b.end, b.label.as_label()))
        });
        spans
    }
}

/// Parse tab-separated `form<TAB>type` lines, skipping malformed ones.
fn parse_entries(name: &str, reader: impl BufRead) -> Result<Vec<(String, EntityType)>> {
    let mut entries = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((form, label)) if !form.is_empty() && !label.is_empty() => {
                entries.push((form.to_string(), EntityType::from_label(label)));
            }
            _ => {
                log::warn!(
                    "gazetteer {}: skipping malformed line {}: {:?}",
                    name,
                    line_no + 1,
                    line
                );
            }
        }
    }
    Ok(entries)
}
