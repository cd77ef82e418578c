//! Approximate text matching
//!
//! Scores are normalized distances: 0.0 is a perfect match, 1.0 the worst
//! possible one. A candidate matches when its score does not exceed the
//! matcher's threshold.
//!
//! Two measures are combined and the better one wins:
//! - windowed alignment: Levenshtein distance of the query against every
//!   candidate window of roughly the query's length, divided by the query
//!   length, plus a proximity penalty for windows far from the start
//! - whole-field distance: normalized Damerau-Levenshtein (handles
//!   transpositions such as "piazz" / "pizza")
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::discovery::fuzzy::{FuzzyMatcher, WeightedField};
//!
//! let matcher = FuzzyMatcher::new("pizza").with_threshold(0.4);
//!
//! // Score a single candidate
//! let score = matcher.score("Pizza Palace"); // 0.0
//!
//! // Filter and sort a collection on several weighted fields
//! let matches = matcher.filter_and_score(restaurants, |r| {
//!     vec![WeightedField::new(&r.title, 1.0)]
//! });
//! ```

use std::cmp::Ordering;

use strsim::{levenshtein, normalized_damerau_levenshtein};

/// Default worst acceptable score
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Default number of characters over which the proximity penalty reaches 1.0
pub const DEFAULT_DISTANCE: usize = 100;

/// Result of a fuzzy match with the matched entity and its score
#[derive(Debug, Clone)]
pub struct FuzzyMatch<T> {
    /// The matched entity
    pub entity: T,
    /// Normalized distance (0.0 to 1.0, lower is better)
    pub score: f64,
}

impl<T> FuzzyMatch<T> {
    pub fn new(entity: T, score: f64) -> Self {
        Self { entity, score }
    }
}

/// A piece of text to match together with its importance.
///
/// The weighted score is `score.powf(weight)`: weights above 1.0 pull
/// imperfect scores toward 0.0, weights below 1.0 push them toward 1.0.
#[derive(Debug, Clone, Copy)]
pub struct WeightedField<'a> {
    pub text: &'a str,
    pub weight: f64,
}

impl<'a> WeightedField<'a> {
    pub fn new(text: &'a str, weight: f64) -> Self {
        Self { text, weight }
    }
}

/// Fuzzy text matcher with configurable threshold and location tolerance
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Lower-cased query
    query: String,
    /// Query length in characters
    query_len: usize,
    /// Maximum acceptable score (0.0 to 1.0)
    threshold: f64,
    /// Characters over which the proximity penalty grows from 0.0 to 1.0
    distance: usize,
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher with default settings
    pub fn new(query: impl AsRef<str>) -> Self {
        let query = query.as_ref().to_lowercase();
        Self {
            query_len: query.chars().count(),
            query,
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
        }
    }

    /// Set the maximum acceptable score (default: 0.4)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set how far from the start a match may drift before it is
    /// penalized to 1.0 (default: 100 characters)
    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance.max(1);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a candidate string against the query.
    /// Returns a score from 0.0 (perfect) to 1.0 (no resemblance).
    pub fn score(&self, candidate: &str) -> f64 {
        if self.query.is_empty() || candidate.is_empty() {
            return 1.0;
        }

        let text = candidate.to_lowercase();

        // Literal occurrence: only the position costs anything
        if let Some(byte_pos) = text.find(&self.query) {
            let start = text[..byte_pos].chars().count();
            return self.proximity(start).min(1.0);
        }

        let windowed = self.best_window(&text);
        let whole = 1.0 - normalized_damerau_levenshtein(&self.query, &text);

        windowed.min(whole).clamp(0.0, 1.0)
    }

    /// The score if it is within the threshold
    pub fn matches(&self, candidate: &str) -> Option<f64> {
        let score = self.score(candidate);
        (score <= self.threshold).then_some(score)
    }

    /// Best weighted score over several fields, if any is within the threshold.
    ///
    /// Each field is matched independently; the threshold applies to the
    /// weighted score.
    pub fn score_fields<'a, I>(&self, fields: I) -> Option<f64>
    where
        I: IntoIterator<Item = WeightedField<'a>>,
    {
        fields
            .into_iter()
            .map(|field| self.score(field.text).powf(field.weight.max(0.0)))
            .filter(|score| *score <= self.threshold)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Filter and score a collection, returning matches sorted by score
    /// (ascending). Ties keep their input order.
    pub fn filter_and_score<T, F>(&self, items: Vec<T>, get_fields: F) -> Vec<FuzzyMatch<T>>
    where
        F: for<'t> Fn(&'t T) -> Vec<WeightedField<'t>>,
    {
        let mut matches: Vec<FuzzyMatch<T>> = items
            .into_iter()
            .filter_map(|item| {
                let score = self.score_fields(get_fields(&item))?;
                Some(FuzzyMatch::new(item, score))
            })
            .collect();

        // Stable sort keeps input order for equal scores
        matches.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        matches
    }

    fn proximity(&self, start: usize) -> f64 {
        start as f64 / self.distance as f64
    }

    /// Lowest windowed alignment score, 1.0 when the text is too short
    fn best_window(&self, text: &str) -> f64 {
        let chars: Vec<char> = text.chars().collect();
        let min_len = self.query_len.saturating_sub(1).max(1);
        let max_len = self.query_len + 1;

        let mut best = 1.0_f64;
        for len in min_len..=max_len {
            if len > chars.len() {
                break;
            }
            for start in 0..=(chars.len() - len) {
                let proximity = self.proximity(start);
                if proximity >= best {
                    break;
                }
                let window: String = chars[start..start + len].iter().collect();
                let errors = levenshtein(&self.query, &window) as f64 / self.query_len as f64;
                best = best.min(errors + proximity);
            }
        }
        best
    }
}
