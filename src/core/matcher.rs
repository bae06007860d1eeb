use crate::core::{filters::filter_by_size, scoring::calculate_breed_score, Catalog};
use crate::error::InvalidPreferenceError;
use crate::models::{PreferenceVector, ScoredBreed};

/// Number of breeds in a shortlist
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// Result of the matching process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    pub matches: Vec<ScoredBreed>,
    pub total_candidates: usize,
}

impl MatchResult {
    /// Breed names in ranked order
    pub fn breeds(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.breed.as_str()).collect()
    }

    /// Scores in ranked order, parallel to [`MatchResult::breeds`]
    pub fn scores(&self) -> Vec<f64> {
        self.matches.iter().map(|m| m.score).collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Size filter
/// 2. Weighted scoring
/// 3. Stable ranking by score, descending
/// 4. Truncation to the shortlist length
///
/// Holds no state between calls; the catalog is only read.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    limit: usize,
}

impl Matcher {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Find the best matching breeds for a preference vector
    ///
    /// Breeds with equal scores keep their catalog order. An empty size
    /// partition yields an empty result, not an error.
    pub fn find_matches(&self, catalog: &Catalog, preference: &PreferenceVector) -> MatchResult {
        let mut scored: Vec<ScoredBreed> = filter_by_size(catalog, preference.size)
            .map(|record| ScoredBreed {
                breed: record.breed().to_string(),
                score: calculate_breed_score(record, &preference.weights),
            })
            .collect();

        let total_candidates = scored.len();

        // sort_by is stable, which gives the tie-break
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.limit);

        tracing::debug!(
            "Matched {} of {} candidates (size: {:?})",
            scored.len(),
            total_candidates,
            preference.size
        );

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }

    /// Parse textual weights and a size selector, then find matches
    pub fn find_matches_for<S: AsRef<str>>(
        &self,
        catalog: &Catalog,
        weights: &[S],
        size: &str,
    ) -> Result<MatchResult, InvalidPreferenceError> {
        let preference = PreferenceVector::parse(weights, size)?;
        Ok(self.find_matches(catalog, &preference))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_LIMIT)
    }
}
