use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Decides whether a stored entry is close enough to the live query to show
pub trait CloseMatch {
    fn is_close_match(&self, candidate: &str, live_query: &str) -> bool;
}

/// fzf-style close match: every space-separated term of the live query must
/// fuzzy-match the candidate
pub struct FuzzyCloseMatch {
    matcher: SkimMatcherV2,
}

impl fmt::Debug for FuzzyCloseMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyCloseMatch").finish_non_exhaustive()
    }
}

impl Default for FuzzyCloseMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyCloseMatch {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Combined score of all terms, `None` if any term fails to match
    pub fn score(&self, candidate: &str, live_query: &str) -> Option<i64> {
        let terms: Vec<&str> = live_query.split_whitespace().collect();
        if terms.is_empty() {
            return Some(0);
        }

        // All terms must match (AND logic)
        let mut total_score: i64 = 0;
        for term in &terms {
            total_score += self.matcher.fuzzy_match(candidate, term)?;
        }
        Some(total_score)
    }
}

impl CloseMatch for FuzzyCloseMatch {
    fn is_close_match(&self, candidate: &str, live_query: &str) -> bool {
        self.score(candidate, live_query).is_some()
    }
}

impl<F> CloseMatch for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_close_match(&self, candidate: &str, live_query: &str) -> bool {
        self(candidate, live_query)
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod matcher_tests;
