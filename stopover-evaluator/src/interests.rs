use crate::config::{RankingConfig, DEFAULT_BONUS_PER_MATCH};

/// Rewards stopovers that match what the traveller cares about.
#[derive(Debug, Clone)]
pub struct InterestScorer {
    bonus_per_match: f64,
    max_bonus: Option<f64>,
}

impl Default for InterestScorer {
    fn default() -> Self {
        Self::new(DEFAULT_BONUS_PER_MATCH, None)
    }
}

impl InterestScorer {
    pub fn new(bonus_per_match: f64, max_bonus: Option<f64>) -> Self {
        Self { bonus_per_match, max_bonus }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.bonus_per_match, config.max_bonus)
    }

    /// Sum of `bonus_per_match` over every interest contained in the stopover
    /// code. Duplicated interests count again; the total is only bounded when
    /// `max_bonus` is set. An interest that normalizes to nothing is contained
    /// in every code and so always matches.
    pub fn score<S: AsRef<str>>(&self, stopover: Option<&str>, interests: &[S]) -> f64 {
        let Some(stopover) = stopover else {
            return 0.0;
        };
        let haystack = stopover.to_lowercase();

        let matches = interests
            .iter()
            .map(|interest| normalize_interest(interest.as_ref()))
            .filter(|token| haystack.contains(token.as_str()))
            .count();

        let bonus = (matches as f64 * self.bonus_per_match).max(0.0);
        match self.max_bonus {
            Some(cap) => bonus.min(cap.max(0.0)),
            None => bonus,
        }
    }
}

/// Lowercase and drop punctuation and symbols (emoji included).
pub fn normalize_interest(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
