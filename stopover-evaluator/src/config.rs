use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: usize = 2;
pub const DEFAULT_BONUS_PER_MATCH: f64 = 20.0;
pub const DEFAULT_PRICE_KEYS: [&str; 3] = ["total", "grandTotal", "amount"];

/// Tuning knobs for offer ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of offers kept after sorting
    pub top_k: usize,
    /// Bonus subtracted from the price for every matching interest
    pub bonus_per_match: f64,
    /// Upper bound on the summed bonus. `None` lets matches stack freely.
    pub max_bonus: Option<f64>,
    /// Sub-keys probed, in order, when the price is a nested object
    pub price_keys: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            bonus_per_match: DEFAULT_BONUS_PER_MATCH,
            max_bonus: None,
            price_keys: DEFAULT_PRICE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}
