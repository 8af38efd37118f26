use serde::{Serialize, Serializer};
use stopover_core::RawInput;
use tracing::{debug, info};

use crate::config::RankingConfig;
use crate::ingest::ingest;
use crate::interests::InterestScorer;
use crate::price::{PriceError, PriceExtractor};
use crate::record::OfferRecord;
use crate::stopover::resolve_routing;

/// One shortlisted offer, in the shape handed to itinerary planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: String,
    pub price: f64,
    pub stopover_city: Option<String>,
    pub score: f64,
    pub summary: String,
    #[serde(skip)]
    pub bonus: f64,
}

impl RankedEntry {
    fn new(id: String, price: f64, stopover_city: Option<String>, bonus: f64) -> Self {
        let summary = format!(
            "Flight {}: €{} via {}",
            id,
            format_amount(price),
            stopover_city.as_deref().unwrap_or("Direct")
        );
        Self {
            id,
            price,
            stopover_city,
            score: price - bonus,
            summary,
            bonus,
        }
    }
}

/// Why an offer never made it to scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error("price {price} exceeds budget {max_price}")]
    OverBudget { price: f64, max_price: f64 },
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedOffer {
    /// Position in the ingested list
    pub index: usize,
    pub id: String,
    pub reason: SkipReason,
}

/// Outcome of one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Offers recovered from the raw payload
    pub ingested: usize,
    pub ranked: Vec<RankedEntry>,
    pub skipped: Vec<SkippedOffer>,
}

/// Caller-imposed filters applied before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub max_price: Option<f64>,
}

/// Price-minus-bonus offer ranking. Lower scores rank first.
#[derive(Debug, Clone)]
pub struct Ranker {
    top_k: usize,
    prices: PriceExtractor,
    interests: InterestScorer,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(&RankingConfig::default())
    }
}

impl Ranker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            top_k: config.top_k,
            prices: PriceExtractor::new(config.price_keys.clone()),
            interests: InterestScorer::from_config(config),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Ingest a raw payload and rank it.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        raw: RawInput,
        interests: &[S],
        constraints: Constraints,
    ) -> Evaluation {
        let offers = ingest(raw);
        self.rank_with(&offers, interests, constraints)
    }

    pub fn rank<S: AsRef<str>>(&self, offers: &[OfferRecord], interests: &[S]) -> Vec<RankedEntry> {
        self.rank_with(offers, interests, Constraints::default()).ranked
    }

    /// Score every offer, stable-sort by ascending score and keep the top `k`.
    ///
    /// Offers that cannot be scored are reported in `skipped` rather than
    /// failing the run, so this never returns an error.
    pub fn rank_with<S: AsRef<str>>(
        &self,
        offers: &[OfferRecord],
        interests: &[S],
        constraints: Constraints,
    ) -> Evaluation {
        let mut scored = Vec::with_capacity(offers.len());
        let mut skipped = Vec::new();

        for (index, offer) in offers.iter().enumerate() {
            match self.score_offer(offer, interests, constraints) {
                Ok(entry) => scored.push(entry),
                Err(reason) => {
                    let id = offer.id();
                    debug!(index, id = %id, reason = %reason, "skipping offer");
                    skipped.push(SkippedOffer { index, id, reason });
                }
            }
        }

        // Vec::sort_by is stable, equal scores keep ingestion order.
        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(self.top_k);

        info!(
            ingested = offers.len(),
            ranked = scored.len(),
            skipped = skipped.len(),
            "offer evaluation complete"
        );

        Evaluation {
            ingested: offers.len(),
            ranked: scored,
            skipped,
        }
    }

    fn score_offer<S: AsRef<str>>(
        &self,
        offer: &OfferRecord,
        interests: &[S],
        constraints: Constraints,
    ) -> Result<RankedEntry, SkipReason> {
        let price = self.prices.resolve(offer)?.amount;

        if let Some(max_price) = constraints.max_price {
            if price > max_price {
                return Err(SkipReason::OverBudget { price, max_price });
            }
        }

        let routing = resolve_routing(offer);
        let stopover = routing.stopover();
        let bonus = self.interests.score(stopover, interests);

        Ok(RankedEntry::new(offer.id(), price, stopover.map(str::to_string), bonus))
    }
}

/// Rank with default settings, keeping the best `k` offers.
pub fn rank<S: AsRef<str>>(offers: &[OfferRecord], interests: &[S], k: usize) -> Vec<RankedEntry> {
    Ranker::default().with_top_k(k).rank(offers, interests)
}

// Whole amounts keep a trailing `.0` (`400.0`). Exponent forms carry an
// explicit sign and at least two digits (`1e+16`, `1e-05`).
fn format_amount(amount: f64) -> String {
    let text = format!("{:?}", amount);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}
