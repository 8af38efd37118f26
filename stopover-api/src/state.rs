use std::sync::Arc;
use stopover_core::FlightOfferSource;
use stopover_evaluator::RankingConfig;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FlightOfferSource>,
    pub ranking: RankingConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn FlightOfferSource>, ranking: RankingConfig) -> Self {
        Self { source, ranking }
    }
}
