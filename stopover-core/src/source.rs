use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{CoreResult, RawInput};

#[async_trait]
pub trait FlightOfferSource: Send + Sync {
    /// Fetch candidate offers for a single origin/destination/date leg.
    ///
    /// The payload is returned untouched; normalization is the evaluator's job.
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> CoreResult<RawInput>;
}
