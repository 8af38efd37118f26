pub mod config;
pub mod ingest;
pub mod interests;
pub mod price;
pub mod ranker;
pub mod record;
pub mod stopover;

pub use config::RankingConfig;
pub use ingest::ingest;
pub use interests::InterestScorer;
pub use price::{Price, PriceError, PriceExtractor, PriceSource};
pub use ranker::{rank, Constraints, Evaluation, RankedEntry, Ranker, SkipReason, SkippedOffer};
pub use record::OfferRecord;
pub use stopover::{extract_stopover, resolve_routing, Routing};
pub use stopover_core::RawInput;
