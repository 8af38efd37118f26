pub mod raw;
pub mod source;
pub mod trip;

pub use raw::RawInput;
pub use source::FlightOfferSource;
pub use trip::{TripQuery, TripRequest};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Offer source failed: {0}")]
    SourceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
