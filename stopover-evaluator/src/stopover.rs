use serde_json::Value;

use crate::record::OfferRecord;

/// How an offer's first itinerary is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// A single flown segment
    Direct,
    /// Connects at the given airport
    Via(String),
    /// Segment list missing, empty or malformed
    Unknown,
}

impl Routing {
    pub fn stopover(&self) -> Option<&str> {
        match self {
            Routing::Via(code) => Some(code.as_str()),
            Routing::Direct | Routing::Unknown => None,
        }
    }
}

/// Classify the first itinerary of an offer.
///
/// With two or more segments the stopover is where the first segment lands,
/// not the final destination.
pub fn resolve_routing(offer: &OfferRecord) -> Routing {
    let Some(segments) = offer
        .get("itineraries")
        .and_then(Value::as_array)
        .and_then(|itineraries| itineraries.first())
        .and_then(|itinerary| itinerary.get("segments"))
        .and_then(Value::as_array)
    else {
        return Routing::Unknown;
    };

    match segments.as_slice() {
        [] => Routing::Unknown,
        [_] => Routing::Direct,
        [first, ..] => first
            .get("arrival")
            .and_then(|arrival| arrival.get("iataCode"))
            .and_then(Value::as_str)
            .filter(|code| !code.trim().is_empty())
            .map(|code| Routing::Via(code.to_string()))
            .unwrap_or(Routing::Unknown),
    }
}

pub fn extract_stopover(offer: &OfferRecord) -> Option<String> {
    resolve_routing(offer).stopover().map(str::to_string)
}
