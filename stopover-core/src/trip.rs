use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip request as received from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin IATA code, e.g. `MEL`
    pub origin: String,
    /// Destination IATA code, e.g. `BLR`
    pub destination: String,
    /// Departure date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    /// Optional max price in EUR
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub preferred_airlines: Option<Vec<String>>,
}

/// A validated trip request with normalized airport codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub interests: Vec<String>,
    pub max_price: Option<f64>,
    pub preferred_airlines: Vec<String>,
}

impl TripRequest {
    pub fn validate(self) -> CoreResult<TripQuery> {
        let origin = normalize_airport("origin", &self.origin)?;
        let destination = normalize_airport("destination", &self.destination)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            CoreError::ValidationError(format!(
                "date must use YYYY-MM-DD format, got {:?}",
                self.date
            ))
        })?;

        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() || max_price < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "max_price must be a non-negative amount, got {}",
                    max_price
                )));
            }
        }

        Ok(TripQuery {
            origin,
            destination,
            date,
            interests: self.interests.unwrap_or_default(),
            max_price: self.max_price,
            preferred_airlines: self.preferred_airlines.unwrap_or_default(),
        })
    }
}

fn normalize_airport(field: &str, code: &str) -> CoreResult<String> {
    let code = code.trim().to_uppercase();
    let len = code.chars().count();
    if !(3..=5).contains(&len) {
        return Err(CoreError::ValidationError(format!(
            "{} must be 3 to 5 characters, got {:?}",
            field, code
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: &str, destination: &str, date: &str) -> TripRequest {
        TripRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date: date.to_string(),
            interests: None,
            max_price: None,
            preferred_airlines: None,
        }
    }

    #[test]
    fn test_trip_request_deserialization_defaults() {
        let json = r#"
            {
                "origin": "mel",
                "destination": "BLR",
                "date": "2025-08-01"
            }
        "#;
        let req: TripRequest = serde_json::from_str(json).expect("Failed to deserialize");
        let trip = req.validate().expect("valid request");

        assert_eq!(trip.origin, "MEL");
        assert_eq!(trip.date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert!(trip.interests.is_empty());
        assert!(trip.preferred_airlines.is_empty());
        assert_eq!(trip.max_price, None);
    }

    #[test]
    fn test_airport_codes_are_trimmed_and_uppercased() {
        let trip = request("  syd ", "hkg", "2025-08-01").validate().unwrap();
        assert_eq!(trip.origin, "SYD");
        assert_eq!(trip.destination, "HKG");
    }

    #[test]
    fn test_rejects_bad_airport_code() {
        let err = request("ME", "BLR", "2025-08-01").validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref msg) if msg.contains("origin")));

        let err = request("MEL", "BANGALORE", "2025-08-01").validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref msg) if msg.contains("destination")));
    }

    #[test]
    fn test_rejects_bad_date_and_negative_budget() {
        assert!(request("MEL", "BLR", "01/08/2025").validate().is_err());

        let mut req = request("MEL", "BLR", "2025-08-01");
        req.max_price = Some(-1.0);
        assert!(req.validate().is_err());
    }
}
