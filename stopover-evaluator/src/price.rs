use serde::Serialize;
use serde_json::Value;

use crate::config::DEFAULT_PRICE_KEYS;
use crate::record::OfferRecord;

/// Which representation the price was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// `price: { <key>: ... }`
    Nested(String),
    /// `price: 401.74`
    Numeric,
    /// `price: "EUR 401.74"`
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    pub amount: f64,
    pub source: PriceSource,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("offer has no price")]
    Missing,
    #[error("price has an unrecognized shape")]
    UnrecognizedShape,
    #[error("price {0:?} is not a number")]
    Unparseable(String),
    #[error("price {0} is negative")]
    Negative(f64),
}

/// Resolves one canonical amount per offer across provider price layouts.
///
/// Strategies are tried in a fixed order: nested object (first configured
/// sub-key present wins), plain number, then free-form string.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    keys: Vec<String>,
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_KEYS.iter().map(|k| k.to_string()).collect())
    }
}

impl PriceExtractor {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn resolve(&self, offer: &OfferRecord) -> Result<Price, PriceError> {
        match offer.get("price") {
            None | Some(Value::Null) => Err(PriceError::Missing),
            Some(Value::Object(nested)) => {
                let (key, value) = self
                    .keys
                    .iter()
                    .find_map(|key| nested.get(key.as_str()).map(|value| (key, value)))
                    .ok_or(PriceError::UnrecognizedShape)?;
                let amount = match value {
                    Value::Number(n) => number_amount(n)?,
                    Value::String(s) => coerce_amount(s)?,
                    other => return Err(PriceError::Unparseable(other.to_string())),
                };
                Ok(Price { amount, source: PriceSource::Nested(key.clone()) })
            }
            Some(Value::Number(n)) => Ok(Price { amount: number_amount(n)?, source: PriceSource::Numeric }),
            Some(Value::String(s)) => Ok(Price { amount: coerce_amount(s)?, source: PriceSource::Text }),
            Some(_) => Err(PriceError::UnrecognizedShape),
        }
    }

    pub fn extract(&self, offer: &OfferRecord) -> Option<f64> {
        self.resolve(offer).ok().map(|price| price.amount)
    }
}

/// Parse an amount out of text such as `"EUR 1,401.74"` by keeping only
/// ASCII digits and dots.
pub fn coerce_amount(raw: &str) -> Result<f64, PriceError> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| PriceError::Unparseable(raw.to_string()))
}

fn number_amount(n: &serde_json::Number) -> Result<f64, PriceError> {
    let amount = n.as_f64().ok_or_else(|| PriceError::Unparseable(n.to_string()))?;
    if amount < 0.0 {
        return Err(PriceError::Negative(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(value: Value) -> OfferRecord {
        OfferRecord::new(value)
    }

    #[test]
    fn test_equivalent_representations_agree() {
        let extractor = PriceExtractor::default();
        for value in [
            json!({"price": {"total": "401.74"}}),
            json!({"price": "401.74"}),
            json!({"price": 401.74}),
        ] {
            assert_eq!(extractor.extract(&offer(value)), Some(401.74));
        }
    }

    #[test]
    fn test_reports_which_strategy_matched() {
        let extractor = PriceExtractor::default();
        let price = extractor.resolve(&offer(json!({"price": {"grandTotal": "EUR 512.30"}}))).unwrap();
        assert_eq!(price.amount, 512.30);
        assert_eq!(price.source, PriceSource::Nested("grandTotal".to_string()));

        let price = extractor.resolve(&offer(json!({"price": 300}))).unwrap();
        assert_eq!(price.source, PriceSource::Numeric);

        let price = extractor.resolve(&offer(json!({"price": "€ 1,250.50"}))).unwrap();
        assert_eq!(price.amount, 1250.50);
        assert_eq!(price.source, PriceSource::Text);
    }

    #[test]
    fn test_first_present_key_wins() {
        let extractor = PriceExtractor::default();
        let record = offer(json!({"price": {"amount": "10", "total": "20", "grandTotal": "30"}}));
        assert_eq!(extractor.extract(&record), Some(20.0));

        // A present but broken key does not fall through to the next one.
        let record = offer(json!({"price": {"total": "N/A", "amount": "10"}}));
        assert_eq!(
            extractor.resolve(&record),
            Err(PriceError::Unparseable("N/A".to_string()))
        );
    }

    #[test]
    fn test_custom_keys() {
        let extractor = PriceExtractor::new(vec!["base".to_string()]);
        assert_eq!(extractor.extract(&offer(json!({"price": {"base": "88"}}))), Some(88.0));
        assert_eq!(
            extractor.resolve(&offer(json!({"price": {"total": "88"}}))),
            Err(PriceError::UnrecognizedShape)
        );
    }

    #[test]
    fn test_failures_are_named() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.resolve(&offer(json!({"id": "1"}))), Err(PriceError::Missing));
        assert_eq!(extractor.resolve(&offer(json!({"price": null}))), Err(PriceError::Missing));
        assert_eq!(
            extractor.resolve(&offer(json!({"price": "N/A"}))),
            Err(PriceError::Unparseable("N/A".to_string()))
        );
        assert_eq!(
            extractor.resolve(&offer(json!({"price": ""}))),
            Err(PriceError::Unparseable(String::new()))
        );
        assert_eq!(
            extractor.resolve(&offer(json!({"price": "1.2.3"}))),
            Err(PriceError::Unparseable("1.2.3".to_string()))
        );
        assert_eq!(extractor.resolve(&offer(json!({"price": [1, 2]}))), Err(PriceError::UnrecognizedShape));
        assert_eq!(extractor.resolve(&offer(json!({"price": -5}))), Err(PriceError::Negative(-5.0)));
        assert_eq!(extractor.resolve(&offer(json!({"price": {}}))), Err(PriceError::UnrecognizedShape));
    }

    #[test]
    fn test_coerce_amount_strips_sign_and_symbols() {
        assert_eq!(coerce_amount("-42.5 EUR"), Ok(42.5));
        assert_eq!(coerce_amount(".5"), Ok(0.5));
        assert!(coerce_amount(".").is_err());
    }
}
