use serde_json::{Map, Value};
use stopover_core::RawInput;
use tracing::{debug, warn};

use crate::record::OfferRecord;

const ID_LABEL: &str = "\"id\":";
const TOTAL_LABEL: &str = "\"total\":";

/// Normalize any accepted payload shape into an ordered list of offer records.
///
/// Never fails: input that yields no recognizable offers produces an empty list.
pub fn ingest(raw: RawInput) -> Vec<OfferRecord> {
    match raw {
        RawInput::Records(items) => into_records(items),
        RawInput::Text(text) => ingest_text(&text),
        RawInput::Document(Value::String(text)) => ingest_text(&text),
        RawInput::Document(value) => from_document(value).unwrap_or_default(),
    }
}

fn ingest_text(text: &str) -> Vec<OfferRecord> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => from_document(value).unwrap_or_else(|| scan_lines(text)),
        Err(err) => {
            warn!(error = %err, "offer payload is not valid JSON, falling back to line scan");
            scan_lines(text)
        }
    }
}

/// Records from a parsed JSON document, or `None` if it has no offer shape.
///
/// Arrays are taken as-is, `{"data": [...]}` envelopes are unwrapped and any
/// other object is a single offer.
fn from_document(value: Value) -> Option<Vec<OfferRecord>> {
    match value {
        Value::Array(items) => Some(into_records(items)),
        Value::Object(mut map) => {
            if matches!(map.get("data"), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = map.remove("data") {
                    debug!(count = items.len(), "unwrapped offer envelope");
                    return Some(into_records(items));
                }
            }
            Some(vec![OfferRecord::new(Value::Object(map))])
        }
        _ => None,
    }
}

fn into_records(items: Vec<Value>) -> Vec<OfferRecord> {
    items.into_iter().map(OfferRecord::new).collect()
}

/// Best-effort recovery of offers from a text dump.
///
/// A line containing `"id":` starts a new offer; a line containing `"total":`
/// sets `price.total` on the offer being built. Everything else is ignored.
pub fn scan_lines(text: &str) -> Vec<OfferRecord> {
    let mut offers = Vec::new();
    let mut current = Map::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(id) = labelled_value(line, ID_LABEL) {
            if !current.is_empty() {
                offers.push(OfferRecord::new(Value::Object(std::mem::take(&mut current))));
            }
            current.insert("id".to_string(), Value::String(id));
        } else if let Some(total) = labelled_value(line, TOTAL_LABEL) {
            let price = current
                .entry("price")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(price) = price {
                price.insert("total".to_string(), Value::String(total));
            }
        }
    }

    if !current.is_empty() {
        offers.push(OfferRecord::new(Value::Object(current)));
    }

    debug!(count = offers.len(), "line scan recovered offers");
    offers
}

/// Text following `label` up to the next comma, without surrounding spaces or quotes.
fn labelled_value(line: &str, label: &str) -> Option<String> {
    let (_, rest) = line.split_once(label)?;
    let value = rest.split(',').next().unwrap_or_default();
    Some(value.trim_matches(|c| c == ' ' || c == '"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_pass_through_in_order() {
        let offers = ingest(RawInput::Records(vec![json!({"id": "b"}), json!({"id": "a"}), json!(42)]));
        assert_eq!(offers.len(), 3);
        assert_eq!(offers[0].id(), "b");
        assert_eq!(offers[1].id(), "a");
        assert_eq!(offers[2].as_value(), &json!(42));
    }

    #[test]
    fn test_json_text_is_parsed_structurally() {
        let text = r#"[{"id": "1", "price": {"total": "401.74"}}, {"id": "2", "price": 12}]"#;
        let offers = ingest(RawInput::Text(text.to_string()));
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[1].get("price"), Some(&json!(12)));
    }

    #[test]
    fn test_envelope_is_unwrapped() {
        let offers = ingest(RawInput::Document(json!({
            "meta": {"count": 2},
            "data": [{"id": "1"}, {"id": "2"}]
        })));
        assert_eq!(offers.iter().map(|o| o.id()).collect::<Vec<_>>(), vec!["1", "2"]);

        let offers = ingest(RawInput::Text(r#"{"data": [{"id": "9"}]}"#.to_string()));
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id(), "9");
    }

    #[test]
    fn test_single_object_is_one_offer() {
        let offers = ingest(RawInput::Document(json!({"id": "solo", "price": 10})));
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id(), "solo");
    }

    #[test]
    fn test_line_scan_fallback() {
        let text = r#"Here are the offers I found:
            "id": "1",
              "total": "401.74",
            some narration in between
            "id": "2",
              "total": "438.90"
        "#;
        let offers = ingest(RawInput::Text(text.to_string()));
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].as_value(), &json!({"id": "1", "price": {"total": "401.74"}}));
        assert_eq!(offers[1].as_value(), &json!({"id": "2", "price": {"total": "438.90"}}));
    }

    #[test]
    fn test_line_scan_total_before_any_id() {
        let offers = scan_lines("\"total\": \"99.00\"\n\"id\": \"A1\"");
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].as_value(), &json!({"price": {"total": "99.00"}}));
        assert_eq!(offers[1].id(), "A1");
    }

    #[test]
    fn test_unrecognized_text_yields_nothing() {
        assert!(ingest(RawInput::Text("no flights today, sorry".to_string())).is_empty());
        assert!(ingest(RawInput::Text(String::new())).is_empty());
        assert!(ingest(RawInput::Text("42".to_string())).is_empty());
        assert!(ingest(RawInput::Document(json!(null))).is_empty());
    }
}
