use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier reported for offers that carry none.
pub const UNKNOWN_ID: &str = "Unknown";

/// A single offer as received. No field is guaranteed to exist or to have a
/// particular type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferRecord(Value);

impl OfferRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field lookup. Non-object records have no fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The offer id rendered as text, or `"Unknown"`.
    pub fn id(&self) -> String {
        match self.0.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => UNKNOWN_ID.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<Value> for OfferRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
