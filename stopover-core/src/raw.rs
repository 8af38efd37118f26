use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Offer payload exactly as handed over by the search stage.
///
/// Upstream agents do not reliably emit structured output, so the payload is
/// either a list of offer-like records, a text blob (which may or may not be
/// JSON), or some other JSON document such as a provider envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Records(Vec<Value>),
    Text(String),
    Document(Value),
}

impl RawInput {
    pub fn empty() -> Self {
        RawInput::Records(Vec::new())
    }
}

impl Default for RawInput {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => RawInput::Records(items),
            Value::String(text) => RawInput::Text(text),
            other => RawInput::Document(other),
        }
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        RawInput::Text(text)
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        RawInput::Text(text.to_string())
    }
}
