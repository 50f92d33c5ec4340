//! Wire envelope and the flattened result handed to callers.
//!
//! # Design
//! The server wraps every payload as `{"success", "message", "data"}`.
//! Callers receive a single object instead: `success` and `message` first,
//! then every key of `data` copied to the top level. A `data` key named
//! `success` or `message` overwrites the envelope field of the same name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form request parameters, serialized as a JSON object.
pub type Params = Map<String, Value>;

/// The response envelope as sent by the server.
///
/// Every field is optional on the wire and may be `null`; a missing or
/// `null` `success` counts as `false`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl Envelope {
    /// Decode a response body. A bare `null` body decodes to an empty
    /// envelope.
    pub fn decode(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Option<Envelope>>(body).map(Option::unwrap_or_default)
    }

    /// Merge `data` into the top level, alongside `success` and `message`.
    pub fn flatten(self) -> OverlayResponse {
        let mut flat = Map::new();
        flat.insert("success".to_string(), Value::Bool(self.success.unwrap_or(false)));
        flat.insert(
            "message".to_string(),
            Value::String(self.message.unwrap_or_default()),
        );
        if let Some(data) = self.data {
            for (key, value) in data {
                flat.insert(key, value);
            }
        }
        OverlayResponse(flat)
    }
}

/// A flattened API response.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct OverlayResponse(Map<String, Value>);

impl OverlayResponse {
    /// The `success` entry; `false` if it was overwritten with a non-boolean.
    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The `message` entry; empty if it was overwritten with a non-string.
    pub fn message(&self) -> &str {
        self.get_str("message").unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<OverlayResponse> for Value {
    fn from(response: OverlayResponse) -> Self {
        Value::Object(response.0)
    }
}
