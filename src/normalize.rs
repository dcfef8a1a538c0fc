//! Best-effort decoding of model output.
//!
//! The whole response text must be a JSON document to count as decoded.
//! Anything else (prose, markdown fences, truncated JSON) is kept verbatim
//! under a single fallback key.

use serde_json::{Map, Value};
use tracing::debug;

/// Fallback key used by most tools.
pub const RAW_RESPONSE_KEY: &str = "raw_response";

/// Outcome of normalizing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The text was a valid JSON document.
    Decoded(Value),
    /// The text was not JSON; holds the trimmed text and the key to store it under.
    RawFallback { key: &'static str, text: String },
}

impl Normalized {
    pub fn is_decoded(&self) -> bool {
        matches!(self, Normalized::Decoded(_))
    }

    /// Collapse into the payload value handed back to callers.
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Decoded(value) => value,
            Normalized::RawFallback { key, text } => {
                let mut map = Map::new();
                map.insert(key.to_string(), Value::String(text));
                Value::Object(map)
            }
        }
    }
}

/// Decode `raw` strictly, or fall back to `{fallback_key: raw.trim()}`.
pub fn normalize(raw: &str, fallback_key: &'static str) -> Normalized {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Normalized::Decoded(value),
        Err(e) => {
            debug!("Model output is not JSON ({}), keeping raw text", e);
            Normalized::RawFallback {
                key: fallback_key,
                text: raw.trim().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_is_decoded_exactly() {
        let original = json!({
            "Summary": "Customs rules for the EAC.",
            "Applies To": ["shipper", "broker"],
            "Penalties": {"fine_kes": 500000}
        });
        let text = serde_json::to_string_pretty(&original).unwrap();

        let normalized = normalize(&text, RAW_RESPONSE_KEY);
        assert!(normalized.is_decoded());
        assert_eq!(normalized.into_value(), original);
    }

    #[test]
    fn test_surrounding_whitespace_still_decodes() {
        let normalized = normalize("\n  {\"a\": 1}  \n", RAW_RESPONSE_KEY);
        assert_eq!(normalized, Normalized::Decoded(json!({"a": 1})));
    }

    #[test]
    fn test_invalid_json_falls_back_to_trimmed_text() {
        let normalized = normalize("  not json {  ", RAW_RESPONSE_KEY);
        assert!(!normalized.is_decoded());
        assert_eq!(normalized.into_value(), json!({"raw_response": "not json {"}));
    }

    #[test]
    fn test_fenced_json_is_not_unwrapped() {
        let text = "```json\n{\"a\": 1}\n```";
        let value = normalize(text, "answer").into_value();
        assert_eq!(value, json!({"answer": text}));
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(
            normalize("   ", RAW_RESPONSE_KEY).into_value(),
            json!({"raw_response": ""})
        );
    }
}
