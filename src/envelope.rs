//! The success/error envelope returned by every tool.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of one tool invocation.
///
/// Serializes as `{"status": "success", <payload fields>}` or
/// `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success {
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    Error {
        message: String,
    },
}

impl ToolResult {
    /// Success carrying a single named payload field.
    pub fn success(key: &str, value: Value) -> Self {
        let mut payload = Map::new();
        payload.insert(key.to_string(), value);
        ToolResult::Success { payload }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            ToolResult::Success { payload } => Some(payload),
            ToolResult::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ToolResult::Success { .. } => None,
            ToolResult::Error { message } => Some(message),
        }
    }

    pub fn to_json(&self) -> Value {
        // Map keys are strings and values are already JSON, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_flat() {
        let result = ToolResult::success("explanation", json!({"Summary": "ok"}));
        assert_eq!(
            result.to_json(),
            json!({"status": "success", "explanation": {"Summary": "ok"}})
        );
    }

    #[test]
    fn test_error_serializes_with_message() {
        let result = ToolResult::error("Invalid stakeholder");
        assert_eq!(
            result.to_json(),
            json!({"status": "error", "message": "Invalid stakeholder"})
        );
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("Invalid stakeholder"));
        assert!(result.payload().is_none());
    }

    #[test]
    fn test_deserialize_success() {
        let value = json!({"status": "success", "guidance": {"answer": "x"}});
        let result: ToolResult = serde_json::from_value(value).unwrap();
        assert_eq!(result, ToolResult::success("guidance", json!({"answer": "x"})));
    }
}
