//! Tool execution outcome value objects.
//!
//! Every failure mode inside the core is converted to a value at the executor
//! boundary — an [`ExecutionOutcome`] with `{success, message, data}` — and
//! never crosses a component boundary as a panic or unhandled error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Internal error taxonomy for tool execution.
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `UnknownTool` | Call names a tool outside the catalogue |
/// | `InvalidArguments` | Required field missing or unnormalizable |
/// | `NotFound` | Identifier-based lookup miss |
/// | `Ambiguous` | Mutating selector matched more than one record |
/// | `Store` | Underlying persistence operation failed |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Found {} matching records; narrow the selector or use an id", candidates.len())]
    Ambiguous { candidates: Vec<Value> },

    #[error("Store operation failed: {0}")]
    Store(String),
}

/// Result of executing one tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub tool_name: String,
    pub success: bool,
    pub message: String,
    /// Structured payload: created-id objects, find results, or the full
    /// candidate set when a mutating selector was ambiguous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ExecutionOutcome {
    pub fn ok(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with_data(
        tool_name: impl Into<String>,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failed(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Convert an internal error to a failure outcome. Ambiguity carries the
    /// full candidate set in `data` so the caller can disambiguate.
    pub fn from_error(tool_name: impl Into<String>, error: ExecError) -> Self {
        let message = error.to_string();
        let data = match error {
            ExecError::Ambiguous { candidates } => Some(Value::Array(candidates)),
            _ => None,
        };
        Self {
            tool_name: tool_name.into(),
            success: false,
            message,
            data,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        !self.success && matches!(&self.data, Some(Value::Array(c)) if c.len() > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ambiguous_error_carries_candidates() {
        let candidates = vec![json!({"id": "a"}), json!({"id": "b"})];
        let outcome = ExecutionOutcome::from_error(
            "update_road_by",
            ExecError::Ambiguous {
                candidates: candidates.clone(),
            },
        );
        assert!(!outcome.success);
        assert!(outcome.is_ambiguous());
        assert_eq!(outcome.data, Some(Value::Array(candidates)));
        assert!(outcome.message.contains("2 matching"));
    }

    #[test]
    fn non_ambiguous_failures_have_no_data() {
        let outcome =
            ExecutionOutcome::from_error("update_road", ExecError::NotFound("Road not found".into()));
        assert!(!outcome.success);
        assert!(!outcome.is_ambiguous());
        assert_eq!(outcome.data, None);
        assert_eq!(outcome.message, "Road not found");
    }

    #[test]
    fn success_with_data() {
        let outcome = ExecutionOutcome::ok_with_data("create_road", "Road created", json!({"id": "x"}));
        assert!(outcome.success);
        assert_eq!(outcome.data.unwrap()["id"], "x");
    }
}
