//! Tool catalogue entities.
//!
//! A [`ToolDefinition`] describes one operation the language model may request
//! (name, parameter schema, description). The full [`ToolCatalogue`] is built
//! once at process start and exposed to the model verbatim, in order, on every
//! turn. A [`ToolCall`] is the model's parsed request against that catalogue.

use crate::asset::FieldMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Wire type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    /// Nested partial-field object (e.g. the `fields` argument of updates).
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Object => "object",
        }
    }
}

/// Parameter specification for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: ParamType,
    /// Closed set of accepted literals for enum-valued parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            allowed_values: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Immutable descriptor of one tool. Defined at process start, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// Ordered registry of tool definitions.
///
/// Order is part of the contract: the catalogue is serialized for the model
/// in exactly this sequence every turn.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalogue {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalogue {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Malformed tool-argument payload. Carries the original raw text so callers
/// can log or surface it; this is a value, never a panic across the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed tool arguments: {message}")]
pub struct ArgumentParseError {
    pub raw: String,
    pub message: String,
}

/// Decode a raw argument payload into a field map.
///
/// Models deliver arguments either as a structured object or as a
/// JSON-encoded string; a string is decoded here. Failure returns a tagged
/// error value distinguishable from a valid empty object. `null` is treated
/// as "no arguments".
pub fn parse_arguments(raw: &Value) -> Result<FieldMap, ArgumentParseError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(FieldMap::new()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(Value::Null) => Ok(FieldMap::new()),
            Ok(other) => Err(ArgumentParseError {
                raw: s.clone(),
                message: format!("expected a JSON object, got {}", value_kind(&other)),
            }),
            Err(e) => Err(ArgumentParseError {
                raw: s.clone(),
                message: e.to_string(),
            }),
        },
        other => Err(ArgumentParseError {
            raw: other.to_string(),
            message: format!("expected a JSON object, got {}", value_kind(other)),
        }),
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A parsed request to execute one catalogue tool. Ephemeral — exists only
/// within a single resolution cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: FieldMap,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: FieldMap::new(),
        }
    }

    /// Build a call from the model's raw output, decoding string-encoded
    /// argument payloads.
    pub fn from_wire(name: impl Into<String>, raw: &Value) -> Result<Self, ArgumentParseError> {
        Ok(Self {
            name: name.into(),
            arguments: parse_arguments(raw)?,
        })
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    pub fn get_object(&self, key: &str) -> Option<&FieldMap> {
        self.arguments.get(key).and_then(|v| v.as_object())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.arguments.get(key).and_then(|v| v.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_arguments_passes_objects_through() {
        let raw = json!({"name": "Main Street", "lanes": 2});
        let map = parse_arguments(&raw).unwrap();
        assert_eq!(map["name"], "Main Street");
        assert_eq!(map["lanes"], 2);
    }

    #[test]
    fn parse_arguments_decodes_json_strings() {
        let raw = json!("{\"condition\": \"good\"}");
        let map = parse_arguments(&raw).unwrap();
        assert_eq!(map["condition"], "good");
    }

    #[test]
    fn parse_arguments_malformed_string_is_error_value() {
        let err = parse_arguments(&json!("{not json")).unwrap_err();
        assert_eq!(err.raw, "{not json");
        assert!(!err.message.is_empty());
        // Distinguishable from a valid empty object.
        assert!(parse_arguments(&json!("{}")).unwrap().is_empty());
    }

    #[test]
    fn parse_arguments_rejects_non_object_payloads() {
        assert!(parse_arguments(&json!("[1, 2]")).is_err());
        assert!(parse_arguments(&json!(42)).is_err());
        assert!(parse_arguments(&json!("\"just a string\"")).is_err());
    }

    #[test]
    fn parse_arguments_null_is_empty() {
        assert!(parse_arguments(&Value::Null).unwrap().is_empty());
        assert!(parse_arguments(&json!("null")).unwrap().is_empty());
    }

    #[test]
    fn catalogue_preserves_registration_order() {
        let catalogue = ToolCatalogue::new()
            .register(ToolDefinition::new("b_tool", "second"))
            .register(ToolDefinition::new("a_tool", "first"));

        let names: Vec<&str> = catalogue.names().collect();
        assert_eq!(names, vec!["b_tool", "a_tool"]);
        assert!(catalogue.contains("a_tool"));
        assert!(!catalogue.contains("c_tool"));
    }

    #[test]
    fn tool_call_accessors() {
        let call = ToolCall::new("find_asset")
            .with_arg("by", "name")
            .with_arg("limit", 3);
        assert_eq!(call.get_str("by"), Some("name"));
        assert_eq!(call.get_u64("limit"), Some(3));
        assert_eq!(call.get_str("missing"), None);
    }

    #[test]
    fn tool_call_from_wire_string_payload() {
        let call = ToolCall::from_wire("update_road", &json!("{\"id\": \"abc\"}")).unwrap();
        assert_eq!(call.get_str("id"), Some("abc"));
        assert!(ToolCall::from_wire("update_road", &json!("{oops")).is_err());
    }
}
