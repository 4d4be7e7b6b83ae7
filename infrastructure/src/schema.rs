//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing provider-neutral
//! JSON Schema for native tool use. Catalogue order is preserved by the
//! port's default `catalogue_schema`.

use serde_json::{Map, Value, json};
use waypost_application::ports::tool_schema::ToolSchemaPort;
use waypost_domain::{ParamType, ToolDefinition};

/// Converts catalogue definitions to JSON Schema.
///
/// Mapping:
/// - `String` → `"string"` (with an `"enum"` array when the parameter
///   carries allowed values)
/// - `Number` → `"number"`, `Integer` → `"integer"`
/// - `Object` → `"object"` (free-form field maps)
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type {
                ParamType::String => "string",
                ParamType::Number => "number",
                ParamType::Integer => "integer",
                ParamType::Object => "object",
            };

            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(values) = &param.allowed_values {
                prop.insert("enum".to_string(), json!(values));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}
