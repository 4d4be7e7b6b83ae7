//! Tool schema port.
//!
//! Converts catalogue definitions into the JSON shape the gateway sends to
//! the model. The default catalogue conversion preserves catalogue order —
//! the model sees the tools in exactly the registered sequence.

use serde_json::Value;
use waypost_domain::{ToolCatalogue, ToolDefinition};

pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to its JSON schema form.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value;

    /// Convert the whole catalogue, in catalogue order.
    fn catalogue_schema(&self, catalogue: &ToolCatalogue) -> Vec<Value> {
        catalogue.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
