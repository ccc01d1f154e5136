// Tool trait and registry

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments. Bad arguments and upstream
    /// failures are reported through the result's `is_error` flag, not as
    /// an `Err`.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Registry of the available tools.
///
/// Backed by a Vec so `tools/list` reports tools in registration order; the
/// catalog is assembled once at startup and never changes afterwards.
pub struct ToolRegistry {
    tools: Vec<(String, Arc<dyn Tool>)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool under the name its schema declares.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        self.tools.push((name, tool));
    }

    /// Look up a tool by exact name match.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|(tool_name, _)| tool_name == name)
            .map(|(_, tool)| tool.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|(tool_name, _)| tool_name == name)
    }

    /// All tool schemas, in registration order.
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|(_, tool)| tool.schema()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CallToolResult;

    struct NamedTool(&'static str);

    #[async_trait::async_trait]
    impl Tool for NamedTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.0.to_string(),
                description: String::new(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(self.0))
        }
    }

    #[test]
    fn listing_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("b")));
        registry.register(Arc::new(NamedTool("a")));
        registry.register(Arc::new(NamedTool("c")));

        let names: Vec<String> = registry
            .list_schemas()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn lookup_is_exact_match() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("get_batches")));

        assert!(registry.contains("get_batches"));
        assert!(registry.get("get_batches").is_some());
        assert!(registry.get("get_batch").is_none());
        assert!(registry.get("GET_BATCHES").is_none());
    }
}
