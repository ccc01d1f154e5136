// Inventory tools backed by the Brewfather API

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_number, json_schema_object, Tool};
use anyhow::Result;
use brewfather_core::{BrewfatherClient, BrewfatherError};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_INVENTORY_LIMIT: u32 = 10;

/// Report categories requested for each fermentable, in the order the API
/// call sends them.
const FERMENTABLE_CATEGORIES: [&str; 9] = [
    "color",
    "grainCategory",
    "inventory",
    "name",
    "notes",
    "origin",
    "potential",
    "supplier",
    "type",
];

/// Tool to list fermentables currently in stock.
pub struct GetInventoryFermentablesTool {
    client: Arc<BrewfatherClient>,
}

impl GetInventoryFermentablesTool {
    pub fn new(client: Arc<BrewfatherClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetInventoryFermentablesArgs {
    #[serde(default)]
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for GetInventoryFermentablesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_inventory_fermentables".to_string(),
            description: "Retrieves a list of inventory fermentables from BrewFather"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_number(
                        "Number of inventory fermentables to retrieve (default 10)"
                    ),
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetInventoryFermentablesArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => {
                return Ok(CallToolResult::error(format!(
                    "Invalid arguments for get_inventory_fermentables: {}",
                    e
                )))
            }
        };
        let limit = args.limit.unwrap_or(DEFAULT_INVENTORY_LIMIT);

        let query = [
            ("limit", limit.to_string()),
            ("inventory_exists", "true".to_string()),
            ("categories", FERMENTABLE_CATEGORIES.join(",")),
        ];
        match self.client.get_json("inventory/fermentables", &query).await {
            Ok(body) => Ok(CallToolResult::text(serde_json::to_string_pretty(&body)?)),
            Err(BrewfatherError::Upstream { .. }) => {
                Ok(CallToolResult::error("Error retrieving inventory fermentables"))
            }
            Err(e) => Ok(CallToolResult::error(format!("Request failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_list_is_in_documented_order() {
        assert_eq!(
            FERMENTABLE_CATEGORIES.join(","),
            "color,grainCategory,inventory,name,notes,origin,potential,supplier,type"
        );
    }

    #[test]
    fn schema_has_optional_limit() {
        let credentials = brewfather_core::Credentials::new("user", "key");
        let client = Arc::new(BrewfatherClient::new(&credentials).unwrap());
        let schema = GetInventoryFermentablesTool::new(client).schema();

        assert_eq!(schema.name, "get_inventory_fermentables");
        assert_eq!(schema.input_schema["required"], serde_json::json!([]));
    }
}
