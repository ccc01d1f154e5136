// Batch tools backed by the Brewfather API

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_number, json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use brewfather_core::{BrewfatherClient, BrewfatherError};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_BATCH_LIMIT: u32 = 5;

/// Tool to list the most recent batches.
pub struct GetBatchesTool {
    client: Arc<BrewfatherClient>,
}

impl GetBatchesTool {
    pub fn new(client: Arc<BrewfatherClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetBatchesArgs {
    #[serde(default)]
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for GetBatchesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_batches".to_string(),
            description: "Retrieves a list of the most recent batches from BrewFather"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_number(
                        "Number of recent batches to retrieve (default 5)"
                    ),
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetBatchesArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => {
                return Ok(CallToolResult::error(format!(
                    "Invalid arguments for get_batches: {}",
                    e
                )))
            }
        };
        let limit = args.limit.unwrap_or(DEFAULT_BATCH_LIMIT);

        let query = [
            ("limit", limit.to_string()),
            ("order_by_direction", "desc".to_string()),
            ("order_by", "brewDate".to_string()),
        ];
        match self.client.get_json("batches", &query).await {
            // The raw JSON is passed through so the calling agent can
            // analyze it directly.
            Ok(body) => Ok(CallToolResult::text(serde_json::to_string_pretty(&body)?)),
            Err(BrewfatherError::Upstream { .. }) => {
                Ok(CallToolResult::error("Error retrieving batches"))
            }
            Err(e) => Ok(CallToolResult::error(format!("Request failed: {}", e))),
        }
    }
}

/// Tool to fetch the details of a single batch.
pub struct GetBatchDetailsTool {
    client: Arc<BrewfatherClient>,
}

impl GetBatchDetailsTool {
    pub fn new(client: Arc<BrewfatherClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetBatchDetailsArgs {
    batch_id: String,
}

#[async_trait::async_trait]
impl Tool for GetBatchDetailsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_batch_details".to_string(),
            description: "Retrieves the details about a specific batch.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "batch_id": json_schema_string("The ID of the batch to retrieve"),
                }),
                vec!["batch_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetBatchDetailsArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => {
                return Ok(CallToolResult::error(format!(
                    "Invalid arguments for get_batch_details: {}",
                    e
                )))
            }
        };

        let path = format!("batches/{}", args.batch_id);
        match self.client.get_json(&path, &[]).await {
            Ok(body) => Ok(CallToolResult::text(serde_json::to_string_pretty(&body)?)),
            Err(BrewfatherError::Upstream { .. }) => {
                Ok(CallToolResult::error("Error retrieving batch details"))
            }
            Err(e) => Ok(CallToolResult::error(format!("Request failed: {}", e))),
        }
    }
}
