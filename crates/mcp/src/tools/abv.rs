// ABV calculation tool (pure computation, no network access)

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use serde::Deserialize;

/// Standard approximation factor for ABV from gravity difference.
const ABV_FACTOR: f64 = 131.25;

/// Tool to compute Alcohol by Volume from original and final gravity.
pub struct CalculateAbvTool;

#[derive(Debug, Deserialize)]
struct CalculateAbvArgs {
    og: String,
    fg: String,
}

/// Parse a gravity reading. A non-numeric value becomes NaN and surfaces
/// in the output text as `NaN%`; this mirrors lenient float parsing and is
/// deliberately not guarded.
fn parse_gravity(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[async_trait::async_trait]
impl Tool for CalculateAbvTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "calculate_abv".to_string(),
            description: "Calculates Alcohol by Volume from gravity readings".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "og": json_schema_string("Original gravity"),
                    "fg": json_schema_string("Final gravity"),
                }),
                vec!["og", "fg"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CalculateAbvArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => {
                return Ok(CallToolResult::error(format!(
                    "Invalid arguments for calculate_abv: {}",
                    e
                )))
            }
        };

        let og = parse_gravity(&args.og);
        let fg = parse_gravity(&args.fg);
        let abv = (og - fg) * ABV_FACTOR;

        Ok(CallToolResult::text(format!("The ABV is {:.2}%", abv)))
    }
}
