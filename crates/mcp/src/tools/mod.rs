pub mod abv;
pub mod batches;
pub mod inventory;
mod registry;

pub use abv::CalculateAbvTool;
pub use batches::{GetBatchDetailsTool, GetBatchesTool};
pub use inventory::GetInventoryFermentablesTool;
pub use registry::{
    json_schema_number, json_schema_object, json_schema_string, Tool, ToolRegistry,
};
