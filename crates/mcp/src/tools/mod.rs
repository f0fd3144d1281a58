pub mod arguments;
pub mod args;
pub mod definitions;
pub mod executor;
mod registry;

pub use arguments::{normalize_aliases, unknown_parameters, Normalized};
pub use executor::{NotFound, ToolExecutor, ToolOutput};
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_enum, json_schema_number,
    json_schema_string, ToolDefinition, ToolKind, ToolRegistry,
};
