//! Agent-facing tools for the conveyor API client.
//!
//! Each tool pairs a JSON Schema describing its arguments with an `execute`
//! function that calls one resource client method. The [`ToolRegistry`]
//! holds the built-in catalog and dispatches calls by name.
//!
//! ```rust,ignore
//! let registry = ToolRegistry::builtin()?;
//! let output = registry
//!     .execute("scenarios_list", &client, json!({"teamId": 1}))
//!     .await?;
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod params;
pub mod registry;
pub mod schema;

pub use descriptor::{ExecuteFn, ToolAnnotations, ToolDefinition, ToolDescriptor, ToolOutput};
pub use error::{Result, ToolError};
pub use params::{ParamExt, ParamResult, ParameterValidationError};
pub use registry::ToolRegistry;
pub use schema::Schema;
