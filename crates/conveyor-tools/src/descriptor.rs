//! Tool descriptors: metadata plus the function that runs the tool.

use std::fmt;

use conveyor_client::ConveyorClient;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::schema::Schema;

/// Signature shared by every tool handler.
pub type ExecuteFn = for<'a> fn(&'a ConveyorClient, Value) -> BoxFuture<'a, Result<ToolOutput>>;

/// Behavioral hints for the calling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    /// The tool does not modify anything.
    pub read_only: bool,
    /// Repeating the call with the same arguments has no further effect.
    pub idempotent: bool,
    /// The tool deletes or irreversibly overwrites data.
    pub destructive: bool,
}

impl ToolAnnotations {
    /// Reads only.
    pub const READ: Self = Self {
        read_only: true,
        idempotent: true,
        destructive: false,
    };

    /// Creates or triggers something; repeating it has another effect.
    pub const WRITE: Self = Self {
        read_only: false,
        idempotent: false,
        destructive: false,
    };

    /// Sets state to a given value.
    pub const UPDATE: Self = Self {
        read_only: false,
        idempotent: true,
        destructive: false,
    };

    /// Deletes or overwrites.
    pub const DESTRUCTIVE: Self = Self {
        read_only: false,
        idempotent: true,
        destructive: true,
    };
}

/// Output of a tool execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// A JSON payload from the API.
    Json(Value),
    /// A short confirmation for mutating operations.
    Text(String),
}

impl ToolOutput {
    /// Create a text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Render for display: JSON pretty-printed, text as-is.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// A tool: metadata, input schema, and handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    /// Unique tool name, e.g. `scenarios_list`.
    pub name: &'static str,
    /// Short human title.
    pub title: &'static str,
    pub description: &'static str,
    /// Resource family, e.g. `scenarios`.
    pub category: &'static str,
    /// Permission scope required by the underlying endpoint.
    pub scope: Option<&'static str>,
    /// Argument that identifies the target entity.
    pub identifier: Option<&'static str>,
    pub annotations: ToolAnnotations,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
    pub execute: ExecuteFn,
}

impl ToolDescriptor {
    /// A read-only tool with an empty argument schema and no scope.
    pub fn new(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        category: &'static str,
        execute: ExecuteFn,
    ) -> Self {
        Self {
            name,
            title,
            description,
            category,
            scope: None,
            identifier: None,
            annotations: ToolAnnotations::READ,
            input_schema: Schema::new().build(),
            execute,
        }
    }

    /// Set the permission scope.
    pub fn scope(mut self, scope: &'static str) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the identifying argument.
    pub fn identifier(mut self, identifier: &'static str) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Set the behavioral annotations.
    pub fn annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Set the argument schema.
    pub fn input(mut self, schema: Schema) -> Self {
        self.input_schema = schema.build();
        self
    }

    /// Serializable metadata, without the handler.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            title: self.title,
            description: self.description,
            category: self.category,
            scope: self.scope,
            identifier: self.identifier,
            annotations: self.annotations,
            input_schema: self.input_schema.clone(),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("scope", &self.scope)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// Tool metadata as published to an agent runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<&'static str>,
    pub annotations: ToolAnnotations,
    pub input_schema: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(ToolOutput::Json(json!({"id": 1}))).unwrap(),
            json!({"id": 1})
        );
        assert_eq!(
            serde_json::to_value(ToolOutput::text("Done.")).unwrap(),
            json!("Done.")
        );
    }

    #[test]
    fn test_display_string() {
        assert_eq!(ToolOutput::text("Done.").to_display_string(), "Done.");
        assert_eq!(
            ToolOutput::Json(json!({"a": 1})).to_display_string(),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_annotations_serialize_camel_case() {
        assert_eq!(
            serde_json::to_value(ToolAnnotations::READ).unwrap(),
            json!({"readOnly": true, "idempotent": true, "destructive": false})
        );
    }
}
