//! Name-indexed registry of tools.

use std::collections::HashMap;

use conveyor_client::ConveyorClient;
use serde_json::Value;

use crate::catalog;
use crate::descriptor::{ToolDefinition, ToolDescriptor, ToolOutput};
use crate::error::{Result, ToolError};

/// Registry for managing available tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolDescriptor>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for tool in catalog::all() {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool.
    ///
    /// Names are unique; registering a second tool under an existing name
    /// fails and leaves the registry unchanged.
    pub fn register(&mut self, tool: ToolDescriptor) -> Result<()> {
        if self.tools.contains_key(tool.name) {
            return Err(ToolError::DuplicateName(tool.name.to_string()));
        }
        self.tools.insert(tool.name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools of one category, sorted by name.
    pub fn by_category(&self, category: &str) -> Vec<&ToolDescriptor> {
        let mut tools: Vec<_> = self
            .tools
            .values()
            .filter(|tool| tool.category == category)
            .collect();
        tools.sort_unstable_by_key(|tool| tool.name);
        tools
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<_> = self.tools.values().map(|tool| tool.category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Metadata for every tool, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(ToolDescriptor::definition)
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        client: &ConveyorClient,
        args: Value,
    ) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        tracing::debug!(tool = name, "Executing tool");
        let result = (tool.execute)(client, args).await;
        if let Err(ref err) = result {
            tracing::debug!(tool = name, error = %err, "Tool failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ToolAnnotations;
    use crate::schema::Schema;
    use futures::FutureExt;
    use futures::future::BoxFuture;

    fn echo(_client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
        async move { Ok(ToolOutput::Json(args)) }.boxed()
    }

    fn tool(name: &'static str, category: &'static str) -> ToolDescriptor {
        ToolDescriptor {
            name,
            title: "Echo",
            description: "Returns its arguments",
            category,
            scope: None,
            identifier: None,
            annotations: ToolAnnotations::READ,
            input_schema: Schema::new().build(),
            execute: echo,
        }
    }

    fn client() -> ConveyorClient {
        ConveyorClient::new("token", "eu1.example.com").unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(tool("b_tool", "b")).unwrap();
        registry.register(tool("a_tool", "a")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a_tool"));
        assert_eq!(registry.get("b_tool").unwrap().category, "b");
        assert_eq!(registry.names(), vec!["a_tool", "b_tool"]);
        assert_eq!(registry.categories(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(tool("echo", "a")).unwrap();
        let err = registry.register(tool("echo", "b")).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateName(name) if name == "echo"));
        assert_eq!(registry.get("echo").unwrap().category, "a");
    }

    #[test]
    fn test_by_category() {
        let mut registry = ToolRegistry::new();
        registry.register(tool("x2", "x")).unwrap();
        registry.register(tool("x1", "x")).unwrap();
        registry.register(tool("y1", "y")).unwrap();
        let names: Vec<_> = registry.by_category("x").iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["x1", "x2"]);
        assert!(registry.by_category("z").is_empty());
    }

    #[tokio::test]
    async fn test_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(tool("echo", "a")).unwrap();
        let output = registry
            .execute("echo", &client(), serde_json::json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(output, ToolOutput::Json(serde_json::json!({"x": 1})));
    }

    #[tokio::test]
    async fn test_execute_unknown() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("missing", &client(), Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_builtin_names_unique_and_described() {
        let registry = ToolRegistry::builtin().unwrap();
        assert_eq!(registry.len(), catalog::all().len());
        for definition in registry.definitions() {
            assert!(!definition.title.is_empty(), "{} has no title", definition.name);
            assert!(!definition.description.is_empty(), "{} has no description", definition.name);
            assert_eq!(
                definition.input_schema["type"], "object",
                "{} schema is not an object",
                definition.name
            );
            assert!(
                definition.name.starts_with(definition.category),
                "{} is not prefixed by its category {}",
                definition.name,
                definition.category
            );
        }
    }

    #[test]
    fn test_builtin_required_fields_declared() {
        let registry = ToolRegistry::builtin().unwrap();
        for definition in registry.definitions() {
            let Some(required) = definition.input_schema.get("required") else {
                continue;
            };
            for field in required.as_array().unwrap() {
                let field = field.as_str().unwrap();
                assert!(
                    definition.input_schema["properties"].get(field).is_some(),
                    "{} requires undeclared field {}",
                    definition.name,
                    field
                );
            }
        }
    }

    #[test]
    fn test_destructive_tools_not_read_only() {
        let registry = ToolRegistry::builtin().unwrap();
        for definition in registry.definitions() {
            let a = definition.annotations;
            assert!(!(a.read_only && a.destructive), "{}", definition.name);
            if definition.name.ends_with("_delete") {
                assert!(a.destructive, "{} should be destructive", definition.name);
            }
        }
    }
}
