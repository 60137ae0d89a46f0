//! JSON Schema construction for tool inputs.

use serde_json::{Map, Value, json};

/// Builder for an object schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: Map<String, Value>,
    required: Vec<&'static str>,
}

impl Schema {
    /// An object schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required property.
    pub fn required(mut self, name: &'static str, property: Value) -> Self {
        self.properties.insert(name.to_string(), property);
        self.required.push(name);
        self
    }

    /// Add an optional property.
    pub fn optional(mut self, name: &'static str, property: Value) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    /// Add the `pg` and `cols` properties shared by listings.
    pub fn paged(self) -> Self {
        self.optional("pg", pagination()).optional("cols", columns())
    }

    /// Finish the schema.
    pub fn build(self) -> Value {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(self.properties),
        });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }
        schema
    }
}

pub fn integer(description: &str) -> Value {
    json!({"type": "integer", "minimum": 0, "description": description})
}

pub fn string(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

pub fn boolean(description: &str) -> Value {
    json!({"type": "boolean", "description": description})
}

pub fn object(description: &str) -> Value {
    json!({"type": "object", "description": description})
}

pub fn any(description: &str) -> Value {
    json!({"description": description})
}

pub fn strings(description: &str) -> Value {
    json!({"type": "array", "items": {"type": "string"}, "description": description})
}

pub fn integers(description: &str) -> Value {
    json!({"type": "array", "items": {"type": "integer"}, "description": description})
}

pub fn one_of(values: &[&str], description: &str) -> Value {
    json!({"type": "string", "enum": values, "description": description})
}

/// Schema for the `pg` pagination object.
pub fn pagination() -> Value {
    json!({
        "type": "object",
        "description": "Page of results to return",
        "properties": {
            "offset": {"type": "integer", "minimum": 0},
            "limit": {"type": "integer", "minimum": 1},
            "sortBy": {"type": "string"},
            "sortDir": {"type": "string", "enum": ["asc", "desc"]}
        }
    })
}

/// Schema for the `cols` field selection.
pub fn columns() -> Value {
    strings("Fields to return; all fields when omitted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_schema() {
        let schema = Schema::new()
            .required("teamId", integer("Team ID"))
            .optional("name", string("Name"))
            .build();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["teamId"]["type"], "integer");
        assert_eq!(schema["required"], json!(["teamId"]));
    }

    #[test]
    fn test_no_required_key_when_empty() {
        let schema = Schema::new().paged().build();
        assert!(schema.get("required").is_none());
        assert!(schema["properties"]["pg"].is_object());
        assert_eq!(schema["properties"]["cols"]["type"], "array");
    }
}
