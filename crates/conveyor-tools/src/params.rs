//! Argument extraction for tool handlers.
//!
//! Arguments arrive as a JSON object already checked against the tool's
//! schema by the caller. These helpers pull out what a handler needs and
//! report anything missing in terms an agent can act on.

use conveyor_client::api::ListOptions;
use conveyor_client::{Pagination, SortDir};
use serde_json::Value;

/// Error type for tool parameter validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParameterValidationError {
    /// A required parameter is missing.
    #[error("missing required parameter '{name}': {hint}")]
    MissingRequired {
        name: &'static str,
        hint: &'static str,
    },

    /// A parameter has an invalid type.
    #[error("invalid type for '{name}': expected {expected}, got {actual}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// A parameter value is not one of the accepted values.
    #[error("'{name}' has invalid value '{value}': {message}")]
    InvalidValue {
        name: &'static str,
        value: String,
        message: String,
    },
}

impl ParameterValidationError {
    /// Create a missing required parameter error.
    pub fn missing(name: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { name, hint }
    }

    /// Create an invalid type error.
    pub fn invalid_type(name: &'static str, expected: &'static str, actual: &Value) -> Self {
        Self::InvalidType {
            name,
            expected,
            actual: json_type(actual).to_string(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        name: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name,
            value: value.into(),
            message: message.into(),
        }
    }

    /// The parameter this error is about.
    pub fn parameter_name(&self) -> &str {
        match self {
            Self::MissingRequired { name, .. } => name,
            Self::InvalidType { name, .. } => name,
            Self::InvalidValue { name, .. } => name,
        }
    }
}

/// Result type for parameter validation.
pub type ParamResult<T> = std::result::Result<T, ParameterValidationError>;

/// Helper trait for extracting parameters from tool arguments.
pub trait ParamExt {
    /// Get a required string parameter.
    fn required_str(&self, name: &'static str, hint: &'static str) -> ParamResult<&str>;

    /// Get an optional string parameter.
    fn optional_str(&self, name: &str) -> Option<&str>;

    /// Get a required non-negative integer (IDs, versions).
    fn required_u64(&self, name: &'static str, hint: &'static str) -> ParamResult<u64>;

    /// Get an optional non-negative integer.
    fn optional_u64(&self, name: &'static str) -> ParamResult<Option<u64>>;

    /// Get an optional boolean parameter with default.
    fn optional_bool(&self, name: &str, default: bool) -> bool;

    /// Get a required parameter of any JSON type.
    fn required_value(&self, name: &'static str, hint: &'static str) -> ParamResult<&Value>;

    /// Get an optional parameter of any JSON type; `null` counts as absent.
    fn optional_value(&self, name: &str) -> Option<&Value>;

    /// Get an optional array of strings; absent means empty.
    fn string_list(&self, name: &'static str) -> ParamResult<Vec<String>>;

    /// Read `pg` and `cols` into list options.
    fn list_options(&self) -> ParamResult<ListOptions>;
}

impl ParamExt for Value {
    fn required_str(&self, name: &'static str, hint: &'static str) -> ParamResult<&str> {
        match self.get(name) {
            None | Some(Value::Null) => Err(ParameterValidationError::missing(name, hint)),
            Some(v) => v
                .as_str()
                .ok_or_else(|| ParameterValidationError::invalid_type(name, "string", v)),
        }
    }

    fn optional_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    fn required_u64(&self, name: &'static str, hint: &'static str) -> ParamResult<u64> {
        self.optional_u64(name)?
            .ok_or_else(|| ParameterValidationError::missing(name, hint))
    }

    fn optional_u64(&self, name: &'static str) -> ParamResult<Option<u64>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| {
                    ParameterValidationError::invalid_type(name, "non-negative integer", v)
                }),
        }
    }

    fn optional_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    fn required_value(&self, name: &'static str, hint: &'static str) -> ParamResult<&Value> {
        self.optional_value(name)
            .ok_or_else(|| ParameterValidationError::missing(name, hint))
    }

    fn optional_value(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !v.is_null())
    }

    fn string_list(&self, name: &'static str) -> ParamResult<Vec<String>> {
        let Some(value) = self.optional_value(name) else {
            return Ok(Vec::new());
        };
        let items = value.as_array().ok_or_else(|| {
            ParameterValidationError::invalid_type(name, "array of strings", value)
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ParameterValidationError::invalid_type(name, "array of strings", item)
                })
            })
            .collect()
    }

    fn list_options(&self) -> ParamResult<ListOptions> {
        let cols = self.string_list("cols")?;
        let pg = match self.optional_value("pg") {
            None => None,
            Some(pg) => Some(pagination(pg)?),
        };
        Ok(ListOptions { pg, cols })
    }
}

fn pagination(pg: &Value) -> ParamResult<Pagination> {
    if !pg.is_object() {
        return Err(ParameterValidationError::invalid_type("pg", "object", pg));
    }
    let sort_dir = match pg.optional_str("sortDir") {
        None => None,
        Some("asc") => Some(SortDir::Asc),
        Some("desc") => Some(SortDir::Desc),
        Some(other) => {
            return Err(ParameterValidationError::invalid_value(
                "pg",
                other,
                "sortDir must be 'asc' or 'desc'",
            ));
        }
    };
    Ok(Pagination {
        offset: pg.optional_u64("offset")?,
        limit: pg.optional_u64("limit")?,
        sort_by: pg.optional_str("sortBy").map(str::to_string),
        sort_dir,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let args = json!({"name": "flow", "count": 3});
        assert_eq!(args.required_str("name", "x").unwrap(), "flow");

        let err = args.required_str("missing", "provide a name").unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter 'missing': provide a name");

        let err = args.required_str("count", "x").unwrap_err();
        assert!(matches!(err, ParameterValidationError::InvalidType { .. }));
    }

    #[test]
    fn test_u64_params() {
        let args = json!({"teamId": 12, "neg": -1, "none": null});
        assert_eq!(args.required_u64("teamId", "x").unwrap(), 12);
        assert_eq!(args.optional_u64("none").unwrap(), None);
        assert!(args.optional_u64("neg").is_err());
        assert_eq!(args.required_u64("absent", "x").unwrap_err().parameter_name(), "absent");
    }

    #[test]
    fn test_string_list() {
        let args = json!({"cols": ["id", "name"], "bad": [1]});
        assert_eq!(args.string_list("cols").unwrap(), vec!["id", "name"]);
        assert!(args.string_list("other").unwrap().is_empty());
        assert!(args.string_list("bad").is_err());
    }

    #[test]
    fn test_list_options() {
        let args = json!({
            "pg": {"offset": 10, "limit": 5, "sortBy": "name", "sortDir": "desc"},
            "cols": ["id"]
        });
        let opts = args.list_options().unwrap();
        assert_eq!(
            opts.pg,
            Some(Pagination::page(10, 5).sorted_by("name", SortDir::Desc))
        );
        assert_eq!(opts.cols, vec!["id"]);

        let bad = json!({"pg": {"sortDir": "sideways"}});
        assert!(bad.list_options().is_err());
    }
}
