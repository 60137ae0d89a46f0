//! Shared request types: pagination and column selection.
//!
//! Resource payloads themselves are opaque `serde_json::Value`s; their shape
//! is owned by the remote API and may be narrowed by column selection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// One page of a listing, sent as `pg[offset]`, `pg[limit]`, `pg[sortBy]`,
/// `pg[sortDir]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDir>,
}

impl Pagination {
    /// A page of `limit` items starting at `offset`.
    pub fn page(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Sort the page by a field.
    pub fn sorted_by(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.sort_by = Some(field.into());
        self.sort_dir = Some(dir);
        self
    }
}

/// Project an object onto a subset of its fields.
///
/// An empty field list returns the value unchanged. Arrays are projected
/// element-wise; non-object values pass through.
pub fn pick<S: AsRef<str>>(value: &Value, fields: &[S]) -> Value {
    if fields.is_empty() {
        return value.clone();
    }
    match value {
        Value::Object(map) => {
            let mut picked = Map::new();
            for field in fields {
                if let Some(v) = map.get(field.as_ref()) {
                    picked.insert(field.as_ref().to_string(), v.clone());
                }
            }
            Value::Object(picked)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| pick(item, fields)).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Query;
    use serde_json::json;

    #[test]
    fn test_pagination_query() {
        #[derive(Serialize)]
        struct Params {
            pg: Pagination,
        }
        let params = Params {
            pg: Pagination::page(20, 10).sorted_by("name", SortDir::Desc),
        };
        let q = Query::from_serialize(&params).unwrap();
        assert_eq!(
            q.to_query_string(),
            "pg[offset]=20&pg[limit]=10&pg[sortBy]=name&pg[sortDir]=desc"
        );
    }

    #[test]
    fn test_pick_no_fields_returns_full_object() {
        let value = json!({"id": 1, "name": "a", "teamId": 2});
        assert_eq!(pick::<&str>(&value, &[]), value);
    }

    #[test]
    fn test_pick_subset() {
        let value = json!({"id": 1, "name": "a", "teamId": 2});
        assert_eq!(pick(&value, &["id", "name", "missing"]), json!({"id": 1, "name": "a"}));
    }

    #[test]
    fn test_pick_array() {
        let value = json!([{"id": 1, "x": 1}, {"id": 2, "x": 2}]);
        assert_eq!(pick(&value, &["id"]), json!([{"id": 1}, {"id": 2}]));
    }
}
