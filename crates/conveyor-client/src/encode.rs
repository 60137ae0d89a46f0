//! Query string encoding.
//!
//! The platform expects PHP-style bracket notation for composite query
//! values: arrays become repeated `key[]=value` pairs and objects become
//! `key[sub]=value` pairs. Only one level of nesting is supported.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// No value; the key is left out of the URL entirely.
    Absent,
    /// A scalar, already rendered as text.
    Scalar(String),
    /// Encoded as one `key[]=value` pair per present element.
    Array(Vec<Option<String>>),
    /// Encoded as one `key[sub]=value` pair per present property.
    Object(Vec<(String, Option<String>)>),
}

impl QueryValue {
    /// Build an array value from scalars.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self::Array(items.into_iter().map(|v| Some(v.to_string())).collect())
    }

    /// Build an object value from key/value pairs.
    pub fn object<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Array(items) => Self::Array(items.iter().map(scalar_text).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), scalar_text(v)))
                    .collect(),
            ),
            other => match scalar_text(other) {
                Some(text) => Self::Scalar(text),
                None => Self::Absent,
            },
        }
    }
}

/// Render a JSON value as query text. Nested composites fall back to their
/// JSON representation since the wire format has no deeper nesting.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from!(&str, String, &String, bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Ordered collection of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Insertion order is preserved on the wire.
    pub fn push(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append an array parameter (`key[]=a&key[]=b`).
    pub fn push_array<I, T>(self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.push(key, QueryValue::array(items))
    }

    /// Build a query from a JSON object.
    ///
    /// Non-object values produce an empty query.
    pub fn from_json(value: &Value) -> Self {
        let params = match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), QueryValue::from_json(v)))
                .collect(),
            _ => Vec::new(),
        };
        Self { params }
    }

    /// Build a query from any serializable struct via its JSON form.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::from_json(&serde_json::to_value(value)?))
    }

    /// Merge another query's parameters after this one's.
    pub fn extend(mut self, other: Query) -> Self {
        self.params.extend(other.params);
        self
    }

    /// True if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render the `k=v&k2=v2` part, without the leading separator.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            let key = urlencoding::encode(key);
            match value {
                QueryValue::Absent => {}
                QueryValue::Scalar(v) => {
                    pairs.push(format!("{}={}", key, urlencoding::encode(v)));
                }
                QueryValue::Array(items) => {
                    for item in items.iter().flatten() {
                        pairs.push(format!("{}[]={}", key, urlencoding::encode(item)));
                    }
                }
                QueryValue::Object(props) => {
                    for (sub, v) in props {
                        if let Some(v) = v {
                            pairs.push(format!(
                                "{}[{}]={}",
                                key,
                                urlencoding::encode(sub),
                                urlencoding::encode(v)
                            ));
                        }
                    }
                }
            }
        }
        pairs.join("&")
    }
}

/// Append a query to a URL.
///
/// Uses `&` when the URL already carries a query string and `?` otherwise,
/// so encoding onto an already-built URL leaves its existing parameters
/// intact. An empty query returns the URL unchanged.
pub fn encode_query(url: &str, query: &Query) -> String {
    let encoded = query.to_query_string();
    if encoded.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_params() {
        let q = Query::new().push("teamId", 5).push("name", "my flow");
        assert_eq!(
            encode_query("https://h/api/v2/scenarios", &q),
            "https://h/api/v2/scenarios?teamId=5&name=my%20flow"
        );
    }

    #[test]
    fn test_absent_values_are_omitted() {
        let q = Query::new()
            .push("teamId", 1)
            .push("folderId", None::<u64>)
            .push("search", QueryValue::Absent);
        let url = encode_query("/x", &q);
        assert_eq!(url, "/x?teamId=1");
        assert!(!url.contains("folderId"));
    }

    #[test]
    fn test_array_keeps_order() {
        let q = Query::new().push_array("cols", ["id", "name", "teamId"]);
        assert_eq!(
            q.to_query_string(),
            "cols[]=id&cols[]=name&cols[]=teamId"
        );
    }

    #[test]
    fn test_array_skips_absent_elements() {
        let q = Query::new().push(
            "ids",
            QueryValue::Array(vec![Some("1".into()), None, Some("3".into())]),
        );
        assert_eq!(q.to_query_string(), "ids[]=1&ids[]=3");
    }

    #[test]
    fn test_object_params() {
        let q = Query::new().push(
            "pg",
            QueryValue::object([
                ("offset", Some("10".to_string())),
                ("limit", Some("5".to_string())),
                ("sortBy", None),
            ]),
        );
        assert_eq!(q.to_query_string(), "pg[offset]=10&pg[limit]=5");
    }

    #[test]
    fn test_appends_to_existing_query() {
        let q = Query::new().push("b", 2);
        assert_eq!(encode_query("/x?a=1", &q), "/x?a=1&b=2");
        assert_eq!(encode_query("/x?a=1", &Query::new()), "/x?a=1");
    }

    #[test]
    fn test_encodes_special_characters() {
        let q = Query::new().push("q", "a&b=c");
        assert_eq!(q.to_query_string(), "q=a%26b%3Dc");
    }

    #[test]
    fn test_from_json() {
        let q = Query::from_json(&json!({
            "teamId": 3,
            "skip": null,
            "active": true,
            "cols": ["id", "name"],
            "pg": {"limit": 10, "sortDir": null}
        }));
        assert_eq!(
            q.to_query_string(),
            "teamId=3&active=true&cols[]=id&cols[]=name&pg[limit]=10"
        );
    }

    #[test]
    fn test_from_serialize_skips_none() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params {
            team_id: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            folder_id: Option<u64>,
            type_name: Option<String>,
        }

        let q = Query::from_serialize(&Params {
            team_id: 9,
            folder_id: None,
            type_name: None,
        })
        .unwrap();
        assert_eq!(q.to_query_string(), "teamId=9");
    }
}
