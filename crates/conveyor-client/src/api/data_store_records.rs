//! Data store records API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ListOptions, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// A new record.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecord {
    /// Record key; the platform generates one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub data: Value,
}

/// Which records to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRecords {
    Keys(Vec<String>),
    All,
}

impl DeleteRecords {
    fn body(&self) -> Value {
        match self {
            DeleteRecords::Keys(keys) => json!({"keys": keys}),
            DeleteRecords::All => json!({"all": true}),
        }
    }
}

/// Data store records API client.
pub struct DataStoreRecordsApi {
    client: ConveyorClient,
}

impl DataStoreRecordsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List records in a data store.
    pub async fn list(&self, data_store_id: u64, options: &ListOptions) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/data-stores/{}/data", data_store_id),
                Query::from_serialize(options)?,
                "records",
            )
            .await?;
        Ok(project(value, &options.cols))
    }

    /// Add a record.
    pub async fn create(&self, data_store_id: u64, record: &CreateRecord) -> Result<Value> {
        self.client
            .request(
                &format!("/data-stores/{}/data", data_store_id),
                RequestOptions::post().json(record)?,
            )
            .await
    }

    /// Replace a record, creating it if the key is new.
    pub async fn replace(&self, data_store_id: u64, key: &str, data: &Value) -> Result<Value> {
        self.client
            .request(
                &self.record_path(data_store_id, key),
                RequestOptions::put().json(data)?,
            )
            .await
    }

    /// Merge fields into an existing record.
    pub async fn update(&self, data_store_id: u64, key: &str, data: &Value) -> Result<Value> {
        self.client
            .request(
                &self.record_path(data_store_id, key),
                RequestOptions::patch().json(data)?,
            )
            .await
    }

    /// Delete records by key, or all of them.
    pub async fn delete(&self, data_store_id: u64, which: &DeleteRecords) -> Result<()> {
        let options = RequestOptions::delete()
            .query(confirmed())
            .json_value(which.body());
        self.client
            .request(&format!("/data-stores/{}/data", data_store_id), options)
            .await?;
        Ok(())
    }

    fn record_path(&self, data_store_id: u64, key: &str) -> String {
        format!("/data-stores/{}/data/{}", data_store_id, super::seg(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::HttpResponse;
    use reqwest::Method;
    use std::sync::Arc;

    #[test]
    fn test_delete_bodies() {
        assert_eq!(
            DeleteRecords::Keys(vec!["a".into(), "b".into()]).body(),
            json!({"keys": ["a", "b"]})
        );
        assert_eq!(DeleteRecords::All.body(), json!({"all": true}));
    }

    #[test]
    fn test_create_record_without_key() {
        let record = CreateRecord {
            key: None,
            data: json!({"x": 1}),
        };
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"data": {"x": 1}}));
    }

    #[tokio::test]
    async fn test_replace_sends_put() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::json(200, &json!({"key": "k 1", "data": {"x": 2}})));
        let client = ConveyorClient::builder()
            .zone("eu1.example.com")
            .token("8a3b1c2d-1234-4abc-9def-0123456789ab")
            .transport(mock.clone())
            .build()
            .unwrap();

        let value = client
            .data_store_records()
            .replace(4, "k 1", &json!({"x": 2}))
            .await
            .unwrap();
        assert_eq!(value["data"]["x"], 2);

        let sent = mock.requests();
        assert_eq!(sent[0].method, Method::PUT);
        assert_eq!(
            sent[0].url,
            "https://eu1.example.com/api/v2/data-stores/4/data/k%201"
        );
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"x":2}"#));
    }
}
