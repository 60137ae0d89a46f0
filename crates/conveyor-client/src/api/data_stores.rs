//! Data stores API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ListOptions, cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create a data store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataStore {
    pub name: String,
    pub team_id: u64,
    /// Data structure validating the records; none means free-form.
    #[serde(rename = "datastructureId", skip_serializing_if = "Option::is_none")]
    pub data_structure_id: Option<u64>,
    /// Storage limit in megabytes.
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: u64,
}

/// Request to update a data store.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataStore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "datastructureId", skip_serializing_if = "Option::is_none")]
    pub data_structure_id: Option<u64>,
    #[serde(rename = "maxSizeMB", skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<u64>,
}

/// Data stores API client.
pub struct DataStoresApi {
    client: ConveyorClient,
}

impl DataStoresApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List data stores in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/data-stores", query, "dataStores").await?;
        Ok(project(value, &options.cols))
    }

    /// Get a data store by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/data-stores/{}", id),
                cols_query(cols),
                "dataStore",
            )
            .await?;
        Ok(project(value, cols))
    }

    /// Create a data store.
    pub async fn create(&self, request: &CreateDataStore) -> Result<Value> {
        self.client
            .post("/data-stores", Query::new(), request, "dataStore")
            .await
    }

    /// Update a data store.
    pub async fn update(&self, id: u64, request: &UpdateDataStore) -> Result<Value> {
        self.client
            .patch(
                &format!("/data-stores/{}", id),
                Query::new(),
                request,
                "dataStore",
            )
            .await
    }

    /// Delete data stores of a team in bulk.
    pub async fn delete(&self, team_id: u64, ids: &[u64]) -> Result<()> {
        let options = RequestOptions::delete()
            .query(confirmed().push("teamId", team_id))
            .json_value(json!({"ids": ids}));
        self.client.request("/data-stores", options).await?;
        Ok(())
    }
}
