//! Keys API.

use serde::Serialize;
use serde_json::Value;

use super::{ListOptions, cols_query, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Request to create a key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKey {
    pub name: String,
    /// Key type, e.g. `basicauth` or `apikeyauth`.
    pub type_name: String,
    /// Type-specific key material.
    pub parameters: Value,
}

/// Request to update a key.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Keys API client.
pub struct KeysApi {
    client: ConveyorClient,
}

impl KeysApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List keys in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/keys", query, "keys").await?;
        Ok(project(value, &options.cols))
    }

    /// Get a key by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/keys/{}", id), cols_query(cols), "key")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a key in a team.
    pub async fn create(&self, team_id: u64, request: &CreateKey) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            team_id: u64,
            #[serde(flatten)]
            request: &'a CreateKey,
        }
        self.client
            .post("/keys", Query::new(), &Body { team_id, request }, "key")
            .await
    }

    /// Update a key.
    pub async fn update(&self, id: u64, request: &UpdateKey) -> Result<Value> {
        self.client
            .patch(&format!("/keys/{}", id), Query::new(), request, "key")
            .await
    }

    /// Delete a key.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/keys/{}", id), super::confirmed())
            .await
    }
}
