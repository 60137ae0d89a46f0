//! Data structures API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ListOptions, cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Request to create a data structure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataStructure {
    pub name: String,
    pub team_id: u64,
    /// Field specifications.
    pub spec: Value,
    /// Reject records with fields not present in the spec.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Request to update a data structure.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Data structures API client.
pub struct DataStructuresApi {
    client: ConveyorClient,
}

impl DataStructuresApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List data structures in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self
            .client
            .get("/data-structures", query, "dataStructures")
            .await?;
        Ok(project(value, &options.cols))
    }

    /// Get a data structure by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/data-structures/{}", id),
                cols_query(cols),
                "dataStructure",
            )
            .await?;
        Ok(project(value, cols))
    }

    /// Create a data structure.
    pub async fn create(&self, request: &CreateDataStructure) -> Result<Value> {
        self.client
            .post("/data-structures", Query::new(), request, "dataStructure")
            .await
    }

    /// Update a data structure.
    pub async fn update(&self, id: u64, request: &UpdateDataStructure) -> Result<Value> {
        self.client
            .patch(
                &format!("/data-structures/{}", id),
                Query::new(),
                request,
                "dataStructure",
            )
            .await
    }

    /// Copy a data structure, possibly into another team.
    pub async fn clone_to(&self, id: u64, name: &str, target_team_id: u64) -> Result<Value> {
        self.client
            .post(
                &format!("/data-structures/{}/clone", id),
                Query::new(),
                &json!({"name": name, "targetTeamId": target_team_id}),
                "dataStructure",
            )
            .await
    }

    /// Delete a data structure.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/data-structures/{}", id), confirmed())
            .await
    }
}
