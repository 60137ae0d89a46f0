//! Custom functions API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{ListOptions, cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Request to create a custom function.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunction {
    pub name: String,
    pub description: String,
    /// JavaScript source defining a function named `name`.
    pub code: String,
}

/// Request to update a custom function.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFunction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Custom functions API client.
pub struct FunctionsApi {
    client: ConveyorClient,
}

impl FunctionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List custom functions in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/functions", query, "functions").await?;
        Ok(project(value, &options.cols))
    }

    /// Get a custom function by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/functions/{}", id), cols_query(cols), "function")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a custom function in a team.
    pub async fn create(&self, team_id: u64, request: &CreateFunction) -> Result<Value> {
        self.client
            .post(
                "/functions",
                Query::new().push("teamId", team_id),
                request,
                "function",
            )
            .await
    }

    /// Update a custom function.
    pub async fn update(&self, id: u64, request: &UpdateFunction) -> Result<Value> {
        self.client
            .patch(
                &format!("/functions/{}", id),
                Query::new(),
                request,
                "function",
            )
            .await
    }

    /// Delete a custom function.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/functions/{}", id), confirmed())
            .await
    }

    /// Validate function source without saving it.
    pub async fn check(&self, team_id: u64, code: &str) -> Result<Value> {
        self.client
            .post(
                "/functions/check",
                Query::new().push("teamId", team_id),
                &json!({"code": code}),
                "result",
            )
            .await
    }
}
