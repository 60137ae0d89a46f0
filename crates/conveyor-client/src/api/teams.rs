//! Teams API.

use serde::Serialize;
use serde_json::Value;

use super::{ListOptions, confirmed, cols_query, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Request to create a team.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    pub name: String,
    pub organization_id: u64,
    /// Cap on operations the team may consume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations_limit: Option<u64>,
}

/// Teams API client.
pub struct TeamsApi {
    client: ConveyorClient,
}

impl TeamsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List teams in an organization.
    pub async fn list(&self, organization_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("organizationId", organization_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/teams", query, "teams").await?;
        Ok(project(value, &options.cols))
    }

    /// Get a team by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/teams/{}", id), cols_query(cols), "team")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a team.
    pub async fn create(&self, request: &CreateTeam) -> Result<Value> {
        self.client.post("/teams", Query::new(), request, "team").await
    }

    /// Delete a team and everything it owns.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/teams/{}", id), confirmed())
            .await
    }
}
