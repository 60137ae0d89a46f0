//! Scenario folders API.

use serde_json::{Value, json};

use super::{cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Scenario folders API client.
pub struct FoldersApi {
    client: ConveyorClient,
}

impl FoldersApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List scenario folders in a team.
    pub async fn list(&self, team_id: u64, cols: &[String]) -> Result<Value> {
        let query = Query::new().push("teamId", team_id).extend(cols_query(cols));
        let value = self
            .client
            .get("/scenarios-folders", query, "scenariosFolders")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a folder.
    pub async fn create(&self, team_id: u64, name: &str) -> Result<Value> {
        self.client
            .post(
                "/scenarios-folders",
                Query::new(),
                &json!({"teamId": team_id, "name": name}),
                "scenarioFolder",
            )
            .await
    }

    /// Rename a folder.
    pub async fn update(&self, id: u64, name: &str) -> Result<Value> {
        self.client
            .patch(
                &format!("/scenarios-folders/{}", id),
                Query::new(),
                &json!({"name": name}),
                "scenarioFolder",
            )
            .await
    }

    /// Delete a folder.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/scenarios-folders/{}", id), confirmed())
            .await
    }
}
