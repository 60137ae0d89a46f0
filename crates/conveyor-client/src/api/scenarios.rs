//! Scenarios API.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{as_json_string, as_opt_json_string, cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::Pagination;

/// Query parameters for listing scenarios.
///
/// Either `team_id` or `organization_id` must be set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScenariosQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<String>,
}

/// Request to create a scenario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenario {
    pub team_id: u64,
    /// Scenario blueprint; sent JSON-encoded.
    #[serde(serialize_with = "as_json_string")]
    pub blueprint: Value,
    /// Scheduling settings; sent JSON-encoded.
    #[serde(serialize_with = "as_json_string")]
    pub scheduling: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    /// Template the scenario was created from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basedon: Option<u64>,
}

/// Request to update a scenario.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScenario {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_opt_json_string"
    )]
    pub blueprint: Option<Value>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_opt_json_string"
    )]
    pub scheduling: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
}

/// Request to run a scenario on demand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScenario {
    /// Input bundle for scenarios with an interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Wait for the run to finish before responding.
    pub responsive: bool,
}

/// Request to clone a scenario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneScenario {
    pub name: String,
    pub team_id: u64,
    /// Copy module states (e.g. last processed IDs).
    pub states: bool,
    /// Old connection ID → connection ID in the target team.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub account: Map<String, Value>,
    /// Old key ID → key ID in the target team.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub key: Map<String, Value>,
    /// Old hook ID → hook ID in the target team.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub hook: Map<String, Value>,
}

/// Scenarios API client.
pub struct ScenariosApi {
    client: ConveyorClient,
}

impl ScenariosApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List scenarios in a team or organization.
    pub async fn list(&self, query: &ListScenariosQuery) -> Result<Value> {
        let value = self
            .client
            .get("/scenarios", Query::from_serialize(query)?, "scenarios")
            .await?;
        Ok(project(value, &query.cols))
    }

    /// Get a scenario by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/scenarios/{}", id), cols_query(cols), "scenario")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a scenario.
    pub async fn create(&self, request: &CreateScenario) -> Result<Value> {
        self.client
            .post("/scenarios", confirmed(), request, "scenario")
            .await
    }

    /// Update a scenario.
    pub async fn update(&self, id: u64, request: &UpdateScenario) -> Result<Value> {
        self.client
            .patch(
                &format!("/scenarios/{}", id),
                confirmed(),
                request,
                "scenario",
            )
            .await
    }

    /// Delete a scenario.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/scenarios/{}", id), Query::new())
            .await
    }

    /// Activate a scenario so it runs on its schedule.
    pub async fn activate(&self, id: u64) -> Result<Value> {
        self.client
            .request_field(
                &format!("/scenarios/{}/start", id),
                RequestOptions::post(),
                "scenario",
            )
            .await
    }

    /// Deactivate a scenario.
    pub async fn deactivate(&self, id: u64) -> Result<Value> {
        self.client
            .request_field(
                &format!("/scenarios/{}/stop", id),
                RequestOptions::post(),
                "scenario",
            )
            .await
    }

    /// Run a scenario immediately.
    ///
    /// Returns the execution ID and, for non-responsive runs, a status URL.
    pub async fn run(&self, id: u64, request: &RunScenario) -> Result<Value> {
        self.client
            .request(
                &format!("/scenarios/{}/run", id),
                RequestOptions::post().json(request)?,
            )
            .await
    }

    /// Clone a scenario into a team.
    pub async fn clone_to(
        &self,
        id: u64,
        organization_id: u64,
        request: &CloneScenario,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("/scenarios/{}/clone", id),
                Query::new()
                    .push("organizationId", organization_id)
                    .push("confirmed", true),
                request,
                "scenario",
            )
            .await
    }
}
