//! Scenario execution logs API.

use serde::Serialize;
use serde_json::Value;

use super::project;
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::Pagination;

/// Query parameters for listing executions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExecutionsQuery {
    /// Lower bound, milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    /// Upper bound, milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
    /// Execution status code (1 success, 2 warning, 3 error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<String>,
}

/// Executions API client.
pub struct ExecutionsApi {
    client: ConveyorClient,
}

impl ExecutionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List execution logs of a scenario.
    pub async fn list(&self, scenario_id: u64, query: &ListExecutionsQuery) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/scenarios/{}/logs", scenario_id),
                Query::from_serialize(query)?,
                "scenarioLogs",
            )
            .await?;
        Ok(project(value, &query.cols))
    }

    /// Get the result of a single execution.
    pub async fn get(&self, scenario_id: u64, execution_id: &str) -> Result<Value> {
        self.client
            .request(
                &format!(
                    "/scenarios/{}/executions/{}",
                    scenario_id,
                    super::seg(execution_id)
                ),
                RequestOptions::get(),
            )
            .await
    }
}
