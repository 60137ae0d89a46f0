//! Analytics API.

use serde::Serialize;
use serde_json::Value;

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::types::Pagination;

/// Filters for organization analytics.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// Restrict to these teams.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_id: Vec<u64>,
    /// Restrict to scenarios with these statuses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
    /// Time window, e.g. `last-30-days`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
}

/// Analytics API client.
pub struct AnalyticsApi {
    client: ConveyorClient,
}

impl AnalyticsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// Usage analytics for an organization's scenarios.
    pub async fn organization(
        &self,
        organization_id: u64,
        query: &AnalyticsQuery,
    ) -> Result<Value> {
        self.client
            .get(
                &format!("/analytics/{}", organization_id),
                Query::from_serialize(query)?,
                "analytics",
            )
            .await
    }
}
