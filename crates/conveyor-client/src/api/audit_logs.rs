//! Audit logs API.

use serde::Serialize;
use serde_json::Value;

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::types::Pagination;

/// Filters for audit log listings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    /// Only entries for these teams.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team: Vec<u64>,
    /// Only entries caused by these users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<u64>,
    /// Only these event names, e.g. `scenario_updated`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_type: Vec<String>,
    /// ISO 8601 lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// ISO 8601 upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
}

/// Audit logs API client.
pub struct AuditLogsApi {
    client: ConveyorClient,
}

impl AuditLogsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// Audit log entries of an organization.
    pub async fn organization(&self, organization_id: u64, query: &AuditLogQuery) -> Result<Value> {
        self.client
            .get(
                &format!("/audit-logs/organization/{}", organization_id),
                Query::from_serialize(query)?,
                "auditLogs",
            )
            .await
    }

    /// Audit log entries of a team.
    pub async fn team(&self, team_id: u64, query: &AuditLogQuery) -> Result<Value> {
        self.client
            .get(
                &format!("/audit-logs/team/{}", team_id),
                Query::from_serialize(query)?,
                "auditLogs",
            )
            .await
    }
}
