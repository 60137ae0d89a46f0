//! Templates API.

use serde::Serialize;
use serde_json::Value;

use super::{cols_query, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::types::Pagination;

/// Query parameters for listing templates.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    /// List public templates instead of the team's own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Only templates using these apps.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub used_apps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<String>,
}

/// Templates API client.
pub struct TemplatesApi {
    client: ConveyorClient,
}

impl TemplatesApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List templates.
    pub async fn list(&self, query: &ListTemplatesQuery) -> Result<Value> {
        let value = self
            .client
            .get("/templates", Query::from_serialize(query)?, "templates")
            .await?;
        Ok(project(value, &query.cols))
    }

    /// Get a template by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/templates/{}", id), cols_query(cols), "template")
            .await?;
        Ok(project(value, cols))
    }

    /// Get a template's blueprint.
    pub async fn blueprint(&self, id: u64) -> Result<Value> {
        self.client
            .get(
                &format!("/templates/{}/blueprint", id),
                Query::new(),
                "response",
            )
            .await
    }
}
