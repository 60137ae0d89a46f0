//! Webhooks and mailhooks API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::types::Pagination;

/// Query parameters for listing hooks.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListHooksQuery {
    pub team_id: u64,
    /// Only hooks of this type (`web` or `mail`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Only hooks not yet attached to a scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<String>,
}

/// Request to create a hook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHook {
    pub name: String,
    pub team_id: u64,
    /// Hook type, e.g. `gateway-webhook` or `gateway-mailhook`.
    pub type_name: String,
    /// Type-specific settings (IP restrictions, data structure, ...).
    #[serde(flatten)]
    pub data: serde_json::Map<String, Value>,
}

/// Request to update a hook's settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateHook {
    #[serde(flatten)]
    pub data: serde_json::Map<String, Value>,
}

/// Hooks API client.
pub struct HooksApi {
    client: ConveyorClient,
}

impl HooksApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List hooks in a team.
    pub async fn list(&self, query: &ListHooksQuery) -> Result<Value> {
        let value = self
            .client
            .get("/hooks", Query::from_serialize(query)?, "hooks")
            .await?;
        Ok(project(value, &query.cols))
    }

    /// Get a hook by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/hooks/{}", id), cols_query(cols), "hook")
            .await?;
        Ok(project(value, cols))
    }

    /// Create a hook.
    pub async fn create(&self, request: &CreateHook) -> Result<Value> {
        self.client
            .post("/hooks", Query::new(), request, "hook")
            .await
    }

    /// Update a hook's settings.
    pub async fn update(&self, id: u64, request: &UpdateHook) -> Result<Value> {
        self.client
            .post(
                &format!("/hooks/{}/set-data", id),
                Query::new(),
                request,
                "hook",
            )
            .await
    }

    /// Rename a hook.
    pub async fn rename(&self, id: u64, name: &str) -> Result<Value> {
        self.client
            .patch(
                &format!("/hooks/{}", id),
                Query::new(),
                &json!({"name": name}),
                "hook",
            )
            .await
    }

    /// Delete a hook.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/hooks/{}", id), confirmed())
            .await
    }

    /// Start accepting data on a hook.
    pub async fn enable(&self, id: u64) -> Result<()> {
        self.action(id, "enable").await
    }

    /// Stop accepting data on a hook.
    pub async fn disable(&self, id: u64) -> Result<()> {
        self.action(id, "disable").await
    }

    /// Report whether the hook is reachable and attached.
    pub async fn ping(&self, id: u64) -> Result<Value> {
        self.client
            .request(&format!("/hooks/{}/ping", id), RequestOptions::get())
            .await
    }

    /// Begin determining the data structure from the next incoming payload.
    pub async fn learn_start(&self, id: u64) -> Result<()> {
        self.action(id, "learn-start").await
    }

    /// Stop determining the data structure.
    pub async fn learn_stop(&self, id: u64) -> Result<()> {
        self.action(id, "learn-stop").await
    }

    async fn action(&self, id: u64, action: &str) -> Result<()> {
        self.client
            .request(&format!("/hooks/{}/{}", id, action), RequestOptions::post())
            .await?;
        Ok(())
    }
}
