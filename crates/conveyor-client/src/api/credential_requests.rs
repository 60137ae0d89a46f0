//! Credential requests API.
//!
//! A credential request asks another user to authorize connections or keys
//! on the requester's behalf.

use serde::Serialize;
use serde_json::Value;

use super::{ListOptions, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create a credential request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialRequest {
    pub team_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Connections to request, e.g. `[{"type": "slack2", "scope": [...]}]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Value>,
    /// Keys to request.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<Value>,
}

/// Credential requests API client.
pub struct CredentialRequestsApi {
    client: ConveyorClient,
}

impl CredentialRequestsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List credential requests in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self
            .client
            .get("/credential-requests/requests", query, "requests")
            .await?;
        Ok(project(value, &options.cols))
    }

    /// Get a credential request with its credentials.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client
            .request(
                &format!("/credential-requests/requests/{}/detail", super::seg(id)),
                RequestOptions::get(),
            )
            .await
    }

    /// Create a credential request.
    ///
    /// The response carries the public URL to hand to the authorizing user.
    pub async fn create(&self, request: &CreateCredentialRequest) -> Result<Value> {
        self.client
            .request(
                "/credential-requests/requests",
                RequestOptions::post().json(request)?,
            )
            .await
    }

    /// Decline a pending credential request.
    pub async fn decline(&self, id: &str) -> Result<()> {
        self.client
            .request(
                &format!("/credential-requests/requests/{}/decline", super::seg(id)),
                RequestOptions::post(),
            )
            .await?;
        Ok(())
    }

    /// Delete a credential request.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(
                &format!("/credential-requests/requests/{}", super::seg(id)),
                Query::new(),
            )
            .await
    }
}
