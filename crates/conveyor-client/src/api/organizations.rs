//! Organizations API.

use serde::Serialize;
use serde_json::Value;

use super::{ListOptions, confirmed, cols_query, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Request to create an organization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub name: String,
    pub region_id: u64,
    pub timezone_id: u64,
    pub country_id: u64,
}

/// Request to update an organization.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_id: Option<u64>,
}

/// Organizations API client.
pub struct OrganizationsApi {
    client: ConveyorClient,
}

impl OrganizationsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List organizations the user belongs to.
    pub async fn list(&self, options: &ListOptions) -> Result<Value> {
        let value = self
            .client
            .get(
                "/organizations",
                Query::from_serialize(options)?,
                "organizations",
            )
            .await?;
        Ok(project(value, &options.cols))
    }

    /// Get an organization by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/organizations/{}", id),
                cols_query(cols),
                "organization",
            )
            .await?;
        Ok(project(value, cols))
    }

    /// Create an organization.
    pub async fn create(&self, request: &CreateOrganization) -> Result<Value> {
        self.client
            .post("/organizations", Query::new(), request, "organization")
            .await
    }

    /// Update an organization.
    pub async fn update(&self, id: u64, request: &UpdateOrganization) -> Result<Value> {
        self.client
            .patch(
                &format!("/organizations/{}", id),
                Query::new(),
                request,
                "organization",
            )
            .await
    }

    /// Delete an organization.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/organizations/{}", id), confirmed())
            .await
    }
}
