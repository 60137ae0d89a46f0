//! Devices API.

use serde_json::Value;

use super::{ListOptions, cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Devices API client.
pub struct DevicesApi {
    client: ConveyorClient,
}

impl DevicesApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List devices registered in a team.
    pub async fn list(&self, team_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("teamId", team_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/devices", query, "devices").await?;
        Ok(project(value, &options.cols))
    }

    /// Get a device by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(&format!("/devices/{}", id), cols_query(cols), "device")
            .await?;
        Ok(project(value, cols))
    }

    /// Unregister a device.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/devices/{}", id), confirmed())
            .await
    }
}
