//! Notifications API.

use serde_json::Value;

use super::{ListOptions, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Notifications API client.
pub struct NotificationsApi {
    client: ConveyorClient,
}

impl NotificationsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List notifications of the authenticated user.
    pub async fn list(&self, options: &ListOptions) -> Result<Value> {
        let value = self
            .client
            .get(
                "/notifications",
                Query::from_serialize(options)?,
                "notifications",
            )
            .await?;
        Ok(project(value, &options.cols))
    }
}
