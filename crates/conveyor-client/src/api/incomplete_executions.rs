//! Incomplete executions (DLQ) API.

use serde_json::Value;

use super::{ListOptions, project};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Incomplete executions API client.
pub struct IncompleteExecutionsApi {
    client: ConveyorClient,
}

impl IncompleteExecutionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List incomplete executions of a scenario.
    pub async fn list(&self, scenario_id: u64, options: &ListOptions) -> Result<Value> {
        let query = Query::new()
            .push("scenarioId", scenario_id)
            .extend(Query::from_serialize(options)?);
        let value = self.client.get("/dlqs", query, "dlqs").await?;
        Ok(project(value, &options.cols))
    }

    /// Get an incomplete execution.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client
            .get(&format!("/dlqs/{}", super::seg(id)), Query::new(), "dlq")
            .await
    }

    /// Delete an incomplete execution.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/dlqs/{}", super::seg(id)), Query::new())
            .await
    }

    /// Retry an incomplete execution.
    pub async fn retry(&self, id: &str) -> Result<()> {
        self.client
            .request(
                &format!("/dlqs/{}/retry", super::seg(id)),
                RequestOptions::post(),
            )
            .await?;
        Ok(())
    }

    /// Get the blueprint the execution ran with.
    pub async fn blueprint(&self, id: &str) -> Result<Value> {
        self.client
            .get(
                &format!("/dlqs/{}/blueprint", super::seg(id)),
                Query::new(),
                "response",
            )
            .await
    }

    /// Get the bundle the execution stopped on.
    pub async fn bundle(&self, id: &str) -> Result<Value> {
        self.client
            .request(
                &format!("/dlqs/{}/bundle", super::seg(id)),
                RequestOptions::get(),
            )
            .await
    }
}
