//! Scenario interface (inputs/outputs) API.

use serde_json::{Value, json};

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Scenario interface API client.
pub struct ScenarioInterfaceApi {
    client: ConveyorClient,
}

impl ScenarioInterfaceApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// Get the input and output specification of a scenario.
    pub async fn get(&self, scenario_id: u64) -> Result<Value> {
        self.client
            .get(
                &format!("/scenarios/{}/interface", scenario_id),
                Query::new(),
                "interface",
            )
            .await
    }

    /// Replace the input and output specification of a scenario.
    pub async fn update(&self, scenario_id: u64, interface: &Value) -> Result<Value> {
        self.client
            .patch(
                &format!("/scenarios/{}/interface", scenario_id),
                Query::new(),
                &json!({"interface": interface}),
                "interface",
            )
            .await
    }
}
