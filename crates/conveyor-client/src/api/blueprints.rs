//! Scenario blueprints API.

use serde_json::Value;

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Blueprints API client.
pub struct BlueprintsApi {
    client: ConveyorClient,
}

impl BlueprintsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// Get a scenario's blueprint and scheduling.
    ///
    /// `blueprint_id` selects a historical version; `draft` returns the
    /// unsaved draft instead of the live version.
    pub async fn get(
        &self,
        scenario_id: u64,
        blueprint_id: Option<u64>,
        draft: bool,
    ) -> Result<Value> {
        let query = Query::new()
            .push("blueprintId", blueprint_id)
            .push("draft", draft.then_some(true));
        self.client
            .get(
                &format!("/scenarios/{}/blueprint", scenario_id),
                query,
                "response",
            )
            .await
    }

    /// List saved blueprint versions of a scenario.
    pub async fn versions(&self, scenario_id: u64) -> Result<Value> {
        self.client
            .get(
                &format!("/scenarios/{}/blueprints", scenario_id),
                Query::new(),
                "scenariosBlueprints",
            )
            .await
    }
}
