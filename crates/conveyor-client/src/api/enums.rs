//! Enumerations API (countries, regions, timezones).

use serde_json::Value;

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Enums API client.
pub struct EnumsApi {
    client: ConveyorClient,
}

impl EnumsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List countries.
    pub async fn countries(&self) -> Result<Value> {
        self.client
            .get("/enums/countries", Query::new(), "countries")
            .await
    }

    /// List regions (zones).
    pub async fn regions(&self) -> Result<Value> {
        self.client
            .get("/enums/regions", Query::new(), "regions")
            .await
    }

    /// List timezones.
    pub async fn timezones(&self) -> Result<Value> {
        self.client
            .get("/enums/timezones", Query::new(), "timezones")
            .await
    }
}
