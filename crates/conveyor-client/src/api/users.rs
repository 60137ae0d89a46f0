//! Users API.

use serde_json::Value;

use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;

/// Users API client.
pub struct UsersApi {
    client: ConveyorClient,
}

impl UsersApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// Get the user the credential belongs to.
    pub async fn me(&self) -> Result<Value> {
        self.client.get("/users/me", Query::new(), "authUser").await
    }
}
