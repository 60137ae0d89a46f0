//! Custom app connections API.

use serde::Serialize;
use serde_json::{Value, json};

use super::sdk_apps::jsonc_body;
use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create an app connection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppConnection {
    /// Connection type, e.g. `basic`, `oauth`, `apikey`.
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

/// Custom app connections API client.
pub struct SdkConnectionsApi {
    client: ConveyorClient,
}

impl SdkConnectionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List connections defined by an app.
    pub async fn list(&self, app_name: &str) -> Result<Value> {
        self.client
            .get(
                &format!("/sdk/apps/{}/connections", seg(app_name)),
                Query::new(),
                "appConnections",
            )
            .await
    }

    /// Get an app connection by name.
    pub async fn get(&self, name: &str) -> Result<Value> {
        self.client
            .get(&connection_path(name), Query::new(), "appConnection")
            .await
    }

    /// Create a connection for an app.
    pub async fn create(&self, app_name: &str, request: &CreateAppConnection) -> Result<Value> {
        self.client
            .post(
                &format!("/sdk/apps/{}/connections", seg(app_name)),
                Query::new(),
                request,
                "appConnection",
            )
            .await
    }

    /// Relabel an app connection.
    pub async fn update(&self, name: &str, label: &str) -> Result<Value> {
        self.client
            .patch(
                &connection_path(name),
                Query::new(),
                &json!({"label": label}),
                "appConnection",
            )
            .await
    }

    /// Delete an app connection.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete(&connection_path(name), confirmed())
            .await
    }

    /// Get a connection section (`api`, `parameters`, `scopes`, ...).
    pub async fn get_section(&self, name: &str, section: &str) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", connection_path(name), seg(section)),
                RequestOptions::get(),
            )
            .await
    }

    /// Replace a connection section.
    pub async fn set_section(&self, name: &str, section: &str, body: &Value) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", connection_path(name), seg(section)),
                jsonc_body(RequestOptions::put(), body)?,
            )
            .await
    }
}

fn connection_path(name: &str) -> String {
    format!("/sdk/apps/connections/{}", seg(name))
}
