//! Custom app webhooks API.

use serde::Serialize;
use serde_json::{Value, json};

use super::sdk_apps::jsonc_body;
use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create an app webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppWebhook {
    /// Webhook type: `web`, `web-shared`, or `web-attached`.
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

/// Custom app webhooks API client.
pub struct SdkWebhooksApi {
    client: ConveyorClient,
}

impl SdkWebhooksApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List webhooks defined by an app.
    pub async fn list(&self, app_name: &str) -> Result<Value> {
        self.client
            .get(
                &format!("/sdk/apps/{}/webhooks", seg(app_name)),
                Query::new(),
                "appWebhooks",
            )
            .await
    }

    /// Get an app webhook by name.
    pub async fn get(&self, name: &str) -> Result<Value> {
        self.client
            .get(&webhook_path(name), Query::new(), "appWebhook")
            .await
    }

    /// Create a webhook for an app.
    pub async fn create(&self, app_name: &str, request: &CreateAppWebhook) -> Result<Value> {
        self.client
            .post(
                &format!("/sdk/apps/{}/webhooks", seg(app_name)),
                Query::new(),
                request,
                "appWebhook",
            )
            .await
    }

    /// Relabel an app webhook.
    pub async fn update(&self, name: &str, label: &str) -> Result<Value> {
        self.client
            .patch(
                &webhook_path(name),
                Query::new(),
                &json!({"label": label}),
                "appWebhook",
            )
            .await
    }

    /// Delete an app webhook.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete(&webhook_path(name), confirmed())
            .await
    }

    /// Get a webhook section (`api`, `parameters`, `attach`, ...).
    pub async fn get_section(&self, name: &str, section: &str) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", webhook_path(name), seg(section)),
                RequestOptions::get(),
            )
            .await
    }

    /// Replace a webhook section.
    pub async fn set_section(&self, name: &str, section: &str, body: &Value) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", webhook_path(name), seg(section)),
                jsonc_body(RequestOptions::put(), body)?,
            )
            .await
    }
}

fn webhook_path(name: &str) -> String {
    format!("/sdk/apps/webhooks/{}", seg(name))
}
