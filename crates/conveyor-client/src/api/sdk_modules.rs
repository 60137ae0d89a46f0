//! Custom app modules API.

use serde::Serialize;
use serde_json::Value;

use super::sdk_apps::jsonc_body;
use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create an app module.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppModule {
    pub name: String,
    /// Module type ID (1 trigger, 4 action, 9 search, ...).
    pub type_id: u32,
    pub label: String,
    pub description: String,
    /// Connection used by the module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Webhook for instant triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

/// Request to update an app module.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppModule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

/// Custom app modules API client.
pub struct SdkModulesApi {
    client: ConveyorClient,
}

impl SdkModulesApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List modules of an app version.
    pub async fn list(&self, app_name: &str, version: u32) -> Result<Value> {
        self.client
            .get(
                &format!("/sdk/apps/{}/{}/modules", seg(app_name), version),
                Query::new(),
                "appModules",
            )
            .await
    }

    /// Get a module.
    pub async fn get(&self, app_name: &str, version: u32, module: &str) -> Result<Value> {
        self.client
            .get(
                &module_path(app_name, version, module),
                Query::new(),
                "appModule",
            )
            .await
    }

    /// Create a module.
    pub async fn create(
        &self,
        app_name: &str,
        version: u32,
        request: &CreateAppModule,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("/sdk/apps/{}/{}/modules", seg(app_name), version),
                Query::new(),
                request,
                "appModule",
            )
            .await
    }

    /// Update a module.
    pub async fn update(
        &self,
        app_name: &str,
        version: u32,
        module: &str,
        request: &UpdateAppModule,
    ) -> Result<Value> {
        self.client
            .patch(
                &module_path(app_name, version, module),
                Query::new(),
                request,
                "appModule",
            )
            .await
    }

    /// Delete a module.
    pub async fn delete(&self, app_name: &str, version: u32, module: &str) -> Result<()> {
        self.client
            .delete(&module_path(app_name, version, module), confirmed())
            .await
    }

    /// Get a module section (`api`, `parameters`, `expect`, `interface`, ...).
    pub async fn get_section(
        &self,
        app_name: &str,
        version: u32,
        module: &str,
        section: &str,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", module_path(app_name, version, module), seg(section)),
                RequestOptions::get(),
            )
            .await
    }

    /// Replace a module section.
    pub async fn set_section(
        &self,
        app_name: &str,
        version: u32,
        module: &str,
        section: &str,
        body: &Value,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", module_path(app_name, version, module), seg(section)),
                jsonc_body(RequestOptions::put(), body)?,
            )
            .await
    }
}

fn module_path(app_name: &str, version: u32, module: &str) -> String {
    format!("/sdk/apps/{}/{}/modules/{}", seg(app_name), version, seg(module))
}
