//! Custom app IML functions API.

use serde_json::{Value, json};

use super::sdk_apps::text_of;
use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

const JAVASCRIPT: &str = "application/javascript";

/// Custom app functions API client.
pub struct SdkFunctionsApi {
    client: ConveyorClient,
}

impl SdkFunctionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List functions of an app version.
    pub async fn list(&self, app_name: &str, version: u32) -> Result<Value> {
        self.client
            .get(
                &format!("/sdk/apps/{}/{}/functions", seg(app_name), version),
                Query::new(),
                "appFunctions",
            )
            .await
    }

    /// Get a function.
    pub async fn get(&self, app_name: &str, version: u32, function: &str) -> Result<Value> {
        self.client
            .get(
                &function_path(app_name, version, function),
                Query::new(),
                "appFunction",
            )
            .await
    }

    /// Create an empty function.
    pub async fn create(&self, app_name: &str, version: u32, name: &str) -> Result<Value> {
        self.client
            .post(
                &format!("/sdk/apps/{}/{}/functions", seg(app_name), version),
                Query::new(),
                &json!({"name": name}),
                "appFunction",
            )
            .await
    }

    /// Delete a function.
    pub async fn delete(&self, app_name: &str, version: u32, function: &str) -> Result<()> {
        self.client
            .delete(&function_path(app_name, version, function), confirmed())
            .await
    }

    /// Get a function's JavaScript source.
    pub async fn get_code(&self, app_name: &str, version: u32, function: &str) -> Result<String> {
        let value = self
            .client
            .request(
                &format!("{}/code", function_path(app_name, version, function)),
                RequestOptions::get(),
            )
            .await?;
        text_of(value)
    }

    /// Replace a function's JavaScript source.
    pub async fn set_code(
        &self,
        app_name: &str,
        version: u32,
        function: &str,
        code: &str,
    ) -> Result<()> {
        self.client
            .request(
                &format!("{}/code", function_path(app_name, version, function)),
                RequestOptions::put().text(code, JAVASCRIPT),
            )
            .await?;
        Ok(())
    }

    /// Run the function's test code.
    pub async fn test(
        &self,
        app_name: &str,
        version: u32,
        function: &str,
        code: &str,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/test", function_path(app_name, version, function)),
                RequestOptions::post().text(code, JAVASCRIPT),
            )
            .await
    }
}

fn function_path(app_name: &str, version: u32, function: &str) -> String {
    format!("/sdk/apps/{}/{}/functions/{}", seg(app_name), version, seg(function))
}
