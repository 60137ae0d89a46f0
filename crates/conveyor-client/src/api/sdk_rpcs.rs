//! Custom app remote procedures (RPCs) API.

use serde::Serialize;
use serde_json::Value;

use super::sdk_apps::jsonc_body;
use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::Result;
use crate::request::RequestOptions;

/// Request to create an RPC.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppRpc {
    pub name: String,
    pub label: String,
    /// Connection used by the RPC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
}

/// Request to update an RPC.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppRpc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
}

/// Inputs for a test run of an RPC.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRpc {
    /// Parameters passed to the RPC.
    pub data: Value,
    /// Schema describing `data`.
    pub schema: Value,
}

/// Custom app RPCs API client.
pub struct SdkRpcsApi {
    client: ConveyorClient,
}

impl SdkRpcsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List RPCs of an app version.
    pub async fn list(&self, app_name: &str, version: u32) -> Result<Value> {
        self.client
            .get(
                &format!("/sdk/apps/{}/{}/rpcs", seg(app_name), version),
                Query::new(),
                "appRpcs",
            )
            .await
    }

    /// Get an RPC.
    pub async fn get(&self, app_name: &str, version: u32, rpc: &str) -> Result<Value> {
        self.client
            .get(&rpc_path(app_name, version, rpc), Query::new(), "appRpc")
            .await
    }

    /// Create an RPC.
    pub async fn create(
        &self,
        app_name: &str,
        version: u32,
        request: &CreateAppRpc,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("/sdk/apps/{}/{}/rpcs", seg(app_name), version),
                Query::new(),
                request,
                "appRpc",
            )
            .await
    }

    /// Update an RPC.
    pub async fn update(
        &self,
        app_name: &str,
        version: u32,
        rpc: &str,
        request: &UpdateAppRpc,
    ) -> Result<Value> {
        self.client
            .patch(
                &rpc_path(app_name, version, rpc),
                Query::new(),
                request,
                "appRpc",
            )
            .await
    }

    /// Delete an RPC.
    pub async fn delete(&self, app_name: &str, version: u32, rpc: &str) -> Result<()> {
        self.client
            .delete(&rpc_path(app_name, version, rpc), confirmed())
            .await
    }

    /// Get an RPC section (`api` or `parameters`).
    pub async fn get_section(
        &self,
        app_name: &str,
        version: u32,
        rpc: &str,
        section: &str,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", rpc_path(app_name, version, rpc), seg(section)),
                RequestOptions::get(),
            )
            .await
    }

    /// Replace an RPC section.
    pub async fn set_section(
        &self,
        app_name: &str,
        version: u32,
        rpc: &str,
        section: &str,
        body: &Value,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", rpc_path(app_name, version, rpc), seg(section)),
                jsonc_body(RequestOptions::put(), body)?,
            )
            .await
    }

    /// Execute an RPC with sample inputs and return its output.
    pub async fn test(
        &self,
        app_name: &str,
        version: u32,
        rpc: &str,
        request: &TestRpc,
    ) -> Result<Value> {
        self.client
            .request(
                &rpc_path(app_name, version, rpc),
                RequestOptions::post().json(request)?,
            )
            .await
    }
}

fn rpc_path(app_name: &str, version: u32, rpc: &str) -> String {
    format!("/sdk/apps/{}/{}/rpcs/{}", seg(app_name), version, seg(rpc))
}
