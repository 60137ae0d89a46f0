//! Custom apps (SDK) API.
//!
//! App configuration is split into sections (`base`, `groups`, `install`,
//! `installSpec`) stored as JSONC, plus a Markdown readme.

use serde::Serialize;
use serde_json::Value;

use super::{confirmed, seg};
use crate::client::ConveyorClient;
use crate::encode::Query;
use crate::error::{Error, Result};
use crate::request::RequestOptions;

pub(crate) const JSONC: &str = "application/jsonc";
const MARKDOWN: &str = "text/markdown";

/// Request to create a custom app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApp {
    /// Unique app name, lowercase with dashes.
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex color, e.g. `#ff00ff`.
    pub theme: String,
    /// Interface language code, e.g. `en`.
    pub language: String,
    /// Countries the app is available in; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    pub private: bool,
    /// `countries`, `global`, or `private`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// Request to update a custom app.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// Custom apps API client.
pub struct SdkAppsApi {
    client: ConveyorClient,
}

impl SdkAppsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List custom apps owned by the user.
    pub async fn list(&self) -> Result<Value> {
        self.client.get("/sdk/apps", Query::new(), "apps").await
    }

    /// Get one version of a custom app.
    pub async fn get(&self, name: &str, version: u32) -> Result<Value> {
        self.client
            .get(&app_path(name, version), Query::new(), "app")
            .await
    }

    /// Create a custom app.
    pub async fn create(&self, request: &CreateApp) -> Result<Value> {
        self.client
            .post("/sdk/apps", Query::new(), request, "app")
            .await
    }

    /// Update a custom app.
    pub async fn update(&self, name: &str, version: u32, request: &UpdateApp) -> Result<Value> {
        self.client
            .patch(&app_path(name, version), Query::new(), request, "app")
            .await
    }

    /// Delete a custom app version.
    pub async fn delete(&self, name: &str, version: u32) -> Result<()> {
        self.client
            .delete(&app_path(name, version), confirmed())
            .await
    }

    /// Get a configuration section.
    pub async fn get_section(&self, name: &str, version: u32, section: &str) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", app_path(name, version), seg(section)),
                RequestOptions::get(),
            )
            .await
    }

    /// Replace a configuration section.
    pub async fn set_section(
        &self,
        name: &str,
        version: u32,
        section: &str,
        body: &Value,
    ) -> Result<Value> {
        self.client
            .request(
                &format!("{}/{}", app_path(name, version), seg(section)),
                jsonc_body(RequestOptions::put(), body)?,
            )
            .await
    }

    /// Get the app's Markdown readme.
    pub async fn get_docs(&self, name: &str, version: u32) -> Result<String> {
        let value = self
            .client
            .request(
                &format!("{}/readme", app_path(name, version)),
                RequestOptions::get(),
            )
            .await?;
        text_of(value)
    }

    /// Replace the app's Markdown readme.
    pub async fn set_docs(&self, name: &str, version: u32, docs: &str) -> Result<()> {
        self.client
            .request(
                &format!("{}/readme", app_path(name, version)),
                RequestOptions::put().text(docs, MARKDOWN),
            )
            .await?;
        Ok(())
    }
}

fn app_path(name: &str, version: u32) -> String {
    format!("/sdk/apps/{}/{}", seg(name), version)
}

/// Attach a JSON value as a JSONC body.
pub(crate) fn jsonc_body(options: RequestOptions, body: &Value) -> Result<RequestOptions> {
    Ok(options.text(serde_json::to_string(body)?, JSONC))
}

/// Extract a text body, accepting `null` as empty.
pub(crate) fn text_of(value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Err(Error::UnexpectedBody(format!("expected text, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    #[test]
    fn test_app_path_encodes_name() {
        assert_eq!(app_path("my app", 1), "/sdk/apps/my%20app/1");
    }

    #[test]
    fn test_jsonc_body() {
        let options =
            jsonc_body(RequestOptions::put(), &json!({"baseUrl": "https://x"})).unwrap();
        assert_eq!(options.headers[CONTENT_TYPE], JSONC);
        assert_eq!(
            options.serialized_body().unwrap().as_deref(),
            Some(r#"{"baseUrl":"https://x"}"#)
        );
    }

    #[test]
    fn test_text_of() {
        assert_eq!(text_of(Value::String("# Hi".into())).unwrap(), "# Hi");
        assert_eq!(text_of(Value::Null).unwrap(), "");
        let err = text_of(json!({"x": 1})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedBody(_)));
        assert!(err.status().is_none());
    }
}
