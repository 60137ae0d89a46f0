//! Connections API.

use serde::Serialize;
use serde_json::{Value, json};

use super::{cols_query, confirmed, project};
use crate::client::ConveyorClient;
use crate::encode::{Query, QueryValue};
use crate::error::Result;
use crate::request::RequestOptions;

/// Query parameters for listing connections.
#[derive(Debug, Clone, Default)]
pub struct ListConnectionsQuery {
    pub team_id: u64,
    /// Restrict to these connection types (e.g. `google`, `slack2`).
    pub types: Vec<String>,
    pub cols: Vec<String>,
}

impl ListConnectionsQuery {
    fn to_query(&self) -> Query {
        let mut query = Query::new().push("teamId", self.team_id);
        if !self.types.is_empty() {
            query = query.push("type", QueryValue::array(&self.types));
        }
        if !self.cols.is_empty() {
            query = query.push("cols", QueryValue::array(&self.cols));
        }
        query
    }
}

/// Request to create a connection.
///
/// `name` is the label shown to users; `account_name` is the connection
/// type, such as `slack2`.
#[derive(Debug, Clone, Default)]
pub struct CreateConnection {
    pub name: String,
    pub account_name: String,
    pub scopes: Vec<String>,
    pub data: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConnectionBody<'a> {
    account_name: &'a str,
    account_type: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    scopes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

/// Connections API client.
pub struct ConnectionsApi {
    client: ConveyorClient,
}

impl ConnectionsApi {
    pub(crate) fn new(client: ConveyorClient) -> Self {
        Self { client }
    }

    /// List connections in a team.
    pub async fn list(&self, query: &ListConnectionsQuery) -> Result<Value> {
        let value = self
            .client
            .get("/connections", query.to_query(), "connections")
            .await?;
        Ok(project(value, &query.cols))
    }

    /// Get a connection by ID.
    pub async fn get(&self, id: u64, cols: &[String]) -> Result<Value> {
        let value = self
            .client
            .get(
                &format!("/connections/{}", id),
                cols_query(cols),
                "connection",
            )
            .await?;
        Ok(project(value, cols))
    }

    /// Create a connection in a team.
    pub async fn create(&self, team_id: u64, request: &CreateConnection) -> Result<Value> {
        // The wire names are shifted by one: the label travels as
        // `accountName` and the type as `accountType`.
        let body = CreateConnectionBody {
            account_name: &request.name,
            account_type: &request.account_name,
            scopes: &request.scopes,
            data: request.data.as_ref(),
        };
        self.client
            .post(
                "/connections",
                Query::new().push("teamId", team_id),
                &body,
                "connection",
            )
            .await
    }

    /// Rename a connection.
    pub async fn rename(&self, id: u64, name: &str) -> Result<Value> {
        self.client
            .patch(
                &format!("/connections/{}", id),
                Query::new(),
                &json!({"name": name}),
                "connection",
            )
            .await
    }

    /// Replace the stored data (credentials, settings) of a connection.
    ///
    /// Returns whether anything changed.
    pub async fn set_data(&self, id: u64, data: &Value) -> Result<bool> {
        self.client
            .post(
                &format!("/connections/{}/set-data", id),
                Query::new(),
                data,
                "changed",
            )
            .await
    }

    /// Check that a connection can reach its service.
    pub async fn verify(&self, id: u64) -> Result<bool> {
        self.client
            .request_field(
                &format!("/connections/{}/test", id),
                RequestOptions::post(),
                "verified",
            )
            .await
    }

    /// Check whether a connection already grants the given scopes.
    pub async fn scoped(&self, id: u64, scopes: &[String]) -> Result<Value> {
        self.client
            .request(
                &format!("/connections/{}/scoped", id),
                RequestOptions::post().json(&json!({"scope": scopes}))?,
            )
            .await
    }

    /// Delete a connection.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("/connections/{}", id), confirmed())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_arrays() {
        let query = ListConnectionsQuery {
            team_id: 7,
            types: vec!["slack2".into(), "google".into()],
            cols: vec!["id".into()],
        };
        assert_eq!(
            query.to_query().to_query_string(),
            "teamId=7&type[]=slack2&type[]=google&cols[]=id"
        );
    }

    #[test]
    fn test_create_body_field_swap() {
        let request = CreateConnection {
            name: "My Slack".into(),
            account_name: "slack2".into(),
            ..Default::default()
        };
        let body = CreateConnectionBody {
            account_name: &request.name,
            account_type: &request.account_name,
            scopes: &request.scopes,
            data: request.data.as_ref(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"accountName": "My Slack", "accountType": "slack2"})
        );
    }
}
