//! API endpoint implementations.

mod analytics;
mod audit_logs;
mod blueprints;
mod connections;
mod credential_requests;
mod data_store_records;
mod data_stores;
mod data_structures;
mod devices;
mod enums;
mod executions;
mod folders;
mod functions;
mod hooks;
mod incomplete_executions;
mod keys;
mod notifications;
mod organizations;
mod scenario_interface;
mod scenarios;
mod sdk_apps;
mod sdk_connections;
mod sdk_functions;
mod sdk_modules;
mod sdk_rpcs;
mod sdk_webhooks;
mod teams;
mod templates;
mod users;

pub use analytics::{AnalyticsApi, AnalyticsQuery};
pub use audit_logs::{AuditLogQuery, AuditLogsApi};
pub use blueprints::BlueprintsApi;
pub use connections::{ConnectionsApi, CreateConnection, ListConnectionsQuery};
pub use credential_requests::{CreateCredentialRequest, CredentialRequestsApi};
pub use data_store_records::{CreateRecord, DataStoreRecordsApi, DeleteRecords};
pub use data_stores::{CreateDataStore, DataStoresApi, UpdateDataStore};
pub use data_structures::{CreateDataStructure, DataStructuresApi, UpdateDataStructure};
pub use devices::DevicesApi;
pub use enums::EnumsApi;
pub use executions::{ExecutionsApi, ListExecutionsQuery};
pub use folders::FoldersApi;
pub use functions::{CreateFunction, FunctionsApi, UpdateFunction};
pub use hooks::{CreateHook, HooksApi, ListHooksQuery, UpdateHook};
pub use incomplete_executions::IncompleteExecutionsApi;
pub use keys::{CreateKey, KeysApi, UpdateKey};
pub use notifications::NotificationsApi;
pub use organizations::{CreateOrganization, OrganizationsApi, UpdateOrganization};
pub use scenario_interface::ScenarioInterfaceApi;
pub use scenarios::{
    CloneScenario, CreateScenario, ListScenariosQuery, RunScenario, ScenariosApi, UpdateScenario,
};
pub use sdk_apps::{CreateApp, SdkAppsApi, UpdateApp};
pub use sdk_connections::{CreateAppConnection, SdkConnectionsApi};
pub use sdk_functions::SdkFunctionsApi;
pub use sdk_modules::{CreateAppModule, SdkModulesApi, UpdateAppModule};
pub use sdk_rpcs::{CreateAppRpc, SdkRpcsApi, TestRpc, UpdateAppRpc};
pub use sdk_webhooks::{CreateAppWebhook, SdkWebhooksApi};
pub use teams::{CreateTeam, TeamsApi};
pub use templates::{ListTemplatesQuery, TemplatesApi};
pub use users::UsersApi;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::encode::Query;
use crate::types::{Pagination, pick};

/// Pagination and column selection shared by most listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOptions {
    /// Page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<Pagination>,
    /// Fields to return; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cols: Vec<String>,
}

impl ListOptions {
    /// Options for a single page.
    pub fn page(pagination: Pagination) -> Self {
        Self {
            pg: Some(pagination),
            cols: Vec::new(),
        }
    }

    /// Restrict the returned fields.
    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }
}

/// Apply column selection to a decoded listing or object.
pub(crate) fn project(value: Value, cols: &[String]) -> Value {
    if cols.is_empty() {
        value
    } else {
        pick(&value, cols)
    }
}

/// Query for a single `cols[]` selection.
pub(crate) fn cols_query(cols: &[String]) -> Query {
    if cols.is_empty() {
        Query::new()
    } else {
        Query::new().push_array("cols", cols)
    }
}

/// Query carrying `confirmed=true`, required by destructive endpoints.
pub(crate) fn confirmed() -> Query {
    Query::new().push("confirmed", true)
}

/// Percent-encode a path segment.
pub(crate) fn seg(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Serialize a JSON value as a JSON-encoded string.
///
/// Blueprints and scheduling are accepted by the platform only in string form.
pub(crate) fn as_json_string<S: Serializer>(
    value: &Value,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Value::String(s) => serializer.serialize_str(s),
        other => serializer.serialize_str(&other.to_string()),
    }
}

/// [`as_json_string`] for optional fields.
pub(crate) fn as_opt_json_string<S: Serializer>(
    value: &Option<Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => as_json_string(v, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_options_query() {
        let opts = ListOptions::page(Pagination::page(0, 5)).columns(["id", "name"]);
        let q = Query::from_serialize(&opts).unwrap();
        assert_eq!(
            q.to_query_string(),
            "pg[offset]=0&pg[limit]=5&cols[]=id&cols[]=name"
        );
    }

    #[test]
    fn test_empty_list_options() {
        let q = Query::from_serialize(&ListOptions::default()).unwrap();
        assert!(q.to_query_string().is_empty());
    }

    #[test]
    fn test_json_string_serialization() {
        #[derive(Serialize)]
        struct Body {
            #[serde(serialize_with = "as_json_string")]
            blueprint: Value,
        }
        let body = serde_json::to_value(Body {
            blueprint: json!({"flow": []}),
        })
        .unwrap();
        assert_eq!(body, json!({"blueprint": "{\"flow\":[]}"}));

        let passthrough = serde_json::to_value(Body {
            blueprint: json!("{\"flow\":[]}"),
        })
        .unwrap();
        assert_eq!(passthrough, body);
    }

    #[test]
    fn test_seg_encodes() {
        assert_eq!(seg("my app"), "my%20app");
        assert_eq!(seg("a/b"), "a%2Fb");
    }
}
