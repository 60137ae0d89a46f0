//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{
    AnalyticsApi, AuditLogsApi, BlueprintsApi, ConnectionsApi, CredentialRequestsApi,
    DataStoreRecordsApi, DataStoresApi, DataStructuresApi, DevicesApi, EnumsApi, ExecutionsApi,
    FoldersApi, FunctionsApi, HooksApi, IncompleteExecutionsApi, KeysApi, NotificationsApi,
    OrganizationsApi, ScenarioInterfaceApi, ScenariosApi, SdkAppsApi, SdkConnectionsApi,
    SdkFunctionsApi, SdkModulesApi, SdkRpcsApi, SdkWebhooksApi, TeamsApi, TemplatesApi, UsersApi,
};
use crate::auth::Credential;
use crate::encode::{Query, encode_query};
use crate::error::{Error, Result};
use crate::request::RequestOptions;
use crate::retry::{RetryPolicy, send_with_retry};
use crate::transport::{Endpoint, HeaderContext, HttpRequest, Protocol, ReqwestTransport, Transport};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default API version.
pub const DEFAULT_API_VERSION: u32 = 2;

/// Automation platform API client.
///
/// Cheap to clone; all clones share one immutable configuration and one
/// transport.
///
/// # Example
///
/// ```no_run
/// use conveyor_client::ConveyorClient;
///
/// # async fn example() -> conveyor_client::Result<()> {
/// let client = ConveyorClient::builder()
///     .zone("eu1.example.com")
///     .token("8a3b1c2d-1234-4abc-9def-0123456789ab")
///     .build()?;
///
/// let me = client.users().me().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConveyorClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    credential: Credential,
    user_agent: String,
    default_headers: HeaderMap,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ConveyorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConveyorClient")
            .field("endpoint", &self.inner.endpoint)
            .field("credential", &self.inner.credential)
            .field("retry", &self.inner.retry)
            .finish()
    }
}

impl ConveyorClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings for a zone.
    pub fn new(token: impl Into<String>, zone: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).zone(zone).build()
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// The retry policy applied to every request.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the organizations API.
    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi::new(self.clone())
    }

    /// Access the teams API.
    pub fn teams(&self) -> TeamsApi {
        TeamsApi::new(self.clone())
    }

    /// Access the enums API.
    pub fn enums(&self) -> EnumsApi {
        EnumsApi::new(self.clone())
    }

    /// Access the scenario folders API.
    pub fn folders(&self) -> FoldersApi {
        FoldersApi::new(self.clone())
    }

    /// Access the scenarios API.
    pub fn scenarios(&self) -> ScenariosApi {
        ScenariosApi::new(self.clone())
    }

    /// Access the blueprints API.
    pub fn blueprints(&self) -> BlueprintsApi {
        BlueprintsApi::new(self.clone())
    }

    /// Access the scenario interface API.
    pub fn scenario_interface(&self) -> ScenarioInterfaceApi {
        ScenarioInterfaceApi::new(self.clone())
    }

    /// Access the executions API.
    pub fn executions(&self) -> ExecutionsApi {
        ExecutionsApi::new(self.clone())
    }

    /// Access the incomplete executions API.
    pub fn incomplete_executions(&self) -> IncompleteExecutionsApi {
        IncompleteExecutionsApi::new(self.clone())
    }

    /// Access the connections API.
    pub fn connections(&self) -> ConnectionsApi {
        ConnectionsApi::new(self.clone())
    }

    /// Access the keys API.
    pub fn keys(&self) -> KeysApi {
        KeysApi::new(self.clone())
    }

    /// Access the hooks (webhooks and mailhooks) API.
    pub fn hooks(&self) -> HooksApi {
        HooksApi::new(self.clone())
    }

    /// Access the data structures API.
    pub fn data_structures(&self) -> DataStructuresApi {
        DataStructuresApi::new(self.clone())
    }

    /// Access the data stores API.
    pub fn data_stores(&self) -> DataStoresApi {
        DataStoresApi::new(self.clone())
    }

    /// Access the data store records API.
    pub fn data_store_records(&self) -> DataStoreRecordsApi {
        DataStoreRecordsApi::new(self.clone())
    }

    /// Access the custom functions API.
    pub fn functions(&self) -> FunctionsApi {
        FunctionsApi::new(self.clone())
    }

    /// Access the credential requests API.
    pub fn credential_requests(&self) -> CredentialRequestsApi {
        CredentialRequestsApi::new(self.clone())
    }

    /// Access the templates API.
    pub fn templates(&self) -> TemplatesApi {
        TemplatesApi::new(self.clone())
    }

    /// Access the devices API.
    pub fn devices(&self) -> DevicesApi {
        DevicesApi::new(self.clone())
    }

    /// Access the analytics API.
    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi::new(self.clone())
    }

    /// Access the audit logs API.
    pub fn audit_logs(&self) -> AuditLogsApi {
        AuditLogsApi::new(self.clone())
    }

    /// Access the notifications API.
    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.clone())
    }

    /// Access the custom apps SDK API.
    pub fn sdk_apps(&self) -> SdkAppsApi {
        SdkAppsApi::new(self.clone())
    }

    /// Access the custom app connections SDK API.
    pub fn sdk_connections(&self) -> SdkConnectionsApi {
        SdkConnectionsApi::new(self.clone())
    }

    /// Access the custom app webhooks SDK API.
    pub fn sdk_webhooks(&self) -> SdkWebhooksApi {
        SdkWebhooksApi::new(self.clone())
    }

    /// Access the custom app modules SDK API.
    pub fn sdk_modules(&self) -> SdkModulesApi {
        SdkModulesApi::new(self.clone())
    }

    /// Access the custom app RPCs SDK API.
    pub fn sdk_rpcs(&self) -> SdkRpcsApi {
        SdkRpcsApi::new(self.clone())
    }

    /// Access the custom app functions SDK API.
    pub fn sdk_functions(&self) -> SdkFunctionsApi {
        SdkFunctionsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Dispatch a request and decode the response.
    ///
    /// Rooted paths (`/scenarios`) resolve against the client's endpoint.
    /// Error responses surface as [`Error::Api`]; network failures as
    /// [`Error::Http`].
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let inner = &self.inner;
        let transport = inner.transport.as_ref();

        let headers = transport.prepare_headers(&HeaderContext {
            credential: &inner.credential,
            user_agent: &inner.user_agent,
            defaults: &inner.default_headers,
            request: &options.headers,
            json_body: options.has_json_body(),
        })?;
        let url = encode_query(&transport.prepare_url(&inner.endpoint, path), &options.query);

        let request = HttpRequest {
            method: options.method.clone(),
            url,
            headers,
            body: options.serialized_body()?,
        };

        let response = send_with_retry(transport, &inner.retry, &request).await?;
        transport.decode(response)
    }

    /// Dispatch a request and deserialize the whole response.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Dispatch a request and unwrap one field of the response envelope.
    ///
    /// `{"scenario": {...}}` with `field = "scenario"` yields the inner object.
    pub async fn request_field<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        field: &str,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        unwrap_field(value, field)
    }
}

impl ConveyorClient {
    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP helpers (for API implementations)
    // ─────────────────────────────────────────────────────────────────────────

    /// GET and unwrap one envelope field.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
        field: &str,
    ) -> Result<T> {
        self.request_field(path, RequestOptions::get().query(query), field)
            .await
    }

    /// Send a JSON body and unwrap one envelope field.
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: &B,
        field: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::method(method).query(query).json(body)?;
        self.request_field(path, options, field).await
    }

    /// POST a JSON body and unwrap one envelope field.
    pub(crate) async fn post<T, B>(
        &self,
        path: &str,
        query: Query,
        body: &B,
        field: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, query, body, field).await
    }

    /// PATCH a JSON body and unwrap one envelope field.
    pub(crate) async fn patch<T, B>(
        &self,
        path: &str,
        query: Query,
        body: &B,
        field: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, query, body, field).await
    }

    /// DELETE, ignoring whatever body comes back.
    pub(crate) async fn delete(&self, path: &str, query: Query) -> Result<()> {
        self.request(path, RequestOptions::delete().query(query))
            .await?;
        Ok(())
    }
}

/// Take a named field out of a decoded JSON envelope.
pub(crate) fn unwrap_field<T: DeserializeOwned>(value: Value, field: &str) -> Result<T> {
    match value {
        Value::Object(mut map) => {
            let inner = map
                .remove(field)
                .ok_or_else(|| Error::MissingField(field.to_string()))?;
            Ok(serde_json::from_value(inner)?)
        }
        _ => Err(Error::MissingField(field.to_string())),
    }
}

/// Builder for creating a [`ConveyorClient`].
pub struct ClientBuilder {
    zone: Option<String>,
    token: Option<String>,
    version: u32,
    protocol: Protocol,
    timeout: Duration,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    retry: RetryPolicy,
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("zone", &self.zone)
            .field("version", &self.version)
            .field("protocol", &self.protocol)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            zone: None,
            token: None,
            version: DEFAULT_API_VERSION,
            protocol: Protocol::Https,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            headers: Vec::new(),
            retry: RetryPolicy::default(),
            transport: None,
        }
    }

    /// Set the zone host, e.g. `eu1.example.com`.
    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Set the credential (API key or OAuth access token).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the API version number.
    pub fn api_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the URL scheme.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the request timeout for the built-in transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ConveyorClient> {
        let zone = self
            .zone
            .filter(|z| !z.trim().is_empty())
            .ok_or_else(|| Error::Config("zone is required".to_string()))?;
        let token = self
            .token
            .ok_or_else(|| Error::Config("token is required".to_string()))?;
        let credential = Credential::new(token);
        // Fail at build time rather than on the first request.
        credential.header_value()?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("Invalid header name '{}'", name)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("Invalid value for header '{}'", name)))?;
            default_headers.insert(header_name, header_value);
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("conveyor-client/{}", env!("CARGO_PKG_VERSION")));

        let endpoint = Endpoint {
            zone,
            protocol: self.protocol,
            version: self.version,
        };
        url::Url::parse(&endpoint.base_url())?;

        Ok(ConveyorClient {
            inner: Arc::new(ClientInner {
                transport,
                endpoint,
                credential,
                user_agent,
                default_headers,
                retry: self.retry,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::transport::HttpResponse;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
    use serde_json::json;

    fn client_with(mock: &Arc<MockTransport>, retry: RetryPolicy) -> ConveyorClient {
        ConveyorClient::builder()
            .zone("eu1.example.com")
            .token("8a3b1c2d-1234-4abc-9def-0123456789ab")
            .retry_policy(retry)
            .transport(mock.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_zone() {
        let result = ClientBuilder::new().token("t").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_requires_token() {
        let result = ClientBuilder::new().zone("eu1.example.com").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let client = ConveyorClient::new("t", "eu1.example.com").unwrap();
        assert_eq!(client.endpoint().version, 2);
        assert_eq!(client.endpoint().protocol, Protocol::Https);
        assert_eq!(client.endpoint().base_url(), "https://eu1.example.com/api/v2");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let result = ClientBuilder::new()
            .zone("z")
            .token("t")
            .header("bad name", "v")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_bad_zone() {
        let result = ClientBuilder::new().zone("eu1 example com").token("t").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = ConveyorClient::new("very-secret-token", "eu1.example.com").unwrap();
        assert!(!format!("{:?}", client).contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_request_builds_url_headers_and_body() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::json(200, &json!({"scenario": {"id": 5}})));
        let client = client_with(&mock, RetryPolicy::default());

        let options = RequestOptions::post()
            .json(&json!({"name": "flow"}))
            .unwrap()
            .query(Query::new().push("confirmed", true));
        let value = client.request("/scenarios", options).await.unwrap();
        assert_eq!(value["scenario"]["id"], json!(5));

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(
            sent[0].url,
            "https://eu1.example.com/api/v2/scenarios?confirmed=true"
        );
        assert_eq!(sent[0].headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            sent[0].headers[AUTHORIZATION],
            "Token 8a3b1c2d-1234-4abc-9def-0123456789ab"
        );
        assert!(
            sent[0].headers[USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("conveyor-client/")
        );
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"name":"flow"}"#));
    }

    #[tokio::test]
    async fn test_request_field_unwraps_envelope() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::json(200, &json!({"team": {"id": 3, "name": "Ops"}})));
        let client = client_with(&mock, RetryPolicy::default());

        let team: Value = client
            .request_field("/teams/3", RequestOptions::get(), "team")
            .await
            .unwrap();
        assert_eq!(team, json!({"id": 3, "name": "Ops"}));
    }

    #[tokio::test]
    async fn test_request_field_missing() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::json(200, &json!({"other": 1})));
        let client = client_with(&mock, RetryPolicy::default());

        let result: Result<Value> = client
            .request_field("/teams/3", RequestOptions::get(), "team")
            .await;
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "team"));
    }

    #[tokio::test]
    async fn test_delete_without_body() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::new(204, ""));
        mock.push(HttpResponse::new(200, ""));
        let client = client_with(&mock, RetryPolicy::default());

        let value = client
            .request("/hooks/1", RequestOptions::delete())
            .await
            .unwrap();
        assert_eq!(value, Value::Null);

        let _: () = client
            .request_json("/hooks/1", RequestOptions::delete())
            .await
            .unwrap();
        assert_eq!(mock.requests()[1].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::json(400, &json!({"message": "Bad input"})));
        let policy = RetryPolicy::default()
            .with_retry_on_429(true)
            .with_retry_on_server_error(true);
        let client = client_with(&mock, policy);

        let err = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_failures_then_success() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::new(500, "oops"));
        mock.push(HttpResponse::new(429, ""));
        mock.push(HttpResponse::json(200, &json!({"ok": true})));
        let policy = RetryPolicy::default()
            .with_retry_on_429(true)
            .with_retry_on_server_error(true);
        let client = client_with(&mock, policy);

        let value = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_429_exhausts_retries() {
        let mock = Arc::new(MockTransport::new());
        for _ in 0..3 {
            mock.push(HttpResponse::json(429, &json!({"message": "Too many"})));
        }
        let policy = RetryPolicy::default()
            .with_retry_on_429(true)
            .with_max_retries(2);
        let client = client_with(&mock, policy);

        let err = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_waits_backoff() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::new(503, ""));
        mock.push(HttpResponse::new(503, ""));
        mock.push(HttpResponse::new(200, "done"));
        let policy = RetryPolicy::default().with_retry_on_server_error(true);
        let client = client_with(&mock, policy);

        let start = tokio::time::Instant::now();
        let value = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(value, Value::String("done".into()));
        // 1000ms + 2000ms
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_server_error_surfaced_without_opt_in() {
        let mock = Arc::new(MockTransport::new());
        mock.push(HttpResponse::new(502, "bad gateway"));
        let client = client_with(&mock, RetryPolicy::default());

        let err = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mock = Arc::new(MockTransport::new());
        mock.push_error("connection refused");
        let policy = RetryPolicy::default().with_retry_on_server_error(true);
        let client = client_with(&mock, policy);

        let err = client
            .request("/scenarios", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(msg) if msg == "connection refused"));
        assert_eq!(mock.call_count(), 1);
    }
}
