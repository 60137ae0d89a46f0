//! HTTP integration tests.
//!
//! These run the real reqwest transport against a local mock server and
//! check wire-level behavior: URLs, headers, bodies, retries and errors.

use std::time::{Duration, Instant};

use conveyor_client::api::{CreateConnection, CreateRecord, DeleteRecords, ListScenariosQuery};
use conveyor_client::{
    ConveyorClient, Error, Pagination, Protocol, RequestOptions, RetryPolicy,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";

fn client_for(server: &MockServer, retry: RetryPolicy) -> ConveyorClient {
    let zone = server.uri().trim_start_matches("http://").to_string();
    ConveyorClient::builder()
        .zone(zone)
        .protocol(Protocol::Http)
        .token(API_KEY)
        .retry_policy(retry)
        .build()
        .unwrap()
}

fn rate_limits() -> RetryPolicy {
    RetryPolicy::default().with_retry_on_429(true)
}

#[tokio::test]
async fn test_get_sends_auth_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .and(header("authorization", format!("Token {}", API_KEY).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"authUser": {"id": 1, "name": "Ada"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let me = client.users().me().await.unwrap();
    assert_eq!(me["name"], "Ada");

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("conveyor-client/"));
}

#[tokio::test]
async fn test_oauth_token_uses_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .and(header("authorization", "Bearer oauth-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authUser": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let zone = server.uri().trim_start_matches("http://").to_string();
    let client = ConveyorClient::builder()
        .zone(zone)
        .protocol(Protocol::Http)
        .token("oauth-access-token")
        .build()
        .unwrap();
    client.users().me().await.unwrap();
}

#[tokio::test]
async fn test_list_encodes_pagination_and_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios"))
        .and(query_param("teamId", "5"))
        .and(query_param("pg[limit]", "2"))
        .and(query_param("cols[]", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scenarios": [
                {"id": 1, "name": "a", "isActive": true},
                {"id": 2, "name": "b", "isActive": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let scenarios = client
        .scenarios()
        .list(&ListScenariosQuery {
            team_id: Some(5),
            pg: Some(Pagination::page(0, 2)),
            cols: vec!["id".into()],
            ..Default::default()
        })
        .await
        .unwrap();

    // Column selection is applied to the response as well.
    assert_eq!(scenarios, json!([{"id": 1}, {"id": 2}]));
}

#[tokio::test]
async fn test_absent_query_values_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios/9/blueprint"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": {"blueprint": {}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    client.blueprints().get(9, None, false).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_json_body_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/connections"))
        .and(query_param("teamId", "3"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"accountName": "Team Slack", "accountType": "slack2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"connection": {"id": 77, "name": "Team Slack"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let connection = client
        .connections()
        .create(
            3,
            &CreateConnection {
                name: "Team Slack".into(),
                account_name: "slack2".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(connection["id"], 77);
}

#[tokio::test]
async fn test_text_body_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/sdk/apps/my-app/1/readme"))
        .and(header("content-type", "text/markdown"))
        .and(body_string("# My App\n\nDocs."))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    client
        .sdk_apps()
        .set_docs("my-app", 1, "# My App\n\nDocs.")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/scenarios/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    client.scenarios().delete(4).await.unwrap();

    let value = client
        .request("/scenarios/4", RequestOptions::delete())
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_delete_records_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/data-stores/12/data"))
        .and(query_param("confirmed", "true"))
        .and(body_json(json!({"all": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"keys": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    client
        .data_store_records()
        .delete(12, &DeleteRecords::All)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_record_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/data-stores/12/data"))
        .and(body_json(json!({"key": "k1", "data": {"n": 1}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"key": "k1", "data": {"n": 1}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let record = client
        .data_store_records()
        .create(
            12,
            &CreateRecord {
                key: Some("k1".into()),
                data: json!({"n": 1}),
            },
        )
        .await
        .unwrap();
    assert_eq!(record["key"], "k1");
}

#[tokio::test]
async fn test_verify_connection_returns_bool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/connections/8/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"verified": false})))
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    assert!(!client.connections().verify(8).await.unwrap());
}

#[tokio::test]
async fn test_api_error_translated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Scenario not found",
            "code": "IM005"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let err = client.scenarios().get(404, &[]).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API error (404): Scenario not found");
}

#[tokio::test]
async fn test_plain_text_error_translated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Access denied"))
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let err = client.users().me().await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "API error (401): HTTP 401");
    let Error::Api(api) = err else {
        panic!("expected an API error");
    };
    assert_eq!(api.detail, Some(Value::String("Access denied".into())));
}

#[tokio::test]
async fn test_retry_after_honored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authUser": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, rate_limits());
    let started = Instant::now();
    client.users().me().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(950));
}

#[tokio::test]
async fn test_retry_after_capped_by_max_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "10"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authUser": {"id": 1}})))
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        rate_limits().with_max_delay(Duration::from_millis(100)),
    );
    let started = Instant::now();
    client.users().me().await.unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(90));
    assert!(elapsed < Duration::from_secs(5));
}

#[tokio::test]
async fn test_bad_request_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/scenarios/1/run"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid input"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        rate_limits()
            .with_retry_on_server_error(true)
            .with_base_delay(Duration::from_millis(1)),
    );
    let err = client
        .scenarios()
        .run(1, &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_persistent_rate_limit_surfaces_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "Too many requests"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        rate_limits()
            .with_max_retries(2)
            .with_base_delay(Duration::from_millis(5)),
    );
    let err = client.users().me().await.unwrap_err();
    assert!(err.is_rate_limited());
}
