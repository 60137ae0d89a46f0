//! Executes builtin tools against a mock API server.

use conveyor_client::{ConveyorClient, Protocol};
use conveyor_tools::{ToolError, ToolOutput, ToolRegistry};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ConveyorClient {
    let zone = server.uri().trim_start_matches("http://").to_string();
    ConveyorClient::builder()
        .zone(zone)
        .protocol(Protocol::Http)
        .token("a1b2c3d4-e5f6-7890-abcd-ef1234567890")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_verify_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/connections/12/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"verified": false})))
        .expect(1)
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let output = registry
        .execute(
            "connections_verify",
            &client_for(&server),
            json!({"connectionId": 12}),
        )
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::text("Connection is not valid."));
}

#[tokio::test]
async fn test_connection_update_renames_and_sets_data() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/connections/7"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"connection": {"id": 7, "name": "Renamed"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/connections/7/set-data"))
        .and(body_json(json!({"apiKey": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"changed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let output = registry
        .execute(
            "connections_update",
            &client_for(&server),
            json!({"connectionId": 7, "name": "Renamed", "data": {"apiKey": "secret"}}),
        )
        .await
        .unwrap();

    assert_eq!(output.to_display_string(), "Connection has been updated.");
}

#[tokio::test]
async fn test_scenario_get_includes_blueprint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"scenario": {"id": 3, "name": "Sync"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scenarios/3/blueprint"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": {"blueprint": {"flow": []}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let output = registry
        .execute(
            "scenarios_get",
            &client_for(&server),
            json!({"scenarioId": 3, "includeBlueprint": true}),
        )
        .await
        .unwrap();

    let ToolOutput::Json(value) = output else {
        panic!("expected JSON output");
    };
    assert_eq!(value["name"], "Sync");
    assert_eq!(value["blueprint"], json!({"blueprint": {"flow": []}}));
}

#[tokio::test]
async fn test_list_forwards_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/teams"))
        .and(query_param("organizationId", "5"))
        .and(query_param("pg[limit]", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"teams": [{"id": 1}, {"id": 2}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let output = registry
        .execute(
            "teams_list",
            &client_for(&server),
            json!({"organizationId": 5, "pg": {"limit": 2}}),
        )
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::Json(json!([{"id": 1}, {"id": 2}])));
}

#[tokio::test]
async fn test_get_selects_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/connections/9"))
        .and(query_param("cols[]", "id"))
        .and(query_param("cols[]", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connection": {"id": 9, "name": "Slack", "accountName": "slack2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let output = registry
        .execute(
            "connections_get",
            &client_for(&server),
            json!({"connectionId": 9, "cols": ["id", "name"]}),
        )
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::Json(json!({"id": 9, "name": "Slack"})));

    let descriptor = registry.get("connections_get").unwrap();
    assert_eq!(descriptor.input_schema["properties"]["cols"]["type"], "array");
}

#[tokio::test]
async fn test_missing_parameter_makes_no_request() {
    let server = MockServer::start().await;
    let registry = ToolRegistry::builtin().unwrap();

    let err = registry
        .execute("scenarios_get", &client_for(&server), json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidParameters(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_error_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/devices/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Not found", "detail": "Device not found"})),
        )
        .mount(&server)
        .await;

    let registry = ToolRegistry::builtin().unwrap();
    let err = registry
        .execute("devices_delete", &client_for(&server), json!({"deviceId": 9}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Client(_)));
    assert!(err.is_recoverable());
}
