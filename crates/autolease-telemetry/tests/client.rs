//! Integration tests for `TelemetryClient` using wiremock HTTP mocks.

use autolease_telemetry::{AuthError, DeviceLink, LocationReply, Lookup, Position, TelemetryClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const AJAX_PATH: &str = "/wialon/ajax.html";

fn test_client(server: &MockServer) -> TelemetryClient {
    TelemetryClient::new(&format!("{}{AJAX_PATH}", server.uri()), Some("test-token"), 5)
        .expect("client construction should not fail")
}

/// Matches when the `params` query value decodes to the expected JSON.
struct ParamsJson(Value);

impl Match for ParamsJson {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == "params")
            .and_then(|(_, v)| serde_json::from_str::<Value>(&v).ok())
            .is_some_and(|params| params == self.0)
    }
}

async fn mount_login(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(AJAX_PATH))
        .and(query_param("svc", "token/login"))
        .and(ParamsJson(json!({"token": "test-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_search_item(server: &MockServer, device_id: i64, body: Value) {
    Mock::given(method("GET"))
        .and(path(AJAX_PATH))
        .and(query_param("svc", "core/search_item"))
        .and(query_param("sid", "sid-1"))
        .and(ParamsJson(json!({"id": device_id, "flags": 1024})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_session_from_eid() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1", "user": {"nm": "fleet"}})).await;

    let session = test_client(&server).login().await.expect("login should succeed");
    assert_eq!(session.sid(), "sid-1");
}

#[tokio::test]
async fn login_without_eid_is_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"error": 4})).await;

    let err = test_client(&server).login().await.unwrap_err();
    assert_eq!(err, AuthError::Rejected);
}

#[tokio::test]
async fn login_with_server_error_is_network_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_client(&server).login().await.unwrap_err();
    assert_eq!(err, AuthError::NetworkUnavailable);
}

#[tokio::test]
async fn login_with_html_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).login().await.unwrap_err();
    assert_eq!(err, AuthError::Rejected);
}

#[tokio::test]
async fn login_with_mistyped_eid_is_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": 12345})).await;

    let err = test_client(&server).login().await.unwrap_err();
    assert_eq!(err, AuthError::Rejected);
}

#[tokio::test]
async fn unconfigured_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"eid": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = TelemetryClient::new(&format!("{}{AJAX_PATH}", server.uri()), None, 5).unwrap();
    assert_eq!(client.locate_device(1).await, Lookup::ConfigurationMissing);
}

// ---------------------------------------------------------------------------
// resolve_location / locate_device
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locate_device_swaps_provider_axes() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    mount_search_item(
        &server,
        42,
        json!({"item": {
            "id": 42,
            "nm": "Camry",
            "lmsg": {"t": 1_700_000_000, "pos": {"x": 74.6, "y": 42.8, "s": 0}}
        }}),
    )
    .await;

    let lookup = test_client(&server).locate_device(42).await;
    assert_eq!(
        lookup,
        Lookup::Found(Position {
            latitude: 42.8,
            longitude: 74.6
        })
    );
}

#[tokio::test]
async fn locate_device_without_last_message_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    mount_search_item(&server, 7, json!({"item": {"id": 7, "nm": "Idle", "lmsg": null}})).await;

    assert_eq!(test_client(&server).locate_device(7).await, Lookup::NotFound);
}

#[tokio::test]
async fn locate_device_without_position_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    mount_search_item(&server, 7, json!({"item": {"id": 7, "lmsg": {"t": 1}}})).await;

    assert_eq!(test_client(&server).locate_device(7).await, Lookup::NotFound);
}

#[tokio::test]
async fn locate_device_with_partial_position_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    mount_search_item(&server, 7, json!({"item": {"lmsg": {"pos": {"x": 74.6}}}})).await;

    assert_eq!(test_client(&server).locate_device(7).await, Lookup::NotFound);
}

#[tokio::test]
async fn locate_device_with_failing_search_is_network_unavailable() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_item"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        test_client(&server).locate_device(42).await,
        Lookup::NetworkUnavailable
    );
}

#[tokio::test]
async fn locate_device_for_unknown_unit_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    mount_search_item(&server, 999, json!({"error": 7})).await;

    assert_eq!(test_client(&server).locate_device(999).await, Lookup::NotFound);
}

#[tokio::test]
async fn locate_device_reauthenticates_every_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("svc", "token/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"eid": "sid-1"})))
        .expect(2)
        .mount(&server)
        .await;
    let body = json!({"item": {"lmsg": {"pos": {"x": 1.0, "y": 2.0}}}});
    mount_search_item(&server, 42, body).await;

    let client = test_client(&server);
    assert!(client.locate_device(42).await.is_found());
    assert!(client.locate_device(42).await.is_found());
}

#[tokio::test]
async fn location_reply_maps_outcomes_to_statuses() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    let body = json!({"item": {"lmsg": {"pos": {"x": 74.6, "y": 42.8}}}});
    mount_search_item(&server, 42, body).await;
    mount_search_item(&server, 43, json!({"item": null})).await;

    let client = test_client(&server);
    let located = client.location_reply(Some("42")).await;
    assert_eq!(located.status(), 200);
    assert_eq!(located.body(), json!({"lat": 42.8, "lon": 74.6}));
    assert_eq!(client.location_reply(Some("43")).await, LocationReply::Unavailable);
}

// ---------------------------------------------------------------------------
// resolve_device_id_by_hardware_serial / find_device_id
// ---------------------------------------------------------------------------

fn serial_search_params(serial: &str) -> Value {
    json!({
        "spec": {
            "itemsType": "avl_unit",
            "propName": "sys_unique_id",
            "propValueMask": serial,
            "sortType": "sys_name"
        },
        "force": 1,
        "flags": 1,
        "from": 0,
        "to": 0
    })
}

#[tokio::test]
async fn find_device_id_returns_first_match() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .and(query_param("sid", "sid-1"))
        .and(ParamsJson(serial_search_params("356938035643809")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchSpec": {},
            "totalItemsCount": 2,
            "items": [{"id": 11, "nm": "A"}, {"id": 12, "nm": "B"}]
        })))
        .mount(&server)
        .await;

    let lookup = test_client(&server).find_device_id("356938035643809").await;
    assert_eq!(lookup, Lookup::Found(11));
}

#[tokio::test]
async fn find_device_id_for_unregistered_serial_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    assert_eq!(test_client(&server).find_device_id("000").await, Lookup::NotFound);
}

#[tokio::test]
async fn find_device_id_skips_units_without_id() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"nm": "x"}]})))
        .mount(&server)
        .await;

    assert_eq!(test_client(&server).find_device_id("000").await, Lookup::NotFound);
}

#[tokio::test]
async fn find_device_id_with_failing_search_is_network_unavailable() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        test_client(&server).find_device_id("356938035643809").await,
        Lookup::NetworkUnavailable
    );
}

#[tokio::test]
async fn find_device_id_with_rejected_login_is_auth_failure() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"error": 8})).await;

    assert_eq!(
        test_client(&server).find_device_id("000").await,
        Lookup::AuthenticationFailed
    );
}

#[tokio::test]
async fn link_device_stores_resolved_id() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [{"id": 501, "nm": "Prius"}]})),
        )
        .mount(&server)
        .await;

    let link = test_client(&server).link_device(Some("862531040000001")).await;
    assert_eq!(link, DeviceLink::Linked(501));
}

// ---------------------------------------------------------------------------
// list_all_units
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_all_units_returns_inventory() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .and(ParamsJson(json!({
            "spec": {
                "itemsType": "avl_unit",
                "propName": "sys_name",
                "propValueMask": "*",
                "sortType": "sys_name"
            },
            "force": 1,
            "flags": 1,
            "from": 0,
            "to": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": 1, "nm": "Camry 01KG123", "uid": "9175875064"},
                {"id": 2, "nm": "Fit 01KG777"}
            ]
        })))
        .mount(&server)
        .await;

    let units = test_client(&server)
        .list_all_units()
        .await
        .found()
        .expect("inventory should be found");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].unique_id.as_deref(), Some("9175875064"));
    assert_eq!(units[1].name, "Fit 01KG777");
    assert!(units[1].unique_id.is_none());
}

#[tokio::test]
async fn list_all_units_without_items_key_is_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"eid": "sid-1"})).await;
    Mock::given(method("GET"))
        .and(query_param("svc", "core/search_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 1})))
        .mount(&server)
        .await;

    assert_eq!(test_client(&server).list_all_units().await, Lookup::NotFound);
}
