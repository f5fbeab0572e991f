use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracking::{config::TrackingConfig, database::memory::MemoryDatabase, server::Server};
use web::{routes, WebState};

/// 2026-01-01 19:35:55 in Amsterdam.
const EVENING: i64 = 1_767_292_555;

fn app() -> (MemoryDatabase, Router) {
    let database = MemoryDatabase::new();
    let server = Server::new(database.clone(), TrackingConfig::default());
    let state = WebState {
        tracker: server.client("test"),
    };
    (database, routes(state))
}

fn location_message(tst: i64) -> Value {
    json!({
        "_type": "location",
        "BSSID": "78:d3:8d:fd:09:dd",
        "SSID": "weiler12",
        "acc": 5,
        "alt": 54,
        "batt": 79,
        "conn": "w",
        "lat": 52.1885381,
        "lon": 5.3213312,
        "tid": "xm",
        "topic": "owntracks/ajan/a14xm",
        "tst": tst,
        "vel": 2
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn publish(app: &Router, body: impl Into<String>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/pub")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

#[tokio::test]
async fn ping() {
    let (_, app) = app();
    let (status, body) = get(&app, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["message"], "pong!");
}

#[tokio::test]
async fn publishing_buffers_then_stores() {
    let (_, app) = app();

    for (offset, expected) in [(0, "buffering"), (10, "buffering"), (20, "ok")] {
        let (status, body) = publish(&app, location_message(EVENING + offset).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    // same spot again: jitter
    let (status, body) = publish(&app, location_message(EVENING + 30).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ignored");

    let (status, body) = get(&app, "/api/v1/locations?day=2026-01-01").await;
    assert_eq!(status, StatusCode::OK);
    let locations: Value = serde_json::from_str(&body).unwrap();
    let data = locations["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["readableTime"], "2026-01-01 19:36:15");
    assert_eq!(data[0]["metadata"]["ssid"], "weiler12");
}

#[tokio::test]
async fn other_message_types_are_ignored() {
    let (_, app) = app();
    let (status, body) = publish(&app, r#"{"_type": "transition", "event": "enter"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ignored");
}

#[tokio::test]
async fn inaccurate_fixes_are_ignored() {
    let (_, app) = app();
    let mut message = location_message(EVENING);
    message["acc"] = json!(65);
    let (status, body) = publish(&app, message.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ignored");
}

#[tokio::test]
async fn malformed_messages_are_bad_requests() {
    let (_, app) = app();

    let (status, body) = publish(&app, "{ not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "bad request");

    let mut message = location_message(EVENING);
    message.as_object_mut().unwrap().remove("acc");
    let (status, _) = publish(&app, message.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut message = location_message(EVENING);
    message["lat"] = json!(123.0);
    let (status, _) = publish(&app, message.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failure_is_an_internal_error() {
    let (database, app) = app();
    database.reject_writes(true);

    publish(&app, location_message(EVENING).to_string()).await;
    publish(&app, location_message(EVENING + 10).to_string()).await;
    let (status, body) = publish(&app, location_message(EVENING + 20).to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "error");

    database.reject_writes(false);
    let (status, body) = publish(&app, location_message(EVENING + 20).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn trips_api_links_neighbouring_days() {
    let (_, app) = app();
    for offset in [0, 10, 20] {
        publish(&app, location_message(EVENING + offset).to_string()).await;
    }

    let (status, body) = get(&app, "/api/v1/trips?day=2026-01-01").await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["day"], "2026-01-01");
    assert_eq!(summary["pointCount"], 1);
    assert_eq!(summary["trips"][0]["label"], "Trip 1: 19:36:15 to 19:36:15");

    let links = summary["links"].as_array().unwrap();
    let href = |relation: &str| {
        links
            .iter()
            .find(|link| link["rel"] == relation)
            .and_then(|link| link["href"].as_str())
            .map(str::to_owned)
    };
    assert_eq!(
        href("previous").as_deref(),
        Some("http://localhost/api/v1/trips?day=2025-12-31")
    );
    assert_eq!(
        href("next").as_deref(),
        Some("http://localhost/api/v1/trips?day=2026-01-02")
    );
}

#[tokio::test]
async fn trips_schema() {
    let (_, app) = app();
    let (status, body) = get(&app, "/api/v1/trips/schema?exampleData=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(serde_json::from_str::<Value>(&body).is_ok());
}

#[tokio::test]
async fn timeline_page() {
    let (_, app) = app();
    for offset in [0, 10, 20] {
        publish(&app, location_message(EVENING + offset).to_string()).await;
    }

    let (status, body) = get(&app, "/?day=2026-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Trip 1: 19:36:15 to 19:36:15"));
    assert!(body.contains("/?day=2025-12-31"));
    assert!(body.contains("/?day=2026-01-02"));

    // blank means today
    let (status, _) = get(&app, "/?day=").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unparsable_day_is_a_bad_request() {
    let (_, app) = app();
    let (status, _) = get(&app, "/?day=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&app, "/api/v1/trips?day=2026-13-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let (_, app) = app();
    let (status, _) = get(&app, "/api/v2/everything").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
