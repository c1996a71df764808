//! HTTP surface over a live engine, with wiremock standing in for the backends.

mod common;

use std::net::SocketAddr;

use cabquote::server::router;
use common::{engine, estimate_json, option_json};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(backend_uri: &str, history_dir: &std::path::Path) -> SocketAddr {
    let app = router(engine(backend_uri, history_dir));
    let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    addr
}

#[tokio::test]
async fn quotes_and_history_round_trip_over_http() {
    let backend = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/ride/estimate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(estimate_json(vec![option_json(7, "Homer Simpson", 50.05)])),
        )
        .mount(&backend)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/ride/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&backend)
        .await;

    let addr = spawn_app(&backend.uri(), dir.path()).await;
    let client = reqwest::Client::new();

    let options: Value = client
        .post(format!("http://{}/quotes", addr))
        .json(&json!({ "customer_id": "c1", "origin": "Osasco", "destination": "Paulista" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(options[0]["name"], "Homer Simpson");
    assert_eq!(options[0]["fare_value"], 50.05);

    let res = client
        .post(format!("http://{}/trips/confirm", addr))
        .json(&json!({
            "customer_id": "c1",
            "origin": "Osasco",
            "destination": "Paulista",
            "distance_km": 14.3,
            "duration": "30 mins",
            "option": options[0],
        }))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    let confirmation: Value = res.json().await.unwrap();
    assert_eq!(confirmation["recorded"], true);

    let trips: Value = client
        .get(format!("http://{}/trips", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(trips.as_array().unwrap().len(), 1);
    assert_eq!(trips[0]["driverName"], "Homer Simpson");
    assert_eq!(trips[0]["value"], 50.05);
}

#[tokio::test]
async fn errors_render_code_and_status() {
    let backend = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let addr = spawn_app(&backend.uri(), dir.path()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/trips/confirm", addr))
        .json(&json!({
            "customer_id": "c1",
            "origin": "Osasco",
            "destination": "Paulista",
            "distance_km": 0.0,
            "duration": "30 mins",
            "option": {
                "id": 1, "name": "X", "description": "d", "vehicle": "car",
                "rating": 4.5, "comment": "ok", "fare_value": 23.5
            },
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 101);

    let res = client
        .post(format!("http://{}/quotes", addr))
        .json(&json!({ "customer_id": "", "origin": "Osasco", "destination": "Paulista" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(backend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_provider_does_not_leak_the_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_app("http://127.0.0.1:1", dir.path()).await;

    let res = reqwest::Client::new()
        .post(format!("http://{}/routes", addr))
        .json(&json!({
            "origin": { "latitude": -23.532881, "longitude": -46.792759 },
            "destination": { "latitude": -23.561706, "longitude": -46.65598 },
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::BAD_GATEWAY);

    let body = res.text().await.unwrap();
    assert!(body.contains("\"code\":10"));
    assert!(!body.contains("test-key"));
    assert!(!body.contains("key="));
}
