// Integration tests for `ShoeClient` using wiremock.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shoely_api::{Error, ShoeClient, ShoeId, ShoeWrite};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ShoeClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1", server.uri());
    let client = ShoeClient::from_reqwest(&base, "shoes", reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_shoes_preserves_order() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 2, "tenSanPham": "Zoom", "maSanPham": "Z9", "giaSanPham": 250, "size": "41" },
        { "id": "1", "tenSanPham": "Air", "maSanPham": "A1", "giaSanPham": "100", "size": 42 }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v1/shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let shoes = client.list_shoes().await.unwrap();

    assert_eq!(shoes.len(), 2);
    assert_eq!(shoes[0].id, ShoeId::from(2));
    assert_eq!(shoes[0].name, "Zoom");
    assert_eq!(shoes[1].id, ShoeId::from("1"));
    assert_eq!(shoes[1].price, 100.0);
    assert_eq!(shoes[1].size, "42");
}

#[tokio::test]
async fn test_create_shoe_sends_service_field_names() {
    let (server, client) = setup().await;

    let write = ShoeWrite {
        name: "Air".into(),
        code: "A1".into(),
        price: 100.0,
        size: "42".into(),
    };

    Mock::given(method("POST"))
        .and(path("/api/v1/shoes"))
        .and(body_json(json!({
            "tenSanPham": "Air", "maSanPham": "A1", "giaSanPham": 100.0, "size": "42"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "11", "tenSanPham": "Air", "maSanPham": "A1", "giaSanPham": 100, "size": "42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_shoe(&write).await.unwrap();
    assert_eq!(created.id.as_str(), "11");
}

#[tokio::test]
async fn test_update_shoe() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/shoes/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "11", "tenSanPham": "Air Max", "maSanPham": "A1", "giaSanPham": 120, "size": "43"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let write = ShoeWrite {
        name: "Air Max".into(),
        code: "A1".into(),
        price: 120.0,
        size: "43".into(),
    };
    let updated = client.update_shoe(&ShoeId::from("11"), &write).await.unwrap();
    assert_eq!(updated.name, "Air Max");
}

#[tokio::test]
async fn test_delete_shoe_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/shoes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_shoe(&ShoeId::from(1)).await.unwrap();
}

#[tokio::test]
async fn test_delete_shoe_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/shoes/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_shoe(&ShoeId::from(1)).await.unwrap();
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_missing_shoe_keeps_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/shoes/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("\"Not found\""))
        .mount(&server)
        .await;

    let err = client.delete_shoe(&ShoeId::from(404)).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "\"Not found\"");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_empty_body_uses_reason_phrase() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/shoes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_shoes().await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "500 Internal Server Error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_shoes().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let base = server.uri();
    drop(server);

    let client = ShoeClient::from_reqwest(&base, "shoes", reqwest::Client::new()).unwrap();
    let err = client.list_shoes().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
