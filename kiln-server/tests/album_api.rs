//! Album API driven in-process through the router

use std::io::Write;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use kiln_server::{AlbumStore, Config, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

const SEED: &str = r#"{
  "albums": [
    {
      "id": 1,
      "title": "Studio",
      "description": "Wheel, kiln and shelves",
      "media": [
        { "id": 10, "url": "/m/10.jpg", "label": "wheel", "sort_order": 2 },
        { "id": 11, "url": "/m/11.jpg", "label": "kiln", "sort_order": 1 },
        { "id": 12, "url": "/m/12.jpg", "label": "shelf", "kind": "video", "sort_order": 3 }
      ]
    },
    { "id": 2, "title": "Glazes" }
  ]
}"#;

fn app() -> Router {
    let mut seed = tempfile::NamedTempFile::new().unwrap();
    seed.write_all(SEED.as_bytes()).unwrap();

    let store = AlbumStore::load_seed_file(seed.path()).unwrap();
    let config = Config::with_overrides("/tmp/kiln-test", 0);
    build_app(ServerState::new(config, store))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::put(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn sequence(ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .enumerate()
            .map(|(i, id)| json!({ "id": id, "order_index": i + 1, "position": i }))
            .collect(),
    )
}

fn media_ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["albums"], 2);
}

#[tokio::test]
async fn test_list_and_get_albums() {
    let app = app();

    let (status, body) = send(&app, get("/api/albums")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    let albums = body["data"].as_array().unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0]["title"], "Studio");
    assert_eq!(albums[0]["media_count"], 3);

    let (status, body) = send(&app, get("/api/albums/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Glazes");

    let (status, body) = send(&app, get("/api/albums/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
    assert_eq!(body["details"]["album_id"], 99);
}

#[tokio::test]
async fn test_media_follow_seed_sort_order() {
    let app = app();

    let (status, body) = send(&app, get("/api/albums/1/media")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(media_ids(&body), vec![11, 10, 12]);
    assert_eq!(body["data"][2]["kind"], "video");
    assert_eq!(body["data"][2]["sort_order"], 3);
}

#[tokio::test]
async fn test_update_sort_order() {
    let app = app();

    let (status, body) = send(
        &app,
        put_json("/api/albums/1/media/sort-order", sequence(&[12, 11, 10])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 3);

    let (_, body) = send(&app, get("/api/albums/1/media")).await;
    assert_eq!(media_ids(&body), vec![12, 11, 10]);
    assert_eq!(body["data"][0]["sort_order"], 1);
}

#[tokio::test]
async fn test_invalid_sort_order_changes_nothing() {
    let app = app();

    let cases = [
        (sequence(&[11, 10]), StatusCode::BAD_REQUEST, 5002),
        (sequence(&[11, 10, 77]), StatusCode::NOT_FOUND, 5001),
        (sequence(&[11, 11, 10]), StatusCode::BAD_REQUEST, 5003),
        (
            json!([
                { "id": 11, "order_index": 1, "position": 0 },
                { "id": 10, "order_index": 3, "position": 2 },
                { "id": 12, "order_index": 4, "position": 3 }
            ]),
            StatusCode::BAD_REQUEST,
            5004,
        ),
    ];

    for (payload, expected, code) in cases {
        let (status, body) = send(&app, put_json("/api/albums/1/media/sort-order", payload)).await;
        assert_eq!(status, expected, "code {code}");
        assert_eq!(body["code"], code);
    }

    let (_, body) = send(&app, get("/api/albums/1/media")).await;
    assert_eq!(media_ids(&body), vec![11, 10, 12]);
}

#[tokio::test]
async fn test_sort_order_unknown_album() {
    let app = app();
    let (status, body) = send(
        &app,
        put_json("/api/albums/42/media/sort-order", sequence(&[1])),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_malformed_sort_order_body_uses_error_envelope() {
    let app = app();

    let (status, body) = send(
        &app,
        put_json("/api/albums/1/media/sort-order", json!({ "id": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
    assert_eq!(body["details"]["album_id"], 1);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    let (_, body) = send(&app, get("/api/albums/1/media")).await;
    assert_eq!(media_ids(&body), vec![11, 10, 12]);
}
