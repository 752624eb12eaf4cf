//! Flat collection CRUD over HTTP.

use mockrest::StatusPolicy;
use serde_json::{json, Value};

use crate::support::start_server;

fn widgets() -> Value {
    json!([
        { "id": 1, "name": "one" },
        { "id": 2, "name": "two" },
        { "id": 3, "name": "three", "color": "red" }
    ])
}

#[tokio::test]
async fn list_collection() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/api/widgets")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, widgets());
}

#[tokio::test]
async fn json_responses_have_exact_content_length() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/api/widgets/1")).send().await.unwrap();
    let length: usize = resp.headers()["content-length"].to_str().unwrap().parse().unwrap();
    let bytes = resp.bytes().await.unwrap();
    assert_eq!(length, bytes.len());
}

#[tokio::test]
async fn query_string_is_ignored() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .get(server.url("/api/widgets/2?expand=true"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 2, "name": "two" }));
}

#[tokio::test]
async fn get_unknown_id_is_404_invalid_id() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/api/widgets/999")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.headers()["content-type"], "text/plain");
    assert_eq!(resp.text().await.unwrap(), "invalid ID");
}

#[tokio::test]
async fn get_missing_collection_is_404() {
    let server = start_server(&[], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/api/widgets")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "No such entity");
}

#[tokio::test]
async fn empty_api_path_is_invalid() {
    let server = start_server(&[], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/api/")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "invalid REST path");
}

#[tokio::test]
async fn create_returns_201_location_and_record() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .json(&json!({ "name": "four" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["location"], "/widgets/4");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "name": "four", "id": 4 }));
    assert_eq!(server.stored("widgets").as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn create_into_empty_collection_starts_at_one() {
    let server = start_server(&[("widgets", json!([]))], StatusPolicy::Strict).await;

    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .json(&json!({ "name": "first" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn create_with_id_in_path_is_rejected() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .post(server.url("/api/widgets/3"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "POST must not have an ID");
    assert_eq!(server.stored("widgets"), widgets());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().starts_with("invalid JSON body"));

    // The server keeps serving after a bad body.
    let resp = server.client.get(server.url("/api/widgets")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn put_is_full_replacement() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .put(server.url("/api/widgets/3"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = server.client.get(server.url("/api/widgets/3")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 3, "name": "x" }));
}

#[tokio::test]
async fn patch_unknown_id_is_404() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .patch(server.url("/api/widgets/42"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.delete(server.url("/api/widgets/1")).send().await.unwrap();
    assert_eq!(resp.status(), 204);

    let resp = server.client.get(server.url("/api/widgets/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn recreate_after_deleting_lower_id_gets_fresh_id() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    server.client.delete(server.url("/api/widgets/2")).send().await.unwrap();
    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .json(&json!({ "name": "two again" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_ne!(body["id"], 2);
    assert_eq!(body["id"], 4);
}

#[tokio::test]
async fn recreate_after_deleting_max_id_gets_it_back() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.delete(server.url("/api/widgets/3")).send().await.unwrap();
    assert_eq!(resp.status(), 204);

    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .json(&json!({ "name": "three again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["location"], "/widgets/3");
}

#[tokio::test]
async fn post_when_ids_are_exhausted_is_conflict() {
    let server = start_server(
        &[("widgets", json!([{ "id": i64::MAX, "name": "last" }]))],
        StatusPolicy::Strict,
    )
    .await;

    let resp = server
        .client
        .post(server.url("/api/widgets"))
        .json(&json!({ "name": "one more" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    assert_eq!(resp.text().await.unwrap(), "no ids left in widgets");
    assert_eq!(
        server.stored("widgets"),
        json!([{ "id": i64::MAX, "name": "last" }])
    );
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/api/widgets"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "invalid REST method");
}

#[tokio::test]
async fn non_api_paths_are_logged_and_404() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server.client.get(server.url("/index.html")).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    server.client.get(server.url("/api/widgets")).send().await.unwrap();
    assert_eq!(
        server.sink.lines(),
        vec![
            " WWW: GET /index.html".to_string(),
            "REST: GET /api/widgets".to_string(),
        ]
    );
}
