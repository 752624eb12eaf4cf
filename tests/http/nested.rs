//! Child collections scoped by a parent id.

use mockrest::StatusPolicy;
use serde_json::{json, Value};

use crate::support::start_server;

fn widgets() -> Value {
    json!([
        { "id": 1, "parent_id": 5 },
        { "id": 2, "parent_id": 6 },
        { "id": 3, "parent_id": 5, "name": "third" }
    ])
}

#[tokio::test]
async fn list_children_of_parent() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .get(server.url("/api/parents/6/widgets"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "id": 2, "parent_id": 6 }]));
}

#[tokio::test]
async fn parent_collection_file_is_not_needed() {
    // Only the child collection is read; there is no parents file.
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .get(server.url("/api/parents/5/widgets"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_child_under_wrong_parent_is_404() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .get(server.url("/api/parents/6/widgets/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "invalid ID");

    let resp = server
        .client
        .get(server.url("/api/parents/5/widgets/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn create_child_is_visible_under_parent() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .post(server.url("/api/parents/6/widgets"))
        .json(&json!({ "name": "new" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["location"], "/widgets/4");

    let resp = server
        .client
        .get(server.url("/api/parents/6/widgets"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 4]);
}

#[tokio::test]
async fn delete_child_under_parent() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .delete(server.url("/api/parents/6/widgets/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = server
        .client
        .delete(server.url("/api/parents/5/widgets/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(server.stored("widgets").as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_nested_without_id_is_rejected() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .delete(server.url("/api/parents/5/widgets"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "DELETE must have an ID");
    assert_eq!(server.stored("widgets"), widgets());
}

#[tokio::test]
async fn put_child_under_other_parent_replaces_by_id() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .put(server.url("/api/parents/6/widgets/1"))
        .json(&json!({ "name": "moved" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(server.stored("widgets")[0], json!({ "id": 1, "name": "moved" }));

    let resp = server
        .client
        .get(server.url("/api/parents/5/widgets"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "id": 3, "parent_id": 5, "name": "third" }]));
}

#[tokio::test]
async fn put_nested_without_id_is_rejected() {
    let server = start_server(&[("widgets", widgets())], StatusPolicy::Strict).await;

    let resp = server
        .client
        .put(server.url("/api/parents/5/widgets"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "PUT must have an ID");
    assert_eq!(server.stored("widgets"), widgets());
}
