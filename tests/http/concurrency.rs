//! Simultaneous writers against one collection.

use std::collections::BTreeSet;

use mockrest::StatusPolicy;
use serde_json::{json, Value};

use crate::support::start_server;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_sequential_ids() {
    let server = start_server(&[("widgets", json!([{ "id": 10 }]))], StatusPolicy::Strict).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = server.client.clone();
        let url = server.url("/api/widgets");
        handles.push(tokio::spawn(async move {
            let resp = client.post(url).json(&json!({ "n": i })).send().await.unwrap();
            assert_eq!(resp.status(), 201);
            let body: Value = resp.json().await.unwrap();
            body["id"].as_i64().unwrap()
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()), "duplicate id");
    }

    let expected: BTreeSet<i64> = (11..=30).collect();
    assert_eq!(ids, expected);
    assert_eq!(server.stored("widgets").as_array().unwrap().len(), 21);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn collections_are_independent() {
    let server = start_server(
        &[("widgets", json!([])), ("gadgets", json!([]))],
        StatusPolicy::Strict,
    )
    .await;

    let mut handles = Vec::new();
    for collection in ["widgets", "gadgets"] {
        for _ in 0..5 {
            let client = server.client.clone();
            let url = server.url(&format!("/api/{}", collection));
            handles.push(tokio::spawn(async move {
                client.post(url).json(&json!({})).send().await.unwrap().status()
            }));
        }
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 201);
    }

    for collection in ["widgets", "gadgets"] {
        let ids: BTreeSet<i64> = server
            .stored(collection)
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=5).collect::<BTreeSet<i64>>());
    }
}
