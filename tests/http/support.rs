//! Test harness: a server over a seeded temporary data directory.

use std::sync::Arc;

use mockrest::{BufferSink, CollectionStore, Dispatcher, Format, StatusPolicy};
use serde_json::Value;

pub struct TestServer {
    pub base: String,
    pub dir: tempfile::TempDir,
    pub sink: BufferSink,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Current contents of a collection file, as JSON.
    pub fn stored(&self, collection: &str) -> Value {
        let text = std::fs::read_to_string(self.dir.path().join(format!("{}.json", collection)))
            .unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

/// Seed `collections` as JSON files and bind a server to port 0.
pub async fn start_server(collections: &[(&str, Value)], policy: StatusPolicy) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    for (name, records) in collections {
        std::fs::write(
            dir.path().join(format!("{}.json", name)),
            serde_json::to_vec_pretty(records).unwrap(),
        )
        .unwrap();
    }

    let store = CollectionStore::open(dir.path(), Format::Json).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(store), "/api/").with_policy(policy);
    let sink = BufferSink::new();
    let app = mockrest::server::router(Arc::new(dispatcher), Arc::new(sink.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        dir,
        sink,
        client: reqwest::Client::new(),
    }
}
