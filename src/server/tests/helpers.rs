use crate::config::ItemPolicy;
use crate::server::{ApiContext, ThemeServer};
use crate::themes::{FileType, MemoryStore, Theme, ThemeDocument, ThemeStore};
use std::sync::Arc;
use warp::filters::BoxedFilter;
use warp::http::Response;
use warp::hyper::body::Bytes;
use warp::reply::Response as ReplyResponse;

// ── Fixtures ────────────────────────────────────────────────

pub fn theme(name: &str, items: &[&str]) -> Theme {
    Theme {
        theme: name.to_string(),
        list: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// `theme` slot content shared by most route tests.
pub fn sample_document() -> ThemeDocument {
    ThemeDocument {
        theme_list: vec![
            theme("Dark Mode", &["AB-12", "CD-34"]),
            theme("Light", &["EF-56"]),
        ],
        ..ThemeDocument::empty()
    }
}

// ── Server setup helpers ────────────────────────────────────

/// Server over a seeded in-memory store. Nothing is bound.
pub async fn test_server(policy: ItemPolicy, cors: bool) -> (ThemeServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    store.insert(FileType::Theme, sample_document()).await;
    let dyn_store: Arc<dyn ThemeStore> = store.clone();
    let server = ThemeServer::new(ApiContext::new(dyn_store, policy), cors);
    (server, store)
}

/// Strict policy, CORS off.
pub async fn test_filter() -> (BoxedFilter<(ReplyResponse,)>, Arc<MemoryStore>) {
    let (server, store) = test_server(ItemPolicy::Strict, false).await;
    (server.filter(), store)
}

pub fn body_json(response: &Response<Bytes>) -> serde_json::Value {
    serde_json::from_slice(response.body()).expect("response body is not JSON")
}
