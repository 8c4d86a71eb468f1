use crate::themes::{FileType, JsonFileStore, MemoryStore, Theme, ThemeDocument, ThemeRepository};
use std::sync::Arc;
use tempfile::TempDir;

// ── Document builders ───────────────────────────────────────

/// Build a theme from a name and item literals.
pub fn theme(name: &str, items: &[&str]) -> Theme {
    Theme {
        theme: name.to_string(),
        list: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// Document holding the given themes in order.
pub fn document(themes: Vec<Theme>) -> ThemeDocument {
    ThemeDocument {
        theme_list: themes,
        ..ThemeDocument::empty()
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Repository setup helpers ────────────────────────────────

/// Repository over an in-memory store where every slot starts empty.
pub fn memory_repo() -> (ThemeRepository<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    (ThemeRepository::new(store.clone()), store)
}

/// Repository over an in-memory store with `doc` in the `theme` slot.
pub async fn memory_repo_with(
    doc: ThemeDocument,
) -> (ThemeRepository<MemoryStore>, Arc<MemoryStore>) {
    let (repo, store) = memory_repo();
    store.insert(FileType::Theme, doc).await;
    (repo, store)
}

/// Repository over JSON files in an isolated temp directory, all slots seeded.
pub async fn file_repo() -> (ThemeRepository<JsonFileStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = Arc::new(JsonFileStore::new(tmp.path()));
    store.seed_missing().await.expect("failed to seed slots");
    (ThemeRepository::new(store), tmp)
}
