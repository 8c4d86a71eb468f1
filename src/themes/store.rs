//! Store backends: one JSON file per slot, and an in-memory map.

use super::interface::{FileType, StorageError, ThemeDocument, ThemeError, ThemeStore};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Serialize with a 4-space indent and trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

// ── JSON File Store ─────────────────────────────────────

/// Stores each slot at `<data_dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, slot: FileType) -> PathBuf {
        self.data_dir.join(format!("{}.json", slot.as_str()))
    }

    /// Write an empty document for every slot without a file. Existing files
    /// are left alone. Returns the slots that were created.
    pub async fn seed_missing(&self) -> Result<Vec<FileType>, ThemeError> {
        let mut created = Vec::new();
        for slot in FileType::ALL {
            let path = self.path_for(slot);
            let exists = tokio::fs::try_exists(&path)
                .await
                .map_err(|source| StorageError::Read {
                    path: path.clone(),
                    source,
                })?;
            if !exists {
                self.save(slot, &ThemeDocument::empty()).await?;
                created.push(slot);
            }
        }
        if !created.is_empty() {
            info!(
                data_dir = %self.data_dir.display(),
                slots = ?created,
                "[Themes] Seeded empty documents"
            );
        }
        Ok(created)
    }
}

#[async_trait]
impl ThemeStore for JsonFileStore {
    fn backend_tag(&self) -> &'static str {
        "json_file"
    }

    async fn load(&self, slot: FileType) -> Result<ThemeDocument, ThemeError> {
        let path = self.path_for(slot);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| StorageError::Read {
                path: path.clone(),
                source,
            })?;
        let document = serde_json::from_str(&content)
            .map_err(|source| StorageError::Parse { path, source })?;
        Ok(document)
    }

    async fn save(&self, slot: FileType, document: &ThemeDocument) -> Result<(), ThemeError> {
        let path = self.path_for(slot);
        let json = to_pretty_json(document).map_err(StorageError::Serialize)?;

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StorageError::Write {
                path: self.data_dir.clone(),
                source,
            })?;

        // Write beside the target, then swap it in.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(slot = %slot, path = %path.display(), "[Themes] Saved document");
        Ok(())
    }
}

// ── In-Memory Store ─────────────────────────────────────

/// Keeps documents in a map. Slots start missing until inserted.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<FileType, ThemeDocument>>,
    save_calls: AtomicU64,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with every slot holding an empty document.
    pub fn seeded() -> Self {
        let documents = FileType::ALL
            .into_iter()
            .map(|slot| (slot, ThemeDocument::empty()))
            .collect();
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    pub async fn insert(&self, slot: FileType, document: ThemeDocument) {
        self.documents.lock().await.insert(slot, document);
    }

    pub async fn snapshot(&self, slot: FileType) -> Option<ThemeDocument> {
        self.documents.lock().await.get(&slot).cloned()
    }

    /// Number of successful saves so far.
    pub fn save_calls(&self) -> u64 {
        self.save_calls.load(Ordering::Relaxed)
    }

    /// Make every following `save` fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl ThemeStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, slot: FileType) -> Result<ThemeDocument, ThemeError> {
        self.documents
            .lock()
            .await
            .get(&slot)
            .cloned()
            .ok_or_else(|| StorageError::Missing(slot).into())
    }

    async fn save(&self, slot: FileType, document: &ThemeDocument) -> Result<(), ThemeError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Rejected(slot).into());
        }
        self.documents.lock().await.insert(slot, document.clone());
        self.save_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
