use super::interface::{FileType, Theme, ThemeDocument, ThemeError, ThemeStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Theme repository. Every call loads the slot's document, applies one
/// in-memory operation and, for mutations, writes the whole document back.
///
/// Mutations of the same slot are serialized by a per-slot mutex, so
/// overlapping requests in this process cannot drop each other's writes.
/// Separate processes sharing one data directory still race.
pub struct ThemeRepository<S: ThemeStore + ?Sized> {
    store: Arc<S>,
    /// One lock per slot, indexed by `FileType::index`.
    slot_locks: [Mutex<()>; 5],
}

impl<S: ThemeStore + ?Sized> ThemeRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            slot_locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Load → mutate → save under the slot lock. Nothing is saved when `op` fails.
    async fn mutate<T, F>(&self, slot: FileType, action: &'static str, op: F) -> Result<T, ThemeError>
    where
        F: FnOnce(&mut ThemeDocument) -> Result<T, ThemeError>,
    {
        let _guard = self.slot_locks[slot.index()].lock().await;

        let mut document = self.store.load(slot).await?;
        match op(&mut document) {
            Ok(value) => {
                self.store.save(slot, &document).await?;
                debug!(
                    slot = %slot,
                    action,
                    backend = self.store.backend_tag(),
                    "[Themes] Document saved"
                );
                Ok(value)
            }
            Err(e) => {
                warn!(slot = %slot, action, kind = e.kind(), "[Themes] Rejected: {}", e);
                Err(e)
            }
        }
    }

    pub async fn list_themes(&self, slot: FileType) -> Result<Vec<Theme>, ThemeError> {
        Ok(self.store.load(slot).await?.theme_list)
    }

    pub async fn get_document(&self, slot: FileType) -> Result<ThemeDocument, ThemeError> {
        self.store.load(slot).await
    }

    pub async fn update_metadata(
        &self,
        slot: FileType,
        theme_name: &str,
        description: &str,
    ) -> Result<ThemeDocument, ThemeError> {
        let document = self
            .mutate(slot, "update_metadata", |doc| {
                doc.set_metadata(theme_name.to_string(), description.to_string());
                Ok(doc.clone())
            })
            .await?;
        info!(slot = %slot, "[Themes] Metadata updated");
        Ok(document)
    }

    pub async fn add_theme(&self, slot: FileType, name: &str) -> Result<Theme, ThemeError> {
        let theme = self
            .mutate(slot, "add_theme", |doc| doc.add_theme(name))
            .await?;
        info!(slot = %slot, theme = %theme.theme, "[Themes] Theme created");
        Ok(theme)
    }

    pub async fn add_items(
        &self,
        slot: FileType,
        theme_name: &str,
        items: Vec<String>,
    ) -> Result<Theme, ThemeError> {
        let requested = items.len();
        let theme = self
            .mutate(slot, "add_items", |doc| doc.add_items(theme_name, items))
            .await?;
        info!(
            slot = %slot,
            theme = %theme.theme,
            requested,
            total = theme.list.len(),
            "[Themes] Items added"
        );
        Ok(theme)
    }

    pub async fn delete_item(
        &self,
        slot: FileType,
        theme_name: &str,
        item: &str,
    ) -> Result<Theme, ThemeError> {
        let theme = self
            .mutate(slot, "delete_item", |doc| doc.delete_item(theme_name, item))
            .await?;
        info!(slot = %slot, theme = %theme.theme, item, "[Themes] Item deleted");
        Ok(theme)
    }

    pub async fn reorder_themes(
        &self,
        slot: FileType,
        names: &[String],
    ) -> Result<Vec<Theme>, ThemeError> {
        let themes = self
            .mutate(slot, "reorder_themes", |doc| doc.reorder(names))
            .await?;
        info!(slot = %slot, count = themes.len(), "[Themes] Themes reordered");
        Ok(themes)
    }

    pub async fn rename_theme(
        &self,
        slot: FileType,
        old_name: &str,
        new_name: &str,
    ) -> Result<Theme, ThemeError> {
        let theme = self
            .mutate(slot, "rename_theme", |doc| doc.rename_theme(old_name, new_name))
            .await?;
        info!(slot = %slot, from = old_name, to = %theme.theme, "[Themes] Theme renamed");
        Ok(theme)
    }
}
