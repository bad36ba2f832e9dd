//! Item Repository Implementation
//!
//! JSON-file implementation of Repository<CountdownItemData>. The whole list
//! lives in `data.json` as one array; every mutation rewrites the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ensure_unique_ids, purge_dismissed, refresh_all, CountdownItemData, DomainError,
    DomainResult,
};
use super::traits::Repository;

fn internal(e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal(e.to_string())
}

/// File-backed countdown item store
pub struct ItemRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl ItemRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> DomainResult<Vec<CountdownItemData>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(internal(e)),
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|e| {
            log::error!("Corrupt item file {}: {}", self.path.display(), e);
            internal(e)
        })
    }

    async fn write_items(&self, items: &[CountdownItemData]) -> DomainResult<()> {
        ensure_unique_ids(items)?;
        let json = serde_json::to_string_pretty(items).map_err(internal)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(internal)?;
        }
        // Write then rename so a crash never leaves a half-written list
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(internal)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(internal)?;
        Ok(())
    }

    /// Load the full list. A missing file is an empty list.
    pub async fn load_all(&self) -> DomainResult<Vec<CountdownItemData>> {
        let _guard = self.lock.lock().await;
        self.read_items().await
    }

    /// Replace the full list
    pub async fn save_all(&self, items: &[CountdownItemData]) -> DomainResult<()> {
        let _guard = self.lock.lock().await;
        self.write_items(items).await?;
        log::info!("Saved {} items", items.len());
        Ok(())
    }

    /// Expire due items and persist if anything changed
    pub async fn refresh_statuses(&self, now_ms: i64) -> DomainResult<Vec<CountdownItemData>> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let expired = refresh_all(&mut items, now_ms);
        if expired > 0 {
            log::info!("{} items expired", expired);
            self.write_items(&items).await?;
        }
        Ok(items)
    }

    /// Acknowledge an expired item
    pub async fn dismiss(&self, id: &str) -> DomainResult<CountdownItemData> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
        item.dismiss()?;
        let dismissed = item.clone();
        self.write_items(&items).await?;
        Ok(dismissed)
    }

    /// Remove dismissed items, returning how many were removed
    pub async fn purge_dismissed(&self) -> DomainResult<usize> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let removed = purge_dismissed(&mut items);
        if removed > 0 {
            self.write_items(&items).await?;
            log::info!("Purged {} dismissed items", removed);
        }
        Ok(removed)
    }
}

#[async_trait]
impl Repository<CountdownItemData> for ItemRepository {
    async fn create(&self, entity: &CountdownItemData) -> DomainResult<CountdownItemData> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        if items.iter().any(|item| item.id == entity.id) {
            return Err(DomainError::Conflict(format!("duplicate item id: {}", entity.id)));
        }
        items.push(entity.clone());
        self.write_items(&items).await?;
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<CountdownItemData>> {
        let items = self.load_all().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    async fn list(&self) -> DomainResult<Vec<CountdownItemData>> {
        self.load_all().await
    }

    async fn update(&self, entity: &CountdownItemData) -> DomainResult<CountdownItemData> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let slot = items
            .iter_mut()
            .find(|item| item.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", entity.id)))?;
        *slot = entity.clone();
        self.write_items(&items).await?;
        Ok(entity.clone())
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(DomainError::NotFound(format!("item {}", id)));
        }
        self.write_items(&items).await
    }
}
