// File-backed item store.
// Reads the whole data file per request and appends on create under a write lock.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::{CatalogError, Result};
use crate::model::{Item, NewItem, Page, matches_search};

use super::file;

const MISSING_FILE: &str = "Data file not found";
const UNREADABLE_FILE: &str = "Unable to read data file";
const UNWRITABLE_FILE: &str = "Unable to write data file";

/// Ordered item records persisted as a JSON array in one file.
#[derive(Debug)]
pub struct ItemStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles in `create`.
    write_lock: Mutex<()>,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty data file if none exists yet.
    pub async fn ensure_exists(&self) -> Result<()> {
        if file::fingerprint(&self.path).await.is_none() {
            info!(path = %self.path.display(), "data file missing, creating empty catalog");
            file::write_json(&self.path, &Vec::<Item>::new())
                .await
                .map_err(|e| {
                    error!(path = %self.path.display(), error = %e, "failed to create data file");
                    CatalogError::storage(UNWRITABLE_FILE)
                })?;
        }
        Ok(())
    }

    /// Load every item in file order.
    pub async fn load(&self) -> Result<Vec<Item>> {
        match file::read_json::<Vec<Item>>(&self.path).await {
            Ok(Some(items)) => Ok(items),
            Ok(None) => {
                error!(path = %self.path.display(), "data file not found");
                Err(CatalogError::storage(MISSING_FILE))
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to read data file");
                Err(CatalogError::storage(UNREADABLE_FILE))
            }
        }
    }

    /// One page of items whose name contains `search`, case-insensitively.
    pub async fn list(&self, search: &str, page: Page) -> Result<Vec<Item>> {
        let items = self.load().await?;
        let filtered: Vec<Item> = items
            .into_iter()
            .filter(|item| matches_search(item, search))
            .collect();
        debug!(
            search,
            page = page.number,
            limit = page.size,
            matched = filtered.len(),
            "listing items"
        );
        Ok(page.slice(&filtered))
    }

    /// Number of items whose name contains `search`.
    pub async fn count(&self, search: &str) -> Result<usize> {
        let items = self.load().await?;
        Ok(items
            .iter()
            .filter(|item| matches_search(item, search))
            .count())
    }

    /// Look up one item by id.
    pub async fn get(&self, id: u64) -> Result<Item> {
        self.load()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::not_found("Item not found"))
    }

    /// Append a new item with a freshly assigned id.
    pub async fn create(&self, new: NewItem) -> Result<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.load().await?;
        let id = next_id(&items, Utc::now().timestamp_millis());
        let item = new.into_item(id);
        items.push(item.clone());

        file::write_json(&self.path, &items).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to write data file");
            CatalogError::storage(UNWRITABLE_FILE)
        })?;

        info!(id = item.id, name = %item.name, "item created");
        Ok(item)
    }
}

/// Creation-time id: the clock in milliseconds, bumped past the largest existing id.
fn next_id(items: &[Item], now_millis: i64) -> u64 {
    let clock = u64::try_from(now_millis).unwrap_or(0);
    match items.iter().map(|item| item.id).max() {
        Some(max) if clock <= max => max.saturating_add(1),
        _ => clock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mock_items() -> Vec<Item> {
        [
            (1, "Laptop Pro", "Electronics", 2499.0),
            (2, "Noise Cancelling Headphones", "Electronics", 399.0),
            (3, "Ultra-Wide Monitor", "Electronics", 999.0),
            (4, "Ergonomic Chair", "Furniture", 799.0),
            (5, "Standing Desk", "Furniture", 1199.0),
        ]
        .into_iter()
        .map(|(id, name, category, price)| Item {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
        })
        .collect()
    }

    async fn seeded_store() -> (TempDir, ItemStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        file::write_json(&path, &mock_items()).await.unwrap();
        (temp_dir, ItemStore::new(path))
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let (_dir, store) = seeded_store().await;
        let all = mock_items();

        let first = store.list("", Page::new(1, 2).unwrap()).await.unwrap();
        assert_eq!(first, all[0..2]);

        let second = store.list("", Page::new(2, 2).unwrap()).await.unwrap();
        assert_eq!(second, all[2..4]);

        let beyond = store.list("", Page::new(9, 2).unwrap()).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let (_dir, store) = seeded_store().await;

        let found = store.list("LAPTOP", Page::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Laptop Pro");

        let desk = store.list("desk", Page::default()).await.unwrap();
        assert_eq!(desk.len(), 1);
        assert_eq!(desk[0].id, 5);

        assert_eq!(store.count("e").await.unwrap(), 4);
        assert_eq!(store.count("chair").await.unwrap(), 1);
        assert_eq!(store.count("zzz").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_dir, store) = seeded_store().await;

        let item = store.get(3).await.unwrap();
        assert_eq!(item.name, "Ultra-Wide Monitor");

        let missing = store.get(999).await.unwrap_err();
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "Item not found");
    }

    #[tokio::test]
    async fn test_create_appends_with_fresh_id() {
        let (_dir, store) = seeded_store().await;

        let new = NewItem::new("Wireless Mouse", "Electronics", 49.0).unwrap();
        let created = store.create(new).await.unwrap();

        assert_eq!(created.name, "Wireless Mouse");
        assert_eq!(created.category, "Electronics");
        assert_eq!(created.price, 49.0);
        assert!(created.id > 5);

        let items = store.load().await.unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_concurrent_creates_do_not_lose_writes() {
        let (_dir, store) = seeded_store().await;
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let new = NewItem::new(format!("Item {i}"), "Misc", i as f64).unwrap();
                store.create(new).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(store.load().await.unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_missing_file_is_storage_failure() {
        let temp_dir = TempDir::new().unwrap();
        let store = ItemStore::new(temp_dir.path().join("absent.json"));

        let err = store.list("", Page::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert_eq!(err.to_string(), MISSING_FILE);

        store.ensure_exists().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_file_is_storage_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();
        let store = ItemStore::new(path);

        let err = store.get(1).await.unwrap_err();
        assert_eq!(err.to_string(), UNREADABLE_FILE);
    }

    #[test]
    fn test_next_id() {
        let items = mock_items();

        assert_eq!(next_id(&[], 1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(next_id(&items, 1_700_000_000_000), 1_700_000_000_000);
        // Clock behind existing ids
        assert_eq!(next_id(&items, 3), 6);
        assert_eq!(next_id(&items, -1), 6);
    }
}
