//! In-memory item repository
//!
//! Owns the process-wide item collection behind an async `RwLock`.
//! Creates take the write lock, so id assignment is atomic with the
//! append and concurrent creates never collide.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// The sole domain record served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
}

struct Inner {
    items: Vec<Item>,
    next_id: u64,
}

pub struct ItemStore {
    inner: RwLock<Inner>,
}

impl ItemStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with the three fixed demo items.
    pub fn with_seed_items() -> Self {
        let items: Vec<Item> = (1..=3)
            .map(|id| Item {
                id,
                name: format!("Item {id}"),
                description: format!("This is item {id}"),
            })
            .collect();
        let next_id = items.last().map_or(1, |item| item.id + 1);

        Self {
            inner: RwLock::new(Inner { items, next_id }),
        }
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    /// Linear search for the item with the given id.
    pub async fn get(&self, id: u64) -> Option<Item> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Append a new item and return it with its assigned id.
    pub async fn create(&self, name: String, description: String) -> Item {
        let mut inner = self.inner.write().await;
        let item = Item {
            id: inner.next_id,
            name,
            description,
        };
        inner.next_id += 1;
        inner.items.push(item.clone());
        item
    }

    /// Number of items currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_items() {
        let store = ItemStore::with_seed_items();
        let items = store.list().await;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].name, "Item 1");
        assert_eq!(items[0].description, "This is item 1");
        assert_eq!(items[2].id, 3);
    }

    #[tokio::test]
    async fn test_get_returns_matching_id() {
        let store = ItemStore::with_seed_items();
        for id in 1..=3 {
            let item = store.get(id).await.unwrap();
            assert_eq!(item.id, id);
        }
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none_without_mutation() {
        let store = ItemStore::with_seed_items();
        assert!(store.get(99).await.is_none());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let store = ItemStore::with_seed_items();
        let created = store.create("Item 4".to_string(), String::new()).await;
        assert_eq!(created.id, 4);
        assert_eq!(created.name, "Item 4");
        assert_eq!(created.description, "");
        assert_eq!(store.len().await, 4);

        // Round-trip through get
        assert_eq!(store.get(4).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_on_empty_store_starts_at_one() {
        let store = ItemStore::new();
        let created = store.create("first".to_string(), "d".to_string()).await;
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = ItemStore::with_seed_items();
        for name in ["a", "b", "c"] {
            store.create(name.to_string(), String::new()).await;
        }
        let items = store.list().await;
        let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(items[3].name, "a");
        assert_eq!(items[5].name, "c");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        use std::sync::Arc;

        let store = Arc::new(ItemStore::with_seed_items());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(format!("worker {i}"), String::new()).await.id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "ids must be collision-free");
    }
}
