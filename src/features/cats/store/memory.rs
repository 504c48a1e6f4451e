//! In-memory cat store.
//! Every operation goes through one `Mutex`, so concurrent requests see
//! the same sequential order a single-threaded server would give them.
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::features::cats::models::{Cat, CatAge, NewCat};
use crate::features::cats::store::{CatStore, StoreError};
use crate::shared::constants::{STATUS_ADOPTED, STATUS_AVAILABLE};

#[derive(Debug)]
struct InMemoryState {
    cats: Vec<Cat>,
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryCatStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryCatStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start from existing records; new ids continue after the highest one
    pub fn with_records(cats: Vec<Cat>) -> Self {
        let next_id = cats.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(InMemoryState { cats, next_id }),
        }
    }

    /// Store pre-filled with two demo cats
    pub fn seeded() -> Self {
        Self::with_records(vec![
            Cat {
                id: 1,
                name: "Pelusa".to_string(),
                age: Some(CatAge::Years(2)),
                breed: Some("Siames".to_string()),
                description: Some("Muy juguetón y curioso.".to_string()),
                status: STATUS_AVAILABLE.to_string(),
                image: String::new(),
            },
            Cat {
                id: 2,
                name: "Michi".to_string(),
                age: Some(CatAge::Years(3)),
                breed: Some("Persa".to_string()),
                description: Some("Tranquilo y cariñoso.".to_string()),
                status: STATUS_ADOPTED.to_string(),
                image: String::new(),
            },
        ])
    }
}

impl Default for InMemoryCatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatStore for InMemoryCatStore {
    async fn list_all(&self) -> Result<Vec<Cat>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.cats.clone())
    }

    async fn insert(&self, cat: NewCat) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state.cats.push(cat.with_id(id));
        Ok(id)
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if let Some(cat) = state.cats.iter_mut().find(|c| c.id == id) {
            cat.status = status.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.cats.retain(|c| c.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::FirstName;
    use fake::Fake;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_cat(name: &str) -> NewCat {
        NewCat {
            name: name.to_string(),
            status: STATUS_AVAILABLE.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids_in_order() {
        let store = InMemoryCatStore::new();
        let a = store.insert(new_cat("Pelusa")).await.unwrap();
        let b = store.insert(new_cat("Michi")).await.unwrap();
        assert_ne!(a, b);

        let cats = store.list_all().await.unwrap();
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pelusa", "Michi"]);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryCatStore::new();
        let a = store.insert(new_cat("Pelusa")).await.unwrap();
        store.delete(a).await.unwrap();
        let b = store.insert(new_cat("Michi")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_seeded_store_continues_after_seed_ids() {
        let store = InMemoryCatStore::seeded();
        assert_eq!(store.list_all().await.unwrap().len(), 2);

        let id = store.insert(new_cat("Nube")).await.unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn test_update_status_changes_only_target() {
        let store = InMemoryCatStore::seeded();
        let before = store.list_all().await.unwrap();

        store.update_status(1, STATUS_ADOPTED).await.unwrap();

        let after = store.list_all().await.unwrap();
        assert_eq!(after[0].status, STATUS_ADOPTED);
        assert_eq!(after[0].name, before[0].name);
        assert_eq!(after[1], before[1]);
    }

    #[tokio::test]
    async fn test_update_status_on_missing_id_is_noop() {
        let store = InMemoryCatStore::seeded();
        let before = store.list_all().await.unwrap();

        store.update_status(999, STATUS_ADOPTED).await.unwrap();

        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_on_missing_id_is_noop() {
        let store = InMemoryCatStore::seeded();
        store.delete(999).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(InMemoryCatStore::new());
        let n = 64;

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let store = Arc::clone(&store);
                let name: String = FirstName().fake();
                tokio::spawn(async move { store.insert(new_cat(&name)).await.unwrap() })
            })
            .collect();

        let ids: HashSet<i64> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(ids.len(), n);

        let listed: HashSet<i64> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(listed, ids);
    }
}
