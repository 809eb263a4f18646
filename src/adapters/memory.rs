use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

type Collections = HashMap<String, HashMap<String, Vec<u8>>>;

/// 記憶體後端，clone 之後共用同一份資料
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    collections: Arc<Mutex<Collections>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.lock().await;
        collections.get(collection).map(HashMap::len).unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Vec<u8>>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, data: &[u8]) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data.to_vec());
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool> {
        let mut collections = self.collections.lock().await;
        Ok(collections
            .get_mut(collection)
            .map(|records| records.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Vec<u8>>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_remove() {
        let storage = MemoryStorage::new();
        storage.put("things", "a", b"{}").await.unwrap();

        assert_eq!(storage.get("things", "a").await.unwrap(), Some(b"{}".to_vec()));
        assert_eq!(storage.get("things", "b").await.unwrap(), None);
        assert_eq!(storage.get("other", "a").await.unwrap(), None);

        assert!(storage.remove("things", "a").await.unwrap());
        assert!(!storage.remove("things", "a").await.unwrap());
        assert!(storage.is_empty("things").await);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let storage = MemoryStorage::new();
        let shared = storage.clone();
        storage.put("things", "a", b"1").await.unwrap();
        storage.put("things", "b", b"2").await.unwrap();

        assert_eq!(shared.len("things").await, 2);
        assert_eq!(shared.scan("things").await.unwrap().len(), 2);
        assert!(shared.scan("missing").await.unwrap().is_empty());
    }
}
