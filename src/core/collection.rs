use crate::domain::ports::{Entity, Storage};
use crate::utils::error::{Result, StayError};
use std::marker::PhantomData;

/// 以 id 為鍵的紀錄集合，紀錄以 JSON 存入 `Storage`
///
/// 瀏覽器版本把整個集合序列化成單一 JSON 陣列；這裡只在
/// `export_json` / `import_json` 保留那個格式。
#[derive(Debug, Clone)]
pub struct Collection<S: Storage, T: Entity> {
    storage: S,
    _marker: PhantomData<fn() -> T>,
}

impl<S: Storage, T: Entity> Collection<S, T> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        match self.storage.get(T::COLLECTION, id).await? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// 新增紀錄；id 已存在時回傳 `DuplicateId`
    pub async fn insert(&self, record: &T) -> Result<()> {
        if self.storage.get(T::COLLECTION, record.id()).await?.is_some() {
            return Err(StayError::DuplicateId {
                entity: T::KIND,
                id: record.id().to_string(),
            });
        }
        self.put(record).await
    }

    /// 新增或覆寫
    pub async fn put(&self, record: &T) -> Result<()> {
        let data = serde_json::to_vec(record)?;
        self.storage.put(T::COLLECTION, record.id(), &data).await
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        self.storage.remove(T::COLLECTION, id).await
    }

    /// 依建立時間排序，同時間再以 id 排序
    pub async fn all(&self) -> Result<Vec<T>> {
        let mut records = self
            .storage
            .scan(T::COLLECTION)
            .await?
            .iter()
            .map(|data| serde_json::from_slice::<T>(data))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        records.sort_by(|a, b| {
            a.created()
                .cmp(&b.created())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(records)
    }

    pub async fn filter<F>(&self, predicate: F) -> Result<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    pub async fn find<F>(&self, predicate: F) -> Result<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.all().await?.into_iter().find(|record| predicate(record)))
    }

    /// 整個集合輸出成 JSON 陣列
    pub async fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.all().await?)?)
    }

    /// 匯入 JSON 陣列，同 id 的紀錄以匯入內容覆寫。回傳匯入筆數。
    pub async fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<T> = serde_json::from_str(json)?;
        for record in &records {
            self.put(record).await?;
        }
        tracing::debug!("Imported {} {} records", records.len(), T::KIND);
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        created_at: DateTime<Utc>,
    }

    impl Entity for Note {
        const COLLECTION: &'static str = "notes";
        const KIND: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn created(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn note(id: &str, minute: u32) -> Note {
        Note {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_creation() {
        let notes: Collection<_, Note> = Collection::new(MemoryStorage::new());
        notes.insert(&note("c", 3)).await.unwrap();
        notes.insert(&note("a", 1)).await.unwrap();
        notes.insert(&note("b", 1)).await.unwrap();

        let ids: Vec<String> = notes.all().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let notes: Collection<_, Note> = Collection::new(MemoryStorage::new());
        notes.insert(&note("a", 1)).await.unwrap();

        let err = notes.insert(&note("a", 2)).await.unwrap_err();
        assert!(matches!(err, StayError::DuplicateId { entity: "note", .. }));
        assert_eq!(notes.get("a").await.unwrap(), Some(note("a", 1)));
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_storage() {
        let source: Collection<_, Note> = Collection::new(MemoryStorage::new());
        source.insert(&note("a", 1)).await.unwrap();
        source.insert(&note("b", 2)).await.unwrap();
        let exported = source.export_json().await.unwrap();

        let target: Collection<_, Note> = Collection::new(MemoryStorage::new());
        assert_eq!(target.import_json(&exported).await.unwrap(), 2);
        assert_eq!(target.all().await.unwrap(), source.all().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error_not_empty() {
        let storage = MemoryStorage::new();
        storage.put("notes", "bad", b"not json").await.unwrap();
        let notes: Collection<_, Note> = Collection::new(storage);

        assert!(matches!(
            notes.all().await,
            Err(StayError::SerializationError(_))
        ));
    }
}
