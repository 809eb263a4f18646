use crate::domain::ports::Storage;
use crate::utils::error::{Result, StayError};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// 檔案後端：`<base>/<collection>/<id>.json`，每筆紀錄一個檔案
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn record_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        check_segment(collection)?;
        check_segment(id)?;
        Ok(self.base_path.join(collection).join(format!("{}.json", id)))
    }
}

// id 會直接成為檔名
fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0'])
    {
        return Err(StayError::ValidationError {
            message: format!("'{}' cannot be used as a storage key", segment),
        });
    }
    Ok(())
}

impl Storage for FileStorage {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Vec<u8>>> {
        let path = self.record_path(collection, id)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, collection: &str, id: &str, data: &[u8]) -> Result<()> {
        let path = self.record_path(collection, id)?;

        let parent = self.base_path.join(collection);
        tokio::fs::create_dir_all(&parent).await?;

        // 每次寫入各自的暫存檔再 persist，同 id 並行寫入時最後一個生效
        let data = data.to_vec();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = NamedTempFile::new_in(&parent)?;
            tmp.write_all(&data)?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StayError::IoError(std::io::Error::other(e)))??;

        tracing::debug!("Wrote record to {}", path.display());
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool> {
        let path = self.record_path(collection, id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Vec<u8>>> {
        check_segment(collection)?;
        let dir = self.base_path.join(collection);

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            records.push(tokio::fs::read(&path).await?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let storage = FileStorage::new(temp_dir.path());
        storage.put("user_bookings", "b1", b"{\"id\":\"b1\"}").await.unwrap();
        storage.put("user_bookings", "b2", b"{\"id\":\"b2\"}").await.unwrap();

        let reopened = FileStorage::new(temp_dir.path());
        assert_eq!(
            reopened.get("user_bookings", "b1").await.unwrap(),
            Some(b"{\"id\":\"b1\"}".to_vec())
        );
        assert_eq!(reopened.scan("user_bookings").await.unwrap().len(), 2);
        assert!(temp_dir.path().join("user_bookings").join("b2.json").exists());
    }

    #[tokio::test]
    async fn test_missing_records_and_collections() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert_eq!(storage.get("user_bookings", "nope").await.unwrap(), None);
        assert!(storage.scan("user_bookings").await.unwrap().is_empty());
        assert!(!storage.remove("user_bookings", "nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.put("c", "x", b"1").await.unwrap();

        assert!(storage.remove("c", "x").await.unwrap());
        assert!(!storage.remove("c", "x").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_same_id_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let writes = (0..8).map(|i| {
            let storage = storage.clone();
            tokio::spawn(async move { storage.put("c", "x", format!("{}", i).as_bytes()).await })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let stored = storage.get("c", "x").await.unwrap().unwrap();
        let value: u32 = String::from_utf8(stored).unwrap().parse().unwrap();
        assert!(value < 8);
        // 暫存檔不會留下，也不會被 scan 讀到
        assert_eq!(storage.scan("c").await.unwrap().len(), 1);
        assert_eq!(std::fs::read_dir(temp_dir.path().join("c")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.put("c", "../escape", b"1").await.is_err());
        assert!(storage.get("c", "..").await.is_err());
        assert!(storage.put("c", "", b"1").await.is_err());
    }
}
