use crate::adapters::{FileStorage, MemoryStorage};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// 依設定在執行期選擇的後端
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryStorage),
    File(FileStorage),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::File(_) => "file",
        }
    }
}

impl Storage for Backend {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Backend::Memory(storage) => storage.get(collection, id).await,
            Backend::File(storage) => storage.get(collection, id).await,
        }
    }

    async fn put(&self, collection: &str, id: &str, data: &[u8]) -> Result<()> {
        match self {
            Backend::Memory(storage) => storage.put(collection, id, data).await,
            Backend::File(storage) => storage.put(collection, id, data).await,
        }
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool> {
        match self {
            Backend::Memory(storage) => storage.remove(collection, id).await,
            Backend::File(storage) => storage.remove(collection, id).await,
        }
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Vec<u8>>> {
        match self {
            Backend::Memory(storage) => storage.scan(collection).await,
            Backend::File(storage) => storage.scan(collection).await,
        }
    }
}
